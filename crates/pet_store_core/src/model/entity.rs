//! Persisted entity shapes.

/// Database identity of a pet store.
pub type PetStoreId = i64;
/// Database identity of an employee.
pub type EmployeeId = i64;
/// Database identity of a customer.
pub type CustomerId = i64;

/// Pet store row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PetStore {
    /// `None` until the first save assigns an id.
    pub pet_store_id: Option<PetStoreId>,
    pub pet_store_name: String,
    pub pet_store_address: String,
    pub pet_store_city: String,
    pub pet_store_state: String,
    pub pet_store_zip: String,
    pub pet_store_phone: String,
}

/// Employee row. Always owned by exactly one store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    pub employee_id: Option<EmployeeId>,
    /// Owning store. Navigation only; the store does not hold employees.
    pub pet_store_id: PetStoreId,
    pub employee_first_name: String,
    pub employee_last_name: String,
    pub employee_phone_number: String,
    pub employee_job_title: String,
}

impl Employee {
    /// Creates an unsaved employee owned by `pet_store_id`.
    pub fn new(pet_store_id: PetStoreId) -> Self {
        Self {
            employee_id: None,
            pet_store_id,
            employee_first_name: String::new(),
            employee_last_name: String::new(),
            employee_phone_number: String::new(),
            employee_job_title: String::new(),
        }
    }
}

/// Customer row. Store membership is kept in `pet_store_customer`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Customer {
    pub customer_id: Option<CustomerId>,
    pub customer_first_name: String,
    pub customer_last_name: String,
    pub customer_email: String,
}
