//! Transfer representations for pet store use-cases.
//!
//! # Responsibility
//! - Carry caller input into the reconcilers.
//! - Carry saved state back out, including nested relationship views.
//!
//! # Invariants
//! - Field names serialize in camelCase (`petStoreId`, `employeeFirstName`,
//!   ...) to keep the established JSON contract.
//! - Missing ids deserialize as `None`; missing text fields as empty strings.
//! - Nested collections are ordered by id ascending.

use crate::model::entity::{
    Customer, CustomerId, Employee, EmployeeId, PetStore, PetStoreId,
};
use serde::{Deserialize, Serialize};

/// Store representation with optional nested employees and customers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PetStoreData {
    pub pet_store_id: Option<PetStoreId>,
    pub pet_store_name: String,
    pub pet_store_address: String,
    pub pet_store_city: String,
    pub pet_store_state: String,
    pub pet_store_zip: String,
    pub pet_store_phone: String,
    pub customers: Vec<PetStoreCustomer>,
    pub employees: Vec<PetStoreEmployee>,
}

impl PetStoreData {
    /// Builds a representation with empty relationship collections.
    pub fn from_entity(pet_store: &PetStore) -> Self {
        Self {
            pet_store_id: pet_store.pet_store_id,
            pet_store_name: pet_store.pet_store_name.clone(),
            pet_store_address: pet_store.pet_store_address.clone(),
            pet_store_city: pet_store.pet_store_city.clone(),
            pet_store_state: pet_store.pet_store_state.clone(),
            pet_store_zip: pet_store.pet_store_zip.clone(),
            pet_store_phone: pet_store.pet_store_phone.clone(),
            customers: Vec::new(),
            employees: Vec::new(),
        }
    }

    /// Builds a representation with populated relationship collections.
    pub fn with_relations(
        pet_store: &PetStore,
        employees: &[Employee],
        customers: &[Customer],
    ) -> Self {
        let mut data = Self::from_entity(pet_store);
        data.employees = employees.iter().map(PetStoreEmployee::from).collect();
        data.customers = customers.iter().map(PetStoreCustomer::from).collect();
        data
    }

    /// Overwrites every scalar field of `pet_store`, id included.
    pub fn copy_onto(&self, pet_store: &mut PetStore) {
        pet_store.pet_store_id = self.pet_store_id;
        pet_store.pet_store_name.clone_from(&self.pet_store_name);
        pet_store.pet_store_address.clone_from(&self.pet_store_address);
        pet_store.pet_store_city.clone_from(&self.pet_store_city);
        pet_store.pet_store_state.clone_from(&self.pet_store_state);
        pet_store.pet_store_zip.clone_from(&self.pet_store_zip);
        pet_store.pet_store_phone.clone_from(&self.pet_store_phone);
    }

    /// Drops nested relationship detail (list views).
    pub fn clear_relations(&mut self) {
        self.customers.clear();
        self.employees.clear();
    }
}

/// Employee representation. The owning store is implied by the call site.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PetStoreEmployee {
    pub employee_id: Option<EmployeeId>,
    pub employee_first_name: String,
    pub employee_last_name: String,
    pub employee_phone_number: String,
    pub employee_job_title: String,
}

impl PetStoreEmployee {
    /// Overwrites the scalar fields of `employee`. Id and owner are untouched.
    pub fn copy_onto(&self, employee: &mut Employee) {
        employee
            .employee_first_name
            .clone_from(&self.employee_first_name);
        employee
            .employee_last_name
            .clone_from(&self.employee_last_name);
        employee
            .employee_phone_number
            .clone_from(&self.employee_phone_number);
        employee
            .employee_job_title
            .clone_from(&self.employee_job_title);
    }
}

impl From<&Employee> for PetStoreEmployee {
    fn from(employee: &Employee) -> Self {
        Self {
            employee_id: employee.employee_id,
            employee_first_name: employee.employee_first_name.clone(),
            employee_last_name: employee.employee_last_name.clone(),
            employee_phone_number: employee.employee_phone_number.clone(),
            employee_job_title: employee.employee_job_title.clone(),
        }
    }
}

/// Customer representation without its store memberships.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PetStoreCustomer {
    pub customer_id: Option<CustomerId>,
    pub customer_first_name: String,
    pub customer_last_name: String,
    pub customer_email: String,
}

impl PetStoreCustomer {
    /// Overwrites the scalar fields of `customer`. Id is untouched.
    pub fn copy_onto(&self, customer: &mut Customer) {
        customer
            .customer_first_name
            .clone_from(&self.customer_first_name);
        customer
            .customer_last_name
            .clone_from(&self.customer_last_name);
        customer.customer_email.clone_from(&self.customer_email);
    }
}

impl From<&Customer> for PetStoreCustomer {
    fn from(customer: &Customer) -> Self {
        Self {
            customer_id: customer.customer_id,
            customer_first_name: customer.customer_first_name.clone(),
            customer_last_name: customer.customer_last_name.clone(),
            customer_email: customer.customer_email.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{PetStoreData, PetStoreEmployee};
    use crate::model::entity::{Employee, PetStore};

    #[test]
    fn copy_onto_overwrites_instead_of_merging() {
        let mut pet_store = PetStore {
            pet_store_id: Some(7),
            pet_store_name: "Old Name".to_string(),
            pet_store_phone: "555-0100".to_string(),
            ..PetStore::default()
        };
        let input = PetStoreData {
            pet_store_id: Some(7),
            pet_store_name: "New Name".to_string(),
            ..PetStoreData::default()
        };

        input.copy_onto(&mut pet_store);

        assert_eq!(pet_store.pet_store_name, "New Name");
        assert_eq!(pet_store.pet_store_phone, "");
        assert_eq!(pet_store.pet_store_id, Some(7));
    }

    #[test]
    fn employee_copy_keeps_identity_and_owner() {
        let mut employee = Employee::new(3);
        employee.employee_id = Some(11);
        let input = PetStoreEmployee {
            employee_id: Some(99),
            employee_first_name: "Ada".to_string(),
            employee_job_title: "Groomer".to_string(),
            ..PetStoreEmployee::default()
        };

        input.copy_onto(&mut employee);

        assert_eq!(employee.employee_id, Some(11));
        assert_eq!(employee.pet_store_id, 3);
        assert_eq!(employee.employee_first_name, "Ada");
        assert_eq!(employee.employee_job_title, "Groomer");
    }
}
