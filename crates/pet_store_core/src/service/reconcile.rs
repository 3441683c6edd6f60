//! Find-or-create reconcilers and read helpers over repository contracts.
//!
//! # Responsibility
//! - Upsert stores, employees and customers keyed by optional identity.
//! - Wire employee ownership and store/customer membership.
//! - Build list and detail representations of stores.
//!
//! # Invariants
//! - A present identity must resolve to an existing row, otherwise NotFound.
//! - Ownership checks compare stored foreign-key values, never object identity.
//! - Scalar fields are overwritten, never merged.
//!
//! These functions are storage-agnostic; transaction scope is the caller's.

use crate::model::data::{PetStoreCustomer, PetStoreData, PetStoreEmployee};
use crate::model::entity::{
    Customer, CustomerId, Employee, EmployeeId, PetStore, PetStoreId,
};
use crate::repo::customer_repo::CustomerRepository;
use crate::repo::employee_repo::EmployeeRepository;
use crate::repo::pet_store_repo::PetStoreRepository;
use crate::repo::RepoError;
use crate::service::error::{PetStoreServiceError, ServiceResult};

/// Creates or updates one store from its representation.
///
/// Only scalar fields are written. The returned representation carries the
/// store's current employees and customers, so a new store comes back with
/// empty collections.
pub fn reconcile_pet_store<S, E, C>(
    pet_stores: &S,
    employees: &E,
    customers: &C,
    input: &PetStoreData,
) -> ServiceResult<PetStoreData>
where
    S: PetStoreRepository,
    E: EmployeeRepository,
    C: CustomerRepository,
{
    let mut pet_store = match input.pet_store_id {
        None => PetStore::default(),
        Some(pet_store_id) => find_pet_store_by_id(pet_stores, pet_store_id)?,
    };

    input.copy_onto(&mut pet_store);
    let saved = pet_stores.save(&pet_store)?;

    let Some(pet_store_id) = input.pet_store_id else {
        return Ok(PetStoreData::from_entity(&saved));
    };
    Ok(PetStoreData::with_relations(
        &saved,
        &employees.find_by_pet_store(pet_store_id)?,
        &customers.find_by_pet_store(pet_store_id)?,
    ))
}

/// Creates or updates one employee owned by `pet_store_id`.
///
/// # Errors
/// - `PetStoreNotFound` when the store does not exist.
/// - `EmployeeNotFound` when `input.employee_id` is set but unknown.
/// - `PetStoreMismatch` when the employee belongs to another store.
pub fn reconcile_employee<S: PetStoreRepository, E: EmployeeRepository>(
    pet_stores: &S,
    employees: &E,
    pet_store_id: PetStoreId,
    input: &PetStoreEmployee,
) -> ServiceResult<PetStoreEmployee> {
    find_pet_store_by_id(pet_stores, pet_store_id)?;

    let mut employee = match input.employee_id {
        None => Employee::new(pet_store_id),
        Some(employee_id) => find_owned_employee(employees, pet_store_id, employee_id)?,
    };

    input.copy_onto(&mut employee);
    employee.pet_store_id = pet_store_id;

    let saved = employees.save(&employee)?;
    Ok(PetStoreEmployee::from(&saved))
}

/// Creates or updates one customer and links it to `pet_store_id`.
///
/// Linking is idempotent: re-saving a linked customer leaves exactly one
/// association row. A customer already linked elsewhere cannot join a second
/// store here; that membership is only reachable through
/// [`CustomerRepository::link_pet_store`].
///
/// # Errors
/// - `PetStoreNotFound` when the store does not exist.
/// - `CustomerNotFound` when `input.customer_id` is set but unknown.
/// - `PetStoreMismatch` when the customer is linked only to other stores.
pub fn reconcile_customer<S: PetStoreRepository, C: CustomerRepository>(
    pet_stores: &S,
    customers: &C,
    pet_store_id: PetStoreId,
    input: &PetStoreCustomer,
) -> ServiceResult<PetStoreCustomer> {
    find_pet_store_by_id(pet_stores, pet_store_id)?;

    let mut customer = match input.customer_id {
        None => Customer::default(),
        Some(customer_id) => find_linked_customer(customers, pet_store_id, customer_id)?,
    };

    input.copy_onto(&mut customer);

    let saved = customers.save(&customer)?;
    let customer_id = saved
        .customer_id
        .ok_or(RepoError::MissingIdentity("customer"))?;
    customers.link_pet_store(customer_id, pet_store_id)?;

    Ok(PetStoreCustomer::from(&saved))
}

/// Lists every store without relationship detail.
pub fn list_pet_stores<S: PetStoreRepository>(pet_stores: &S) -> ServiceResult<Vec<PetStoreData>> {
    let summaries = pet_stores
        .find_all()?
        .iter()
        .map(|pet_store| {
            let mut data = PetStoreData::from_entity(pet_store);
            data.clear_relations();
            data
        })
        .collect();
    Ok(summaries)
}

/// Loads one store with its employees and customers.
pub fn load_pet_store<S, E, C>(
    pet_stores: &S,
    employees: &E,
    customers: &C,
    pet_store_id: PetStoreId,
) -> ServiceResult<PetStoreData>
where
    S: PetStoreRepository,
    E: EmployeeRepository,
    C: CustomerRepository,
{
    let pet_store = find_pet_store_by_id(pet_stores, pet_store_id)?;
    let store_employees = employees.find_by_pet_store(pet_store_id)?;
    let store_customers = customers.find_by_pet_store(pet_store_id)?;
    Ok(PetStoreData::with_relations(
        &pet_store,
        &store_employees,
        &store_customers,
    ))
}

/// Deletes one store. Employees and customer links go with it.
pub fn remove_pet_store<S: PetStoreRepository>(
    pet_stores: &S,
    pet_store_id: PetStoreId,
) -> ServiceResult<()> {
    let pet_store = find_pet_store_by_id(pet_stores, pet_store_id)?;
    pet_stores.delete(&pet_store)?;
    Ok(())
}

fn find_pet_store_by_id<S: PetStoreRepository>(
    pet_stores: &S,
    pet_store_id: PetStoreId,
) -> ServiceResult<PetStore> {
    pet_stores
        .find_by_id(pet_store_id)?
        .ok_or(PetStoreServiceError::PetStoreNotFound(pet_store_id))
}

fn find_owned_employee<E: EmployeeRepository>(
    employees: &E,
    pet_store_id: PetStoreId,
    employee_id: EmployeeId,
) -> ServiceResult<Employee> {
    let employee = employees
        .find_by_id(employee_id)?
        .ok_or(PetStoreServiceError::EmployeeNotFound(employee_id))?;

    if employee.pet_store_id != pet_store_id {
        return Err(PetStoreServiceError::PetStoreMismatch {
            requested: pet_store_id,
            linked: vec![employee.pet_store_id],
        });
    }

    Ok(employee)
}

fn find_linked_customer<C: CustomerRepository>(
    customers: &C,
    pet_store_id: PetStoreId,
    customer_id: CustomerId,
) -> ServiceResult<Customer> {
    let customer = customers
        .find_by_id(customer_id)?
        .ok_or(PetStoreServiceError::CustomerNotFound(customer_id))?;

    // Unlinked customers (their stores were deleted) may be adopted by any store.
    let linked = customers.find_pet_store_ids(customer_id)?;
    if !linked.is_empty() && !linked.contains(&pet_store_id) {
        return Err(PetStoreServiceError::PetStoreMismatch {
            requested: pet_store_id,
            linked,
        });
    }

    Ok(customer)
}

#[cfg(test)]
mod tests {
    use super::{
        list_pet_stores, load_pet_store, reconcile_customer, reconcile_employee,
        reconcile_pet_store, remove_pet_store,
    };
    use crate::model::data::{PetStoreCustomer, PetStoreData, PetStoreEmployee};
    use crate::model::entity::{Customer, CustomerId, Employee, EmployeeId, PetStore, PetStoreId};
    use crate::repo::customer_repo::CustomerRepository;
    use crate::repo::employee_repo::EmployeeRepository;
    use crate::repo::pet_store_repo::PetStoreRepository;
    use crate::repo::{RepoError, RepoResult};
    use crate::service::error::PetStoreServiceError;
    use std::cell::RefCell;
    use std::collections::{BTreeMap, BTreeSet};

    #[derive(Default)]
    struct MemoryDb {
        next_id: RefCell<i64>,
        pet_stores: RefCell<BTreeMap<PetStoreId, PetStore>>,
        employees: RefCell<BTreeMap<EmployeeId, Employee>>,
        customers: RefCell<BTreeMap<CustomerId, Customer>>,
        links: RefCell<BTreeSet<(PetStoreId, CustomerId)>>,
    }

    impl MemoryDb {
        fn allocate_id(&self) -> i64 {
            let mut next = self.next_id.borrow_mut();
            *next += 1;
            *next
        }
    }

    impl PetStoreRepository for MemoryDb {
        fn find_by_id(&self, pet_store_id: PetStoreId) -> RepoResult<Option<PetStore>> {
            Ok(self.pet_stores.borrow().get(&pet_store_id).cloned())
        }

        fn find_all(&self) -> RepoResult<Vec<PetStore>> {
            Ok(self.pet_stores.borrow().values().cloned().collect())
        }

        fn save(&self, pet_store: &PetStore) -> RepoResult<PetStore> {
            let mut saved = pet_store.clone();
            let id = match saved.pet_store_id {
                Some(id) if self.pet_stores.borrow().contains_key(&id) => id,
                Some(id) => {
                    return Err(RepoError::NotFound {
                        table: "pet_store",
                        id,
                    })
                }
                None => self.allocate_id(),
            };
            saved.pet_store_id = Some(id);
            self.pet_stores.borrow_mut().insert(id, saved.clone());
            Ok(saved)
        }

        fn delete(&self, pet_store: &PetStore) -> RepoResult<()> {
            let id = pet_store
                .pet_store_id
                .ok_or(RepoError::MissingIdentity("pet_store"))?;
            self.pet_stores.borrow_mut().remove(&id);
            self.employees
                .borrow_mut()
                .retain(|_, employee| employee.pet_store_id != id);
            self.links.borrow_mut().retain(|(store, _)| *store != id);
            Ok(())
        }
    }

    impl EmployeeRepository for MemoryDb {
        fn find_by_id(&self, employee_id: EmployeeId) -> RepoResult<Option<Employee>> {
            Ok(self.employees.borrow().get(&employee_id).cloned())
        }

        fn find_by_pet_store(&self, pet_store_id: PetStoreId) -> RepoResult<Vec<Employee>> {
            Ok(self
                .employees
                .borrow()
                .values()
                .filter(|employee| employee.pet_store_id == pet_store_id)
                .cloned()
                .collect())
        }

        fn save(&self, employee: &Employee) -> RepoResult<Employee> {
            let mut saved = employee.clone();
            let id = saved.employee_id.unwrap_or_else(|| self.allocate_id());
            saved.employee_id = Some(id);
            self.employees.borrow_mut().insert(id, saved.clone());
            Ok(saved)
        }
    }

    impl CustomerRepository for MemoryDb {
        fn find_by_id(&self, customer_id: CustomerId) -> RepoResult<Option<Customer>> {
            Ok(self.customers.borrow().get(&customer_id).cloned())
        }

        fn find_by_pet_store(&self, pet_store_id: PetStoreId) -> RepoResult<Vec<Customer>> {
            let customers = self.customers.borrow();
            Ok(self
                .links
                .borrow()
                .iter()
                .filter(|(store, _)| *store == pet_store_id)
                .filter_map(|(_, customer)| customers.get(customer).cloned())
                .collect())
        }

        fn find_pet_store_ids(&self, customer_id: CustomerId) -> RepoResult<Vec<PetStoreId>> {
            Ok(self
                .links
                .borrow()
                .iter()
                .filter(|(_, customer)| *customer == customer_id)
                .map(|(store, _)| *store)
                .collect())
        }

        fn save(&self, customer: &Customer) -> RepoResult<Customer> {
            let mut saved = customer.clone();
            let id = saved.customer_id.unwrap_or_else(|| self.allocate_id());
            saved.customer_id = Some(id);
            self.customers.borrow_mut().insert(id, saved.clone());
            Ok(saved)
        }

        fn link_pet_store(
            &self,
            customer_id: CustomerId,
            pet_store_id: PetStoreId,
        ) -> RepoResult<bool> {
            Ok(self.links.borrow_mut().insert((pet_store_id, customer_id)))
        }
    }

    fn store_input(name: &str) -> PetStoreData {
        PetStoreData {
            pet_store_name: name.to_string(),
            pet_store_city: "Springfield".to_string(),
            ..PetStoreData::default()
        }
    }

    fn seeded_store(db: &MemoryDb, name: &str) -> PetStoreId {
        reconcile_pet_store(db, db, db, &store_input(name))
            .unwrap()
            .pet_store_id
            .unwrap()
    }

    #[test]
    fn new_store_gets_fresh_identity() {
        let db = MemoryDb::default();
        let first = reconcile_pet_store(&db, &db, &db, &store_input("Paws")).unwrap();
        let second = reconcile_pet_store(&db, &db, &db, &store_input("Claws")).unwrap();

        assert_ne!(first.pet_store_id, second.pet_store_id);
        assert_eq!(second.pet_store_name, "Claws");
    }

    #[test]
    fn unknown_store_identity_is_not_found() {
        let db = MemoryDb::default();
        let mut input = store_input("Ghost");
        input.pet_store_id = Some(404);

        let err = reconcile_pet_store(&db, &db, &db, &input).unwrap_err();
        assert!(matches!(err, PetStoreServiceError::PetStoreNotFound(404)));
    }

    #[test]
    fn store_update_returns_current_relations() {
        let db = MemoryDb::default();
        let store = seeded_store(&db, "Busy");
        reconcile_employee(&db, &db, store, &PetStoreEmployee::default()).unwrap();
        reconcile_customer(&db, &db, store, &PetStoreCustomer::default()).unwrap();

        let mut update = store_input("Renamed");
        update.pet_store_id = Some(store);
        let saved = reconcile_pet_store(&db, &db, &db, &update).unwrap();

        assert_eq!(saved.pet_store_name, "Renamed");
        assert_eq!(saved.employees.len(), 1);
        assert_eq!(saved.customers.len(), 1);
        assert_eq!(saved, load_pet_store(&db, &db, &db, store).unwrap());
    }

    #[test]
    fn employee_update_through_foreign_store_is_rejected() {
        let db = MemoryDb::default();
        let home = seeded_store(&db, "Home");
        let other = seeded_store(&db, "Other");
        let employee = reconcile_employee(&db, &db, home, &PetStoreEmployee::default()).unwrap();

        let err = reconcile_employee(&db, &db, other, &employee).unwrap_err();
        match err {
            PetStoreServiceError::PetStoreMismatch { requested, linked } => {
                assert_eq!(requested, other);
                assert_eq!(linked, vec![home]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn customer_link_is_recorded_once_per_store() {
        let db = MemoryDb::default();
        let store = seeded_store(&db, "Home");
        let input = PetStoreCustomer {
            customer_email: "a@example.com".to_string(),
            ..PetStoreCustomer::default()
        };

        let saved = reconcile_customer(&db, &db, store, &input).unwrap();
        reconcile_customer(&db, &db, store, &saved).unwrap();

        assert_eq!(db.links.borrow().len(), 1);
    }

    #[test]
    fn orphaned_customer_can_join_another_store() {
        let db = MemoryDb::default();
        let first = seeded_store(&db, "First");
        let second = seeded_store(&db, "Second");
        let customer =
            reconcile_customer(&db, &db, first, &PetStoreCustomer::default()).unwrap();

        remove_pet_store(&db, first).unwrap();
        reconcile_customer(&db, &db, second, &customer).unwrap();

        let customer_id = customer.customer_id.unwrap();
        assert_eq!(db.find_pet_store_ids(customer_id).unwrap(), vec![second]);
    }

    #[test]
    fn list_omits_relations_and_detail_includes_them() {
        let db = MemoryDb::default();
        let store = seeded_store(&db, "Busy");
        reconcile_employee(&db, &db, store, &PetStoreEmployee::default()).unwrap();
        reconcile_customer(&db, &db, store, &PetStoreCustomer::default()).unwrap();

        let listed = list_pet_stores(&db).unwrap();
        assert_eq!(listed.len(), 1);
        assert!(listed[0].employees.is_empty());
        assert!(listed[0].customers.is_empty());

        let detail = load_pet_store(&db, &db, &db, store).unwrap();
        assert_eq!(detail.employees.len(), 1);
        assert_eq!(detail.customers.len(), 1);
    }
}
