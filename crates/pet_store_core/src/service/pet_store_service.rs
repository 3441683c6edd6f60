//! Pet store use-case service.
//!
//! # Responsibility
//! - Provide the store/employee/customer save entry points and the store
//!   list/get/delete entry points.
//! - Run each use-case in exactly one SQLite transaction.
//!
//! # Invariants
//! - Writes use `IMMEDIATE` transactions; reads use `DEFERRED` ones so a store
//!   and its collections come from one snapshot.
//! - Concurrent writers to the same id are last-writer-wins.

use crate::model::data::{PetStoreCustomer, PetStoreData, PetStoreEmployee};
use crate::model::entity::PetStoreId;
use crate::repo::customer_repo::SqliteCustomerRepository;
use crate::repo::employee_repo::SqliteEmployeeRepository;
use crate::repo::ensure_schema_ready;
use crate::repo::pet_store_repo::SqlitePetStoreRepository;
use crate::service::error::{ErrorStatus, ServiceResult};
use crate::service::reconcile::{
    list_pet_stores, load_pet_store, reconcile_customer, reconcile_employee,
    reconcile_pet_store, remove_pet_store,
};
use log::{error, info, warn};
use rusqlite::{Connection, Transaction, TransactionBehavior};
use std::time::Instant;

/// Transactional facade over the reconcilers.
pub struct PetStoreService<'conn> {
    conn: &'conn Connection,
}

impl<'conn> PetStoreService<'conn> {
    /// Creates a service over a migrated connection.
    ///
    /// Fails when the connection is not at the latest schema version or is
    /// missing any table/column the repositories use.
    pub fn try_new(conn: &'conn Connection) -> ServiceResult<Self> {
        ensure_schema_ready(conn)?;
        Ok(Self { conn })
    }

    /// Creates a store when `data.pet_store_id` is absent, else overwrites it
    /// and returns it with its employees and customers.
    pub fn save_pet_store(&self, data: &PetStoreData) -> ServiceResult<PetStoreData> {
        self.in_transaction("pet_store_save", TransactionBehavior::Immediate, |conn| {
            reconcile_pet_store(
                &SqlitePetStoreRepository::new(conn),
                &SqliteEmployeeRepository::new(conn),
                &SqliteCustomerRepository::new(conn),
                data,
            )
        })
    }

    /// Creates or updates an employee owned by `pet_store_id`.
    pub fn save_employee(
        &self,
        pet_store_id: PetStoreId,
        employee: &PetStoreEmployee,
    ) -> ServiceResult<PetStoreEmployee> {
        self.in_transaction("employee_save", TransactionBehavior::Immediate, |conn| {
            reconcile_employee(
                &SqlitePetStoreRepository::new(conn),
                &SqliteEmployeeRepository::new(conn),
                pet_store_id,
                employee,
            )
        })
    }

    /// Creates or updates a customer and links it with `pet_store_id`.
    pub fn save_customer(
        &self,
        pet_store_id: PetStoreId,
        customer: &PetStoreCustomer,
    ) -> ServiceResult<PetStoreCustomer> {
        self.in_transaction("customer_save", TransactionBehavior::Immediate, |conn| {
            reconcile_customer(
                &SqlitePetStoreRepository::new(conn),
                &SqliteCustomerRepository::new(conn),
                pet_store_id,
                customer,
            )
        })
    }

    /// Lists all stores with empty employee/customer collections.
    pub fn retrieve_all_pet_stores(&self) -> ServiceResult<Vec<PetStoreData>> {
        self.in_transaction("pet_store_list", TransactionBehavior::Deferred, |conn| {
            list_pet_stores(&SqlitePetStoreRepository::new(conn))
        })
    }

    /// Gets one store with employees and customers populated.
    pub fn retrieve_pet_store_by_id(&self, pet_store_id: PetStoreId) -> ServiceResult<PetStoreData> {
        self.in_transaction("pet_store_get", TransactionBehavior::Deferred, |conn| {
            load_pet_store(
                &SqlitePetStoreRepository::new(conn),
                &SqliteEmployeeRepository::new(conn),
                &SqliteCustomerRepository::new(conn),
                pet_store_id,
            )
        })
    }

    /// Deletes one store together with its employees and customer links.
    pub fn delete_pet_store_by_id(&self, pet_store_id: PetStoreId) -> ServiceResult<()> {
        self.in_transaction("pet_store_delete", TransactionBehavior::Immediate, |conn| {
            remove_pet_store(&SqlitePetStoreRepository::new(conn), pet_store_id)
        })
    }

    fn in_transaction<T>(
        &self,
        event: &'static str,
        behavior: TransactionBehavior,
        op: impl FnOnce(&Connection) -> ServiceResult<T>,
    ) -> ServiceResult<T> {
        let started_at = Instant::now();
        let result = run_in_transaction(self.conn, behavior, op);
        let duration_ms = started_at.elapsed().as_millis();

        match &result {
            Ok(_) => info!("event={event} module=service status=ok duration_ms={duration_ms}"),
            Err(err) if err.status() == ErrorStatus::Internal => error!(
                "event={event} module=service status=error duration_ms={duration_ms} error={err}"
            ),
            Err(err) => warn!(
                "event={event} module=service status=rejected duration_ms={duration_ms} error_status={} error={err}",
                err.status().code()
            ),
        }

        result
    }
}

fn run_in_transaction<T>(
    conn: &Connection,
    behavior: TransactionBehavior,
    op: impl FnOnce(&Connection) -> ServiceResult<T>,
) -> ServiceResult<T> {
    let tx = Transaction::new_unchecked(conn, behavior)?;
    let value = op(&tx)?;
    tx.commit()?;
    Ok(value)
}
