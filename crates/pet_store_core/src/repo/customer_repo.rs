//! Customer repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist customer rows.
//! - Own the `pet_store_customer` association, which is the single record of
//!   store/customer membership in both directions.
//!
//! # Invariants
//! - One association row per (store, customer) pair; linking twice is a no-op.
//! - Store and customer views of the association are read from the same table,
//!   so they cannot disagree.

use crate::model::entity::{Customer, CustomerId, PetStoreId};
use crate::repo::{RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension, Row};

const TABLE: &str = "customer";

/// Repository interface for customer persistence and store membership.
pub trait CustomerRepository {
    fn find_by_id(&self, customer_id: CustomerId) -> RepoResult<Option<Customer>>;
    /// Returns the customers linked to one store, ordered by id.
    fn find_by_pet_store(&self, pet_store_id: PetStoreId) -> RepoResult<Vec<Customer>>;
    /// Returns the ids of every store linked to one customer, ascending.
    fn find_pet_store_ids(&self, customer_id: CustomerId) -> RepoResult<Vec<PetStoreId>>;
    /// Inserts or updates; returns the stored row with its id assigned.
    fn save(&self, customer: &Customer) -> RepoResult<Customer>;
    /// Links customer and store. Returns `false` when the link already existed.
    fn link_pet_store(&self, customer_id: CustomerId, pet_store_id: PetStoreId)
        -> RepoResult<bool>;
}

/// SQLite-backed customer repository.
pub struct SqliteCustomerRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCustomerRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl CustomerRepository for SqliteCustomerRepository<'_> {
    fn find_by_id(&self, customer_id: CustomerId) -> RepoResult<Option<Customer>> {
        let customer = self
            .conn
            .query_row(
                "SELECT
                    customer_id,
                    customer_first_name,
                    customer_last_name,
                    customer_email
                 FROM customer
                 WHERE customer_id = ?1;",
                [customer_id],
                parse_customer_row,
            )
            .optional()?;
        Ok(customer)
    }

    fn find_by_pet_store(&self, pet_store_id: PetStoreId) -> RepoResult<Vec<Customer>> {
        let mut stmt = self.conn.prepare(
            "SELECT
                c.customer_id AS customer_id,
                c.customer_first_name AS customer_first_name,
                c.customer_last_name AS customer_last_name,
                c.customer_email AS customer_email
             FROM customer c
             INNER JOIN pet_store_customer psc ON psc.customer_id = c.customer_id
             WHERE psc.pet_store_id = ?1
             ORDER BY c.customer_id ASC;",
        )?;
        let customers = stmt
            .query_map([pet_store_id], parse_customer_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(customers)
    }

    fn find_pet_store_ids(&self, customer_id: CustomerId) -> RepoResult<Vec<PetStoreId>> {
        let mut stmt = self.conn.prepare(
            "SELECT pet_store_id
             FROM pet_store_customer
             WHERE customer_id = ?1
             ORDER BY pet_store_id ASC;",
        )?;
        let ids = stmt
            .query_map([customer_id], |row| row.get(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ids)
    }

    fn save(&self, customer: &Customer) -> RepoResult<Customer> {
        let Some(customer_id) = customer.customer_id else {
            self.conn.execute(
                "INSERT INTO customer (
                    customer_first_name,
                    customer_last_name,
                    customer_email
                ) VALUES (?1, ?2, ?3);",
                params![
                    customer.customer_first_name,
                    customer.customer_last_name,
                    customer.customer_email,
                ],
            )?;

            let mut saved = customer.clone();
            saved.customer_id = Some(self.conn.last_insert_rowid());
            return Ok(saved);
        };

        let changed = self.conn.execute(
            "UPDATE customer
             SET
                customer_first_name = ?2,
                customer_last_name = ?3,
                customer_email = ?4
             WHERE customer_id = ?1;",
            params![
                customer_id,
                customer.customer_first_name,
                customer.customer_last_name,
                customer.customer_email,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                table: TABLE,
                id: customer_id,
            });
        }

        Ok(customer.clone())
    }

    fn link_pet_store(
        &self,
        customer_id: CustomerId,
        pet_store_id: PetStoreId,
    ) -> RepoResult<bool> {
        let inserted = self.conn.execute(
            "INSERT OR IGNORE INTO pet_store_customer (pet_store_id, customer_id)
             VALUES (?1, ?2);",
            params![pet_store_id, customer_id],
        )?;
        Ok(inserted == 1)
    }
}

fn parse_customer_row(row: &Row<'_>) -> rusqlite::Result<Customer> {
    Ok(Customer {
        customer_id: Some(row.get("customer_id")?),
        customer_first_name: row.get("customer_first_name")?,
        customer_last_name: row.get("customer_last_name")?,
        customer_email: row.get("customer_email")?,
    })
}
