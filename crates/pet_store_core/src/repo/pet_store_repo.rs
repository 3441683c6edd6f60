//! Pet store repository contract and SQLite implementation.
//!
//! # Invariants
//! - `save` inserts when `pet_store_id` is `None` and updates otherwise.
//! - Updating or deleting a missing id is `NotFound`, never a silent no-op.
//! - Deleting a store cascades to its employees and customer links through
//!   foreign keys; customer rows survive.

use crate::model::entity::{PetStore, PetStoreId};
use crate::repo::{RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension, Row};

const TABLE: &str = "pet_store";

const PET_STORE_SELECT_SQL: &str = "SELECT
    pet_store_id,
    pet_store_name,
    pet_store_address,
    pet_store_city,
    pet_store_state,
    pet_store_zip,
    pet_store_phone
FROM pet_store";

/// Repository interface for pet store persistence.
pub trait PetStoreRepository {
    fn find_by_id(&self, pet_store_id: PetStoreId) -> RepoResult<Option<PetStore>>;
    /// Returns every store ordered by id.
    fn find_all(&self) -> RepoResult<Vec<PetStore>>;
    /// Inserts or updates; returns the stored row with its id assigned.
    fn save(&self, pet_store: &PetStore) -> RepoResult<PetStore>;
    fn delete(&self, pet_store: &PetStore) -> RepoResult<()>;
}

/// SQLite-backed pet store repository.
pub struct SqlitePetStoreRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePetStoreRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl PetStoreRepository for SqlitePetStoreRepository<'_> {
    fn find_by_id(&self, pet_store_id: PetStoreId) -> RepoResult<Option<PetStore>> {
        let pet_store = self
            .conn
            .query_row(
                &format!("{PET_STORE_SELECT_SQL} WHERE pet_store_id = ?1;"),
                [pet_store_id],
                parse_pet_store_row,
            )
            .optional()?;
        Ok(pet_store)
    }

    fn find_all(&self) -> RepoResult<Vec<PetStore>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PET_STORE_SELECT_SQL} ORDER BY pet_store_id ASC;"))?;
        let pet_stores = stmt
            .query_map([], parse_pet_store_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(pet_stores)
    }

    fn save(&self, pet_store: &PetStore) -> RepoResult<PetStore> {
        let Some(pet_store_id) = pet_store.pet_store_id else {
            self.conn.execute(
                "INSERT INTO pet_store (
                    pet_store_name,
                    pet_store_address,
                    pet_store_city,
                    pet_store_state,
                    pet_store_zip,
                    pet_store_phone
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
                params![
                    pet_store.pet_store_name,
                    pet_store.pet_store_address,
                    pet_store.pet_store_city,
                    pet_store.pet_store_state,
                    pet_store.pet_store_zip,
                    pet_store.pet_store_phone,
                ],
            )?;

            let mut saved = pet_store.clone();
            saved.pet_store_id = Some(self.conn.last_insert_rowid());
            return Ok(saved);
        };

        let changed = self.conn.execute(
            "UPDATE pet_store
             SET
                pet_store_name = ?2,
                pet_store_address = ?3,
                pet_store_city = ?4,
                pet_store_state = ?5,
                pet_store_zip = ?6,
                pet_store_phone = ?7
             WHERE pet_store_id = ?1;",
            params![
                pet_store_id,
                pet_store.pet_store_name,
                pet_store.pet_store_address,
                pet_store.pet_store_city,
                pet_store.pet_store_state,
                pet_store.pet_store_zip,
                pet_store.pet_store_phone,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                table: TABLE,
                id: pet_store_id,
            });
        }

        Ok(pet_store.clone())
    }

    fn delete(&self, pet_store: &PetStore) -> RepoResult<()> {
        let pet_store_id = pet_store
            .pet_store_id
            .ok_or(RepoError::MissingIdentity(TABLE))?;

        let changed = self
            .conn
            .execute("DELETE FROM pet_store WHERE pet_store_id = ?1;", [pet_store_id])?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                table: TABLE,
                id: pet_store_id,
            });
        }

        Ok(())
    }
}

fn parse_pet_store_row(row: &Row<'_>) -> rusqlite::Result<PetStore> {
    Ok(PetStore {
        pet_store_id: Some(row.get("pet_store_id")?),
        pet_store_name: row.get("pet_store_name")?,
        pet_store_address: row.get("pet_store_address")?,
        pet_store_city: row.get("pet_store_city")?,
        pet_store_state: row.get("pet_store_state")?,
        pet_store_zip: row.get("pet_store_zip")?,
        pet_store_phone: row.get("pet_store_phone")?,
    })
}
