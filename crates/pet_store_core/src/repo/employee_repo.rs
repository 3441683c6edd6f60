//! Employee repository contract and SQLite implementation.
//!
//! # Invariants
//! - `employee.pet_store_id` is a real foreign key; saving an employee for a
//!   missing store fails at the database.
//! - A store's employee set is `SELECT ... WHERE pet_store_id = ?`, so
//!   re-saving an employee can never duplicate it.

use crate::model::entity::{Employee, EmployeeId, PetStoreId};
use crate::repo::{RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension, Row};

const TABLE: &str = "employee";

const EMPLOYEE_SELECT_SQL: &str = "SELECT
    employee_id,
    pet_store_id,
    employee_first_name,
    employee_last_name,
    employee_phone_number,
    employee_job_title
FROM employee";

/// Repository interface for employee persistence.
pub trait EmployeeRepository {
    fn find_by_id(&self, employee_id: EmployeeId) -> RepoResult<Option<Employee>>;
    /// Returns the employees owned by one store, ordered by id.
    fn find_by_pet_store(&self, pet_store_id: PetStoreId) -> RepoResult<Vec<Employee>>;
    /// Inserts or updates; returns the stored row with its id assigned.
    fn save(&self, employee: &Employee) -> RepoResult<Employee>;
}

/// SQLite-backed employee repository.
pub struct SqliteEmployeeRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEmployeeRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl EmployeeRepository for SqliteEmployeeRepository<'_> {
    fn find_by_id(&self, employee_id: EmployeeId) -> RepoResult<Option<Employee>> {
        let employee = self
            .conn
            .query_row(
                &format!("{EMPLOYEE_SELECT_SQL} WHERE employee_id = ?1;"),
                [employee_id],
                parse_employee_row,
            )
            .optional()?;
        Ok(employee)
    }

    fn find_by_pet_store(&self, pet_store_id: PetStoreId) -> RepoResult<Vec<Employee>> {
        let mut stmt = self.conn.prepare(&format!(
            "{EMPLOYEE_SELECT_SQL}
             WHERE pet_store_id = ?1
             ORDER BY employee_id ASC;"
        ))?;
        let employees = stmt
            .query_map([pet_store_id], parse_employee_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(employees)
    }

    fn save(&self, employee: &Employee) -> RepoResult<Employee> {
        let Some(employee_id) = employee.employee_id else {
            self.conn.execute(
                "INSERT INTO employee (
                    pet_store_id,
                    employee_first_name,
                    employee_last_name,
                    employee_phone_number,
                    employee_job_title
                ) VALUES (?1, ?2, ?3, ?4, ?5);",
                params![
                    employee.pet_store_id,
                    employee.employee_first_name,
                    employee.employee_last_name,
                    employee.employee_phone_number,
                    employee.employee_job_title,
                ],
            )?;

            let mut saved = employee.clone();
            saved.employee_id = Some(self.conn.last_insert_rowid());
            return Ok(saved);
        };

        let changed = self.conn.execute(
            "UPDATE employee
             SET
                pet_store_id = ?2,
                employee_first_name = ?3,
                employee_last_name = ?4,
                employee_phone_number = ?5,
                employee_job_title = ?6
             WHERE employee_id = ?1;",
            params![
                employee_id,
                employee.pet_store_id,
                employee.employee_first_name,
                employee.employee_last_name,
                employee.employee_phone_number,
                employee.employee_job_title,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                table: TABLE,
                id: employee_id,
            });
        }

        Ok(employee.clone())
    }
}

fn parse_employee_row(row: &Row<'_>) -> rusqlite::Result<Employee> {
    Ok(Employee {
        employee_id: Some(row.get("employee_id")?),
        pet_store_id: row.get("pet_store_id")?,
        employee_first_name: row.get("employee_first_name")?,
        employee_last_name: row.get("employee_last_name")?,
        employee_phone_number: row.get("employee_phone_number")?,
        employee_job_title: row.get("employee_job_title")?,
    })
}
