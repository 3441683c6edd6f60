//! Domain model for pet stores, employees and customers.
//!
//! # Responsibility
//! - Define the persisted entity shapes used by repositories.
//! - Define the transfer representations handed to and returned by services.
//!
//! # Invariants
//! - Identities are database-assigned; `None` means "not yet persisted".
//! - Entities carry no relationship collections. Store/employee ownership is a
//!   foreign key on `Employee`; store/customer membership lives in the
//!   association table and is loaded on demand.

pub mod data;
pub mod entity;
