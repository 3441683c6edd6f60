//! Pet store use-case services.
//!
//! # Responsibility
//! - Reconcile transfer representations against persisted state.
//! - Own transaction scope so entity and relationship writes commit together.
//!
//! # Invariants
//! - Reconcilers fail fast on the first error; the enclosing transaction is
//!   rolled back when it is dropped uncommitted.
//! - Reconcilers receive repositories as parameters and hold no global state.

pub mod error;
pub mod pet_store_service;
pub mod reconcile;
