//! Core domain logic for the pet store backend.
//! Stores, their employees and their customers, persisted in SQLite.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::AppConfig;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::data::{PetStoreCustomer, PetStoreData, PetStoreEmployee};
pub use model::entity::{Customer, CustomerId, Employee, EmployeeId, PetStore, PetStoreId};
pub use repo::customer_repo::{CustomerRepository, SqliteCustomerRepository};
pub use repo::employee_repo::{EmployeeRepository, SqliteEmployeeRepository};
pub use repo::pet_store_repo::{PetStoreRepository, SqlitePetStoreRepository};
pub use repo::{RepoError, RepoResult};
pub use service::error::{ErrorStatus, PetStoreServiceError, ServiceResult};
pub use service::pet_store_service::PetStoreService;
