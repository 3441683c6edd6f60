//! Environment-driven configuration.
//!
//! # Responsibility
//! - Resolve database location and logging settings from the environment.
//!
//! # Invariants
//! - Blank variables count as unset.
//! - Resolution never fails; every setting has a default except `log_dir`,
//!   whose absence means stderr logging.

use crate::logging::default_log_level;
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "PET_STORE_DB_PATH";
pub const LOG_LEVEL_ENV: &str = "PET_STORE_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "PET_STORE_LOG_DIR";

const DEFAULT_DB_FILE_NAME: &str = "pet_store.sqlite3";

/// Resolved runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub log_level: String,
    pub log_dir: Option<PathBuf>,
}

impl AppConfig {
    /// Reads `PET_STORE_DB_PATH`, `PET_STORE_LOG_LEVEL` and `PET_STORE_LOG_DIR`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_blank = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        Self {
            db_path: non_blank(DB_PATH_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DB_FILE_NAME)),
            log_level: non_blank(LOG_LEVEL_ENV).unwrap_or_else(|| default_log_level().to_string()),
            log_dir: non_blank(LOG_DIR_ENV).map(PathBuf::from),
        }
    }
}
