use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pet-store")]
#[command(about = "Manage pet stores, their employees and their customers")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// SQLite database file (overrides PET_STORE_DB_PATH)
    #[arg(long, global = true)]
    pub db_path: Option<PathBuf>,

    /// Log level: trace|debug|info|warn|error (overrides PET_STORE_LOG_LEVEL)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Absolute directory for rotated log files; stderr when unset
    /// (overrides PET_STORE_LOG_DIR)
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a store, or update it when the payload carries `petStoreId`
    SaveStore(PayloadArgs),
    /// Create or update an employee of a store
    SaveEmployee(StoreScopedArgs),
    /// Create or update a customer and link it to a store
    SaveCustomer(StoreScopedArgs),
    /// List all stores without employees and customers
    ListStores,
    /// Show one store with its employees and customers
    GetStore(StoreIdArgs),
    /// Delete one store and its employees
    DeleteStore(StoreIdArgs),
}

#[derive(Args)]
pub struct PayloadArgs {
    /// JSON payload; read from stdin when omitted
    #[arg(long)]
    pub json: Option<String>,
}

#[derive(Args)]
pub struct StoreScopedArgs {
    /// Owning store id
    #[arg(long)]
    pub store_id: i64,

    #[command(flatten)]
    pub payload: PayloadArgs,
}

#[derive(Args)]
pub struct StoreIdArgs {
    /// Store id
    pub store_id: i64,
}
