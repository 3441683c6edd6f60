//! Command-line front end for the pet store core.
//!
//! # Responsibility
//! - Translate subcommands and JSON payloads into service calls.
//! - Print saved representations as JSON; print classified errors to stderr.

mod cli;
mod output;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands, PayloadArgs};
use log::debug;
use output::{print_error, print_json};
use pet_store_core::db::open_db;
use pet_store_core::{
    init_logging, logging_status, AppConfig, PetStoreCustomer, PetStoreData, PetStoreEmployee,
    PetStoreService,
};
use serde::de::DeserializeOwned;
use serde_json::json;
use std::io::Read;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            print_error(&err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = resolve_config(cli);
    init_logging(&config.log_level, config.log_dir.as_deref())
        .map_err(anyhow::Error::msg)
        .context("logging init failed")?;
    if let Some((level, log_dir)) = logging_status() {
        let sink = log_dir.map_or_else(|| "stderr".to_string(), |dir| dir.display().to_string());
        debug!(
            "event=cli_start module=cli status=ok db_path={} log_level={level} log_sink={sink}",
            config.db_path.display()
        );
    }

    let conn = open_db(&config.db_path)
        .with_context(|| format!("failed to open `{}`", config.db_path.display()))?;
    let service = PetStoreService::try_new(&conn)?;

    match &cli.command {
        Commands::SaveStore(args) => {
            let input: PetStoreData = read_payload(args)?;
            print_json(&service.save_pet_store(&input)?)
        }
        Commands::SaveEmployee(args) => {
            let input: PetStoreEmployee = read_payload(&args.payload)?;
            print_json(&service.save_employee(args.store_id, &input)?)
        }
        Commands::SaveCustomer(args) => {
            let input: PetStoreCustomer = read_payload(&args.payload)?;
            print_json(&service.save_customer(args.store_id, &input)?)
        }
        Commands::ListStores => print_json(&service.retrieve_all_pet_stores()?),
        Commands::GetStore(args) => print_json(&service.retrieve_pet_store_by_id(args.store_id)?),
        Commands::DeleteStore(args) => {
            service.delete_pet_store_by_id(args.store_id)?;
            print_json(&json!({
                "message": format!(
                    "Deletion of pet store with ID={} was successful.",
                    args.store_id
                ),
            }))
        }
    }
}

fn resolve_config(cli: &Cli) -> AppConfig {
    let mut config = AppConfig::from_env();
    if let Some(db_path) = &cli.db_path {
        config.db_path.clone_from(db_path);
    }
    if let Some(level) = &cli.log_level {
        config.log_level.clone_from(level);
    }
    if let Some(log_dir) = &cli.log_dir {
        config.log_dir = Some(log_dir.clone());
    }
    config
}

fn read_payload<T: DeserializeOwned>(args: &PayloadArgs) -> Result<T> {
    let raw = match &args.json {
        Some(json) => json.clone(),
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read payload from stdin")?;
            buffer
        }
    };
    serde_json::from_str(&raw).context("payload is not valid JSON for this command")
}
