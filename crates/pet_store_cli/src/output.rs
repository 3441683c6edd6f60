use pet_store_core::PetStoreServiceError;
use serde::Serialize;
use serde_json::json;

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Prints `{"status": .., "message": ..}` to stderr. Errors that do not come
/// from the service are reported as 500.
pub fn print_error(err: &anyhow::Error) {
    let status = err
        .downcast_ref::<PetStoreServiceError>()
        .map_or(500, |service_err| service_err.status().code());
    let body = json!({
        "status": status,
        "message": format!("{err:#}"),
    });
    eprintln!("{body}");
}
