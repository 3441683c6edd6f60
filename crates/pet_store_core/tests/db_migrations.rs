use pet_store_core::db::migrations::{apply_migrations, latest_version};
use pet_store_core::db::{ensure_foreign_keys, open_db, open_db_in_memory, DbError};
use pet_store_core::{PetStoreService, PetStoreServiceError, RepoError};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "pet_store");
    assert_table_exists(&conn, "employee");
    assert_table_exists(&conn, "customer");
    assert_table_exists(&conn, "pet_store_customer");
}

#[test]
fn opening_same_database_twice_is_idempotent_and_keeps_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pet_store.db");

    let conn_first = open_db(&path).unwrap();
    conn_first
        .execute(
            "INSERT INTO pet_store (pet_store_name) VALUES ('Persisted');",
            [],
        )
        .unwrap();
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    let count: i64 = conn_second
        .query_row("SELECT COUNT(*) FROM pet_store;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    match err {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn service_rejects_unmigrated_connection() {
    let conn = Connection::open_in_memory().unwrap();

    let err = PetStoreService::try_new(&conn).err().unwrap();
    assert!(matches!(
        err,
        PetStoreServiceError::Repo(RepoError::UninitializedConnection {
            actual_version: 0,
            ..
        })
    ));
}

#[test]
fn foreign_keys_are_enforced_on_opened_connections() {
    let conn = open_db_in_memory().unwrap();
    let enabled: i64 = conn
        .query_row("PRAGMA foreign_keys;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(enabled, 1);

    let err = conn.execute(
        "INSERT INTO employee (pet_store_id, employee_first_name) VALUES (12345, 'Orphan');",
        [],
    );
    assert!(err.is_err());
}

#[test]
fn service_rejects_migrated_connection_without_foreign_keys() {
    let mut conn = Connection::open_in_memory().unwrap();
    apply_migrations(&mut conn).unwrap();

    assert!(matches!(
        ensure_foreign_keys(&conn),
        Err(DbError::ForeignKeysDisabled)
    ));
    let err = PetStoreService::try_new(&conn).err().unwrap();
    assert!(matches!(
        err,
        PetStoreServiceError::Repo(RepoError::Db(DbError::ForeignKeysDisabled))
    ));

    conn.execute_batch("PRAGMA foreign_keys = ON;").unwrap();
    assert!(PetStoreService::try_new(&conn).is_ok());
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
