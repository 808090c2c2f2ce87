use notebook_core::db::migrations::latest_version;
use notebook_core::db::{open_db, open_db_in_memory, DbError};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "categories");
    assert_table_exists(&conn, "notes");
    assert_table_exists(&conn, "note_categories");
}

#[test]
fn opened_connection_enforces_foreign_keys() {
    let conn = open_db_in_memory().unwrap();
    let enabled: i64 = conn
        .query_row("PRAGMA foreign_keys;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(enabled, 1);

    let err = conn
        .execute(
            "INSERT INTO note_categories (note_id, category_id) VALUES (1, 1);",
            [],
        )
        .unwrap_err();
    assert!(err.to_string().contains("FOREIGN KEY"));
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notebook.db");

    let conn_first = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_first), latest_version());
    conn_first
        .execute("INSERT INTO categories (name) VALUES ('Work');", [])
        .unwrap();
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    let count: i64 = conn_second
        .query_row("SELECT COUNT(*) FROM categories;", [], |row| row.get(0))
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
fn category_names_are_unique_at_the_store_level() {
    let conn = open_db_in_memory().unwrap();
    conn.execute("INSERT INTO categories (name) VALUES ('Work');", [])
        .unwrap();

    let err = conn
        .execute("INSERT INTO categories (name) VALUES ('Work');", [])
        .unwrap_err();
    assert!(DbError::from(err).is_unique_violation());

    // Default collation is exact, so case variants are distinct.
    conn.execute("INSERT INTO categories (name) VALUES ('work');", [])
        .unwrap();
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
