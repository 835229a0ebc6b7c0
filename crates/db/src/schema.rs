//! Schema creation and additive migration for the `legos` table.
//!
//! The table started with five columns. Later releases added `series` and
//! `favorite`; [`initialize`] brings any earlier store up to date by adding
//! whatever is missing, without touching existing rows.

use sqlx::sqlite::SqliteConnection;
use sqlx::Connection;

use crate::Store;

/// Name of the catalog table.
pub const TABLE: &str = "legos";

/// The table as first released. Never change this; add to [`ADDED_COLUMNS`].
const CREATE_TABLE: &str = "\
    CREATE TABLE IF NOT EXISTS legos (\
        articul TEXT PRIMARY KEY, \
        name TEXT NOT NULL, \
        part_count INTEGER, \
        all_parts INTEGER, \
        picture TEXT\
    )";

/// Columns added after the first release, in the order they were introduced,
/// with the definition used by `ALTER TABLE ... ADD COLUMN`.
///
/// Each definition must be valid for existing rows: nullable, or NOT NULL
/// with a constant default.
pub const ADDED_COLUMNS: &[(&str, &str)] = &[
    ("series", "TEXT"),
    ("favorite", "INTEGER NOT NULL DEFAULT 0"),
];

/// Create the table if needed and add any missing columns.
///
/// Idempotent, safe to call on every start. Runs in a single transaction:
/// if any step fails the store is left exactly as it was. Returns the names
/// of the columns that were added (empty when already up to date).
pub async fn initialize(store: &Store) -> Result<Vec<&'static str>, sqlx::Error> {
    initialize_with_columns(store, ADDED_COLUMNS).await
}

/// [`initialize`] against an explicit list of added columns.
///
/// Column names are compared case-insensitively, as SQLite does.
pub async fn initialize_with_columns(
    store: &Store,
    columns: &[(&'static str, &'static str)],
) -> Result<Vec<&'static str>, sqlx::Error> {
    let mut conn = store.connect().await?;
    let mut tx = conn.begin().await?;

    sqlx::query(CREATE_TABLE).execute(&mut *tx).await?;

    let existing = table_columns(&mut *tx).await?;
    let mut added = Vec::new();

    for &(column, definition) in columns {
        if existing.iter().any(|c| c.eq_ignore_ascii_case(column)) {
            continue;
        }
        let ddl = format!("ALTER TABLE {TABLE} ADD COLUMN {column} {definition}");
        sqlx::query(&ddl).execute(&mut *tx).await?;
        tracing::info!(table = TABLE, column, "Added missing column");
        added.push(column);
    }

    tx.commit().await?;

    tracing::info!(
        path = %store.path().display(),
        added = added.len(),
        "Store initialized"
    );
    Ok(added)
}

/// Column names of the catalog table, in declaration order.
///
/// Empty if the table does not exist.
pub async fn table_columns(conn: &mut SqliteConnection) -> Result<Vec<String>, sqlx::Error> {
    sqlx::query_scalar::<_, String>("SELECT name FROM pragma_table_info(?1) ORDER BY cid")
        .bind(TABLE)
        .fetch_all(conn)
        .await
}
