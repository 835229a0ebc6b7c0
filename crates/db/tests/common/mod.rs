//! Shared fixtures for the repository integration tests.

#![allow(dead_code)]

use brickshelf_core::completeness::Completeness;
use brickshelf_core::set_record::SetRecord;
use brickshelf_db::repositories::SetRepo;
use brickshelf_db::{schema, Store};
use tempfile::TempDir;

/// A store backed by a file in a fresh temporary directory.
///
/// Keep the returned `TempDir` alive for the duration of the test.
pub fn temp_store() -> (TempDir, Store) {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::open(dir.path().join("catalog.db"));
    (dir, store)
}

/// A temporary store that has been initialized.
pub async fn initialized_store() -> (TempDir, Store) {
    let (dir, store) = temp_store();
    schema::initialize(&store).await.unwrap();
    (dir, store)
}

/// Create the table exactly as the first release did (no series, no favorite).
pub async fn create_first_release_table(store: &Store) {
    let mut conn = store.connect().await.unwrap();
    sqlx::query(
        "CREATE TABLE legos (
            articul TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            part_count INTEGER,
            all_parts INTEGER,
            picture TEXT
        )",
    )
    .execute(&mut conn)
    .await
    .unwrap();
}

pub fn set(articul: &str, name: &str, part_count: Option<i64>) -> SetRecord {
    SetRecord {
        part_count,
        ..SetRecord::new(articul, name)
    }
}

pub fn star_destroyer() -> SetRecord {
    SetRecord {
        articul: "10221".into(),
        name: "Super Star Destroyer".into(),
        part_count: Some(3104),
        completeness: Completeness::Complete,
        image_url: None,
        series: Some("Star Wars".into()),
        favorite: false,
    }
}

/// Insert every record, panicking on failure.
pub async fn seed(store: &Store, records: &[SetRecord]) {
    for record in records {
        SetRepo::insert(store, record).await.unwrap();
    }
}
