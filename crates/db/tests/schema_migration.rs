//! Integration tests for store initialization and additive migration.

mod common;

use brickshelf_core::completeness::Completeness;
use brickshelf_core::search::SetSearchParams;
use brickshelf_db::repositories::SetRepo;
use brickshelf_db::schema::{self, table_columns};

use common::{create_first_release_table, initialized_store, star_destroyer, temp_store};

const ALL_COLUMNS: [&str; 7] = [
    "articul",
    "name",
    "part_count",
    "all_parts",
    "picture",
    "series",
    "favorite",
];

// ---------------------------------------------------------------------------
// Fresh store
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_initialize_creates_full_table() {
    let (_dir, store) = temp_store();

    schema::initialize(&store).await.unwrap();

    let mut conn = store.connect().await.unwrap();
    let columns = table_columns(&mut conn).await.unwrap();
    assert_eq!(columns, ALL_COLUMNS);
}

#[tokio::test]
async fn test_initialize_twice_is_noop() {
    let (_dir, store) = initialized_store().await;
    SetRepo::insert(&store, &star_destroyer()).await.unwrap();

    let added = schema::initialize(&store).await.unwrap();
    assert!(added.is_empty(), "second run should add nothing");

    let mut conn = store.connect().await.unwrap();
    let columns = table_columns(&mut conn).await.unwrap();
    assert_eq!(columns, ALL_COLUMNS);

    let all = SetRepo::search(&store, &SetSearchParams::all()).await.unwrap();
    assert_eq!(all, vec![star_destroyer()]);
}

// ---------------------------------------------------------------------------
// Stores from earlier schema versions
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_initialize_upgrades_first_release_store() {
    let (_dir, store) = temp_store();
    create_first_release_table(&store).await;
    {
        let mut conn = store.connect().await.unwrap();
        sqlx::query(
            "INSERT INTO legos (articul, name, part_count, all_parts, picture) \
             VALUES ('6080', 'King''s Castle', 677, 1, 'http://img/6080.png'), \
                    ('375', 'Yellow Castle', NULL, NULL, '')",
        )
        .execute(&mut conn)
        .await
        .unwrap();
    }

    let added = schema::initialize(&store).await.unwrap();
    assert_eq!(added, vec!["series", "favorite"]);

    let castle = SetRepo::find_by_key(&store, "6080").await.unwrap().unwrap();
    assert_eq!(castle.name, "King's Castle");
    assert_eq!(castle.part_count, Some(677));
    assert_eq!(castle.completeness, Completeness::Complete);
    assert_eq!(castle.image_url.as_deref(), Some("http://img/6080.png"));
    assert_eq!(castle.series, None);
    assert!(!castle.favorite);

    let yellow = SetRepo::find_by_key(&store, "375").await.unwrap().unwrap();
    assert_eq!(yellow.part_count, None);
    assert_eq!(yellow.completeness, Completeness::Unknown);
    assert_eq!(yellow.image_url, None);
    assert!(!yellow.favorite);
}

#[tokio::test]
async fn test_initialize_adds_favorite_to_series_era_store() {
    let (_dir, store) = temp_store();
    create_first_release_table(&store).await;
    {
        let mut conn = store.connect().await.unwrap();
        sqlx::query("ALTER TABLE legos ADD COLUMN series TEXT")
            .execute(&mut conn)
            .await
            .unwrap();
        sqlx::query(
            "INSERT INTO legos (articul, name, part_count, all_parts, picture, series) \
             VALUES ('10221', 'Super Star Destroyer', 3104, 1, NULL, 'Star Wars')",
        )
        .execute(&mut conn)
        .await
        .unwrap();
    }

    let added = schema::initialize(&store).await.unwrap();
    assert_eq!(added, vec!["favorite"]);

    let record = SetRepo::find_by_key(&store, "10221").await.unwrap().unwrap();
    assert_eq!(record, star_destroyer());

    let favorites = SetRepo::search(&store, &SetSearchParams::all().favorites_only())
        .await
        .unwrap();
    assert!(favorites.is_empty());
}

#[tokio::test]
async fn test_legacy_rows_decode_before_initialize() {
    let (_dir, store) = temp_store();
    create_first_release_table(&store).await;
    {
        let mut conn = store.connect().await.unwrap();
        sqlx::query("INSERT INTO legos (articul, name) VALUES ('6080', 'King''s Castle')")
            .execute(&mut conn)
            .await
            .unwrap();
    }

    let rows = SetRepo::search(&store, &SetSearchParams::all()).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].series, None);
    assert!(!rows[0].favorite);
}

#[tokio::test]
async fn test_initialize_matches_column_names_case_insensitively() {
    let (_dir, store) = temp_store();
    create_first_release_table(&store).await;
    {
        let mut conn = store.connect().await.unwrap();
        sqlx::query("ALTER TABLE legos ADD COLUMN Favorite INTEGER NOT NULL DEFAULT 0")
            .execute(&mut conn)
            .await
            .unwrap();
        sqlx::query(
            "INSERT INTO legos (articul, name, Favorite) \
             VALUES ('6080', 'King''s Castle', 1)",
        )
        .execute(&mut conn)
        .await
        .unwrap();
    }

    let added = schema::initialize(&store).await.unwrap();
    assert_eq!(added, vec!["series"]);

    let added = schema::initialize(&store).await.unwrap();
    assert!(added.is_empty(), "restart should add nothing");

    let castle = SetRepo::find_by_key(&store, "6080").await.unwrap().unwrap();
    assert!(castle.favorite);

    let favorites = SetRepo::search(&store, &SetSearchParams::all().favorites_only())
        .await
        .unwrap();
    assert_eq!(favorites.len(), 1);
}

#[tokio::test]
async fn test_failed_migration_leaves_store_untouched() {
    let (_dir, store) = temp_store();
    create_first_release_table(&store).await;
    {
        let mut conn = store.connect().await.unwrap();
        sqlx::query(
            "INSERT INTO legos (articul, name, part_count, all_parts) \
             VALUES ('6080', 'King''s Castle', 677, 1)",
        )
        .execute(&mut conn)
        .await
        .unwrap();
    }

    // SQLite refuses a NOT NULL column without a default.
    let columns = [("series", "TEXT"), ("rating", "INTEGER NOT NULL")];
    let result = schema::initialize_with_columns(&store, &columns).await;
    assert!(result.is_err());

    let mut conn = store.connect().await.unwrap();
    let existing = table_columns(&mut conn).await.unwrap();
    assert_eq!(existing, ALL_COLUMNS[..5]);

    let (name, part_count): (String, Option<i64>) =
        sqlx::query_as("SELECT name, part_count FROM legos WHERE articul = '6080'")
            .fetch_one(&mut conn)
            .await
            .unwrap();
    assert_eq!(name, "King's Castle");
    assert_eq!(part_count, Some(677));
}

// ---------------------------------------------------------------------------
// Store file
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_store_keeps_rollback_journal() {
    let (_dir, store) = initialized_store().await;
    SetRepo::insert(&store, &star_destroyer()).await.unwrap();

    let mut conn = store.connect().await.unwrap();
    let mode: String = sqlx::query_scalar("PRAGMA journal_mode")
        .fetch_one(&mut conn)
        .await
        .unwrap();
    assert_eq!(mode, "delete");

    let wal = store.path().with_extension("db-wal");
    assert!(!wal.exists());
}
