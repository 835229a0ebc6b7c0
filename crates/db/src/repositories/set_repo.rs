//! Repository for the `legos` table.

use brickshelf_core::completeness::Completeness;
use brickshelf_core::search::{contains_pattern, SetSearchParams, LIKE_ESCAPE};
use brickshelf_core::set_record::SetRecord;
use sqlx::sqlite::SqliteConnection;
use sqlx::Connection;

use crate::error::StoreError;
use crate::models::set_row::SetRow;
use crate::Store;

/// Provides CRUD, filter and favorite operations for set records.
///
/// Reads select `*` and decode through [`SetRow`], so a store that predates
/// the `series` / `favorite` columns still returns complete records.
pub struct SetRepo;

impl SetRepo {
    // -----------------------------------------------------------------------
    // Writes
    // -----------------------------------------------------------------------

    /// Insert a new record.
    ///
    /// Fails with [`StoreError::DuplicateKey`] if the identifier is taken;
    /// in that case nothing is written.
    pub async fn insert(store: &Store, record: &SetRecord) -> Result<(), StoreError> {
        let mut conn = store.connect().await?;
        let mut tx = conn.begin().await?;

        if key_exists(&mut *tx, &record.articul).await? {
            return Err(StoreError::DuplicateKey(record.articul.clone()));
        }

        sqlx::query(
            "INSERT INTO legos (articul, name, part_count, all_parts, picture, series, favorite) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        )
        .bind(&record.articul)
        .bind(&record.name)
        .bind(record.part_count)
        .bind(record.completeness.to_db())
        .bind(record.image_url.as_deref())
        .bind(record.series.as_deref())
        .bind(record.favorite)
        .execute(&mut *tx)
        .await
        .map_err(|e| StoreError::from_write(e, &record.articul))?;

        tx.commit().await?;
        tracing::debug!(articul = %record.articul, "Inserted set");
        Ok(())
    }

    /// Replace every field of the record stored under `old_key`, including
    /// the identifier itself.
    ///
    /// Fails with [`StoreError::DuplicateKey`] if `record.articul` differs from
    /// `old_key` and already belongs to another record. Returns the number of
    /// rows changed: `0` means `old_key` does not exist and nothing happened.
    pub async fn update(
        store: &Store,
        old_key: &str,
        record: &SetRecord,
    ) -> Result<u64, StoreError> {
        let mut conn = store.connect().await?;
        let mut tx = conn.begin().await?;

        if record.articul != old_key && key_exists(&mut *tx, &record.articul).await? {
            return Err(StoreError::DuplicateKey(record.articul.clone()));
        }

        let result = sqlx::query(
            "UPDATE legos SET \
                articul = ?1, name = ?2, part_count = ?3, all_parts = ?4, \
                picture = ?5, series = ?6, favorite = ?7 \
             WHERE articul = ?8",
        )
        .bind(&record.articul)
        .bind(&record.name)
        .bind(record.part_count)
        .bind(record.completeness.to_db())
        .bind(record.image_url.as_deref())
        .bind(record.series.as_deref())
        .bind(record.favorite)
        .bind(old_key)
        .execute(&mut *tx)
        .await
        .map_err(|e| StoreError::from_write(e, &record.articul))?;

        tx.commit().await?;
        tracing::debug!(
            old_key,
            articul = %record.articul,
            rows = result.rows_affected(),
            "Updated set"
        );
        Ok(result.rows_affected())
    }

    /// Delete a record. Returns `true` if a row was removed; a missing key
    /// is not an error.
    pub async fn delete(store: &Store, key: &str) -> Result<bool, sqlx::Error> {
        let mut conn = store.connect().await?;
        let result = sqlx::query("DELETE FROM legos WHERE articul = ?1")
            .bind(key)
            .execute(&mut conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete several records in one transaction. Returns the number removed.
    pub async fn delete_many(store: &Store, keys: &[String]) -> Result<u64, sqlx::Error> {
        let mut conn = store.connect().await?;
        let mut tx = conn.begin().await?;
        let mut removed = 0;
        for key in keys {
            removed += sqlx::query("DELETE FROM legos WHERE articul = ?1")
                .bind(key)
                .execute(&mut *tx)
                .await?
                .rows_affected();
        }
        tx.commit().await?;
        Ok(removed)
    }

    /// Set the favorite flag. Returns `false` if no such record exists.
    pub async fn set_favorite(
        store: &Store,
        key: &str,
        favorite: bool,
    ) -> Result<bool, sqlx::Error> {
        let mut conn = store.connect().await?;
        let result = sqlx::query("UPDATE legos SET favorite = ?1 WHERE articul = ?2")
            .bind(favorite)
            .bind(key)
            .execute(&mut conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Flip the favorite flag, returning the new value, or `None` if no such
    /// record exists.
    pub async fn toggle_favorite(
        store: &Store,
        key: &str,
    ) -> Result<Option<bool>, sqlx::Error> {
        let mut conn = store.connect().await?;
        let favorite = sqlx::query_scalar::<_, i64>(
            "UPDATE legos SET favorite = CASE WHEN favorite = 1 THEN 0 ELSE 1 END \
             WHERE articul = ?1 \
             RETURNING favorite",
        )
        .bind(key)
        .fetch_optional(&mut conn)
        .await?;
        Ok(favorite.map(|v| v != 0))
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    /// Find a record by identifier.
    pub async fn find_by_key(
        store: &Store,
        key: &str,
    ) -> Result<Option<SetRecord>, sqlx::Error> {
        let mut conn = store.connect().await?;
        let row = sqlx::query_as::<_, SetRow>("SELECT * FROM legos WHERE articul = ?1")
            .bind(key)
            .fetch_optional(&mut conn)
            .await?;
        Ok(row.map(SetRow::into_record))
    }

    /// Return the records matching every present criterion, ordered by
    /// identifier. Empty criteria return the whole catalog.
    ///
    /// Substring criteria use `LIKE` with the store's default collation.
    /// Part-count bounds are inclusive and never match a NULL part count.
    pub async fn search(
        store: &Store,
        params: &SetSearchParams,
    ) -> Result<Vec<SetRecord>, sqlx::Error> {
        // Build dynamic WHERE clauses.
        let mut conditions = Vec::new();
        let mut bind_idx = 1u32;

        if params.articul.is_some() {
            conditions.push(format!("articul LIKE ?{bind_idx} ESCAPE '{LIKE_ESCAPE}'"));
            bind_idx += 1;
        }
        if params.name.is_some() {
            conditions.push(format!("name LIKE ?{bind_idx} ESCAPE '{LIKE_ESCAPE}'"));
            bind_idx += 1;
        }
        if params.min_part_count.is_some() {
            conditions.push(format!("part_count >= ?{bind_idx}"));
            bind_idx += 1;
        }
        if params.max_part_count.is_some() {
            conditions.push(format!("part_count <= ?{bind_idx}"));
            bind_idx += 1;
        }
        match params.completeness {
            Some(Completeness::Unknown) => {
                conditions.push("(all_parts IS NULL OR all_parts NOT IN (0, 1))".to_string());
            }
            Some(_) => {
                conditions.push(format!("all_parts = ?{bind_idx}"));
                bind_idx += 1;
            }
            None => {}
        }
        if params.series.is_some() {
            conditions.push(format!("series LIKE ?{bind_idx} ESCAPE '{LIKE_ESCAPE}'"));
        }
        if params.favorites_only {
            conditions.push("favorite = 1".to_string());
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let query = format!("SELECT * FROM legos {where_clause} ORDER BY articul");
        let mut q = sqlx::query_as::<_, SetRow>(&query);

        // Bind dynamic parameters in order.
        if let Some(ref articul) = params.articul {
            q = q.bind(contains_pattern(articul));
        }
        if let Some(ref name) = params.name {
            q = q.bind(contains_pattern(name));
        }
        if let Some(min) = params.min_part_count {
            q = q.bind(min);
        }
        if let Some(max) = params.max_part_count {
            q = q.bind(max);
        }
        if let Some(flag) = params.completeness.and_then(Completeness::to_db) {
            q = q.bind(flag);
        }
        if let Some(ref series) = params.series {
            q = q.bind(contains_pattern(series));
        }

        let mut conn = store.connect().await?;
        let rows = q.fetch_all(&mut conn).await?;
        tracing::debug!(criteria = ?params, matched = rows.len(), "Searched sets");
        Ok(rows.into_iter().map(SetRow::into_record).collect())
    }

    /// Distinct non-empty series labels, sorted ascending.
    pub async fn distinct_series(store: &Store) -> Result<Vec<String>, sqlx::Error> {
        let mut conn = store.connect().await?;
        sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT series FROM legos \
             WHERE series IS NOT NULL AND TRIM(series) != '' \
             ORDER BY series",
        )
        .fetch_all(&mut conn)
        .await
    }
}

async fn key_exists(conn: &mut SqliteConnection, key: &str) -> Result<bool, sqlx::Error> {
    let found = sqlx::query_scalar::<_, i64>("SELECT 1 FROM legos WHERE articul = ?1")
        .bind(key)
        .fetch_optional(conn)
        .await?;
    Ok(found.is_some())
}
