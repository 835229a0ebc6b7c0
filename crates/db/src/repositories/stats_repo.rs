//! Aggregate queries over the `legos` table.

use sqlx::FromRow;

use crate::models::stats::{CatalogStats, SeriesCount};
use crate::Store;

#[derive(FromRow)]
struct Totals {
    total_sets: i64,
    total_parts: i64,
    favorites: i64,
    complete: i64,
    incomplete: i64,
}

/// Read-only statistics for the statistics view.
pub struct StatsRepo;

impl StatsRepo {
    /// Totals, completeness breakdown and per-series counts, computed on one
    /// connection.
    pub async fn catalog_stats(store: &Store) -> Result<CatalogStats, sqlx::Error> {
        let mut conn = store.connect().await?;

        let totals = sqlx::query_as::<_, Totals>(
            "SELECT \
                COUNT(*) AS total_sets, \
                COALESCE(SUM(part_count), 0) AS total_parts, \
                COALESCE(SUM(CASE WHEN favorite = 1 THEN 1 ELSE 0 END), 0) AS favorites, \
                COALESCE(SUM(CASE WHEN all_parts = 1 THEN 1 ELSE 0 END), 0) AS complete, \
                COALESCE(SUM(CASE WHEN all_parts = 0 THEN 1 ELSE 0 END), 0) AS incomplete \
             FROM legos",
        )
        .fetch_one(&mut conn)
        .await?;

        let by_series = sqlx::query_as::<_, SeriesCount>(
            "SELECT series, COUNT(*) AS count FROM legos \
             WHERE series IS NOT NULL AND TRIM(series) != '' \
             GROUP BY series \
             ORDER BY series",
        )
        .fetch_all(&mut conn)
        .await?;

        Ok(CatalogStats {
            total_sets: totals.total_sets,
            total_parts: totals.total_parts,
            favorites: totals.favorites,
            complete: totals.complete,
            incomplete: totals.incomplete,
            unknown_completeness: totals.total_sets - totals.complete - totals.incomplete,
            by_series,
        })
    }
}
