//! Aggregate catalog statistics.

use sqlx::FromRow;

/// Number of sets carrying one series label.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct SeriesCount {
    pub series: String,
    pub count: i64,
}

/// Summary of the whole catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogStats {
    pub total_sets: i64,
    /// Sum of known part counts. Sets without a part count add nothing.
    pub total_parts: i64,
    pub favorites: i64,
    pub complete: i64,
    pub incomplete: i64,
    /// Sets whose completeness was never recorded.
    pub unknown_completeness: i64,
    /// Non-empty series only, ordered by series.
    pub by_series: Vec<SeriesCount>,
}
