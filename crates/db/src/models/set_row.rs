//! Storage-boundary adapter for set rows.

use brickshelf_core::completeness::Completeness;
use brickshelf_core::set_record::SetRecord;
use sqlx::sqlite::{Sqlite, SqliteRow};
use sqlx::{Column, Decode, FromRow, Row, Type};

/// A `legos` row decoded into a [`SetRecord`].
///
/// This is the only place that knows the column layout. Columns added by
/// later schema versions (`series`, `favorite`) may be absent in a store
/// that has not been initialized yet; they decode to `None` / `false`.
/// Blank text columns decode to `None`. Only a stored `1` is a favorite,
/// matching the `favorite = 1` filters.
#[derive(Debug, Clone)]
pub struct SetRow(pub SetRecord);

impl SetRow {
    pub fn into_record(self) -> SetRecord {
        self.0
    }
}

impl<'r> FromRow<'r, SqliteRow> for SetRow {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let all_parts: Option<i64> = row.try_get("all_parts")?;
        let picture: Option<String> = row.try_get("picture")?;
        let series = optional_column::<Option<String>>(row, "series")?.flatten();
        let favorite = optional_column::<Option<i64>>(row, "favorite")?
            .flatten()
            .is_some_and(|v| v == 1);

        Ok(SetRow(SetRecord {
            articul: row.try_get("articul")?,
            name: row.try_get("name")?,
            part_count: row.try_get("part_count")?,
            completeness: Completeness::from_db(all_parts),
            image_url: non_blank(picture),
            series: non_blank(series),
            favorite,
        }))
    }
}

/// Read a column that may not exist in older stores. The name is matched
/// case-insensitively.
fn optional_column<'r, T>(row: &'r SqliteRow, column: &str) -> Result<Option<T>, sqlx::Error>
where
    T: Decode<'r, Sqlite> + Type<Sqlite>,
{
    match row
        .columns()
        .iter()
        .position(|c| c.name().eq_ignore_ascii_case(column))
    {
        Some(index) => row.try_get::<T, _>(index).map(Some),
        None => Ok(None),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
