//! Plain-text rendering of catalog views.

use std::fmt::Write;

use brickshelf_core::completeness::Completeness;
use brickshelf_core::set_record::SetRecord;
use brickshelf_db::models::stats::CatalogStats;
use brickshelf_imaging::ImageSlot;

use crate::catalog::SetDetails;
use crate::error::AppError;
use crate::gallery::{GalleryTile, GALLERY_COLUMNS};

const EMPTY_CELL: &str = "-";

pub const HELP: &str = "\
Commands:
  add field=value ...          Add a set (fields: id, name, parts, complete, image, series, fav)
  edit ID field=value ...      Change fields of set ID; id=NEW renames it
  search [field=value ...]     Filter sets (fields: id, name, min, max, complete, series; flag: fav)
  show ID                      Show one set with its picture
  delete ID ... [-y]           Delete sets, asking first unless -y is given
  fav ID                       Toggle the favorite flag
  gallery [fav]                Photo gallery of all sets or favorites only
  stats                        Collection statistics
  series                       Known series names
  help                         This text
  quit                         Leave

Completeness: 1 = all parts, 0 = parts missing, n/a = unknown.
Quote values with spaces: name=\"Super Star Destroyer\"";

pub fn completeness_label(completeness: Completeness) -> &'static str {
    match completeness {
        Completeness::Complete => "yes",
        Completeness::Incomplete => "no",
        Completeness::Unknown => "n/a",
    }
}

pub fn image_label(slot: &ImageSlot) -> String {
    match slot {
        ImageSlot::Loaded(thumb) => format!("[image {}]", thumb.size()),
        ImageSlot::NoImage => "[no image]".to_string(),
        ImageSlot::LoadError => "[image load error]".to_string(),
    }
}

pub fn error(err: &AppError) -> String {
    let (title, message) = err.classify();
    format!("{title}: {message}")
}

fn part_count_cell(record: &SetRecord) -> String {
    record
        .part_count
        .map(|n| n.to_string())
        .unwrap_or_else(|| EMPTY_CELL.to_string())
}

fn favorite_mark(record: &SetRecord) -> &'static str {
    if record.favorite {
        "*"
    } else {
        ""
    }
}

// ---------------------------------------------------------------------------
// Table
// ---------------------------------------------------------------------------

/// Search results as an aligned table, followed by a count line.
pub fn table(records: &[SetRecord]) -> String {
    if records.is_empty() {
        return "No sets found.".to_string();
    }

    let header = ["Articul", "Name", "Parts", "All parts", "Series", "Fav"];
    let rows: Vec<[String; 6]> = records
        .iter()
        .map(|r| {
            [
                r.articul.clone(),
                r.name.clone(),
                part_count_cell(r),
                completeness_label(r.completeness).to_string(),
                r.series.clone().unwrap_or_else(|| EMPTY_CELL.to_string()),
                favorite_mark(r).to_string(),
            ]
        })
        .collect();

    let mut widths = header.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let _ = writeln!(out, "{}", join_row(header.iter().copied(), &widths));
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let _ = writeln!(out, "{}", join_row(rule.iter().map(String::as_str), &widths));
    for row in &rows {
        let _ = writeln!(out, "{}", join_row(row.iter().map(String::as_str), &widths));
    }
    let noun = if records.len() == 1 { "set" } else { "sets" };
    let _ = write!(out, "{} {noun} found.", records.len());
    out
}

fn join_row<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    cells
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

// ---------------------------------------------------------------------------
// Details
// ---------------------------------------------------------------------------

pub fn details(details: &SetDetails) -> String {
    let r = &details.record;
    let mut out = String::new();
    let _ = writeln!(out, "{} {}", image_label(&details.image), r.name);
    let _ = writeln!(out, "  Articul:   {}", r.articul);
    let _ = writeln!(out, "  Parts:     {}", part_count_cell(r));
    let _ = writeln!(out, "  All parts: {}", completeness_label(r.completeness));
    let _ = writeln!(out, "  Series:    {}", r.series.as_deref().unwrap_or(EMPTY_CELL));
    let _ = writeln!(out, "  Image URL: {}", r.image_url.as_deref().unwrap_or(EMPTY_CELL));
    let _ = write!(out, "  Favorite:  {}", if r.favorite { "yes" } else { "no" });
    out
}

// ---------------------------------------------------------------------------
// Gallery
// ---------------------------------------------------------------------------

/// Tiles laid out `GALLERY_COLUMNS` to a row, one line per tile.
pub fn gallery(tiles: &[GalleryTile]) -> String {
    if tiles.is_empty() {
        return "The gallery is empty.".to_string();
    }

    let mut out = String::new();
    for (row_idx, row) in tiles.chunks(GALLERY_COLUMNS).enumerate() {
        if row_idx > 0 {
            out.push('\n');
        }
        let _ = writeln!(out, "Row {}", row_idx + 1);
        for tile in row {
            let r = &tile.record;
            let _ = writeln!(
                out,
                "  {} {}{} ({}) parts: {}, all parts: {}",
                image_label(&tile.image),
                favorite_mark(r),
                r.name,
                r.articul,
                part_count_cell(r),
                completeness_label(r.completeness),
            );
        }
    }
    out.trim_end().to_string()
}

// ---------------------------------------------------------------------------
// Statistics
// ---------------------------------------------------------------------------

pub fn stats(stats: &CatalogStats) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Sets:        {}", stats.total_sets);
    let _ = writeln!(out, "Parts:       {}", stats.total_parts);
    let _ = writeln!(out, "Favorites:   {}", stats.favorites);
    let _ = writeln!(
        out,
        "All parts:   {} yes, {} no, {} n/a",
        stats.complete, stats.incomplete, stats.unknown_completeness
    );
    if stats.by_series.is_empty() {
        let _ = write!(out, "Series:      none");
    } else {
        let _ = write!(out, "Series:");
        for entry in &stats.by_series {
            let _ = write!(out, "\n  {}: {}", entry.series, entry.count);
        }
    }
    out
}

pub fn series(names: &[String]) -> String {
    if names.is_empty() {
        "No series yet.".to_string()
    } else {
        names.join("\n")
    }
}
