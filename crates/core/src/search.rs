//! Search criteria and helpers for the set filter.
//!
//! This module lives in `core` so the criteria can be parsed from form input
//! without touching the database; the SQL is assembled by
//! `brickshelf_db::repositories::SetRepo::search`.

use crate::completeness::Completeness;
use crate::error::CoreError;
use crate::types::PartCount;
use crate::validation::{optional_text, parse_optional_int};

// ---------------------------------------------------------------------------
// LIKE pattern helpers
// ---------------------------------------------------------------------------

/// Escape character used in every `LIKE ... ESCAPE` clause.
pub const LIKE_ESCAPE: char = '\\';

/// Build a "contains" pattern for a SQL `LIKE` clause.
///
/// `%`, `_` and the escape character itself are escaped so user input
/// matches literally.
///
/// # Examples
///
/// ```
/// use brickshelf_core::search::contains_pattern;
/// assert_eq!(contains_pattern("Star"), "%Star%");
/// assert_eq!(contains_pattern("100%"), "%100\\%%");
/// ```
pub fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if c == '%' || c == '_' || c == LIKE_ESCAPE {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

// ---------------------------------------------------------------------------
// Typed criteria
// ---------------------------------------------------------------------------

/// Optional, independently combinable criteria for the set filter.
///
/// Every `None` means "no constraint". All present criteria are ANDed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetSearchParams {
    /// Substring of the identifier.
    pub articul: Option<String>,
    /// Substring of the name.
    pub name: Option<String>,
    /// Inclusive lower bound on part count.
    pub min_part_count: Option<PartCount>,
    /// Inclusive upper bound on part count.
    pub max_part_count: Option<PartCount>,
    /// Exact completeness; `Unknown` matches rows where it is not recorded.
    pub completeness: Option<Completeness>,
    /// Substring of the series.
    pub series: Option<String>,
    /// Only return favorites.
    pub favorites_only: bool,
}

impl SetSearchParams {
    /// Criteria that match every record.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn articul(mut self, needle: impl Into<String>) -> Self {
        self.articul = Some(needle.into());
        self
    }

    pub fn name(mut self, needle: impl Into<String>) -> Self {
        self.name = Some(needle.into());
        self
    }

    pub fn part_count_between(mut self, min: Option<PartCount>, max: Option<PartCount>) -> Self {
        self.min_part_count = min;
        self.max_part_count = max;
        self
    }

    pub fn completeness(mut self, completeness: Completeness) -> Self {
        self.completeness = Some(completeness);
        self
    }

    pub fn series(mut self, needle: impl Into<String>) -> Self {
        self.series = Some(needle.into());
        self
    }

    pub fn favorites_only(mut self) -> Self {
        self.favorites_only = true;
        self
    }
}

// ---------------------------------------------------------------------------
// Form parsing
// ---------------------------------------------------------------------------

/// Raw text of the search form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchForm {
    pub articul: String,
    pub name: String,
    pub min_part_count: String,
    pub max_part_count: String,
    pub completeness: String,
    pub series: String,
    pub favorites_only: bool,
}

impl SearchForm {
    /// Turn form text into criteria.
    ///
    /// Blank fields are absent. Part bounds must be integers. The
    /// completeness field is absent when blank, otherwise it must be a
    /// token accepted by [`Completeness`] (`n/a` searches for unknown).
    pub fn parse(&self) -> Result<SetSearchParams, CoreError> {
        let completeness = if self.completeness.trim().is_empty() {
            None
        } else {
            Some(self.completeness.parse::<Completeness>()?)
        };

        Ok(SetSearchParams {
            articul: optional_text(&self.articul),
            name: optional_text(&self.name),
            min_part_count: parse_optional_int("min_part_count", &self.min_part_count)?,
            max_part_count: parse_optional_int("max_part_count", &self.max_part_count)?,
            completeness,
            series: optional_text(&self.series),
            favorites_only: self.favorites_only,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    // -- contains_pattern ----------------------------------------------------

    #[test]
    fn pattern_wraps_plain_text() {
        assert_eq!(contains_pattern("Star"), "%Star%");
    }

    #[test]
    fn pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("a_b%c"), "%a\\_b\\%c%");
    }

    #[test]
    fn pattern_escapes_escape_char() {
        assert_eq!(contains_pattern("a\\b"), "%a\\\\b%");
    }

    // -- SearchForm::parse ---------------------------------------------------

    #[test]
    fn empty_form_matches_everything() {
        let params = SearchForm::default().parse().unwrap();
        assert_eq!(params, SetSearchParams::all());
    }

    #[test]
    fn blank_fields_are_absent() {
        let form = SearchForm {
            articul: "  ".into(),
            name: "\t".into(),
            series: " ".into(),
            ..Default::default()
        };
        assert_eq!(form.parse().unwrap(), SetSearchParams::all());
    }

    #[test]
    fn fields_are_trimmed_and_typed() {
        let form = SearchForm {
            name: " Destroyer ".into(),
            min_part_count: "100".into(),
            max_part_count: " 200 ".into(),
            completeness: "0".into(),
            favorites_only: true,
            ..Default::default()
        };
        let params = form.parse().unwrap();
        assert_eq!(
            params,
            SetSearchParams::all()
                .name("Destroyer")
                .part_count_between(Some(100), Some(200))
                .completeness(Completeness::Incomplete)
                .favorites_only()
        );
    }

    #[test]
    fn non_numeric_bound_is_invalid() {
        let form = SearchForm {
            max_part_count: "many".into(),
            ..Default::default()
        };
        assert_matches!(
            form.parse(),
            Err(CoreError::InvalidInput { field: "max_part_count", .. })
        );
    }

    #[test]
    fn unknown_completeness_token_is_a_criterion() {
        let form = SearchForm {
            completeness: "N/A".into(),
            ..Default::default()
        };
        assert_eq!(form.parse().unwrap().completeness, Some(Completeness::Unknown));
    }

    #[test]
    fn bad_completeness_is_invalid() {
        let form = SearchForm {
            completeness: "2".into(),
            ..Default::default()
        };
        assert_matches!(form.parse(), Err(CoreError::InvalidInput { .. }));
    }
}
