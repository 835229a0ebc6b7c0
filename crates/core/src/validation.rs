//! Input validation for the add/edit form.
//!
//! All checks run before any persistence call. Raw form text goes in, a
//! typed [`SetRecord`] comes out.

use crate::completeness::Completeness;
use crate::error::CoreError;
use crate::set_record::SetRecord;
use crate::types::PartCount;

/// Raw text of the add/edit form, exactly as the user typed it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetForm {
    pub articul: String,
    pub name: String,
    pub part_count: String,
    pub completeness: String,
    pub image_url: String,
    pub series: String,
    pub favorite: bool,
}

impl SetForm {
    /// Pre-fill a form from an existing record (edit flow).
    pub fn from_record(record: &SetRecord) -> Self {
        Self {
            articul: record.articul.clone(),
            name: record.name.clone(),
            part_count: record
                .part_count
                .map(|n| n.to_string())
                .unwrap_or_default(),
            completeness: match record.completeness {
                Completeness::Unknown => String::new(),
                other => other.as_token().to_string(),
            },
            image_url: record.image_url.clone().unwrap_or_default(),
            series: record.series.clone().unwrap_or_default(),
            favorite: record.favorite,
        }
    }

    /// Validate and convert into a record ready for storage.
    ///
    /// - identifier and name must be non-empty after trimming
    /// - part count, when given, must be a non-negative integer
    /// - completeness must be `1`, `0` or an unknown token
    /// - blank image URL and series become `None`
    pub fn validate(&self) -> Result<SetRecord, CoreError> {
        let articul = required("articul", &self.articul)?;
        let name = required("name", &self.name)?;

        let part_count = parse_optional_int("part_count", &self.part_count)?;
        if let Some(n) = part_count {
            if n < 0 {
                return Err(CoreError::invalid("part_count", "must not be negative"));
            }
        }

        let completeness: Completeness = self.completeness.parse()?;

        Ok(SetRecord {
            articul,
            name,
            part_count,
            completeness,
            image_url: optional_text(&self.image_url),
            series: optional_text(&self.series),
            favorite: self.favorite,
        })
    }
}

fn required(field: &'static str, raw: &str) -> Result<String, CoreError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(CoreError::MissingRequiredField(field));
    }
    Ok(value.to_string())
}

/// Trim free text; blank becomes `None`.
pub fn optional_text(raw: &str) -> Option<String> {
    let value = raw.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Parse an optional integer field. Blank input is `None`.
pub fn parse_optional_int(
    field: &'static str,
    raw: &str,
) -> Result<Option<PartCount>, CoreError> {
    let value = raw.trim();
    if value.is_empty() {
        return Ok(None);
    }
    value
        .parse::<PartCount>()
        .map(Some)
        .map_err(|_| CoreError::invalid(field, format!("'{value}' is not an integer")))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn form() -> SetForm {
        SetForm {
            articul: " 10221 ".into(),
            name: "Super Star Destroyer".into(),
            part_count: "3104".into(),
            completeness: "1".into(),
            image_url: String::new(),
            series: "Star Wars".into(),
            favorite: false,
        }
    }

    #[test]
    fn valid_form_produces_trimmed_record() {
        let record = form().validate().unwrap();
        assert_eq!(record.articul, "10221");
        assert_eq!(record.name, "Super Star Destroyer");
        assert_eq!(record.part_count, Some(3104));
        assert_eq!(record.completeness, Completeness::Complete);
        assert_eq!(record.image_url, None);
        assert_eq!(record.series.as_deref(), Some("Star Wars"));
        assert!(!record.favorite);
    }

    #[test]
    fn blank_articul_is_missing() {
        let mut f = form();
        f.articul = "   ".into();
        assert_matches!(f.validate(), Err(CoreError::MissingRequiredField("articul")));
    }

    #[test]
    fn blank_name_is_missing() {
        let mut f = form();
        f.name = String::new();
        assert_matches!(f.validate(), Err(CoreError::MissingRequiredField("name")));
    }

    #[test]
    fn non_numeric_part_count_is_invalid() {
        let mut f = form();
        f.part_count = "lots".into();
        assert_matches!(
            f.validate(),
            Err(CoreError::InvalidInput { field: "part_count", .. })
        );
    }

    #[test]
    fn negative_part_count_is_invalid() {
        let mut f = form();
        f.part_count = "-5".into();
        assert_matches!(
            f.validate(),
            Err(CoreError::InvalidInput { field: "part_count", .. })
        );
    }

    #[test]
    fn blank_part_count_is_none() {
        let mut f = form();
        f.part_count = " ".into();
        assert_eq!(f.validate().unwrap().part_count, None);
    }

    #[test]
    fn bad_completeness_is_invalid() {
        let mut f = form();
        f.completeness = "maybe".into();
        assert_matches!(
            f.validate(),
            Err(CoreError::InvalidInput { field: "completeness", .. })
        );
    }

    #[test]
    fn from_record_roundtrips() {
        let record = form().validate().unwrap();
        let again = SetForm::from_record(&record).validate().unwrap();
        assert_eq!(again, record);
    }

    #[test]
    fn optional_text_blank_is_none() {
        assert_eq!(optional_text("  "), None);
        assert_eq!(optional_text(" City "), Some("City".to_string()));
    }
}
