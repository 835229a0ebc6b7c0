//! The set record entity.

use crate::completeness::Completeness;
use crate::types::{PartCount, SetKey};

/// One set in the catalog, as stored in the `legos` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetRecord {
    pub articul: SetKey,
    pub name: String,
    pub part_count: Option<PartCount>,
    pub completeness: Completeness,
    /// Remote image URL. `None` when the set has no picture.
    pub image_url: Option<String>,
    pub series: Option<String>,
    pub favorite: bool,
}

impl SetRecord {
    /// A record with only the mandatory fields set.
    pub fn new(articul: impl Into<SetKey>, name: impl Into<String>) -> Self {
        Self {
            articul: articul.into(),
            name: name.into(),
            part_count: None,
            completeness: Completeness::Unknown,
            image_url: None,
            series: None,
            favorite: false,
        }
    }

    /// The image URL, if one is set and non-blank.
    pub fn image_ref(&self) -> Option<&str> {
        self.image_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}
