use std::path::PathBuf;
use std::time::Duration;

use brickshelf_imaging::ThumbnailSize;

/// Default store file, relative to the working directory.
pub const DEFAULT_DATABASE_PATH: &str = "lego_database.db";

/// Default per-request image timeout in seconds.
pub const DEFAULT_IMAGE_TIMEOUT_SECS: u64 = 10;

/// A configuration variable was present but unusable.
#[derive(Debug, thiserror::Error)]
#[error("Invalid value '{value}' for {var}: {reason}")]
pub struct ConfigError {
    pub var: &'static str,
    pub value: String,
    pub reason: String,
}

/// Application configuration loaded from environment variables.
///
/// All fields have defaults suitable for running from the directory that
/// holds the catalog file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// SQLite store file (default: `lego_database.db`).
    pub database_path: PathBuf,
    /// Timeout for a single image download (default: 10 s).
    pub image_timeout: Duration,
    /// Gallery tile size (default: `200x150`).
    pub gallery_thumb: ThumbnailSize,
    /// Details view image size (default: `150x150`).
    pub detail_thumb: ThumbnailSize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
            image_timeout: Duration::from_secs(DEFAULT_IMAGE_TIMEOUT_SECS),
            gallery_thumb: ThumbnailSize::GALLERY,
            detail_thumb: ThumbnailSize::DETAIL,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var              | Default             |
    /// |----------------------|---------------------|
    /// | `DATABASE_PATH`      | `lego_database.db`  |
    /// | `IMAGE_TIMEOUT_SECS` | `10`                |
    /// | `GALLERY_THUMB_SIZE` | `200x150`           |
    /// | `DETAIL_THUMB_SIZE`  | `150x150`           |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Same as [`AppConfig::from_env`], reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let database_path = lookup("DATABASE_PATH")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.database_path);

        let image_timeout = match lookup("IMAGE_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|_| ConfigError {
                    var: "IMAGE_TIMEOUT_SECS",
                    value: raw.clone(),
                    reason: "must be a whole number of seconds".into(),
                })?;
                Duration::from_secs(secs)
            }
            None => defaults.image_timeout,
        };

        let gallery_thumb = parse_size(&lookup, "GALLERY_THUMB_SIZE", defaults.gallery_thumb)?;
        let detail_thumb = parse_size(&lookup, "DETAIL_THUMB_SIZE", defaults.detail_thumb)?;

        Ok(Self {
            database_path,
            image_timeout,
            gallery_thumb,
            detail_thumb,
        })
    }
}

fn parse_size(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: ThumbnailSize,
) -> Result<ThumbnailSize, ConfigError> {
    match lookup(var) {
        Some(raw) => raw.parse().map_err(|reason| ConfigError {
            var,
            value: raw.clone(),
            reason,
        }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = AppConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn reads_all_variables() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_PATH", "/tmp/sets.db"),
            ("IMAGE_TIMEOUT_SECS", "3"),
            ("GALLERY_THUMB_SIZE", "120x90"),
            ("DETAIL_THUMB_SIZE", "300x300"),
        ]))
        .unwrap();
        assert_eq!(config.database_path, PathBuf::from("/tmp/sets.db"));
        assert_eq!(config.image_timeout, Duration::from_secs(3));
        assert_eq!(config.gallery_thumb, ThumbnailSize::new(120, 90));
        assert_eq!(config.detail_thumb, ThumbnailSize::new(300, 300));
    }

    #[test]
    fn blank_database_path_uses_default() {
        let config = AppConfig::from_lookup(lookup_from(&[("DATABASE_PATH", "  ")])).unwrap();
        assert_eq!(config.database_path, PathBuf::from(DEFAULT_DATABASE_PATH));
    }

    #[test]
    fn bad_timeout_is_rejected() {
        let err = AppConfig::from_lookup(lookup_from(&[("IMAGE_TIMEOUT_SECS", "soon")]))
            .unwrap_err();
        assert_eq!(err.var, "IMAGE_TIMEOUT_SECS");
        assert_eq!(err.value, "soon");
    }

    #[test]
    fn bad_size_is_rejected() {
        let err = AppConfig::from_lookup(lookup_from(&[("GALLERY_THUMB_SIZE", "big")]))
            .unwrap_err();
        assert_eq!(err.var, "GALLERY_THUMB_SIZE");
    }
}
