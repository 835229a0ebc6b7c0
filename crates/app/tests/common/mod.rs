//! Shared fixtures for the catalog service tests.

#![allow(dead_code)]

use async_trait::async_trait;
use brickshelf_app::catalog::Catalog;
use brickshelf_core::validation::SetForm;
use brickshelf_db::Store;
use brickshelf_imaging::{FetchError, ImageFetcher, Thumbnail, ThumbnailSize};
use image::RgbaImage;
use tempfile::TempDir;

/// URL the stub fetcher refuses to load.
pub const BROKEN_URL: &str = "http://images.invalid/broken.png";

/// Offline image source: every URL yields a blank thumbnail of the requested
/// size except [`BROKEN_URL`], which fails like an HTTP 404.
pub struct StubFetcher;

#[async_trait]
impl ImageFetcher for StubFetcher {
    async fn fetch_and_resize(
        &self,
        url: &str,
        size: ThumbnailSize,
    ) -> Result<Thumbnail, FetchError> {
        if url == BROKEN_URL {
            return Err(FetchError::HttpStatus(404));
        }
        Ok(Thumbnail {
            image: RgbaImage::new(size.width, size.height),
        })
    }
}

/// An initialized catalog in a fresh temporary directory.
///
/// Keep the returned `TempDir` alive for the duration of the test.
pub async fn catalog() -> (TempDir, Catalog) {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::open(dir.path().join("catalog.db"));
    let catalog = Catalog::new(store, Box::new(StubFetcher));
    catalog.initialize().await.unwrap();
    (dir, catalog)
}

pub fn form(articul: &str, name: &str) -> SetForm {
    SetForm {
        articul: articul.into(),
        name: name.into(),
        ..Default::default()
    }
}

pub fn star_destroyer_form() -> SetForm {
    SetForm {
        articul: "10221".into(),
        name: "Super Star Destroyer".into(),
        part_count: "3104".into(),
        completeness: "1".into(),
        image_url: "http://images.example/10221.png".into(),
        series: "Star Wars".into(),
        favorite: false,
    }
}
