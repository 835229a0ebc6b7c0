//! Catalog service: the single entry point the presentation layer calls.
//!
//! Validation happens here before any repository call, and every failure is
//! returned as an [`AppError`](crate::error::AppError) for the caller to show.

use brickshelf_core::edit_session::EditSession;
use brickshelf_core::error::CoreError;
use brickshelf_core::search::{SearchForm, SetSearchParams};
use brickshelf_core::set_record::SetRecord;
use brickshelf_core::validation::SetForm;
use brickshelf_db::models::stats::CatalogStats;
use brickshelf_db::repositories::{SetRepo, StatsRepo};
use brickshelf_db::{schema, Store};
use brickshelf_imaging::{ImageFetcher, ImageSlot, ThumbnailSize};

use crate::error::AppResult;
use crate::gallery::{self, GalleryTile};

/// A record together with its details-view image.
#[derive(Debug, Clone)]
pub struct SetDetails {
    pub record: SetRecord,
    pub image: ImageSlot,
}

pub struct Catalog {
    store: Store,
    images: Box<dyn ImageFetcher>,
    gallery_thumb: ThumbnailSize,
    detail_thumb: ThumbnailSize,
}

impl Catalog {
    pub fn new(store: Store, images: Box<dyn ImageFetcher>) -> Self {
        Self {
            store,
            images,
            gallery_thumb: ThumbnailSize::GALLERY,
            detail_thumb: ThumbnailSize::DETAIL,
        }
    }

    pub fn with_thumbnail_sizes(mut self, gallery: ThumbnailSize, detail: ThumbnailSize) -> Self {
        self.gallery_thumb = gallery;
        self.detail_thumb = detail;
        self
    }

    /// Create or upgrade the store schema.
    pub async fn initialize(&self) -> AppResult<()> {
        let added = schema::initialize(&self.store).await?;
        if !added.is_empty() {
            tracing::info!(columns = ?added, "Store schema upgraded");
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Writes
    // -----------------------------------------------------------------------

    /// Validate `form` and insert or update according to `session`.
    ///
    /// An update whose `old_key` no longer exists fails with
    /// [`CoreError::NotFound`].
    pub async fn save(&self, session: &EditSession, form: &SetForm) -> AppResult<SetRecord> {
        let record = form.validate()?;

        match session {
            EditSession::Create => {
                SetRepo::insert(&self.store, &record).await?;
                tracing::info!(articul = %record.articul, "Set added");
            }
            EditSession::Update { old_key } => {
                let rows = SetRepo::update(&self.store, old_key, &record).await?;
                if rows == 0 {
                    return Err(CoreError::NotFound(old_key.clone()).into());
                }
                tracing::info!(old_key = %old_key, articul = %record.articul, "Set updated");
            }
        }
        Ok(record)
    }

    /// Delete every key in `keys`. Missing keys are skipped silently.
    pub async fn delete(&self, keys: &[String]) -> AppResult<u64> {
        let removed = SetRepo::delete_many(&self.store, keys).await?;
        tracing::info!(requested = keys.len(), removed, "Sets deleted");
        Ok(removed)
    }

    /// Flip the favorite flag and return its new value.
    pub async fn toggle_favorite(&self, key: &str) -> AppResult<bool> {
        SetRepo::toggle_favorite(&self.store, key)
            .await?
            .ok_or_else(|| CoreError::NotFound(key.to_string()).into())
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    /// Parse the search form and run the filter.
    pub async fn search(&self, form: &SearchForm) -> AppResult<Vec<SetRecord>> {
        let params = form.parse()?;
        self.search_params(&params).await
    }

    pub async fn search_params(&self, params: &SetSearchParams) -> AppResult<Vec<SetRecord>> {
        Ok(SetRepo::search(&self.store, params).await?)
    }

    pub async fn find(&self, key: &str) -> AppResult<SetRecord> {
        SetRepo::find_by_key(&self.store, key)
            .await?
            .ok_or_else(|| CoreError::NotFound(key.to_string()).into())
    }

    /// Record plus its picture at details size.
    pub async fn details(&self, key: &str) -> AppResult<SetDetails> {
        let record = self.find(key).await?;
        let image = gallery::load_image(self.images.as_ref(), &record, self.detail_thumb).await;
        Ok(SetDetails { record, image })
    }

    /// Every record (or every favorite) with its gallery thumbnail.
    pub async fn gallery(&self, favorites_only: bool) -> AppResult<Vec<GalleryTile>> {
        let params = SetSearchParams {
            favorites_only,
            ..SetSearchParams::all()
        };
        let records = SetRepo::search(&self.store, &params).await?;
        Ok(gallery::build_tiles(self.images.as_ref(), records, self.gallery_thumb).await)
    }

    pub async fn statistics(&self) -> AppResult<CatalogStats> {
        Ok(StatsRepo::catalog_stats(&self.store).await?)
    }

    /// Values for the series pickers.
    pub async fn series_options(&self) -> AppResult<Vec<String>> {
        Ok(SetRepo::distinct_series(&self.store).await?)
    }
}
