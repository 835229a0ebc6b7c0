//! Photo gallery assembly.
//!
//! Images are fetched one after another, in catalog order. A record without
//! a URL gets [`ImageSlot::NoImage`]; a failed fetch gets
//! [`ImageSlot::LoadError`] and a warning in the log.

use brickshelf_core::set_record::SetRecord;
use brickshelf_imaging::{ImageFetcher, ImageSlot, ThumbnailSize};

/// Number of tiles per gallery row.
pub const GALLERY_COLUMNS: usize = 4;

/// One gallery entry.
#[derive(Debug, Clone)]
pub struct GalleryTile {
    pub record: SetRecord,
    pub image: ImageSlot,
}

/// Load the picture for `record`, substituting a placeholder on failure.
pub async fn load_image(
    fetcher: &dyn ImageFetcher,
    record: &SetRecord,
    size: ThumbnailSize,
) -> ImageSlot {
    let Some(url) = record.image_ref() else {
        return ImageSlot::NoImage;
    };
    match fetcher.fetch_and_resize(url, size).await {
        Ok(thumbnail) => ImageSlot::Loaded(thumbnail),
        Err(e) => {
            tracing::warn!(articul = %record.articul, url, error = %e, "Image unavailable");
            ImageSlot::LoadError
        }
    }
}

/// Build tiles for `records`, keeping their order.
pub async fn build_tiles(
    fetcher: &dyn ImageFetcher,
    records: Vec<SetRecord>,
    size: ThumbnailSize,
) -> Vec<GalleryTile> {
    let mut tiles = Vec::with_capacity(records.len());
    for record in records {
        let image = load_image(fetcher, &record, size).await;
        tiles.push(GalleryTile { record, image });
    }
    tiles
}
