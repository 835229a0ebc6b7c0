//! Decoded, resized images and the placeholders that stand in for them.

use std::fmt;
use std::str::FromStr;

use image::imageops::FilterType;
use image::RgbaImage;

/// Target size of a thumbnail in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThumbnailSize {
    pub width: u32,
    pub height: u32,
}

impl ThumbnailSize {
    /// Gallery tiles.
    pub const GALLERY: ThumbnailSize = ThumbnailSize::new(200, 150);
    /// Details view.
    pub const DETAIL: ThumbnailSize = ThumbnailSize::new(150, 150);

    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl FromStr for ThumbnailSize {
    type Err = String;

    /// Parse `WIDTHxHEIGHT`, e.g. `200x150`. Both sides must be positive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (w, h) = s
            .trim()
            .split_once(['x', 'X'])
            .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
        let width: u32 = w.trim().parse().map_err(|_| format!("bad width '{w}'"))?;
        let height: u32 = h.trim().parse().map_err(|_| format!("bad height '{h}'"))?;
        if width == 0 || height == 0 {
            return Err(format!("size must be non-zero, got '{s}'"));
        }
        Ok(Self::new(width, height))
    }
}

impl fmt::Display for ThumbnailSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// A decoded image scaled to a [`ThumbnailSize`].
#[derive(Debug, Clone)]
pub struct Thumbnail {
    pub image: RgbaImage,
}

impl Thumbnail {
    /// Decode encoded bytes (PNG, JPEG, WebP, GIF) and scale to exactly
    /// `size`, ignoring aspect ratio.
    pub fn from_bytes(bytes: &[u8], size: ThumbnailSize) -> Result<Self, image::ImageError> {
        let decoded = image::load_from_memory(bytes)?;
        let resized = decoded.resize_exact(size.width, size.height, FilterType::Lanczos3);
        Ok(Self {
            image: resized.to_rgba8(),
        })
    }

    pub fn size(&self) -> ThumbnailSize {
        ThumbnailSize::new(self.image.width(), self.image.height())
    }
}

/// What a view shows in place of a set's picture.
#[derive(Debug, Clone)]
pub enum ImageSlot {
    Loaded(Thumbnail),
    /// The set has no image URL.
    NoImage,
    /// Fetching or decoding failed; the error was logged.
    LoadError,
}

impl ImageSlot {
    pub fn is_loaded(&self) -> bool {
        matches!(self, ImageSlot::Loaded(_))
    }
}
