//! Image collaborator: fetch a remote picture and scale it for display.
//!
//! Failures here never abort a view. Callers turn them into an
//! [`ImageSlot::LoadError`] placeholder.

pub mod fetcher;
pub mod thumbnail;

pub use fetcher::{FetchError, HttpImageFetcher, ImageFetcher};
pub use thumbnail::{ImageSlot, Thumbnail, ThumbnailSize};
