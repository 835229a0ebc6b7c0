//! Remote image fetching.
//!
//! [`HttpImageFetcher`] downloads a picture with a single GET, decodes it and
//! scales it to the requested [`ThumbnailSize`]. There is no retry: a slow or
//! broken image host only costs one placeholder.

use std::time::Duration;

use async_trait::async_trait;

use crate::thumbnail::{Thumbnail, ThumbnailSize};

/// Some image hosts refuse requests without a browser-like User-Agent.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Why an image could not be shown.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The record has no URL to fetch.
    #[error("No image URL")]
    EmptyUrl,

    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The remote server returned a non-2xx status code.
    #[error("Image host returned HTTP {0}")]
    HttpStatus(u16),

    /// The body was not a decodable image.
    #[error("Image could not be decoded: {0}")]
    Decode(#[from] image::ImageError),
}

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// Source of display-ready thumbnails.
#[async_trait]
pub trait ImageFetcher: Send + Sync {
    /// Fetch the image at `url` and scale it to `size`.
    async fn fetch_and_resize(
        &self,
        url: &str,
        size: ThumbnailSize,
    ) -> Result<Thumbnail, FetchError>;
}

// ---------------------------------------------------------------------------
// HttpImageFetcher
// ---------------------------------------------------------------------------

/// Fetches images over HTTP(S) with `reqwest`.
pub struct HttpImageFetcher {
    client: reqwest::Client,
}

impl HttpImageFetcher {
    /// Build a fetcher whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client })
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(FetchError::HttpStatus(response.status().as_u16()));
        }
        Ok(response.bytes().await?.to_vec())
    }
}

#[async_trait]
impl ImageFetcher for HttpImageFetcher {
    async fn fetch_and_resize(
        &self,
        url: &str,
        size: ThumbnailSize,
    ) -> Result<Thumbnail, FetchError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(FetchError::EmptyUrl);
        }

        let bytes = self.download(url).await?;
        let thumbnail = Thumbnail::from_bytes(&bytes, size)?;
        tracing::debug!(url, %size, bytes = bytes.len(), "Fetched image");
        Ok(thumbnail)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
