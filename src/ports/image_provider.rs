//! Image Provider Port - Interface for the external image-search service.
//!
//! The conversation engine depends on this trait only; the Unsplash adapter
//! implements it over HTTP. Implementations own two side concerns the
//! engine never sees:
//!
//! - every photo returned for display must asynchronously hit its
//!   download-trigger URL (fire-and-forget, failures logged only)
//! - the remaining-quota signal of each response is inspected and a warning
//!   is logged below the low-water mark (monitoring only, no throttling)

use async_trait::async_trait;

use crate::domain::catalog::{Collection, Photo, ResultPage};
use crate::domain::foundation::CollectionId;

/// Any transport or HTTP failure from the provider, normalized to a single
/// message. The engine makes no 4xx/5xx distinction; timeouts land here too.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct UpstreamError(pub String);

impl UpstreamError {
    /// Creates an upstream error from any message.
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Port for the external image-search service.
#[async_trait]
pub trait ImageProvider: Send + Sync {
    /// Fetches one random photo.
    async fn random_photo(&self) -> Result<Photo, UpstreamError>;

    /// Keyword search, paginated one photo per page.
    ///
    /// `total_pages` comes from the provider's reported total. An empty
    /// result is returned as a page with no items and `total_pages == 0`.
    async fn search_photos(
        &self,
        query: &str,
        page: u32,
    ) -> Result<ResultPage<Photo>, UpstreamError>;

    /// Lists curated collections for one listing page.
    ///
    /// An empty list is a valid non-error result; "nothing found" is a
    /// presentation concern.
    async fn list_collections(&self, page: u32) -> Result<Vec<Collection>, UpstreamError>;

    /// Fetches one page (one photo) of a collection.
    ///
    /// The photos endpoint reports no total, so `total_pages` is derived
    /// from the collection's photo count metadata.
    async fn collection_photos(
        &self,
        id: &CollectionId,
        page: u32,
    ) -> Result<ResultPage<Photo>, UpstreamError>;
}
