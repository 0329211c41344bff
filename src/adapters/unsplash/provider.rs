//! Unsplash Provider - Implementation of ImageProvider over the Unsplash API.
//!
//! Every request carries the `Client-ID` credential and `Accept-Version: v1`.
//! Photos paginate one per page (the UI shows one photo at a time and pages
//! by re-querying); collections list in configurable batches.
//!
//! Two provider-level side concerns live here:
//! - the download-trigger GET required for every displayed photo, issued
//!   fire-and-forget on a spawned task
//! - the rate-limit watermark check on every response header

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::warn;

use crate::domain::catalog::{Collection, Photo, ResultPage};
use crate::domain::foundation::CollectionId;
use crate::ports::{ImageProvider, UpstreamError};

/// Photos are paginated one per page by design.
const PHOTO_PAGE_SIZE: u32 = 1;

/// Fallback when the remaining-quota header is absent.
const DEFAULT_RATE_LIMIT_REMAINING: i64 = 50;

/// Configuration for the Unsplash provider.
#[derive(Debug, Clone)]
pub struct UnsplashConfig {
    /// API access key (sent as `Client-ID`).
    access_key: Secret<String>,
    /// Base URL of the API (default: https://api.unsplash.com).
    pub base_url: String,
    /// Request timeout; expiry is surfaced as an [`UpstreamError`].
    pub timeout: Duration,
    /// Collections listing page size.
    pub collections_page_size: u32,
    /// Remaining-quota level below which a warning is logged.
    pub rate_limit_low_water: i64,
}

impl UnsplashConfig {
    /// Creates a configuration with the given access key.
    pub fn new(access_key: impl Into<String>) -> Self {
        Self {
            access_key: Secret::new(access_key.into()),
            base_url: "https://api.unsplash.com".to_string(),
            timeout: Duration::from_secs(10),
            collections_page_size: 10,
            rate_limit_low_water: 10,
        }
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the collections listing page size.
    pub fn with_collections_page_size(mut self, size: u32) -> Self {
        self.collections_page_size = size;
        self
    }

    /// Sets the rate-limit warning watermark.
    pub fn with_rate_limit_low_water(mut self, low_water: i64) -> Self {
        self.rate_limit_low_water = low_water;
        self
    }

    /// Exposes the access key (for request headers).
    fn access_key(&self) -> &str {
        self.access_key.expose_secret()
    }
}

/// Unsplash API provider implementation.
pub struct UnsplashProvider {
    config: UnsplashConfig,
    client: Client,
}

impl UnsplashProvider {
    /// Creates a provider with the given configuration.
    pub fn new(config: UnsplashConfig) -> Self {
        let mut headers = HeaderMap::new();
        let credential = HeaderValue::from_str(&format!("Client-ID {}", config.access_key()))
            .expect("Failed to build authorization header");
        headers.insert(reqwest::header::AUTHORIZATION, credential);
        headers.insert("Accept-Version", HeaderValue::from_static("v1"));

        let client = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, UpstreamError> {
        let response = self
            .client
            .get(self.endpoint(path))
            .query(query)
            .send()
            .await
            .map_err(|e| UpstreamError::new(e.to_string()))?;

        self.observe_rate_limit(&response);

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::new(format!(
                "unsplash responded with status {status}"
            )));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| UpstreamError::new(format!("unsplash response decode failed: {e}")))
    }

    /// Logs a warning when the remaining request quota runs low. This is a
    /// monitoring signal only; no throttling or backoff happens here.
    fn observe_rate_limit(&self, response: &Response) {
        let remaining = response
            .headers()
            .get("X-Ratelimit-Remaining")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<i64>().ok())
            .unwrap_or(DEFAULT_RATE_LIMIT_REMAINING);
        if remaining < self.config.rate_limit_low_water {
            warn!(remaining, "unsplash request quota running low");
        }
    }

    /// Notifies the upstream download endpoint for a photo being shown.
    /// Fire-and-forget: failures are logged and never retried or surfaced.
    fn trigger_download(&self, photo: &Photo) {
        let client = self.client.clone();
        let url = photo.download_url.clone();
        let photo_id = photo.id.clone();
        tokio::spawn(async move {
            let result = client.get(&url).send().await.and_then(|r| r.error_for_status());
            if let Err(e) = result {
                warn!(photo_id = %photo_id, error = %e, "download trigger failed");
            }
        });
    }
}

#[async_trait]
impl ImageProvider for UnsplashProvider {
    async fn random_photo(&self) -> Result<Photo, UpstreamError> {
        let dto: PhotoDto = self.get_json("photos/random", &[]).await?;
        let photo = Photo::from(dto);
        self.trigger_download(&photo);
        Ok(photo)
    }

    async fn search_photos(
        &self,
        query: &str,
        page: u32,
    ) -> Result<ResultPage<Photo>, UpstreamError> {
        let params = [
            ("query", query.to_string()),
            ("page", page.to_string()),
            ("per_page", PHOTO_PAGE_SIZE.to_string()),
            ("order_by", "relevant".to_string()),
        ];
        let dto: SearchResponseDto = self.get_json("search/photos", &params).await?;

        if dto.results.is_empty() {
            return Ok(ResultPage::empty(page));
        }

        let photos: Vec<Photo> = dto.results.into_iter().map(Photo::from).collect();
        for photo in &photos {
            self.trigger_download(photo);
        }
        Ok(ResultPage::new(photos, page, dto.total_pages))
    }

    async fn list_collections(&self, page: u32) -> Result<Vec<Collection>, UpstreamError> {
        let params = [
            ("page", page.to_string()),
            ("per_page", self.config.collections_page_size.to_string()),
        ];
        let dtos: Vec<CollectionDto> = self.get_json("collections", &params).await?;
        Ok(dtos.into_iter().map(Collection::from).collect())
    }

    async fn collection_photos(
        &self,
        id: &CollectionId,
        page: u32,
    ) -> Result<ResultPage<Photo>, UpstreamError> {
        let params = [
            ("page", page.to_string()),
            ("per_page", PHOTO_PAGE_SIZE.to_string()),
        ];
        let dtos: Vec<PhotoDto> = self
            .get_json(&format!("collections/{}/photos", id), &params)
            .await?;

        if dtos.is_empty() {
            return Ok(ResultPage::empty(page));
        }

        // The photos endpoint reports no total, so derive the page count
        // from the collection's photo count metadata.
        let meta: CollectionMetaDto = self
            .get_json(&format!("collections/{}", id), &[])
            .await?;
        let total_pages = meta.total_photos.div_ceil(PHOTO_PAGE_SIZE);

        let photos: Vec<Photo> = dtos.into_iter().map(Photo::from).collect();
        for photo in &photos {
            self.trigger_download(photo);
        }
        Ok(ResultPage::new(photos, page, total_pages))
    }
}

// Wire types. Only the fields this bot consumes are modeled.

#[derive(Debug, Deserialize)]
struct PhotoDto {
    id: String,
    urls: PhotoUrlsDto,
    links: PhotoLinksDto,
    user: UserDto,
}

#[derive(Debug, Deserialize)]
struct PhotoUrlsDto {
    regular: String,
}

#[derive(Debug, Deserialize)]
struct PhotoLinksDto {
    download_location: String,
}

#[derive(Debug, Deserialize)]
struct UserDto {
    name: String,
    links: UserLinksDto,
}

#[derive(Debug, Deserialize)]
struct UserLinksDto {
    html: String,
}

impl From<PhotoDto> for Photo {
    fn from(dto: PhotoDto) -> Self {
        Photo {
            id: dto.id,
            display_url: dto.urls.regular,
            download_url: dto.links.download_location,
            author_name: dto.user.name,
            author_profile_url: dto.user.links.html,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponseDto {
    total_pages: u32,
    results: Vec<PhotoDto>,
}

#[derive(Debug, Deserialize)]
struct CollectionDto {
    id: RawCollectionId,
    title: String,
}

impl From<CollectionDto> for Collection {
    fn from(dto: CollectionDto) -> Self {
        let id = match dto.id {
            RawCollectionId::Numeric(n) => CollectionId::new(n.to_string()),
            RawCollectionId::Text(s) => CollectionId::new(s),
        };
        Collection { id, title: dto.title }
    }
}

/// Collection ids arrive as numbers for legacy collections and as strings
/// for newer ones.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawCollectionId {
    Numeric(u64),
    Text(String),
}

#[derive(Debug, Deserialize)]
struct CollectionMetaDto {
    total_photos: u32,
}
