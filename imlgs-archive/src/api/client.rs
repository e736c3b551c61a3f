//! IMLGS HTTP client.
//!
//! Async client for the NOAA geosamples API. Two endpoints are used:
//! the paginated sample summary listing and the per-sample detail
//! document. A semaphore caps concurrent requests independently of any
//! caller-side batching; the effective concurrency is the smaller of
//! the two limits.

use std::sync::Arc;

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};
use tokio::sync::{Semaphore, SemaphorePermit};

use crate::domain::Imlgs;
use crate::normalize::RawRecord;

use super::error::ApiError;
use super::types::SummaryPage;

/// Default base URL for the IMLGS geosamples API.
const DEFAULT_BASE_URL: &str = "https://www.ngdc.noaa.gov/geosamples-api/api";

/// Default number of summary rows per listing page.
const DEFAULT_PAGE_SIZE: u32 = 2000;

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 5;

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Identifying user-agent sent with every request.
const CLIENT_USER_AGENT: &str = "Rust;IMLGS-archiver;v0.1";

/// Configuration for the IMLGS client.
#[derive(Debug, Clone)]
pub struct ImlgsConfig {
    /// Base URL for the API.
    pub base_url: String,
    /// Summary rows requested per listing page.
    pub page_size: u32,
    /// Maximum concurrent requests.
    pub max_concurrent: usize,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl ImlgsConfig {
    /// Create a config with production defaults.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the listing page size.
    pub fn with_page_size(mut self, n: u32) -> Self {
        self.page_size = n;
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for ImlgsConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Client for the IMLGS geosamples API.
#[derive(Debug, Clone)]
pub struct ImlgsClient {
    http: reqwest::Client,
    base_url: String,
    page_size: u32,
    semaphore: Arc<Semaphore>,
}

impl ImlgsClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ImlgsConfig) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(CLIENT_USER_AGENT));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .pool_max_idle_per_host(config.max_concurrent)
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            page_size: config.page_size,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent)),
        })
    }

    /// The configured listing page size.
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Fetch one page of the summary listing.
    pub async fn fetch_summary_page(&self, page: u32) -> Result<SummaryPage, ApiError> {
        let _permit = self.acquire().await?;

        let url = format!("{}/samples/summary", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[
                ("items_per_page", self.page_size.to_string()),
                ("page", page.to_string()),
            ])
            .send()
            .await?;

        let body = Self::success_body(response).await?;
        serde_json::from_str(&body).map_err(|e| ApiError::Json {
            message: e.to_string(),
        })
    }

    /// Fetch the detail document for one identifier.
    pub async fn fetch_detail(&self, id: &Imlgs) -> Result<RawRecord, ApiError> {
        let _permit = self.acquire().await?;

        let url = format!("{}/samples/detail/{}", self.base_url, id);
        let response = self.http.get(&url).send().await?;

        let body = Self::success_body(response).await?;
        serde_json::from_str(&body).map_err(|e| ApiError::Json {
            message: e.to_string(),
        })
    }

    async fn acquire(&self) -> Result<SemaphorePermit<'_>, ApiError> {
        self.semaphore.acquire().await.map_err(|_| ApiError::Api {
            status: 0,
            message: "semaphore closed".to_string(),
        })
    }

    async fn success_body(response: reqwest::Response) -> Result<String, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Api {
                status: status.as_u16(),
                message: body,
            });
        }
        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = ImlgsConfig::new();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.page_size, 2000);
        assert_eq!(config.max_concurrent, 5);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn config_builder() {
        let config = ImlgsConfig::new()
            .with_base_url("http://localhost:8080")
            .with_page_size(10)
            .with_max_concurrent(2)
            .with_timeout(5);

        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.page_size, 10);
        assert_eq!(config.max_concurrent, 2);
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn client_creation() {
        let client = ImlgsClient::new(ImlgsConfig::new());
        assert!(client.is_ok());
    }
}
