//! HTTP client for lacartoons.com
//!
//! One GET per call with a fixed timeout. No retry and no throttling:
//! a failed fetch is reported to the caller as is.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE};
use url::Url;

use crate::error::{LaCartoonsError, Result};
use crate::url::BASE_URL;

/// Default User-Agent mimicking a modern browser
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Default Accept-Language header for Spanish content
const DEFAULT_ACCEPT_LANGUAGE: &str = "es-ES,es;q=0.9,en;q=0.8";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Configuration for the lacartoons.com HTTP client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Site origin every extracted link is resolved against
    pub base_url: String,
    /// Request timeout in seconds (default: 15)
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// HTTP client for lacartoons.com
///
/// Cheap to share: the inner `reqwest::Client` is reference counted and
/// holds no per-request state.
#[derive(Debug, Clone)]
pub struct LaCartoonsClient {
    client: reqwest::Client,
    base_url: Url,
}

impl LaCartoonsClient {
    /// Create a new client with default configuration
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration
    ///
    /// # Errors
    /// - `LaCartoonsError::InvalidUrl` - `base_url` is not an absolute URL
    /// - `LaCartoonsError::Connectivity` - the HTTP client cannot be built
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| LaCartoonsError::InvalidUrl(format!("{}: {}", config.base_url, e)))?;

        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_static(DEFAULT_ACCEPT_LANGUAGE),
        );

        let client = reqwest::Client::builder()
            .user_agent(DEFAULT_USER_AGENT)
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, base_url })
    }

    /// Site origin used to absolutize links
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetch the HTML body of a fully-qualified URL
    ///
    /// # Arguments
    /// * `url` - Page URL (e.g., "https://www.lacartoons.com/serie/8")
    ///
    /// # Errors
    /// `LaCartoonsError::Connectivity` on transport failure, timeout,
    /// an unusable URL, or a 4xx/5xx status.
    pub async fn fetch(&self, url: &str) -> Result<String> {
        tracing::debug!(url, "fetching page");

        let body = self.send(url).await.inspect_err(|e| {
            tracing::warn!(url, error = %e, "fetch failed");
        })?;

        Ok(body)
    }

    async fn send(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.text().await?)
    }
}
