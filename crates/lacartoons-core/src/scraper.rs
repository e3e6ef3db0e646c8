//! Main LaCartoons Scraper API
//!
//! This module provides the high-level API for scraping lacartoons.com.
//! It combines the HTTP client with the parsers: one fetch and one parse
//! per call, nothing cached between calls.

use crate::client::{ClientConfig, LaCartoonsClient};
use crate::error::{LaCartoonsError, Result};
use crate::parser::{parse_catalog, parse_episode_detail, parse_series_detail};
use crate::types::{CatalogPage, CatalogQuery, EpisodeDetail, SeriesDetail};
use crate::url::build_catalog_url;

/// Highest category identifier the site knows about
const MAX_CATEGORY_ID: u32 = 8;

/// Main scraper API for lacartoons.com
///
/// Holds no mutable state, so one instance can serve concurrent callers
/// behind an `Arc` without locking.
///
/// # Example
/// ```no_run
/// use lacartoons_core::{CatalogQuery, LaCartoonsScraper};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let scraper = LaCartoonsScraper::new()?;
///
///     let catalog = scraper.list_catalog(&CatalogQuery::default()).await?;
///     println!("{} series over {} pages", catalog.items.len(), catalog.total_pages);
///
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct LaCartoonsScraper {
    client: LaCartoonsClient,
}

impl LaCartoonsScraper {
    /// Create a new scraper with default configuration.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn new() -> Result<Self> {
        let client = LaCartoonsClient::new()?;
        Ok(Self { client })
    }

    /// Create a new scraper with custom client configuration.
    ///
    /// # Errors
    /// Returns an error if the base URL is invalid or the client cannot be created.
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let client = LaCartoonsClient::with_config(config)?;
        Ok(Self { client })
    }

    /// Create a new scraper with a pre-built client.
    pub fn with_client(client: LaCartoonsClient) -> Self {
        Self { client }
    }

    /// List one page of the series catalog.
    ///
    /// # Arguments
    /// * `query` - Optional title, category (1-8) and page (1-based) filters
    ///
    /// # Returns
    /// * `Ok(CatalogPage)` with the series cards in document order
    /// * `Err(LaCartoonsError::InvalidQuery)` if a filter is out of range
    /// * `Err(LaCartoonsError::Connectivity)` if the page cannot be fetched
    ///
    /// # Example
    /// ```no_run
    /// use lacartoons_core::{CatalogQuery, LaCartoonsScraper};
    ///
    /// # async fn example() -> Result<(), lacartoons_core::LaCartoonsError> {
    /// let scraper = LaCartoonsScraper::new()?;
    /// let query = CatalogQuery { title: Some("coraje".to_string()), ..Default::default() };
    /// let catalog = scraper.list_catalog(&query).await?;
    /// for card in catalog.items {
    ///     println!("{} -> {}", card.name, card.url);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn list_catalog(&self, query: &CatalogQuery) -> Result<CatalogPage> {
        validate_catalog_query(query)?;

        let url = build_catalog_url(self.client.base_url(), query);
        let html = self.client.fetch(&url).await?;

        Ok(parse_catalog(&html, self.client.base_url()))
    }

    /// Get the detail page of a series, with its seasons and episodes.
    ///
    /// # Arguments
    /// * `series_url` - Fully-qualified series URL (e.g., "https://www.lacartoons.com/serie/8")
    ///
    /// # Returns
    /// * `Ok(SeriesDetail)` with series information and seasons
    /// * `Err(LaCartoonsError::Connectivity)` if the page cannot be fetched
    /// * `Err(LaCartoonsError::RequiredInfoNotFound)` if the page is not a series page
    /// * `Err(LaCartoonsError::Extraction)` if a mandatory field is missing
    pub async fn get_series(&self, series_url: &str) -> Result<SeriesDetail> {
        let html = self.client.fetch(series_url).await?;
        parse_series_detail(&html, self.client.base_url())
    }

    /// Get the playback detail of an episode.
    ///
    /// Missing page elements never fail this call; they come back as empty
    /// strings.
    ///
    /// # Arguments
    /// * `episode_url` - Fully-qualified episode URL
    ///   (e.g., "https://www.lacartoons.com/serie/capitulo/485?t=2")
    ///
    /// # Returns
    /// * `Ok(EpisodeDetail)` with whatever the page provided
    /// * `Err(LaCartoonsError::Connectivity)` if the page cannot be fetched
    pub async fn get_episode(&self, episode_url: &str) -> Result<EpisodeDetail> {
        let html = self.client.fetch(episode_url).await?;
        Ok(parse_episode_detail(&html, self.client.base_url()))
    }
}

/// Check the catalog filters against the ranges the site accepts.
pub fn validate_catalog_query(query: &CatalogQuery) -> Result<()> {
    if let Some(category_id) = query.category_id {
        if !(1..=MAX_CATEGORY_ID).contains(&category_id) {
            return Err(LaCartoonsError::InvalidQuery(format!(
                "Categoria_id must be between 1 and {}, got {}",
                MAX_CATEGORY_ID, category_id
            )));
        }
    }
    if query.page == Some(0) {
        return Err(LaCartoonsError::InvalidQuery(
            "page must be 1 or greater".to_string(),
        ));
    }
    Ok(())
}
