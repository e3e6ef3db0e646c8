//! LaCartoons Scraper Core Library
//!
//! This crate provides the core scraping functionality for lacartoons.com,
//! a Spanish-language catalog of animated series.
//!
//! # Features
//! - List the series catalog with title, category and page filters
//! - Get series details including seasons and episodes
//! - Get episode playback details (video embed, navigation, review)
//! - Fault-isolated extraction: a broken fragment of a page never hides the rest

pub mod client;
pub mod error;
pub mod parser;
pub mod scraper;
pub mod types;
pub mod url;

// Re-export main types for convenience
pub use crate::client::{ClientConfig, LaCartoonsClient};
pub use crate::error::{ExtractError, LaCartoonsError, Result};
pub use crate::scraper::{validate_catalog_query, LaCartoonsScraper};
pub use crate::types::{
    CatalogPage, CatalogQuery, EpisodeDetail, EpisodeInfo, EpisodeSummary, ErrorRecord, Season,
    SeriesDetail, SeriesSummary,
};
pub use crate::url::BASE_URL;
