//! Data types for LaCartoons Scraper
//!
//! Every record is built per request and handed straight back to the caller.
//! Field names are English; the serialized keys keep the site's Spanish
//! vocabulary so the JSON stays stable for existing API clients.

use serde::{Deserialize, Serialize};

use crate::error::LaCartoonsError;

/// Placeholder for a missing series name
pub const UNKNOWN: &str = "Desconocido";

/// Placeholder for a missing short label (channel, year, rating)
pub const NOT_AVAILABLE: &str = "N/A";

/// Placeholder for a series card without a usable image
pub const NO_IMAGE: &str = "Sin imagen";

/// One page of the series catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogPage {
    /// Highest page number advertised by the pagination control (at least 1)
    #[serde(rename = "paginas")]
    pub total_pages: u32,
    /// Series cards in document order
    #[serde(rename = "cartoons")]
    pub items: Vec<SeriesSummary>,
}

impl CatalogPage {
    /// An empty single-page catalog
    pub fn empty() -> Self {
        Self {
            total_pages: 1,
            items: Vec::new(),
        }
    }
}

/// A series card from the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesSummary {
    pub url: String,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "canal")]
    pub channel: String,
    #[serde(rename = "ano")]
    pub year: String,
    #[serde(rename = "valoracion")]
    pub rating: String,
    #[serde(rename = "imagen")]
    pub image_url: String,
}

/// Detailed information about a series
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesDetail {
    #[serde(rename = "backdrop")]
    pub backdrop_url: String,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "canal")]
    pub channel: String,
    #[serde(rename = "poster")]
    pub poster_url: String,
    /// Episode count as the site prints it (e.g. "52")
    #[serde(rename = "episodios")]
    pub episode_count: String,
    #[serde(rename = "idioma")]
    pub language: String,
    #[serde(rename = "ano")]
    pub year: String,
    #[serde(rename = "valoracion")]
    pub rating: String,
    #[serde(rename = "resena")]
    pub synopsis: String,
    /// Seasons in document order
    pub seasons: Vec<Season>,
}

/// A season and its episodes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Season {
    #[serde(rename = "temporada")]
    pub name: String,
    /// Episodes in document order
    #[serde(rename = "episodios")]
    pub episodes: Vec<EpisodeSummary>,
}

/// An episode entry inside a season listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeSummary {
    pub url: String,
    #[serde(rename = "numero")]
    pub number: String,
    #[serde(rename = "titulo")]
    pub title: String,
}

/// Playback page of a single episode
///
/// Every field falls back to an empty string, so this record is always
/// well-formed even when the page markup is unexpected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeDetail {
    pub series_title: String,
    pub video_url: String,
    pub episode_info: EpisodeInfo,
    pub previous_url: String,
    pub next_url: String,
    pub review: String,
}

/// Number label and title of the episode being played
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeInfo {
    /// Label such as "Capitulo 3"
    pub number_info: String,
    pub title: String,
}

/// Wire shape of any failed operation: `{"error": "<message>"}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorRecord {
    pub error: String,
}

impl From<&LaCartoonsError> for ErrorRecord {
    fn from(error: &LaCartoonsError) -> Self {
        Self {
            error: error.to_string(),
        }
    }
}

/// Filters for the catalog listing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogQuery {
    /// Free-text title search
    pub title: Option<String>,
    /// Category identifier (1-8)
    pub category_id: Option<u32>,
    /// Page number (1-based)
    pub page: Option<u32>,
}
