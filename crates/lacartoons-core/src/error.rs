//! Error types for LaCartoons Scraper
//!
//! `LaCartoonsError` is what the public API returns. `ExtractError` is the
//! lower-level traversal fault raised while reading single fields; most of
//! those are absorbed by the parsers and never reach the caller.
//! Both implement Serialize as their display string.

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Error type for LaCartoons Scraper operations
#[derive(Error, Debug)]
pub enum LaCartoonsError {
    /// Outbound request failed: transport error, timeout or bad status
    #[error("No se pudo conectar con la página: {0}")]
    Connectivity(#[from] reqwest::Error),

    /// A mandatory container is missing from a series page
    #[error("No se pudo encontrar la información necesaria en la página")]
    RequiredInfoNotFound {
        /// Selector of the container that was not found
        container: &'static str,
    },

    /// A mandatory field of a series page could not be read
    #[error("Error extrayendo la información del cartoon: {0}")]
    Extraction(#[from] ExtractError),

    /// Catalog filter outside its accepted range
    #[error("Parámetro inválido: {0}")]
    InvalidQuery(String),

    /// Configured base URL could not be parsed
    #[error("URL inválida: {0}")]
    InvalidUrl(String),
}

/// Fault raised while reading a single field from the document
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    /// A required element did not match
    #[error("element not found: {0}")]
    MissingElement(&'static str),

    /// The element matched but lacks the attribute
    #[error("attribute `{attr}` missing on `{selector}`")]
    MissingAttribute {
        selector: &'static str,
        attr: &'static str,
    },

    /// The element exists but has no leading text node
    #[error("no text content in `{0}`")]
    MissingText(&'static str),

    /// A hard-coded selector failed to parse
    #[error("invalid selector: {0}")]
    InvalidSelector(&'static str),

    /// A link could not be resolved against the base URL
    #[error("cannot resolve link `{href}`: {source}")]
    InvalidLink {
        href: String,
        #[source]
        source: url::ParseError,
    },
}

impl Serialize for LaCartoonsError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl Serialize for ExtractError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Result type alias for LaCartoons Scraper operations
pub type Result<T> = std::result::Result<T, LaCartoonsError>;
