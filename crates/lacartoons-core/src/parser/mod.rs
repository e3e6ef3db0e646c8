//! HTML parsers for lacartoons.com pages
//!
//! This module contains parsers for extracting data from lacartoons.com pages:
//! - `catalog`: Parse the series catalog listing
//! - `series`: Parse series detail page with seasons and episodes
//! - `episode`: Parse episode playback page
//! - `extract`: Field rules and fault isolation shared by the above

pub mod catalog;
pub mod episode;
pub mod extract;
pub mod series;

// Re-export main parsing functions
pub use catalog::{extract_catalog, parse_catalog};
pub use episode::{extract_episode_detail, parse_episode_detail};
pub use series::{extract_series_detail, parse_seasons, parse_series_detail};
