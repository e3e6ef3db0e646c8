//! JSON HTTP API over the lacartoons.com scraper
//!
//! Three read-only endpoints, each one fetch and one parse per request:
//! - `GET /cartoons` - catalog listing
//! - `GET /cartoons_details?url=` - series detail with seasons
//! - `GET /chapter_details?url=` - episode playback detail

pub mod config;
pub mod error;
pub mod routes;

use axum::{routing::get, Router};
use lacartoons_core::{LaCartoonsScraper, Result};
use std::sync::Arc;
use std::time::Instant;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::Config;

/// Application state shared across handlers
pub struct AppState {
    pub config: Config,
    pub scraper: LaCartoonsScraper,
    pub start_time: Instant,
}

impl AppState {
    /// Build the state and its scraper from configuration
    pub fn new(config: Config) -> Result<Self> {
        let scraper = LaCartoonsScraper::with_config(config.client_config())?;
        Ok(Self {
            config,
            scraper,
            start_time: Instant::now(),
        })
    }
}

/// Build the application router
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health endpoints
        .route("/", get(routes::health::root))
        .route("/health", get(routes::health::health_check))
        // Scraper endpoints
        .route("/cartoons", get(routes::cartoons::list_cartoons))
        .route("/cartoons_details", get(routes::cartoons::cartoon_details))
        .route("/chapter_details", get(routes::cartoons::chapter_details))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
