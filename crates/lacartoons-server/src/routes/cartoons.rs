use axum::{
    extract::{Query, State},
    Json,
};
use lacartoons_core::{
    CatalogPage, CatalogQuery, EpisodeDetail, LaCartoonsError, SeriesDetail,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::error::ApiError;
use crate::AppState;

/// Query parameters for the catalog listing, named as the site names them
///
/// Values arrive as raw strings so malformed numbers become an `ErrorRecord`
/// instead of the extractor's plain-text rejection.
#[derive(Debug, Default, Deserialize)]
pub struct CatalogParams {
    #[serde(rename = "Titulo")]
    pub title: Option<String>,
    #[serde(rename = "Categoria_id")]
    pub category_id: Option<String>,
    pub page: Option<String>,
}

impl CatalogParams {
    /// Convert into a core query; empty values count as absent
    pub fn into_query(self) -> Result<CatalogQuery, LaCartoonsError> {
        Ok(CatalogQuery {
            title: non_empty(self.title),
            category_id: parse_number("Categoria_id", non_empty(self.category_id))?,
            page: parse_number("page", non_empty(self.page))?,
        })
    }
}

/// Query parameters for the detail endpoints
#[derive(Debug, Default, Deserialize)]
pub struct DetailParams {
    pub url: Option<String>,
}

impl DetailParams {
    fn required_url(self) -> Result<String, LaCartoonsError> {
        non_empty(self.url)
            .ok_or_else(|| LaCartoonsError::InvalidQuery("url is required".to_string()))
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_number<T: std::str::FromStr>(
    name: &str,
    value: Option<String>,
) -> Result<Option<T>, LaCartoonsError> {
    value
        .map(|v| {
            v.parse().map_err(|_| {
                LaCartoonsError::InvalidQuery(format!("{} must be a number, got {:?}", name, v))
            })
        })
        .transpose()
}

/// GET /cartoons?Titulo=&Categoria_id=&page=
pub async fn list_cartoons(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CatalogParams>,
) -> Result<Json<CatalogPage>, ApiError> {
    let query = params.into_query()?;
    tracing::info!(?query, "listing catalog");

    let catalog = state.scraper.list_catalog(&query).await?;
    Ok(Json(catalog))
}

/// GET /cartoons_details?url=<series URL>
pub async fn cartoon_details(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DetailParams>,
) -> Result<Json<SeriesDetail>, ApiError> {
    let url = params.required_url()?;
    tracing::info!(%url, "fetching series detail");

    let detail = state.scraper.get_series(&url).await?;
    Ok(Json(detail))
}

/// GET /chapter_details?url=<episode URL>
pub async fn chapter_details(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DetailParams>,
) -> Result<Json<EpisodeDetail>, ApiError> {
    let url = params.required_url()?;
    tracing::info!(%url, "fetching episode detail");

    let detail = state.scraper.get_episode(&url).await?;
    Ok(Json(detail))
}
