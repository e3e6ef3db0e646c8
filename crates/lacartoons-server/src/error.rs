//! HTTP mapping of scraper errors

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use lacartoons_core::{ErrorRecord, LaCartoonsError};

/// Handler error: any scraper failure, rendered as `{"error": "<message>"}`
#[derive(Debug)]
pub struct ApiError(pub LaCartoonsError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            LaCartoonsError::Connectivity(_) => StatusCode::BAD_GATEWAY,
            LaCartoonsError::RequiredInfoNotFound { .. } => StatusCode::NOT_FOUND,
            LaCartoonsError::Extraction(_) => StatusCode::BAD_GATEWAY,
            LaCartoonsError::InvalidQuery(_) | LaCartoonsError::InvalidUrl(_) => {
                StatusCode::BAD_REQUEST
            }
        }
    }
}

impl From<LaCartoonsError> for ApiError {
    fn from(error: LaCartoonsError) -> Self {
        Self(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self.0, "request failed");
        } else {
            tracing::info!(status = status.as_u16(), error = %self.0, "request rejected");
        }
        (status, Json(ErrorRecord::from(&self.0))).into_response()
    }
}
