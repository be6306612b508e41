//! Unified error handling for the dashboard API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use shelfwise_core::analytics::ParamError;
use thiserror::Error;

use crate::services::PortfolioError;

/// Application-level error type for the dashboard API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Report inputs could not be fetched or a location is unknown.
    #[error(transparent)]
    Portfolio(#[from] PortfolioError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl From<ParamError> for AppError {
    fn from(err: ParamError) -> Self {
        Self::BadRequest(err.to_string())
    }
}

/// JSON error body.
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log server errors with Sentry
        if matches!(
            self,
            Self::Portfolio(
                PortfolioError::InputUnavailable(_) | PortfolioError::LocationUnavailable { .. }
            )
        ) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Dashboard request error"
            );
        }

        let status = match &self {
            Self::Portfolio(PortfolioError::LocationNotFound(_)) | Self::NotFound(_) => {
                StatusCode::NOT_FOUND
            }
            Self::Portfolio(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        };

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Portfolio(
                PortfolioError::InputUnavailable(_) | PortfolioError::LocationUnavailable { .. },
            ) => "Aggregation input unavailable".to_string(),
            _ => self.to_string(),
        };

        (status, Json(ApiError { error: message })).into_response()
    }
}
