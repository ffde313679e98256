//! Error types for the release filter server
//!
//! Provides unified request-level error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;
use crate::upstream::FetchError;

// == App Error Enum ==
/// Unified error type for request handlers.
#[derive(Error, Debug)]
pub enum AppError {
    /// Release feed could not be fetched
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

// == IntoResponse Implementation ==
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Fetch(_) => StatusCode::BAD_GATEWAY,
        };

        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for request handlers.
pub type Result<T> = std::result::Result<T, AppError>;
