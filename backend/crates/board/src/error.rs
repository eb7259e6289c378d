//! Board Error Types
//!
//! This module provides board-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Board-specific result type alias
pub type BoardResult<T> = Result<T, BoardError>;

/// Board-specific error variants
#[derive(Debug, Error)]
pub enum BoardError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl BoardError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            BoardError::Database(_) | BoardError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            BoardError::Database(_) | BoardError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            BoardError::Database(e) => {
                tracing::error!(error = %e, "Board database error");
            }
            BoardError::Internal(msg) => {
                tracing::error!(message = %msg, "Board internal error");
            }
        }
    }
}

impl IntoResponse for BoardError {
    fn into_response(self) -> Response {
        self.log();
        // Clients only ever see the generic message; detail is logged above
        AppError::internal("Internal server error").into_response()
    }
}
