//! Error handling for the HTTP layer.
//!
//! This is a server-rendered application: error responses carry plain-text
//! bodies, not JSON envelopes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use uuid::Uuid;

/// Application error types that map to HTTP responses
#[derive(Error, Debug)]
pub enum AppError {
    /// The requested record does not exist. The message is the response body.
    #[error("not found: {message}")]
    NotFound { message: String },

    /// Anything unexpected, store failures included. Rendered as a 500; the
    /// underlying error is logged, never sent to the client in release builds.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }
}

impl From<bookshelf_store::StoreError> for AppError {
    fn from(err: bookshelf_store::StoreError) -> Self {
        Self::Internal(err.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message).into_response(),
            AppError::Internal(err) => {
                let error_id = Uuid::new_v4();
                let detail = format!("{err:#}");

                tracing::error!(
                    error_id = %error_id,
                    error = %detail,
                    "request failed"
                );

                // Release builds return an opaque body; the detail stays in
                // the log under its error id.
                let body = if cfg!(debug_assertions) {
                    format!("Internal Server Error: {detail}")
                } else {
                    "Internal Server Error".to_string()
                };

                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
        }
    }
}
