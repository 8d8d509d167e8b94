//! Application error type and its HTTP mapping.
//!
//! Every layer returns [`AppError`]. Only the HTTP boundary turns it into a
//! status code and the uniform `{"error": "<message>"}` body.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// Uniform JSON error body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    /// Bad or missing input (400).
    #[error("{message}")]
    Validation { message: String },
    /// Bad or missing API key (401).
    #[error("{message}")]
    Unauthorized { message: String },
    /// Unknown short code (404).
    #[error("{message}")]
    NotFound { message: String },
    /// Short code already taken (409).
    #[error("{message}")]
    Conflict { message: String },
    /// Generator or store failure (500).
    #[error("{message}")]
    Internal { message: String },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// HTTP status this error maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = match self {
            AppError::Internal { message } => {
                tracing::error!(error = %message, "Internal error");
                "Internal server error".to_string()
            }
            AppError::Validation { message }
            | AppError::Unauthorized { message }
            | AppError::NotFound { message }
            | AppError::Conflict { message } => message,
        };

        let mut response = (status, Json(ErrorBody { error: message })).into_response();

        if status == StatusCode::UNAUTHORIZED {
            response.headers_mut().insert(
                axum::http::header::WWW_AUTHENTICATE,
                axum::http::HeaderValue::from_static("Bearer"),
            );
        }

        response
    }
}

/// Maps any redb failure to [`AppError::Internal`].
pub fn map_store_error<E: Into<redb::Error>>(e: E) -> AppError {
    AppError::internal(format!("store error: {}", e.into()))
}
