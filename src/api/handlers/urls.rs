//! Handlers for creating and listing short URLs.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};

use crate::api::dto::url::{CreateUrlRequest, CreateUrlResponse};
use crate::domain::entities::UrlRecord;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short URL.
///
/// # Endpoint
///
/// `POST /api/urls`
///
/// # Request Body
///
/// ```json
/// {
///   "original_url": "https://example.com/very/long/path",
///   "pretty_name": "blog"
/// }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// {
///   "code": "aB3xYz9Q",
///   "short_url": "http://localhost:8080/aB3xYz9Q/blog",
///   "original_url": "https://example.com/very/long/path",
///   "pretty_name": "blog"
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request for a malformed body or an empty `original_url`.
pub async fn create_url_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateUrlRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateUrlResponse>), AppError> {
    let Json(payload) = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Rejected request body");
        AppError::bad_request("Invalid request payload")
    })?;

    let link = state
        .url_service
        .create_short(&payload.original_url, payload.pretty_name.as_deref())
        .await?;

    tracing::info!(code = %link.code, "Short URL created");

    Ok((StatusCode::CREATED, Json(link.into())))
}

/// Lists every stored URL record with its visit count.
///
/// # Endpoint
///
/// `GET /api/urls`
pub async fn list_urls_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<UrlRecord>>, AppError> {
    let records = state.url_service.list_all().await?;
    Ok(Json(records))
}
