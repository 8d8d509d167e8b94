//! Handlers for short URL redirects.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use tracing::{debug, warn};

use crate::application::services::VisitCount;
use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// Answers `301 Moved Permanently` with a `Location` header. The visit
/// counter is updated before responding; if that write fails the failure is
/// logged and the redirect is still served.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    resolve(&state, &code).await
}

/// Same as [`redirect_handler`] for short URLs carrying a pretty name.
///
/// # Endpoint
///
/// `GET /{code}/{*rest}`
///
/// Everything after the code is ignored, including pretty names that contain
/// `/`. Only the code is looked up.
pub async fn redirect_pretty_handler(
    Path((code, _rest)): Path<(String, String)>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    resolve(&state, &code).await
}

async fn resolve(state: &AppState, code: &str) -> Result<Response, AppError> {
    let outcome = state.url_service.redirect(code).await?;

    match outcome.visits {
        VisitCount::Recorded(visits) => debug!(code, visits, "Visit recorded"),
        VisitCount::Dropped(e) => warn!(code, error = %e, "Failed to record visit"),
    }

    let location = HeaderValue::from_str(&outcome.original_url).map_err(|e| {
        AppError::internal(format!("Stored URL for {code} is not a valid Location: {e}"))
    })?;

    Ok((StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, location)]).into_response())
}

/// Answers unmatched paths with the uniform 404 body.
pub async fn not_found_handler() -> AppError {
    AppError::not_found("URL not found")
}
