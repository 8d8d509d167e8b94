//! API route configuration.
//!
//! All API endpoints require an API key via [`crate::api::middleware::auth`].

use crate::api::handlers::{create_url_handler, list_urls_handler};
use crate::state::AppState;
use axum::{Router, routing::post};

/// All API routes, protected by API key authentication.
///
/// # Endpoints
///
/// - `POST /urls` - Create a short URL
/// - `GET  /urls` - List every stored record
pub fn protected_routes() -> Router<AppState> {
    Router::new().route("/urls", post(create_url_handler).get(list_urls_handler))
}
