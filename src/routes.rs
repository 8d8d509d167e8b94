//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /health`               - Health check (public)
//! - `GET  /{code}`               - Short link redirect (public)
//! - `GET  /{code}/{*rest}`      - Short link redirect with pretty name (public)
//! - anything else                - Uniform JSON 404
//! - `/api/*`                     - REST API (API key required)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Authentication** - API key on `/api/*`
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{
    health_handler, not_found_handler, redirect_handler, redirect_pretty_handler,
};
use crate::api::middleware::{auth, tracing};
use crate::state::AppState;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Builds the router with every route and middleware except path
/// normalization.
pub fn router(state: AppState) -> Router {
    let api_router = api::routes::protected_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));

    Router::new()
        .route("/health", get(health_handler))
        .route("/{code}", get(redirect_handler))
        .route("/{code}/{*rest}", get(redirect_pretty_handler))
        .nest("/api", api_router)
        .fallback(not_found_handler)
        .with_state(state)
        .layer(tracing::layer())
}

/// Constructs the application service: [`router`] with trailing slashes
/// trimmed before routing.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state))
}
