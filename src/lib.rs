//! # urlshorts
//!
//! A small URL shortening service built with Axum and an embedded redb store.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - The URL record entity and the repository trait
//! - **Application Layer** ([`application`]) - Shortening, redirect and auth services
//! - **Infrastructure Layer** ([`infrastructure`]) - redb-backed persistence
//! - **API Layer** ([`api`]) - REST API handlers, DTOs, and middleware
//!
//! ## Features
//!
//! - Random short codes from the OS CSPRNG, collision-checked on insert
//! - Optional pretty names decorating short URLs
//! - Visit counting on every redirect
//! - API key authentication for management endpoints
//! - Single-file storage with no external services
//!
//! ## Quick Start
//!
//! ```bash
//! export API_KEY="change-me"
//! cargo run
//!
//! curl -X POST localhost:8080/api/urls \
//!   -H "X-API-Key: change-me" -H "Content-Type: application/json" \
//!   -d '{"original_url": "https://example.com/very/long/path", "pretty_name": "blog"}'
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{
        AuthService, RedirectOutcome, ShortLink, UrlService, VisitCount,
    };
    pub use crate::domain::entities::UrlRecord;
    pub use crate::domain::repositories::UrlRepository;
    pub use crate::error::AppError;
    pub use crate::infrastructure::persistence::RedbUrlRepository;
    pub use crate::state::AppState;
}
