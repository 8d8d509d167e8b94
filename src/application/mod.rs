//! Application layer services implementing business logic.
//!
//! Services consume repository traits and provide a clean API for HTTP
//! handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::url_service::UrlService`] - Short link creation, redirects and visit counting
//! - [`services::auth_service::AuthService`] - API key authentication

pub mod services;
