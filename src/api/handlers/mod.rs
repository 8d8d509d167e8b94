//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod health;
pub mod redirect;
pub mod urls;

pub use health::health_handler;
pub use redirect::{not_found_handler, redirect_handler, redirect_pretty_handler};
pub use urls::{create_url_handler, list_urls_handler};
