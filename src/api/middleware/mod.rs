//! HTTP middleware for request processing and protection.
//!
//! Provides API key authentication and observability middleware.

pub mod auth;
pub mod tracing;
