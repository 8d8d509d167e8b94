//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{AuthService, UrlService};
use crate::infrastructure::persistence::RedbUrlRepository;

/// Services shared across handlers.
///
/// The store is opened once at startup and reaches the handlers only through
/// these services. It is closed when the last clone of the state is dropped.
#[derive(Clone)]
pub struct AppState {
    pub url_service: Arc<UrlService<RedbUrlRepository>>,
    pub auth_service: Arc<AuthService>,
}

impl AppState {
    pub fn new(
        repository: Arc<RedbUrlRepository>,
        base_url: &str,
        code_length: usize,
        api_key: &str,
    ) -> Self {
        Self {
            url_service: Arc::new(UrlService::new(repository, base_url, code_length)),
            auth_service: Arc::new(AuthService::new(api_key)),
        }
    }
}
