//! DTOs for the short URL endpoints.

use serde::{Deserialize, Serialize};

use crate::application::services::ShortLink;

/// Request to shorten a URL.
///
/// A missing `original_url` deserializes as empty and is rejected by the
/// service with a validation error.
#[derive(Debug, Deserialize)]
pub struct CreateUrlRequest {
    #[serde(default)]
    pub original_url: String,
    #[serde(default)]
    pub pretty_name: Option<String>,
}

/// A newly created short URL.
#[derive(Debug, Serialize)]
pub struct CreateUrlResponse {
    pub code: String,
    pub short_url: String,
    pub original_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pretty_name: Option<String>,
}

impl From<ShortLink> for CreateUrlResponse {
    fn from(link: ShortLink) -> Self {
        Self {
            code: link.code,
            short_url: link.short_url,
            original_url: link.original_url,
            pretty_name: link.pretty_name,
        }
    }
}
