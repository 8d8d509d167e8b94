//! API key authentication.

use subtle::ConstantTimeEq;

use crate::error::AppError;

/// Checks presented keys against the single configured API key.
///
/// The comparison runs in constant time for keys of equal length.
pub struct AuthService {
    api_key: String,
}

impl AuthService {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
        }
    }

    /// Accepts `key` only if it equals the configured key byte for byte.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] for an empty or mismatching key.
    pub fn authenticate(&self, key: &str) -> Result<(), AppError> {
        if key.is_empty() {
            return Err(AppError::unauthorized("Missing API key"));
        }

        if bool::from(key.as_bytes().ct_eq(self.api_key.as_bytes())) {
            Ok(())
        } else {
            Err(AppError::unauthorized("Invalid API key"))
        }
    }
}
