//! Repository trait for URL record storage.

use crate::domain::entities::UrlRecord;
use crate::error::AppError;
use async_trait::async_trait;

/// Storage interface for URL records, keyed by short code.
///
/// Every write replaces the full record; there are no field patches.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::RedbUrlRepository`] - embedded redb file
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Upserts a record under its code. An existing record is overwritten.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn save(&self, record: &UrlRecord) -> Result<(), AppError>;

    /// Inserts a record only if its code is not stored yet.
    ///
    /// The existence check and the insert happen in one write transaction.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the code is already taken.
    /// Returns [`AppError::Internal`] on storage errors.
    async fn create(&self, record: &UrlRecord) -> Result<(), AppError>;

    /// Loads the record stored under `code`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no record exists for `code`.
    /// Returns [`AppError::Internal`] on storage errors.
    async fn get(&self, code: &str) -> Result<UrlRecord, AppError>;

    /// Returns every record in key order.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn list(&self) -> Result<Vec<UrlRecord>, AppError>;

    /// Removes the record stored under `code`.
    ///
    /// Deleting an unknown code succeeds and returns `Ok(false)`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn delete(&self, code: &str) -> Result<bool, AppError>;

    /// Counts stored records.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn count(&self) -> Result<u64, AppError>;
}
