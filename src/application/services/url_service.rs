//! Short URL creation, redirect resolution and visit accounting.

use std::sync::Arc;

use crate::domain::entities::UrlRecord;
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::utils::code_generator::generate_code;

/// Generation attempts before `create_short` gives up.
const MAX_ATTEMPTS: usize = 10;

/// First path segments owned by other routes. A code equal to one of them
/// would be unreachable.
const RESERVED_CODES: &[&str] = &["api", "health"];

/// Result of a successful shortening.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortLink {
    pub code: String,
    pub short_url: String,
    pub original_url: String,
    pub pretty_name: Option<String>,
}

/// Outcome of the visit write that follows a resolved redirect.
#[derive(Debug)]
pub enum VisitCount {
    /// The incremented count was persisted.
    Recorded(u64),
    /// The write failed. The redirect still proceeds.
    Dropped(AppError),
}

/// A resolved redirect target plus the fate of its visit increment.
#[derive(Debug)]
pub struct RedirectOutcome {
    pub original_url: String,
    pub visits: VisitCount,
}

/// Service for creating short links and resolving them.
///
/// Generic over the repository so it can be unit tested against a mock.
pub struct UrlService<R: UrlRepository> {
    repository: Arc<R>,
    base_url: String,
    code_length: usize,
}

impl<R: UrlRepository> UrlService<R> {
    /// Creates a new URL service.
    ///
    /// # Arguments
    ///
    /// - `repository` - record store
    /// - `base_url` - public prefix of short URLs; a trailing `/` is dropped
    /// - `code_length` - symbols per generated code; `0` means the default
    pub fn new(repository: Arc<R>, base_url: impl Into<String>, code_length: usize) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Self {
            repository,
            base_url,
            code_length,
        }
    }

    /// Shortens `original_url`, optionally decorated with a `pretty_name`.
    ///
    /// The pretty name is trimmed; an empty result counts as absent. It only
    /// decorates the short URL and is never used for lookup.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `original_url` is empty. Nothing is
    /// written in that case.
    ///
    /// Returns [`AppError::Internal`] if the generator fails, if no free code
    /// is found within 10 attempts, or on store errors.
    pub async fn create_short(
        &self,
        original_url: &str,
        pretty_name: Option<&str>,
    ) -> Result<ShortLink, AppError> {
        if original_url.is_empty() {
            return Err(AppError::bad_request("original_url is required"));
        }

        let pretty_name = pretty_name
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string);

        for _ in 0..MAX_ATTEMPTS {
            let code = generate_code(self.code_length)?;

            if RESERVED_CODES.contains(&code.as_str()) {
                continue;
            }

            let record = UrlRecord::new(code, original_url.to_string(), pretty_name.clone());

            match self.repository.create(&record).await {
                Ok(()) => return Ok(self.short_link(record)),
                Err(AppError::Conflict { .. }) => continue,
                Err(e @ AppError::Internal { .. }) => return Err(e),
                Err(e) => return Err(AppError::internal(e.to_string())),
            }
        }

        Err(AppError::internal(
            "Failed to generate unique code: too many collisions",
        ))
    }

    /// Resolves `code` to its original URL and counts the visit.
    ///
    /// The visit write is best-effort: a failed save is reported as
    /// [`VisitCount::Dropped`] next to the target instead of failing the call.
    /// Concurrent redirects of the same code may lose increments.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if `code` is empty or unknown.
    /// Returns [`AppError::Internal`] if the record cannot be read.
    pub async fn redirect(&self, code: &str) -> Result<RedirectOutcome, AppError> {
        if code.is_empty() {
            return Err(AppError::not_found("URL not found"));
        }

        let mut record = self.repository.get(code).await?;
        record.record_visit();

        let visits = match self.repository.save(&record).await {
            Ok(()) => VisitCount::Recorded(record.visits),
            Err(e) => VisitCount::Dropped(e),
        };

        Ok(RedirectOutcome {
            original_url: record.original_url,
            visits,
        })
    }

    /// Returns every stored record in code order.
    pub async fn list_all(&self) -> Result<Vec<UrlRecord>, AppError> {
        self.repository.list().await
    }

    /// Deletes the record for `code`. Returns `false` if there was none.
    pub async fn delete(&self, code: &str) -> Result<bool, AppError> {
        self.repository.delete(code).await
    }

    /// Number of stored records.
    pub async fn stored_count(&self) -> Result<u64, AppError> {
        self.repository.count().await
    }

    /// Builds the public short URL for `code`.
    pub fn short_url(&self, code: &str, pretty_name: Option<&str>) -> String {
        match pretty_name {
            Some(name) => format!("{}/{}/{}", self.base_url, code, name),
            None => format!("{}/{}", self.base_url, code),
        }
    }

    fn short_link(&self, record: UrlRecord) -> ShortLink {
        ShortLink {
            short_url: self.short_url(&record.code, record.pretty_name.as_deref()),
            code: record.code,
            original_url: record.original_url,
            pretty_name: record.pretty_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockUrlRepository;
    use crate::utils::code_generator::ALPHABET;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const BASE: &str = "http://localhost:8080";

    fn service(repo: MockUrlRepository) -> UrlService<MockUrlRepository> {
        UrlService::new(Arc::new(repo), BASE, 8)
    }

    fn stored(code: &str, url: &str, visits: u64) -> UrlRecord {
        let mut record = UrlRecord::new(code.to_string(), url.to_string(), None);
        record.visits = visits;
        record
    }

    #[tokio::test]
    async fn test_create_short_success() {
        let mut mock_repo = MockUrlRepository::new();
        mock_repo
            .expect_create()
            .withf(|r| r.original_url == "https://example.com" && r.visits == 0)
            .times(1)
            .returning(|_| Ok(()));

        let link = service(mock_repo)
            .create_short("https://example.com", None)
            .await
            .unwrap();

        assert_eq!(link.code.len(), 8);
        assert!(link.code.bytes().all(|b| ALPHABET.contains(&b)));
        assert_eq!(link.short_url, format!("{BASE}/{}", link.code));
        assert_eq!(link.original_url, "https://example.com");
        assert_eq!(link.pretty_name, None);
    }

    #[tokio::test]
    async fn test_create_short_with_pretty_name() {
        let mut mock_repo = MockUrlRepository::new();
        mock_repo
            .expect_create()
            .withf(|r| r.pretty_name.as_deref() == Some("blog"))
            .times(1)
            .returning(|_| Ok(()));

        let link = service(mock_repo)
            .create_short("https://example.com/very/long/path", Some("blog"))
            .await
            .unwrap();

        assert_eq!(link.short_url, format!("{BASE}/{}/blog", link.code));
        assert_eq!(link.pretty_name.as_deref(), Some("blog"));
    }

    #[tokio::test]
    async fn test_create_short_blank_pretty_name_is_absent() {
        let mut mock_repo = MockUrlRepository::new();
        mock_repo
            .expect_create()
            .withf(|r| r.pretty_name.is_none())
            .times(1)
            .returning(|_| Ok(()));

        let link = service(mock_repo)
            .create_short("https://example.com", Some("   "))
            .await
            .unwrap();

        assert_eq!(link.short_url, format!("{BASE}/{}", link.code));
        assert_eq!(link.pretty_name, None);
    }

    #[tokio::test]
    async fn test_create_short_trims_pretty_name() {
        let mut mock_repo = MockUrlRepository::new();
        mock_repo.expect_create().times(1).returning(|_| Ok(()));

        let link = service(mock_repo)
            .create_short("https://example.com", Some("  docs "))
            .await
            .unwrap();

        assert_eq!(link.pretty_name.as_deref(), Some("docs"));
        assert!(link.short_url.ends_with("/docs"));
    }

    #[tokio::test]
    async fn test_create_short_empty_url_writes_nothing() {
        let mut mock_repo = MockUrlRepository::new();
        mock_repo.expect_create().times(0);
        mock_repo.expect_save().times(0);

        let result = service(mock_repo).create_short("", Some("blog")).await;

        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_create_short_retries_on_conflict() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);

        let mut mock_repo = MockUrlRepository::new();
        mock_repo.expect_create().times(3).returning(move |r| {
            if counter.fetch_add(1, Ordering::SeqCst) < 2 {
                Err(AppError::conflict(format!("Code {} is already taken", r.code)))
            } else {
                Ok(())
            }
        });

        let result = service(mock_repo)
            .create_short("https://example.com", None)
            .await;

        assert!(result.is_ok());
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_create_short_gives_up_after_max_attempts() {
        let mut mock_repo = MockUrlRepository::new();
        mock_repo
            .expect_create()
            .times(MAX_ATTEMPTS)
            .returning(|_| Err(AppError::conflict("taken")));

        let result = service(mock_repo)
            .create_short("https://example.com", None)
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Internal { .. }));
    }

    #[tokio::test]
    async fn test_create_short_store_failure_is_internal() {
        let mut mock_repo = MockUrlRepository::new();
        mock_repo
            .expect_create()
            .times(1)
            .returning(|_| Err(AppError::internal("store error: disk full")));

        let result = service(mock_repo)
            .create_short("https://example.com", None)
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Internal { .. }));
    }

    #[tokio::test]
    async fn test_create_short_uses_configured_length() {
        let mut mock_repo = MockUrlRepository::new();
        mock_repo
            .expect_create()
            .withf(|r| r.code.len() == 12)
            .times(1)
            .returning(|_| Ok(()));

        let service = UrlService::new(Arc::new(mock_repo), BASE, 12);
        let link = service
            .create_short("https://example.com", None)
            .await
            .unwrap();

        assert_eq!(link.code.len(), 12);
    }

    #[tokio::test]
    async fn test_redirect_counts_visit() {
        let mut mock_repo = MockUrlRepository::new();
        mock_repo
            .expect_get()
            .withf(|code| code == "abcd1234")
            .times(1)
            .returning(|_| Ok(stored("abcd1234", "https://example.com", 4)));
        mock_repo
            .expect_save()
            .withf(|r| r.code == "abcd1234" && r.visits == 5)
            .times(1)
            .returning(|_| Ok(()));

        let outcome = service(mock_repo).redirect("abcd1234").await.unwrap();

        assert_eq!(outcome.original_url, "https://example.com");
        assert!(matches!(outcome.visits, VisitCount::Recorded(5)));
    }

    #[tokio::test]
    async fn test_redirect_survives_failed_visit_write() {
        let mut mock_repo = MockUrlRepository::new();
        mock_repo
            .expect_get()
            .times(1)
            .returning(|_| Ok(stored("abcd1234", "https://example.com", 0)));
        mock_repo
            .expect_save()
            .times(1)
            .returning(|_| Err(AppError::internal("store error: read-only")));

        let outcome = service(mock_repo).redirect("abcd1234").await.unwrap();

        assert_eq!(outcome.original_url, "https://example.com");
        assert!(matches!(
            outcome.visits,
            VisitCount::Dropped(AppError::Internal { .. })
        ));
    }

    #[tokio::test]
    async fn test_redirect_unknown_code() {
        let mut mock_repo = MockUrlRepository::new();
        mock_repo
            .expect_get()
            .times(1)
            .returning(|_| Err(AppError::not_found("URL not found")));
        mock_repo.expect_save().times(0);

        let result = service(mock_repo).redirect("missing1").await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_redirect_empty_code_skips_store() {
        let mut mock_repo = MockUrlRepository::new();
        mock_repo.expect_get().times(0);

        let result = service(mock_repo).redirect("").await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_list_all_passes_through() {
        let mut mock_repo = MockUrlRepository::new();
        mock_repo.expect_list().times(1).returning(|| {
            Ok(vec![
                stored("aaaa1111", "https://a.example", 2),
                stored("bbbb2222", "https://b.example", 0),
            ])
        });

        let records = service(mock_repo).list_all().await.unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].visits, 2);
    }

    #[tokio::test]
    async fn test_delete_and_count_pass_through() {
        let mut mock_repo = MockUrlRepository::new();
        mock_repo
            .expect_delete()
            .withf(|code| code == "abcd1234")
            .times(1)
            .returning(|_| Ok(false));
        mock_repo.expect_count().times(1).returning(|| Ok(3));

        let service = service(mock_repo);

        assert!(!service.delete("abcd1234").await.unwrap());
        assert_eq!(service.stored_count().await.unwrap(), 3);
    }

    #[test]
    fn test_short_url_trims_base_slash() {
        let service = UrlService::new(
            Arc::new(MockUrlRepository::new()),
            "https://sho.rt/",
            8,
        );

        assert_eq!(service.short_url("abc", None), "https://sho.rt/abc");
        assert_eq!(
            service.short_url("abc", Some("docs")),
            "https://sho.rt/abc/docs"
        );
    }
}
