//! URL record entity, the only persisted data.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A short code mapped to its original URL.
///
/// The serialized form is the on-disk contract of the store, so field names
/// must stay stable. `pretty_name` is omitted when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlRecord {
    pub code: String,
    pub original_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pretty_name: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub visits: u64,
}

impl UrlRecord {
    /// Creates a fresh record with zero visits, stamped with the current time.
    pub fn new(code: String, original_url: String, pretty_name: Option<String>) -> Self {
        Self {
            code,
            original_url,
            pretty_name,
            created_at: Utc::now(),
            visits: 0,
        }
    }

    /// Counts one successful redirect.
    pub fn record_visit(&mut self) {
        self.visits = self.visits.saturating_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_record() {
        let before = Utc::now();
        let record = UrlRecord::new(
            "abcd1234".to_string(),
            "https://example.com".to_string(),
            Some("blog".to_string()),
        );

        assert_eq!(record.code, "abcd1234");
        assert_eq!(record.original_url, "https://example.com");
        assert_eq!(record.pretty_name.as_deref(), Some("blog"));
        assert_eq!(record.visits, 0);
        assert!(record.created_at >= before);
    }

    #[test]
    fn test_record_visit() {
        let mut record = UrlRecord::new("code".into(), "https://example.com".into(), None);

        record.record_visit();
        record.record_visit();

        assert_eq!(record.visits, 2);
    }

    #[test]
    fn test_record_visit_saturates() {
        let mut record = UrlRecord::new("code".into(), "https://example.com".into(), None);
        record.visits = u64::MAX;

        record.record_visit();

        assert_eq!(record.visits, u64::MAX);
    }

    #[test]
    fn test_serialized_field_names() {
        let mut record = UrlRecord::new(
            "abcd1234".into(),
            "https://example.com".into(),
            Some("blog".into()),
        );
        record.visits = 3;

        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value["code"], "abcd1234");
        assert_eq!(value["original_url"], "https://example.com");
        assert_eq!(value["pretty_name"], "blog");
        assert_eq!(value["visits"], 3);
        assert!(value["created_at"].is_string());
    }

    #[test]
    fn test_absent_pretty_name_is_omitted() {
        let record = UrlRecord::new("abcd1234".into(), "https://example.com".into(), None);

        let value = serde_json::to_value(&record).unwrap();

        assert!(value.get("pretty_name").is_none());
    }

    #[test]
    fn test_reads_minimal_stored_form() {
        let stored = json!({
            "code": "abcd1234",
            "original_url": "https://example.com",
            "created_at": "2025-01-02T03:04:05Z"
        });

        let record: UrlRecord = serde_json::from_value(stored).unwrap();

        assert_eq!(record.code, "abcd1234");
        assert!(record.pretty_name.is_none());
        assert_eq!(record.visits, 0);
    }
}
