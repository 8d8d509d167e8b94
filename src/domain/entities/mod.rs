//! Core domain entities.
//!
//! - [`UrlRecord`] - A short code mapped to its original URL, plus its visit counter

pub mod url_record;

pub use url_record::UrlRecord;
