//! Embedded store implementations of the domain repository traits.
//!
//! # Repositories
//!
//! - [`RedbUrlRepository`] - URL record storage in a single redb file

pub mod redb_url_repository;

pub use redb_url_repository::{RedbUrlRepository, URLS_TABLE};
