//! redb implementation of the URL repository.
//!
//! One database file holds one table, `urls`, mapping a short code to the JSON
//! form of its [`UrlRecord`]. redb runs a single write transaction at a time
//! and serves reads from MVCC snapshots, so a record is never observed half
//! written. The file is exclusively locked while the database is open.

use async_trait::async_trait;
use redb::{Database, ReadableTable, ReadableTableMetadata, TableDefinition};
use std::path::Path;
use std::sync::Arc;

use crate::domain::entities::UrlRecord;
use crate::domain::repositories::UrlRepository;
use crate::error::{AppError, map_store_error};

/// The single collection of the store.
///
/// Key: short code. Value: JSON-serialized [`UrlRecord`].
pub const URLS_TABLE: TableDefinition<&str, &str> = TableDefinition::new("urls");

/// Embedded, file-backed repository for URL records.
///
/// Cloning is cheap and shares the same open database. The file is released
/// when the last clone is dropped.
#[derive(Clone)]
pub struct RedbUrlRepository {
    db: Arc<Database>,
}

impl RedbUrlRepository {
    /// Opens (or creates) the store at `path` and bootstraps the `urls` table.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the file cannot be opened, is already
    /// opened by another handle, or the table cannot be created.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let db = Database::create(path).map_err(map_store_error)?;

        let write_txn = db.begin_write().map_err(map_store_error)?;
        {
            write_txn.open_table(URLS_TABLE).map_err(map_store_error)?;
        }
        write_txn.commit().map_err(map_store_error)?;

        Ok(Self { db: Arc::new(db) })
    }

    /// Runs a blocking redb operation on the tokio blocking pool.
    async fn blocking<T, F>(&self, op: F) -> Result<T, AppError>
    where
        T: Send + 'static,
        F: FnOnce(&Database) -> Result<T, AppError> + Send + 'static,
    {
        let db = Arc::clone(&self.db);

        tokio::task::spawn_blocking(move || op(&db))
            .await
            .map_err(|e| AppError::internal(format!("store task failed: {e}")))?
    }
}

fn encode(record: &UrlRecord) -> Result<String, AppError> {
    serde_json::to_string(record)
        .map_err(|e| AppError::internal(format!("failed to encode record: {e}")))
}

fn decode(code: &str, raw: &str) -> Result<UrlRecord, AppError> {
    serde_json::from_str(raw)
        .map_err(|e| AppError::internal(format!("corrupt record for code {code}: {e}")))
}

#[async_trait]
impl UrlRepository for RedbUrlRepository {
    async fn save(&self, record: &UrlRecord) -> Result<(), AppError> {
        let code = record.code.clone();
        let value = encode(record)?;

        self.blocking(move |db| {
            let write_txn = db.begin_write().map_err(map_store_error)?;
            {
                let mut table = write_txn.open_table(URLS_TABLE).map_err(map_store_error)?;
                table
                    .insert(code.as_str(), value.as_str())
                    .map_err(map_store_error)?;
            }
            write_txn.commit().map_err(map_store_error)
        })
        .await
    }

    async fn create(&self, record: &UrlRecord) -> Result<(), AppError> {
        let code = record.code.clone();
        let value = encode(record)?;

        self.blocking(move |db| {
            let write_txn = db.begin_write().map_err(map_store_error)?;
            let taken = {
                let mut table = write_txn.open_table(URLS_TABLE).map_err(map_store_error)?;
                let taken = table
                    .get(code.as_str())
                    .map_err(map_store_error)?
                    .is_some();
                if !taken {
                    table
                        .insert(code.as_str(), value.as_str())
                        .map_err(map_store_error)?;
                }
                taken
            };

            if taken {
                write_txn.abort().map_err(map_store_error)?;
                return Err(AppError::conflict(format!("Code {code} is already taken")));
            }

            write_txn.commit().map_err(map_store_error)
        })
        .await
    }

    async fn get(&self, code: &str) -> Result<UrlRecord, AppError> {
        let code = code.to_owned();

        self.blocking(move |db| {
            let read_txn = db.begin_read().map_err(map_store_error)?;
            let table = read_txn.open_table(URLS_TABLE).map_err(map_store_error)?;

            match table.get(code.as_str()).map_err(map_store_error)? {
                Some(raw) => decode(&code, raw.value()),
                None => Err(AppError::not_found("URL not found")),
            }
        })
        .await
    }

    async fn list(&self) -> Result<Vec<UrlRecord>, AppError> {
        self.blocking(|db| {
            let read_txn = db.begin_read().map_err(map_store_error)?;
            let table = read_txn.open_table(URLS_TABLE).map_err(map_store_error)?;

            let mut records = Vec::new();
            for entry in table.iter().map_err(map_store_error)? {
                let (key, value) = entry.map_err(map_store_error)?;
                records.push(decode(key.value(), value.value())?);
            }

            Ok(records)
        })
        .await
    }

    async fn delete(&self, code: &str) -> Result<bool, AppError> {
        let code = code.to_owned();

        self.blocking(move |db| {
            let write_txn = db.begin_write().map_err(map_store_error)?;
            let existed = {
                let mut table = write_txn.open_table(URLS_TABLE).map_err(map_store_error)?;
                let removed = table.remove(code.as_str()).map_err(map_store_error)?;
                removed.is_some()
            };
            write_txn.commit().map_err(map_store_error)?;

            Ok(existed)
        })
        .await
    }

    async fn count(&self) -> Result<u64, AppError> {
        self.blocking(|db| {
            let read_txn = db.begin_read().map_err(map_store_error)?;
            let table = read_txn.open_table(URLS_TABLE).map_err(map_store_error)?;

            table.len().map_err(map_store_error)
        })
        .await
    }
}
