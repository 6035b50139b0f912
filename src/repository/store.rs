//! JSON file record store
//!
//! Each collection is a JSON array in `<data_dir>/<name>.json`. Before every
//! write attempt the current file is copied to `<name>.json.backup` on a
//! best-effort basis. Reads and writes are retried a fixed number of times
//! with a fixed delay. No lock guards a read-modify-write cycle: concurrent
//! writers to the same collection are last-writer-wins.

use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

use crate::config::StorageConfig;

/// Named collections backed by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Users,
    Books,
    Orders,
    Reservations,
}

impl Collection {
    pub fn name(&self) -> &'static str {
        match self {
            Collection::Users => "users",
            Collection::Books => "books",
            Collection::Orders => "orders",
            Collection::Reservations => "reservations",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Error, Debug)]
enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
pub struct JsonStore {
    dir: PathBuf,
    attempts: u32,
    delay: Duration,
}

impl JsonStore {
    pub fn new(dir: impl Into<PathBuf>, attempts: u32, delay: Duration) -> Self {
        Self {
            dir: dir.into(),
            attempts: attempts.max(1),
            delay,
        }
    }

    pub fn from_config(config: &StorageConfig) -> Self {
        Self::new(config.data_dir.clone(), config.retry_attempts, config.retry_delay())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self, collection: Collection) -> PathBuf {
        self.dir.join(format!("{}.json", collection.name()))
    }

    pub fn backup_path(&self, collection: Collection) -> PathBuf {
        self.dir.join(format!("{}.json.backup", collection.name()))
    }

    /// Create the data directory
    pub async fn init(&self) -> std::io::Result<()> {
        tokio::fs::create_dir_all(&self.dir).await
    }

    /// Read a collection. A missing or unreadable file yields an empty
    /// collection once all attempts are exhausted.
    pub async fn read<T: DeserializeOwned>(&self, collection: Collection) -> Vec<T> {
        for attempt in 1..=self.attempts {
            match self.try_read(collection).await {
                Ok(records) => return records,
                Err(e) => {
                    tracing::debug!(
                        "Read of {} failed (attempt {}/{}): {}",
                        collection,
                        attempt,
                        self.attempts,
                        e
                    );
                    if attempt < self.attempts {
                        tokio::time::sleep(self.delay).await;
                    }
                }
            }
        }

        tracing::warn!(
            "Giving up reading {} after {} attempts, using an empty collection",
            collection,
            self.attempts
        );
        Vec::new()
    }

    /// Overwrite a collection. Returns `false` once all attempts are exhausted.
    pub async fn write<T: Serialize>(&self, collection: Collection, records: &[T]) -> bool {
        for attempt in 1..=self.attempts {
            match self.try_write(collection, records).await {
                Ok(()) => return true,
                Err(e) => {
                    tracing::debug!(
                        "Write of {} failed (attempt {}/{}): {}",
                        collection,
                        attempt,
                        self.attempts,
                        e
                    );
                    if attempt < self.attempts {
                        tokio::time::sleep(self.delay).await;
                    }
                }
            }
        }

        tracing::warn!("Giving up writing {} after {} attempts", collection, self.attempts);
        false
    }

    async fn try_read<T: DeserializeOwned>(&self, collection: Collection) -> Result<Vec<T>, StoreError> {
        let raw = tokio::fs::read(self.path(collection)).await?;
        Ok(serde_json::from_slice(&raw)?)
    }

    async fn try_write<T: Serialize>(&self, collection: Collection, records: &[T]) -> Result<(), StoreError> {
        let payload = serde_json::to_vec_pretty(records)?;
        self.backup(collection).await;
        tokio::fs::write(self.path(collection), payload).await?;
        Ok(())
    }

    async fn backup(&self, collection: Collection) {
        match tokio::fs::copy(self.path(collection), self.backup_path(collection)).await {
            Ok(_) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => tracing::debug!("Backup of {} skipped: {}", collection, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::tempdir;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Record {
        id: String,
        value: u32,
    }

    fn store(dir: &Path) -> JsonStore {
        JsonStore::new(dir, 3, Duration::from_millis(1))
    }

    #[tokio::test]
    async fn test_missing_collection_reads_empty() {
        let dir = tempdir().unwrap();
        let records: Vec<Record> = store(dir.path()).read(Collection::Books).await;
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_collection_reads_empty() {
        let dir = tempdir().unwrap();
        let store = store(dir.path());
        std::fs::write(store.path(Collection::Orders), b"{ not json").unwrap();

        let records: Vec<Record> = store.read(Collection::Orders).await;
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_read_exhausts_every_attempt() {
        let dir = tempdir().unwrap();
        let store = JsonStore::new(dir.path(), 3, Duration::from_millis(40));
        std::fs::write(store.path(Collection::Books), b"[{").unwrap();

        let started = std::time::Instant::now();
        let records: Vec<Record> = store.read(Collection::Books).await;
        assert!(records.is_empty());
        // Two pauses between three attempts, none after the last
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_millis(80), "{:?}", elapsed);
    }

    #[tokio::test]
    async fn test_read_recovers_on_later_attempt() {
        let dir = tempdir().unwrap();
        let store = JsonStore::new(dir.path(), 3, Duration::from_millis(200));
        let path = store.path(Collection::Books);
        std::fs::write(&path, b"[{").unwrap();

        let repaired = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            tokio::fs::write(path, br#"[{"id":"a","value":1}]"#).await.unwrap();
        });

        let records: Vec<Record> = store.read(Collection::Books).await;
        repaired.await.unwrap();
        assert_eq!(records, vec![Record { id: "a".into(), value: 1 }]);
    }

    #[tokio::test]
    async fn test_write_then_read() {
        let dir = tempdir().unwrap();
        let store = store(dir.path());
        let records = vec![
            Record { id: "a".into(), value: 1 },
            Record { id: "a".into(), value: 2 },
        ];

        assert!(store.write(Collection::Books, &records).await);
        let loaded: Vec<Record> = store.read(Collection::Books).await;
        assert_eq!(loaded, records);
    }

    #[tokio::test]
    async fn test_write_keeps_backup_of_previous_contents() {
        let dir = tempdir().unwrap();
        let store = store(dir.path());

        assert!(store.write(Collection::Users, &[Record { id: "old".into(), value: 1 }]).await);
        assert!(!store.backup_path(Collection::Users).exists());

        assert!(store.write(Collection::Users, &[Record { id: "new".into(), value: 2 }]).await);
        let backup: Vec<Record> =
            serde_json::from_slice(&std::fs::read(store.backup_path(Collection::Users)).unwrap()).unwrap();
        assert_eq!(backup[0].id, "old");
    }

    #[tokio::test]
    async fn test_write_to_missing_directory_fails() {
        let dir = tempdir().unwrap();
        let store = store(&dir.path().join("absent"));
        assert!(!store.write(Collection::Books, &[Record { id: "x".into(), value: 0 }]).await);
    }
}
