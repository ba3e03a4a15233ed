//! Local provider implementations backed by SQLite

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::StoreConfig;
use crate::error::{Error, Result};
use crate::storage::ContentStoreDb;
use crate::types::ChunkRecord;

use super::content_store::ContentStore;

/// Content store writing into one named collection of a SQLite database
pub struct SqliteContentStore {
    db: Arc<ContentStoreDb>,
    collection: String,
    collection_id: i64,
}

impl SqliteContentStore {
    /// Wrap an open database, getting or creating `collection`
    pub fn new(db: Arc<ContentStoreDb>, collection: impl Into<String>) -> Result<Self> {
        let collection = collection.into();
        let collection_id = db.get_or_create_collection(&collection)?;
        Ok(Self {
            db,
            collection,
            collection_id,
        })
    }

    /// Open the on-disk store described by the config
    pub fn from_config(config: &StoreConfig) -> Result<Self> {
        let db = Arc::new(ContentStoreDb::new(&config.path)?);
        tracing::info!(
            "Content store opened at {} (collection: {})",
            config.path.display(),
            config.collection
        );
        Self::new(db, config.collection.clone())
    }

    /// In-memory store with a single collection
    pub fn in_memory(collection: impl Into<String>) -> Result<Self> {
        Self::new(Arc::new(ContentStoreDb::in_memory()?), collection)
    }
}

#[async_trait]
impl ContentStore for SqliteContentStore {
    async fn add(&self, records: &[ChunkRecord]) -> Result<()> {
        // rusqlite is sync, wrap in blocking task
        let db = self.db.clone();
        let collection_id = self.collection_id;
        let records = records.to_vec();
        tokio::task::spawn_blocking(move || db.insert_chunks(collection_id, &records))
            .await
            .map_err(|e| Error::Internal(format!("Task join error: {}", e)))?
    }

    async fn count(&self) -> Result<usize> {
        let db = self.db.clone();
        let collection_id = self.collection_id;
        tokio::task::spawn_blocking(move || db.count_chunks(collection_id))
            .await
            .map_err(|e| Error::Internal(format!("Task join error: {}", e)))?
    }

    async fn health_check(&self) -> Result<bool> {
        let db = self.db.clone();
        let healthy = tokio::task::spawn_blocking(move || db.ping().is_ok())
            .await
            .map_err(|e| Error::Internal(format!("Task join error: {}", e)))?;
        Ok(healthy)
    }

    fn collection(&self) -> &str {
        &self.collection
    }

    fn name(&self) -> &str {
        "local-sqlite"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::assert_ok;

    #[tokio::test]
    async fn test_add_then_count() {
        let store = SqliteContentStore::in_memory("legal_documents").unwrap();
        assert_eq!(store.count().await.unwrap(), 0);

        let records = ChunkRecord::batch(vec!["one".to_string(), "two".to_string()]);
        assert_ok!(store.add(&records).await);

        assert_eq!(store.count().await.unwrap(), 2);
        assert!(store.health_check().await.unwrap());
        assert_eq!(store.collection(), "legal_documents");
    }

    #[tokio::test]
    async fn test_collections_are_isolated() {
        let db = Arc::new(ContentStoreDb::in_memory().unwrap());
        let a = SqliteContentStore::new(db.clone(), "a").unwrap();
        let b = SqliteContentStore::new(db, "b").unwrap();

        assert_ok!(a.add(&ChunkRecord::batch(vec!["x".to_string()])).await);

        assert_eq!(a.count().await.unwrap(), 1);
        assert_eq!(b.count().await.unwrap(), 0);
    }
}
