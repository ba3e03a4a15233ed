//! Content store provider trait for persisting chunk batches

use async_trait::async_trait;

use crate::error::Result;
use crate::types::ChunkRecord;

/// Trait for the persistent `(id, text)` chunk collection
///
/// Implementations:
/// - `SqliteContentStore`: local SQLite file
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Insert a batch of chunks in a single call.
    ///
    /// An empty batch is a no-op. On error nothing from the batch is kept.
    async fn add(&self, records: &[ChunkRecord]) -> Result<()>;

    /// Number of chunks in the collection
    async fn count(&self) -> Result<usize>;

    /// Check if the store is healthy
    async fn health_check(&self) -> Result<bool>;

    /// Collection name
    fn collection(&self) -> &str;

    /// Get provider name for logging
    fn name(&self) -> &str;
}
