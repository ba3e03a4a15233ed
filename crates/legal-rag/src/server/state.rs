//! Application state for the server

use std::sync::Arc;

use crate::config::RagConfig;
use crate::error::Result;
use crate::generation::ChatRelay;
use crate::ingestion::IngestPipeline;
use crate::providers::{ContentStore, SqliteContentStore};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Configuration
    config: RagConfig,
    /// Upload pipeline (owns the content store handle)
    pipeline: IngestPipeline,
    /// Chat relay (owns the completion client, if any)
    chat: ChatRelay,
}

impl AppState {
    /// Create new application state: content store first, then the
    /// completion client.
    pub async fn new(config: RagConfig) -> Result<Self> {
        tracing::info!("Initializing application state...");

        let store: Arc<dyn ContentStore> = Arc::new(SqliteContentStore::from_config(&config.store)?);
        tracing::info!("Content store initialized ({})", store.name());

        let chat = ChatRelay::from_config(&config.llm)?;

        Ok(Self::from_parts(config, store, chat))
    }

    /// Assemble state from already-built collaborators
    pub fn from_parts(config: RagConfig, store: Arc<dyn ContentStore>, chat: ChatRelay) -> Self {
        let pipeline = IngestPipeline::new(&config, store);
        Self {
            inner: Arc::new(AppStateInner {
                config,
                pipeline,
                chat,
            }),
        }
    }

    /// Get configuration
    pub fn config(&self) -> &RagConfig {
        &self.inner.config
    }

    /// Get the ingestion pipeline
    pub fn pipeline(&self) -> &IngestPipeline {
        &self.inner.pipeline
    }

    /// Get the content store
    pub fn store(&self) -> &Arc<dyn ContentStore> {
        self.inner.pipeline.store()
    }

    /// Get the chat relay
    pub fn chat(&self) -> &ChatRelay {
        &self.inner.chat
    }

    /// Ready when the content store answers its health check
    pub async fn is_ready(&self) -> bool {
        match self.store().health_check().await {
            Ok(healthy) => healthy,
            Err(e) => {
                tracing::warn!("Content store health check failed: {}", e);
                false
            }
        }
    }
}
