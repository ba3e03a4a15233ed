//! Completion provider trait for the chat relay

use async_trait::async_trait;
use crate::error::Result;

/// Trait for single-turn chat completion
///
/// Implementations:
/// - `OpenRouterClient`: OpenAI-compatible `/chat/completions` endpoint
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Send `message` as the only user turn and return the reply text
    async fn complete(&self, message: &str) -> Result<String>;

    /// Get provider name for logging
    fn name(&self) -> &str;

    /// Get the model being used
    fn model(&self) -> &str;
}
