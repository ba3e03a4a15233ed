//! Single-turn chat relay with a local fallback when no credential is set

use std::sync::Arc;

use crate::config::LlmConfig;
use crate::error::Result;
use crate::providers::{CompletionProvider, OpenRouterClient};

/// Reply when no API key (or only the placeholder) is configured
pub const MISSING_KEY_REPLY: &str = "Помилка: Ключ OpenRouter API не налаштовано на сервері.";

/// Prefix of the reply sent when the completion call fails
pub const FAILURE_REPLY_PREFIX: &str = "Вибачте, сталася помилка при зверненні до мовної моделі";

const PREVIEW_CHARS: usize = 100;

/// Forwards one message to the completion service and relays the reply.
///
/// Never fails: every path produces a reply string.
#[derive(Clone)]
pub struct ChatRelay {
    provider: Option<Arc<dyn CompletionProvider>>,
}

impl ChatRelay {
    /// Create a relay around an optional provider; `None` means unconfigured
    pub fn new(provider: Option<Arc<dyn CompletionProvider>>) -> Self {
        Self { provider }
    }

    /// Build from config. Without a usable credential the relay answers
    /// locally and never touches the network.
    pub fn from_config(config: &LlmConfig) -> Result<Self> {
        match config.credential() {
            Some(key) => {
                let client = OpenRouterClient::new(config, key)?;
                tracing::info!("Completion client initialized (model: {})", config.model);
                Ok(Self::new(Some(Arc::new(client))))
            }
            None => {
                tracing::warn!("No completion API key configured, chat replies will use the fallback message");
                Ok(Self::new(None))
            }
        }
    }

    pub fn is_configured(&self) -> bool {
        self.provider.is_some()
    }

    /// Relay `message` and return the reply or a localized error string
    pub async fn reply(&self, message: &str) -> String {
        let Some(provider) = &self.provider else {
            return MISSING_KEY_REPLY.to_string();
        };

        match provider.complete(message).await {
            Ok(reply) => {
                tracing::info!(
                    "Received reply from {} ({}): {}...",
                    provider.name(),
                    provider.model(),
                    preview(&reply)
                );
                reply
            }
            Err(e) => {
                tracing::error!("Completion call to {} failed: {}", provider.name(), e);
                format!("{}: {}", FAILURE_REPLY_PREFIX, e)
            }
        }
    }
}

fn preview(text: &str) -> String {
    text.chars().take(PREVIEW_CHARS).collect()
}
