//! Provider abstractions for the content store and the completion service
//!
//! Trait-based so handlers receive injected implementations instead of
//! reaching for globals.

pub mod content_store;
pub mod llm;
pub mod local;
pub mod openrouter;

pub use content_store::ContentStore;
pub use llm::CompletionProvider;
pub use local::SqliteContentStore;
pub use openrouter::OpenRouterClient;
