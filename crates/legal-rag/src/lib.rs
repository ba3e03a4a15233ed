//! legal-rag: document ingestion into a persistent chunk store, plus a chat relay
//!
//! Uploaded `.docx` files are split into overlapping chunks and written to a
//! SQLite-backed collection. Chat messages are forwarded to an
//! OpenAI-compatible completion API. The two paths share only `AppState`.

pub mod config;
pub mod error;
pub mod generation;
pub mod ingestion;
pub mod providers;
pub mod server;
pub mod storage;
pub mod types;

pub use config::RagConfig;
pub use error::{Error, Result};
pub use generation::ChatRelay;
pub use ingestion::{IngestPipeline, TextChunker};
pub use server::{build_router, state::AppState, RagServer};
pub use types::{ChunkRecord, IngestOutcome, SourceDocument, UploadResponse};
