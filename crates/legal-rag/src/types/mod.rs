//! Core types

pub mod document;
pub mod response;

pub use document::{ChunkRecord, SourceDocument};
pub use response::{
    ChatRequest, ChatResponse, IngestOutcome, RootResponse, UploadResponse, UploadStatus,
};
