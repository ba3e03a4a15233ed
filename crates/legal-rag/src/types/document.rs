//! Uploaded document and stored chunk types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An uploaded document, alive for the duration of one upload request
#[derive(Debug, Clone)]
pub struct SourceDocument {
    /// Filename as sent by the client
    pub filename: String,
    /// Raw file bytes
    pub data: Vec<u8>,
}

impl SourceDocument {
    /// Create a new source document
    pub fn new(filename: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: filename.into(),
            data: data.into(),
        }
    }

    /// File size in bytes
    pub fn size(&self) -> usize {
        self.data.len()
    }
}

/// A chunk ready for the content store: a fresh id plus the raw chunk text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkRecord {
    /// Randomly generated id, unrelated to the text
    pub id: Uuid,
    /// Chunk text
    pub text: String,
}

impl ChunkRecord {
    /// Wrap a chunk with a new v4 id
    pub fn new(text: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            text,
        }
    }

    /// Assign ids to a batch of chunks, one per chunk, preserving order
    pub fn batch(chunks: Vec<String>) -> Vec<Self> {
        chunks.into_iter().map(Self::new).collect()
    }
}
