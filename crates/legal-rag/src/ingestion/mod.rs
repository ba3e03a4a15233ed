//! Document ingestion pipeline: DOCX extraction, chunking, batch storage

mod chunker;
mod parser;
mod processor;
mod temp_file;

pub use chunker::{Boundary, TextChunker};
pub use parser::DocxExtractor;
pub use processor::IngestPipeline;
pub use temp_file::TempUpload;
