//! Ingestion pipeline orchestration

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use crate::config::RagConfig;
use crate::error::{Error, Result};
use crate::providers::ContentStore;
use crate::types::{ChunkRecord, IngestOutcome, SourceDocument};

use super::chunker::TextChunker;
use super::parser::DocxExtractor;
use super::temp_file::TempUpload;

/// Upload -> temp file -> text -> chunks -> ids -> one batch insert
pub struct IngestPipeline {
    /// Text chunker
    chunker: TextChunker,
    /// Destination for chunk batches
    store: Arc<dyn ContentStore>,
    /// Required filename suffix, e.g. `.docx`
    accepted_extension: String,
    /// Where request-scoped temp files go (OS temp dir if `None`)
    temp_dir: Option<PathBuf>,
}

impl IngestPipeline {
    /// Create a new ingestion pipeline
    pub fn new(config: &RagConfig, store: Arc<dyn ContentStore>) -> Self {
        Self {
            chunker: TextChunker::from_config(&config.chunking),
            store,
            accepted_extension: config.upload.accepted_extension.clone(),
            temp_dir: config.upload.temp_dir.clone(),
        }
    }

    pub fn store(&self) -> &Arc<dyn ContentStore> {
        &self.store
    }

    /// Reject filenames without the accepted extension
    pub fn check_extension(&self, filename: &str) -> Result<()> {
        if filename.ends_with(&self.accepted_extension) {
            Ok(())
        } else {
            Err(Error::validation(format!(
                "Invalid file type. Only {} files are allowed.",
                self.accepted_extension
            )))
        }
    }

    /// Run the whole pipeline for one upload.
    ///
    /// The temp file lives for the whole call and is removed on every exit
    /// path, including storage failures.
    pub async fn ingest(&self, document: SourceDocument) -> Result<IngestOutcome> {
        self.check_extension(&document.filename)?;

        let start = Instant::now();
        let SourceDocument { filename, data } = document;
        let size = data.len();

        let temp_dir = self.temp_dir.clone();
        let extension = self.accepted_extension.clone();
        let temp = tokio::task::spawn_blocking(move || {
            TempUpload::create(temp_dir.as_deref(), &extension, &data)
        })
        .await
        .map_err(|e| Error::Internal(format!("Task join error: {}", e)))??;

        let path = temp.path().to_path_buf();
        let chunker = self.chunker.clone();
        let name = filename.clone();
        let chunks = tokio::task::spawn_blocking(move || -> Result<Vec<String>> {
            let text = DocxExtractor::extract_file(&path, &name)?;
            Ok(chunker.split_text(&text))
        })
        .await
        .map_err(|e| Error::Internal(format!("Task join error: {}", e)))??;

        let records = ChunkRecord::batch(chunks);
        self.store.add(&records).await?;

        drop(temp);

        tracing::info!(
            "Processed '{}' ({} bytes): {} chunks into '{}' in {:?}",
            filename,
            size,
            records.len(),
            self.store.collection(),
            start.elapsed()
        );

        Ok(IngestOutcome {
            filename,
            chunk_ids: records.into_iter().map(|r| r.id).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::SqliteContentStore;
    use async_trait::async_trait;
    use docx_rs::{Docx, Paragraph, Run};
    use std::collections::HashSet;
    use std::io::Cursor;
    use tempfile::TempDir;

    struct RejectingStore;

    #[async_trait]
    impl ContentStore for RejectingStore {
        async fn add(&self, _records: &[ChunkRecord]) -> Result<()> {
            Err(Error::storage("batch rejected"))
        }

        async fn count(&self) -> Result<usize> {
            Ok(0)
        }

        async fn health_check(&self) -> Result<bool> {
            Ok(false)
        }

        fn collection(&self) -> &str {
            "rejecting"
        }

        fn name(&self) -> &str {
            "rejecting"
        }
    }

    fn docx_bytes(paragraphs: &[String]) -> Vec<u8> {
        let docx = paragraphs.iter().fold(Docx::new(), |docx, text| {
            docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(text.as_str())))
        });
        let mut buf = Cursor::new(Vec::new());
        docx.build().pack(&mut buf).unwrap();
        buf.into_inner()
    }

    fn long_paragraphs() -> Vec<String> {
        (0..12)
            .map(|p| {
                (0..40)
                    .map(|w| format!("p{}w{}", p, w))
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect()
    }

    fn pipeline_with(store: Arc<dyn ContentStore>) -> (IngestPipeline, TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let mut config = RagConfig::default();
        config.upload.temp_dir = Some(dir.path().to_path_buf());
        (IngestPipeline::new(&config, store), dir)
    }

    fn temp_files(dir: &TempDir) -> usize {
        std::fs::read_dir(dir.path()).unwrap().count()
    }

    #[tokio::test]
    async fn test_ingest_stores_every_chunk() {
        let store = Arc::new(SqliteContentStore::in_memory("legal_documents").unwrap());
        let (pipeline, dir) = pipeline_with(store.clone());

        let data = docx_bytes(&long_paragraphs());
        let outcome = pipeline
            .ingest(SourceDocument::new("contract.docx", data))
            .await
            .unwrap();

        assert_eq!(outcome.filename, "contract.docx");
        assert!(outcome.chunks_added() > 1);
        assert_eq!(store.count().await.unwrap(), outcome.chunks_added());
        assert_eq!(temp_files(&dir), 0);
    }

    #[tokio::test]
    async fn test_repeat_upload_gets_fresh_ids() {
        let store = Arc::new(SqliteContentStore::in_memory("legal_documents").unwrap());
        let (pipeline, _dir) = pipeline_with(store.clone());
        let data = docx_bytes(&long_paragraphs());

        let first = pipeline
            .ingest(SourceDocument::new("a.docx", data.clone()))
            .await
            .unwrap();
        let second = pipeline
            .ingest(SourceDocument::new("a.docx", data))
            .await
            .unwrap();

        assert_eq!(first.chunks_added(), second.chunks_added());
        let ids: HashSet<_> = first.chunk_ids.iter().chain(&second.chunk_ids).collect();
        assert_eq!(ids.len(), first.chunks_added() * 2);
        assert_eq!(store.count().await.unwrap(), first.chunks_added() * 2);
    }

    #[test]
    fn test_extension_check_is_case_sensitive_suffix() {
        let (pipeline, _dir) = pipeline_with(Arc::new(RejectingStore));

        assert!(pipeline.check_extension("lease.docx").is_ok());
        assert!(pipeline.check_extension("lease.docx.txt").is_err());
        assert!(pipeline.check_extension("lease.DOCX").is_err());
        assert!(pipeline.check_extension("docx").is_err());
    }

    #[tokio::test]
    async fn test_wrong_extension_rejected_without_io() {
        let store = Arc::new(SqliteContentStore::in_memory("legal_documents").unwrap());
        let (pipeline, dir) = pipeline_with(store.clone());

        let err = pipeline
            .ingest(SourceDocument::new("notes.txt", b"plain text".to_vec()))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Validation(_)));
        assert_eq!(store.count().await.unwrap(), 0);
        assert_eq!(temp_files(&dir), 0);
    }

    #[tokio::test]
    async fn test_empty_document_yields_zero_chunks() {
        let store = Arc::new(SqliteContentStore::in_memory("legal_documents").unwrap());
        let (pipeline, _dir) = pipeline_with(store.clone());

        let outcome = pipeline
            .ingest(SourceDocument::new("blank.docx", docx_bytes(&[])))
            .await
            .unwrap();

        assert_eq!(outcome.chunks_added(), 0);
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_corrupt_document_cleans_up() {
        let store = Arc::new(SqliteContentStore::in_memory("legal_documents").unwrap());
        let (pipeline, dir) = pipeline_with(store.clone());

        let err = pipeline
            .ingest(SourceDocument::new("broken.docx", b"PK\x03\x04 truncated".to_vec()))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Extraction { .. }));
        assert_eq!(store.count().await.unwrap(), 0);
        assert_eq!(temp_files(&dir), 0);
    }

    #[tokio::test]
    async fn test_storage_failure_cleans_up() {
        let (pipeline, dir) = pipeline_with(Arc::new(RejectingStore));

        let err = pipeline
            .ingest(SourceDocument::new("ok.docx", docx_bytes(&long_paragraphs())))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Storage(_)));
        assert_eq!(temp_files(&dir), 0);
    }
}
