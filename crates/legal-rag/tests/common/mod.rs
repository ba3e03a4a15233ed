//! Shared helpers for router-level tests

#![allow(dead_code)]

use std::io::Cursor;
use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, Response};
use docx_rs::{Docx, Paragraph, Run};
use legal_rag::providers::{ContentStore, SqliteContentStore};
use legal_rag::{AppState, ChatRelay, RagConfig};
use serde_json::Value;
use tempfile::TempDir;

pub const BOUNDARY: &str = "legal-rag-test-boundary";

/// A router state backed by an in-memory store and a private temp dir
pub struct TestApp {
    pub state: AppState,
    pub store: Arc<SqliteContentStore>,
    pub temp_dir: TempDir,
}

impl TestApp {
    pub fn new(config: RagConfig) -> Self {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut config = config;
        config.upload.temp_dir = Some(temp_dir.path().to_path_buf());

        let store = Arc::new(SqliteContentStore::in_memory(config.store.collection.clone()).unwrap());
        let chat = ChatRelay::from_config(&config.llm).unwrap();
        let state = AppState::from_parts(config, store.clone() as Arc<dyn ContentStore>, chat);

        Self {
            state,
            store,
            temp_dir,
        }
    }

    pub fn router(&self) -> axum::Router {
        legal_rag::build_router(self.state.clone())
    }

    pub async fn chunk_count(&self) -> usize {
        self.store.count().await.unwrap()
    }

    pub fn leftover_temp_files(&self) -> usize {
        std::fs::read_dir(self.temp_dir.path()).unwrap().count()
    }
}

/// Config with no completion credential
pub fn offline_config() -> RagConfig {
    let mut config = RagConfig::default();
    config.llm.api_key = None;
    config
}

pub fn docx_bytes(paragraphs: &[String]) -> Vec<u8> {
    let docx = paragraphs.iter().fold(Docx::new(), |docx, text| {
        docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(text.as_str())))
    });
    let mut buf = Cursor::new(Vec::new());
    docx.build().pack(&mut buf).unwrap();
    buf.into_inner()
}

/// Roughly 3.6k characters of contract text split across paragraphs
pub fn contract_paragraphs() -> Vec<String> {
    (1..=12)
        .map(|n| {
            format!(
                "Стаття {}. Орендар зобов'язаний своєчасно сплачувати орендну плату. \
                 Орендодавець забезпечує належний стан приміщення протягом усього строку дії договору. \
                 Сторони несуть відповідальність згідно з чинним законодавством України.",
                n
            )
        })
        .collect()
}

/// Single-part multipart body
pub fn multipart_body(field: &str, filename: &str, content_type: &str, data: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
            field, filename
        )
        .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", content_type).as_bytes());
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
    body
}

pub fn upload_request(filename: &str, data: &[u8]) -> Request<Body> {
    upload_request_with_field("file", filename, data)
}

pub fn upload_request_with_field(field: &str, filename: &str, data: &[u8]) -> Request<Body> {
    let body = multipart_body(
        field,
        filename,
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        data,
    );
    Request::builder()
        .method("POST")
        .uri("/upload")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

pub fn chat_request(body: impl Into<String>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/chat")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.into()))
        .unwrap()
}

pub async fn json_body(response: Response<Body>) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
