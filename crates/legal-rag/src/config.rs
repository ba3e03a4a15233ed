//! Configuration for the legal-rag server

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Environment variable holding the completion API credential
pub const API_KEY_ENV: &str = "OPENROUTER_API_KEY";
/// Environment variable pointing at a TOML config file
pub const CONFIG_PATH_ENV: &str = "LEGAL_RAG_CONFIG";
/// Environment variable overriding the bind host
pub const HOST_ENV: &str = "LEGAL_RAG_HOST";
/// Environment variable overriding the bind port
pub const PORT_ENV: &str = "LEGAL_RAG_PORT";

/// Dotenv file read from the working directory at startup
pub const DOTENV_FILE: &str = ".env";

/// Value shipped in sample `.env` files; treated the same as a missing key
pub const API_KEY_PLACEHOLDER: &str = "YOUR_API_KEY_HERE";

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RagConfig {
    /// Server configuration
    pub server: ServerConfig,
    /// Chunking configuration
    pub chunking: ChunkingConfig,
    /// Completion API configuration
    pub llm: LlmConfig,
    /// Content store configuration
    pub store: StoreConfig,
    /// Upload handling configuration
    pub upload: UploadConfig,
}

impl RagConfig {
    /// Load configuration: defaults, then the optional TOML file, then the
    /// environment. Process variables win over entries in `./.env`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let dotenv = read_dotenv(Path::new(DOTENV_FILE))?;
        Self::load_with(path, |key| {
            std::env::var(key).ok().or_else(|| dotenv.get(key).cloned())
        })
    }

    /// Same as [`RagConfig::load`] with an explicit environment lookup
    pub fn load_with<F>(path: Option<&Path>, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(lookup)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML config file; missing sections fall back to defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&raw)
    }

    /// Parse TOML text
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        toml::from_str(raw).map_err(|e| Error::Config(format!("Invalid config: {}", e)))
    }

    /// Apply overrides from an environment lookup
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(API_KEY_ENV) {
            self.llm.api_key = Some(key);
        }
        if let Some(host) = lookup(HOST_ENV) {
            self.server.host = host;
        }
        if let Some(port) = lookup(PORT_ENV) {
            self.server.port = port
                .parse()
                .map_err(|e| Error::Config(format!("Invalid {}: {}", PORT_ENV, e)))?;
        }
        Ok(())
    }

    /// Reject settings the pipeline cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.chunking.chunk_size == 0 {
            return Err(Error::Config("chunk_size must be greater than 0".to_string()));
        }
        if self.chunking.chunk_overlap >= self.chunking.chunk_size {
            return Err(Error::Config(format!(
                "chunk_overlap ({}) must be smaller than chunk_size ({})",
                self.chunking.chunk_overlap, self.chunking.chunk_size
            )));
        }
        if !self.upload.accepted_extension.starts_with('.') {
            return Err(Error::Config(format!(
                "accepted_extension must start with '.', got '{}'",
                self.upload.accepted_extension
            )));
        }
        if self.store.collection.trim().is_empty() {
            return Err(Error::Config("store.collection must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Read `KEY=value` pairs from a dotenv file without exporting them.
/// A missing file yields no entries.
pub fn read_dotenv(path: &Path) -> Result<HashMap<String, String>> {
    if !path.exists() {
        return Ok(HashMap::new());
    }

    let entries = dotenvy::from_path_iter(path)
        .map_err(|e| Error::Config(format!("Failed to open {}: {}", path.display(), e)))?
        .collect::<std::result::Result<HashMap<_, _>, _>>()
        .map_err(|e| Error::Config(format!("Invalid {}: {}", path.display(), e)))?;

    tracing::info!("Loaded {} entries from {}", entries.len(), path.display());
    Ok(entries)
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host address
    pub host: String,
    /// Port number
    pub port: u16,
    /// Enable CORS (any origin)
    pub enable_cors: bool,
    /// Maximum upload size in bytes (default: 100MB)
    pub max_upload_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            enable_cors: true,
            max_upload_size: 100 * 1024 * 1024, // 100MB
        }
    }
}

/// Text chunking configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkingConfig {
    /// Maximum chunk size in characters
    pub chunk_size: usize,
    /// Overlap between consecutive chunks in characters
    pub chunk_overlap: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            chunk_overlap: 200,
        }
    }
}

/// Completion API configuration (OpenAI-compatible, OpenRouter by default)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// API base URL; `/chat/completions` is appended
    pub base_url: String,
    /// Model identifier
    pub model: String,
    /// API key; never written back out
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// Maximum reply length in tokens
    pub max_tokens: u32,
    /// Sampling temperature
    pub temperature: f32,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl LlmConfig {
    /// The usable credential, if one is configured
    pub fn credential(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty() && *key != API_KEY_PLACEHOLDER)
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "https://openrouter.ai/api/v1".to_string(),
            model: "x-ai/grok-4-fast:free".to_string(),
            api_key: None,
            max_tokens: 1024,
            temperature: 0.7,
            timeout_secs: 120,
        }
    }
}

/// Content store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// SQLite database file; relative paths resolve against the process
    /// working directory
    pub path: PathBuf,
    /// Collection that receives uploaded chunks
    pub collection: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("content_db").join("store.sqlite3"),
            collection: "legal_documents".to_string(),
        }
    }
}

/// Upload handling configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    /// Only filenames ending in this extension are accepted
    pub accepted_extension: String,
    /// Directory for request-scoped temporary files (OS temp dir if unset)
    pub temp_dir: Option<PathBuf>,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            accepted_extension: ".docx".to_string(),
            temp_dir: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RagConfig::default();
        assert_eq!(config.chunking.chunk_size, 1000);
        assert_eq!(config.chunking.chunk_overlap, 200);
        assert_eq!(config.llm.max_tokens, 1024);
        assert_eq!(config.llm.model, "x-ai/grok-4-fast:free");
        assert_eq!(config.store.collection, "legal_documents");
        assert_eq!(config.upload.accepted_extension, ".docx");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = RagConfig::from_toml_str(
            r#"
            [server]
            port = 9100

            [chunking]
            chunk_overlap = 50
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 9100);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.chunking.chunk_size, 1000);
        assert_eq!(config.chunking.chunk_overlap, 50);
    }

    #[test]
    fn test_env_overrides() {
        let mut config = RagConfig::default();
        config
            .apply_env(|key| match key {
                API_KEY_ENV => Some("sk-or-test".to_string()),
                PORT_ENV => Some("8123".to_string()),
                _ => None,
            })
            .unwrap();

        assert_eq!(config.llm.credential(), Some("sk-or-test"));
        assert_eq!(config.server.port, 8123);

        let err = config.apply_env(|key| (key == PORT_ENV).then(|| "eighty".to_string()));
        assert!(matches!(err, Err(Error::Config(_))));
    }

    #[test]
    fn test_dotenv_supplies_missing_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(
            &path,
            "# backend secrets\nOPENROUTER_API_KEY=sk-or-from-file\nLEGAL_RAG_PORT=8200\n",
        )
        .unwrap();

        let dotenv = read_dotenv(&path).unwrap();
        assert_eq!(dotenv.get(API_KEY_ENV).map(String::as_str), Some("sk-or-from-file"));

        let config = RagConfig::load_with(None, |key| dotenv.get(key).cloned()).unwrap();
        assert_eq!(config.llm.credential(), Some("sk-or-from-file"));
        assert_eq!(config.server.port, 8200);
    }

    #[test]
    fn test_missing_dotenv_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let dotenv = read_dotenv(&dir.path().join(".env")).unwrap();
        assert!(dotenv.is_empty());
    }

    #[test]
    fn test_placeholder_key_is_not_a_credential() {
        let mut llm = LlmConfig::default();
        assert_eq!(llm.credential(), None);

        llm.api_key = Some(API_KEY_PLACEHOLDER.to_string());
        assert_eq!(llm.credential(), None);

        llm.api_key = Some("   ".to_string());
        assert_eq!(llm.credential(), None);
    }

    #[test]
    fn test_validate_rejects_overlap_not_below_size() {
        let mut config = RagConfig::default();
        config.chunking.chunk_overlap = 1000;
        assert!(config.validate().is_err());

        config.chunking.chunk_size = 0;
        config.chunking.chunk_overlap = 0;
        assert!(config.validate().is_err());
    }
}
