//! SQLite database backing the persistent chunk collections

use chrono::Utc;
use parking_lot::Mutex;
use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::types::ChunkRecord;

/// SQLite-based content store: named collections of `(id, text)` rows
pub struct ContentStoreDb {
    conn: Arc<Mutex<Connection>>,
}

impl ContentStoreDb {
    /// Create or open the database at the given path, creating parent directories
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                Error::Storage(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }

        let conn = Connection::open(path)
            .map_err(|e| Error::Storage(format!("Failed to open database: {}", e)))?;

        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };

        db.migrate(true)?;
        Ok(db)
    }

    /// Create an in-memory database (tests, throwaway servers)
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| Error::Storage(format!("Failed to open in-memory database: {}", e)))?;

        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };

        db.migrate(false)?;
        Ok(db)
    }

    /// Run database migrations
    fn migrate(&self, on_disk: bool) -> Result<()> {
        let conn = self.conn.lock();

        if on_disk {
            conn.execute_batch(
                r#"
                PRAGMA journal_mode=WAL;
                PRAGMA synchronous=NORMAL;
                "#,
            )
            .map_err(|e| Error::Storage(format!("Failed to set pragmas: {}", e)))?;
        }

        conn.execute_batch(
            r#"
            PRAGMA foreign_keys=ON;

            CREATE TABLE IF NOT EXISTS collections (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL UNIQUE,
                created_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS chunks (
                id TEXT PRIMARY KEY,
                collection_id INTEGER NOT NULL,
                document TEXT NOT NULL,
                created_at TEXT NOT NULL,
                FOREIGN KEY (collection_id) REFERENCES collections(id)
            );

            CREATE INDEX IF NOT EXISTS idx_chunks_collection_id ON chunks(collection_id);
            "#,
        )
        .map_err(|e| Error::Storage(format!("Failed to run migrations: {}", e)))?;

        tracing::debug!("Content store migrations complete");
        Ok(())
    }

    /// Look up a collection by name, creating it if missing. Returns its row id.
    pub fn get_or_create_collection(&self, name: &str) -> Result<i64> {
        let conn = self.conn.lock();

        conn.execute(
            "INSERT OR IGNORE INTO collections (name, created_at) VALUES (?1, ?2)",
            params![name, Utc::now().to_rfc3339()],
        )
        .map_err(|e| Error::Storage(format!("Failed to create collection '{}': {}", name, e)))?;

        let id = conn
            .query_row(
                "SELECT id FROM collections WHERE name = ?1",
                params![name],
                |row| row.get(0),
            )
            .map_err(|e| Error::Storage(format!("Failed to load collection '{}': {}", name, e)))?;

        Ok(id)
    }

    /// Insert a batch of chunks in one transaction. Either every row lands
    /// or none does.
    pub fn insert_chunks(&self, collection_id: i64, chunks: &[ChunkRecord]) -> Result<()> {
        if chunks.is_empty() {
            return Ok(());
        }

        let mut conn = self.conn.lock();

        let tx = conn
            .transaction()
            .map_err(|e| Error::Storage(format!("Failed to begin transaction: {}", e)))?;

        {
            let mut stmt = tx
                .prepare(
                    "INSERT INTO chunks (id, collection_id, document, created_at) VALUES (?1, ?2, ?3, ?4)",
                )
                .map_err(|e| Error::Storage(format!("Failed to prepare statement: {}", e)))?;

            let now = Utc::now().to_rfc3339();
            for chunk in chunks {
                stmt.execute(params![chunk.id.to_string(), collection_id, chunk.text, &now])
                    .map_err(|e| Error::Storage(format!("Failed to insert chunk {}: {}", chunk.id, e)))?;
            }
        }

        tx.commit()
            .map_err(|e| Error::Storage(format!("Failed to commit transaction: {}", e)))?;

        Ok(())
    }

    /// Number of chunks in a collection
    pub fn count_chunks(&self, collection_id: i64) -> Result<usize> {
        let conn = self.conn.lock();

        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM chunks WHERE collection_id = ?1",
                params![collection_id],
                |row| row.get(0),
            )
            .map_err(|e| Error::Storage(format!("Failed to count chunks: {}", e)))?;

        Ok(count as usize)
    }

    /// Cheap liveness probe
    pub fn ping(&self) -> Result<()> {
        let conn = self.conn.lock();
        conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))
            .map_err(|e| Error::Storage(format!("Database ping failed: {}", e)))?;
        Ok(())
    }
}
