//! Storage module for persistent data storage
//!
//! Provides SQLite-based persistence for uploaded chunks.

mod database;

pub use database::ContentStoreDb;
