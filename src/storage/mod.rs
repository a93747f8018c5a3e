/// Storage layer for persisting engine data
///
/// The engine talks to a synchronous, process-local key-value store with no
/// transactional guarantees across keys. A SQLite-backed implementation is
/// provided, plus an in-memory one for tests and embedding.

pub mod migrations;
pub mod repository;
pub mod sqlite;

// Re-export the main storage types
pub use repository::Repository;
pub use sqlite::SqliteStore;

use std::cell::RefCell;
use std::collections::HashMap;

use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database connection error: {0}")]
    Connection(String),

    #[error("Database query error: {0}")]
    Query(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Migration error: {0}")]
    Migration(String),
}

/// The injected key-value store capability
///
/// This trait is the engine's only view of persistence, so the engine stays
/// a pure function of its inputs plus explicit collaborators and is testable
/// without a real database. A crash between two `set` calls can leave
/// unrelated keys out of step; callers tolerate that.
pub trait KeyValueStore {
    /// Read the raw bytes stored under a key, if any
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Write raw bytes under a key, replacing any previous value
    fn set(&self, key: &str, value: &[u8]) -> Result<(), StorageError>;
}

/// HashMap-backed store for tests and in-process embedding
#[derive(Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        self.entries.borrow_mut().insert(key.to_string(), value.to_vec());
        Ok(())
    }
}
