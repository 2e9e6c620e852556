//! Key-value persistence standing in for browser local storage.
//!
//! State models never touch a backend directly: they hold a [`RecordStore`],
//! which wraps any [`KeyValueStore`] implementation (memory, JSON file,
//! SQLite) and applies the degrade-to-default error policy.

pub mod json_file;
pub mod keys;
pub mod memory;
pub mod record;
pub mod sqlite;

use anyhow::Result;
use thiserror::Error;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
pub use record::{RecordStore, StoreEvent};
pub use sqlite::SqliteStore;

/// Failures a backend reports for conditions browsers also surface.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage quota exceeded writing {key} ({needed} bytes, {available} available)")]
    QuotaExceeded {
        key: String,
        needed: usize,
        available: usize,
    },
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// String-keyed, string-valued persistent storage.
///
/// Implementations must give read-your-writes ordering within a process.
/// Calls block the caller; the SQLite backend waits on its worker thread.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// Backend that persists nothing, for server-rendered targets.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullStore;

impl KeyValueStore for NullStore {
    fn get(&self, _key: &str) -> Result<Option<String>> {
        Ok(None)
    }

    fn set(&self, _key: &str, _value: &str) -> Result<()> {
        Ok(())
    }

    fn remove(&self, _key: &str) -> Result<()> {
        Ok(())
    }
}
