use std::{path::PathBuf, sync::Arc, time::Duration};

use anyhow::{bail, Result};

use crate::storage::{JsonFileStore, KeyValueStore, MemoryStore, NullStore, SqliteStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// Persist nothing, for server-rendered targets
    Disabled,
    Memory,
    JsonFile,
    Sqlite,
}

/// Card grid tunables.
#[derive(Debug, Clone)]
pub struct GridConfig {
    /// Cards revealed per load-more
    pub page_size: usize,
    /// Cards shown per difficulty section before "view all"
    pub preview_count: usize,
    /// Simulated network delay of a load-more
    pub load_delay: Duration,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            page_size: 8,
            preview_count: 4,
            load_delay: Duration::from_millis(600),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Overlay search waits this long after the last keystroke
    pub debounce: Duration,
    pub min_query_chars: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(300),
            min_query_chars: 2,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub storage: StorageBackend,
    pub data_dir: PathBuf,
    pub api_base: String,
    pub grid: GridConfig,
    pub search: SearchConfig,
    /// Simulated latency of the in-page "Run Code" button
    pub run_delay: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage: StorageBackend::Memory,
            data_dir: PathBuf::from(".tutorhub"),
            api_base: "http://localhost:3000".into(),
            grid: GridConfig::default(),
            search: SearchConfig::default(),
            run_delay: Duration::from_millis(1000),
        }
    }
}

impl AppConfig {
    /// Read `TUTORHUB_*` variables on top of the defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(value) = lookup("TUTORHUB_STORAGE") {
            config.storage = match value.to_ascii_lowercase().as_str() {
                "none" => StorageBackend::Disabled,
                "memory" => StorageBackend::Memory,
                "json" => StorageBackend::JsonFile,
                "sqlite" => StorageBackend::Sqlite,
                other => bail!("unknown TUTORHUB_STORAGE backend '{other}'"),
            };
        }
        if let Some(dir) = lookup("TUTORHUB_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(base) = lookup("TUTORHUB_API_BASE") {
            config.api_base = base.trim_end_matches('/').to_string();
        }

        let debug_mode = lookup("TUTORHUB_DEBUG")
            .map(|value| value == "1" || value.eq_ignore_ascii_case("true"))
            .unwrap_or(false);
        if debug_mode {
            config.grid.load_delay = Duration::from_millis(50);
            config.run_delay = Duration::from_millis(50);
        }

        Ok(config)
    }

    pub fn open_storage(&self) -> Result<Arc<dyn KeyValueStore>> {
        let backend: Arc<dyn KeyValueStore> = match self.storage {
            StorageBackend::Disabled => Arc::new(NullStore),
            StorageBackend::Memory => Arc::new(MemoryStore::new()),
            StorageBackend::JsonFile => {
                Arc::new(JsonFileStore::new(self.data_dir.join("storage.json"))?)
            }
            StorageBackend::Sqlite => {
                Arc::new(SqliteStore::new(self.data_dir.join("tutorhub.sqlite3"))?)
            }
        };
        Ok(backend)
    }
}
