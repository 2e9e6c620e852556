use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicBool, Ordering},
        RwLock,
    },
};

use anyhow::{anyhow, Result};

use super::{KeyValueStore, StorageError};

/// In-process backend with an optional byte quota, mirroring the
/// browser's per-origin limit.
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RwLock<HashMap<String, String>>,
    quota_bytes: Option<usize>,
    unavailable: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            quota_bytes: Some(quota_bytes),
            ..Self::default()
        }
    }

    /// Make every subsequent call fail, as in private-browsing modes.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Store a raw value, bypassing quota checks. Used to seed fixtures.
    pub fn insert_raw(&self, key: &str, value: &str) {
        if let Ok(mut guard) = self.data.write() {
            guard.insert(key.to_string(), value.to_string());
        }
    }

    fn check_available(&self) -> Result<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("memory store disabled".into()).into());
        }
        Ok(())
    }
}

fn used_bytes(data: &HashMap<String, String>, excluding: &str) -> usize {
    data.iter()
        .filter(|(key, _)| key.as_str() != excluding)
        .map(|(key, value)| key.len() + value.len())
        .sum()
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.check_available()?;
        let guard = self
            .data
            .read()
            .map_err(|_| anyhow!("memory store lock poisoned"))?;
        Ok(guard.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.check_available()?;
        let mut guard = self
            .data
            .write()
            .map_err(|_| anyhow!("memory store lock poisoned"))?;

        if let Some(quota) = self.quota_bytes {
            let used = used_bytes(&guard, key);
            let needed = key.len() + value.len();
            if used + needed > quota {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    needed,
                    available: quota.saturating_sub(used),
                }
                .into());
            }
        }

        guard.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.check_available()?;
        let mut guard = self
            .data
            .write()
            .map_err(|_| anyhow!("memory store lock poisoned"))?;
        guard.remove(key);
        Ok(())
    }
}
