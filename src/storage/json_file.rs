use std::{
    collections::BTreeMap,
    fs,
    path::PathBuf,
    sync::RwLock,
};

use anyhow::{anyhow, Context, Result};
use log::warn;

use super::KeyValueStore;

/// Whole-map JSON file, rewritten on every mutation.
pub struct JsonFileStore {
    path: PathBuf,
    data: RwLock<BTreeMap<String, String>>,
}

impl JsonFileStore {
    /// Open the file at `path`. A missing or unparsable file starts empty.
    pub fn new(path: PathBuf) -> Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("failed to create storage directory {}", parent.display())
            })?;
        }

        let data: BTreeMap<String, String> = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read storage from {}", path.display()))?;
            serde_json::from_str(&contents).unwrap_or_else(|err| {
                warn!(
                    "discarding unreadable storage file {}, starting empty: {err}",
                    path.display()
                );
                BTreeMap::new()
            })
        } else {
            BTreeMap::new()
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    /// Re-read the file, picking up writes from another process.
    pub fn reload(&self) -> Result<()> {
        let contents = fs::read_to_string(&self.path)?;
        let data: BTreeMap<String, String> = serde_json::from_str(&contents)?;
        let mut guard = self
            .data
            .write()
            .map_err(|_| anyhow!("storage lock poisoned"))?;
        *guard = data;
        Ok(())
    }

    fn persist(&self, data: &BTreeMap<String, String>) -> Result<()> {
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write storage to {}", self.path.display()))
    }

    fn mutate(&self, apply: impl FnOnce(&mut BTreeMap<String, String>)) -> Result<()> {
        let mut guard = self
            .data
            .write()
            .map_err(|_| anyhow!("storage lock poisoned"))?;
        let mut next = guard.clone();
        apply(&mut next);
        self.persist(&next)?;
        *guard = next;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let guard = self
            .data
            .read()
            .map_err(|_| anyhow!("storage lock poisoned"))?;
        Ok(guard.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.mutate(|data| {
            data.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.mutate(|data| {
            data.remove(key);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");

        let store = JsonFileStore::new(path.clone()).unwrap();
        store.set("likedTutorials", r#"["python-loops"]"#).unwrap();
        drop(store);

        let reopened = JsonFileStore::new(path).unwrap();
        assert_eq!(
            reopened.get("likedTutorials").unwrap().as_deref(),
            Some(r#"["python-loops"]"#)
        );
    }

    #[test]
    fn corrupt_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, "{not json").unwrap();

        let store = JsonFileStore::new(path).unwrap();
        assert_eq!(store.get("anything").unwrap(), None);
    }

    #[test]
    fn reload_picks_up_external_writes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        let first = JsonFileStore::new(path.clone()).unwrap();
        let second = JsonFileStore::new(path).unwrap();

        second.set("tutorial-dark-mode", "true").unwrap();
        assert_eq!(first.get("tutorial-dark-mode").unwrap(), None);

        first.reload().unwrap();
        assert_eq!(
            first.get("tutorial-dark-mode").unwrap().as_deref(),
            Some("true")
        );
    }
}
