use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::broadcast;

use crate::models::{EngagementRecord, ProgressRecord, ReadingPreferences};

use super::KeyValueStore;

const ENABLE_LOGS: bool = true;

use crate::log_warn;

const EVENT_CAPACITY: usize = 64;

/// Change notification published after a state model mutates.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreEvent {
    Progress(ProgressRecord),
    Engagement(EngagementRecord),
    Preferences(ReadingPreferences),
}

/// Typed JSON view over a [`KeyValueStore`].
///
/// Reads never fail: backend errors and malformed payloads come back as
/// `None`. Writes report success as a bool and log failures; the caller's
/// in-memory state stays authoritative either way.
#[derive(Clone)]
pub struct RecordStore {
    backend: Arc<dyn KeyValueStore>,
    events: broadcast::Sender<StoreEvent>,
}

impl RecordStore {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self { backend, events }
    }

    pub fn read<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.backend.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                log_warn!("storage read of {key} failed, using default: {err:#}");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                log_warn!("discarding malformed value under {key}: {err}");
                None
            }
        }
    }

    pub fn write<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> bool {
        let serialized = match serde_json::to_string(value) {
            Ok(serialized) => serialized,
            Err(err) => {
                log_warn!("failed to serialize {key}: {err}");
                return false;
            }
        };

        match self.backend.set(key, &serialized) {
            Ok(()) => true,
            Err(err) => {
                log_warn!("failed to persist {key}: {err:#}");
                false
            }
        }
    }

    pub fn remove(&self, key: &str) -> bool {
        match self.backend.remove(key) {
            Ok(()) => true,
            Err(err) => {
                log_warn!("failed to remove {key}: {err:#}");
                false
            }
        }
    }

    pub fn publish(&self, event: StoreEvent) {
        // No subscribers is not an error.
        let _ = self.events.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }
}
