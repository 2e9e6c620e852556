use std::{sync::Arc, time::Duration};

use serde::Serialize;
use tokio::{sync::Mutex, time};

use crate::config::GridConfig;

use super::{GridState, LoadStatus};

const ENABLE_LOGS: bool = false;

use crate::log_info;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", tag = "outcome")]
pub enum LoadOutcome {
    Loaded { visible_count: usize },
    /// A load was already in flight.
    Ignored,
    Exhausted,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GridSnapshot {
    pub state: GridState,
    pub skeleton_count: usize,
    pub has_more: bool,
}

/// Drives the load-more cursor. Clones share state.
#[derive(Clone)]
pub struct GridController {
    state: Arc<Mutex<GridState>>,
    load_delay: Duration,
}

impl GridController {
    pub fn new(total: usize, config: &GridConfig) -> Self {
        Self {
            state: Arc::new(Mutex::new(GridState::new(total, config.page_size))),
            load_delay: config.load_delay,
        }
    }

    pub async fn get_snapshot(&self) -> GridSnapshot {
        let guard = self.state.lock().await;
        GridSnapshot {
            skeleton_count: guard.skeleton_count(),
            has_more: guard.has_more(),
            state: guard.clone(),
        }
    }

    /// Reveal the next page after the simulated delay. Triggers that arrive
    /// while a page is in flight are ignored; the in-flight load cannot be
    /// cancelled.
    pub async fn load_more(&self) -> LoadOutcome {
        {
            let mut state = self.state.lock().await;
            if state.status == LoadStatus::Loading {
                return LoadOutcome::Ignored;
            }
            if !state.begin_load() {
                return LoadOutcome::Exhausted;
            }
        }

        time::sleep(self.load_delay).await;

        let mut state = self.state.lock().await;
        state.finish_load();
        log_info!("revealed {} of {} cards", state.visible_count, state.total);
        LoadOutcome::Loaded {
            visible_count: state.visible_count,
        }
    }

    pub async fn set_total(&self, total: usize) {
        self.state.lock().await.set_total(total);
    }
}
