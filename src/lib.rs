pub mod config;
pub mod engagement;
pub mod grid;
pub mod models;
pub mod playground;
pub mod preferences;
pub mod progress;
pub mod search;
pub mod storage;
pub mod utils;

use std::sync::Arc;

use anyhow::Result;
use log::info;
use serde::Serialize;

use config::AppConfig;
use engagement::{EngagementState, ReactionCounters};
use grid::{
    all_section, level_sections, AllSection, GridController, GridFilter, GridSources,
    LevelSection, PreviewModal, ScrollLock,
};
use models::{Catalog, ReactionCounts, SearchRecord, TutorialId, Viewer};
use playground::{HttpCodeRunner, SimulatedRunner};
use preferences::PreferencesStore;
use progress::ProgressTracker;
use search::{HttpSearchBackend, OverlaySearch, QuickSearch, SearchIndex};
use storage::{KeyValueStore, RecordStore};

pub use utils::init_logging;

/// Result of a like toggle, for the card and the detail page alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeToggle {
    pub liked: bool,
    pub reactions: ReactionCounts,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridView {
    pub sections: Vec<LevelSection>,
    pub all: AllSection,
}

/// Root of the client state. Every model is rehydrated here, before any
/// mutation can reach it.
pub struct AppState {
    pub config: AppConfig,
    pub catalog: Arc<Catalog>,
    pub store: RecordStore,
    pub progress: ProgressTracker,
    pub engagement: EngagementState,
    pub counters: ReactionCounters,
    pub preferences: PreferencesStore,
    pub search_index: Arc<SearchIndex>,
    pub grid: GridController,
    pub scroll: ScrollLock,
    pub viewer: Viewer,
}

impl AppState {
    /// Open the configured storage backend and load every model from it.
    /// `extra_search` adds project and blog records to the tutorial titles.
    pub fn bootstrap(
        config: AppConfig,
        catalog: Catalog,
        extra_search: Vec<SearchRecord>,
        viewer: Viewer,
    ) -> Result<Self> {
        let backend = config.open_storage()?;
        Ok(Self::with_storage(config, backend, catalog, extra_search, viewer))
    }

    pub fn with_storage(
        config: AppConfig,
        backend: Arc<dyn KeyValueStore>,
        catalog: Catalog,
        extra_search: Vec<SearchRecord>,
        viewer: Viewer,
    ) -> Self {
        let store = RecordStore::new(backend);

        let mut search_records = catalog.search_records();
        search_records.extend(extra_search);

        let state = Self {
            progress: ProgressTracker::load(store.clone(), catalog.outlines()),
            engagement: EngagementState::load(store.clone()),
            counters: ReactionCounters::seed(&catalog),
            preferences: PreferencesStore::load(store.clone()),
            search_index: Arc::new(SearchIndex::new(search_records)),
            grid: GridController::new(catalog.len(), &config.grid),
            scroll: ScrollLock::new(),
            catalog: Arc::new(catalog),
            store,
            viewer,
            config,
        };

        info!(
            "tutorial state ready: {} tutorials, {} searchable records, viewer {}",
            state.catalog.len(),
            state.search_index.records().len(),
            state.viewer.display_name()
        );
        state
    }

    pub fn toggle_like(&self, tutorial_id: &TutorialId) -> LikeToggle {
        let liked = self.engagement.toggle_like(tutorial_id);
        LikeToggle {
            liked,
            reactions: self.counters.record_like(tutorial_id, liked),
        }
    }

    pub fn quick_search(&self) -> QuickSearch {
        QuickSearch::new(Arc::clone(&self.search_index))
    }

    pub fn overlay_search(&self) -> Result<OverlaySearch<HttpSearchBackend>> {
        let backend = HttpSearchBackend::new(self.config.api_base.clone())?;
        Ok(OverlaySearch::new(Arc::new(backend), &self.config.search))
    }

    pub fn code_runner(&self) -> Result<HttpCodeRunner> {
        HttpCodeRunner::new(self.config.api_base.clone())
    }

    pub fn simulated_runner(&self, exercises: Vec<playground::CannedExercise>) -> SimulatedRunner {
        SimulatedRunner::new(exercises, self.config.run_delay)
    }

    pub fn preview_modal(&self) -> PreviewModal {
        PreviewModal::new(self.scroll.clone())
    }

    pub fn grid_sources(&self) -> GridSources<'_> {
        GridSources {
            catalog: &self.catalog,
            engagement: &self.engagement,
            counters: &self.counters,
            progress: &self.progress,
        }
    }

    /// Level previews plus the cursor-limited "All Tutorials" section.
    pub async fn grid_view(&self, filter: &GridFilter) -> GridView {
        let cards = self.grid_sources().cards(filter);
        self.grid.set_total(cards.len()).await;
        let snapshot = self.grid.get_snapshot().await;

        GridView {
            sections: level_sections(&cards, self.config.grid.preview_count),
            all: all_section(&cards, &snapshot),
        }
    }
}
