use std::sync::Arc;

use tokio::sync::watch;

use crate::{config::SearchConfig, models::SearchHit};

use super::{
    debounce::Debouncer,
    navigator::{NavAction, NavKey, SearchNavigator},
    remote::{search_or_empty, SearchBackend},
};

/// State of the modal search overlay's result list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverlayResults {
    pub query: String,
    pub hits: Vec<SearchHit>,
    pub loading: bool,
}

/// Full-screen search: debounced, network backed, multi-field.
pub struct OverlaySearch<B: SearchBackend> {
    backend: Arc<B>,
    debouncer: Debouncer,
    min_query_chars: usize,
    results_tx: Arc<watch::Sender<OverlayResults>>,
    results_rx: watch::Receiver<OverlayResults>,
    navigator: SearchNavigator,
}

impl<B: SearchBackend> OverlaySearch<B> {
    pub fn new(backend: Arc<B>, config: &SearchConfig) -> Self {
        let (results_tx, results_rx) = watch::channel(OverlayResults::default());
        let mut navigator = SearchNavigator::default();
        navigator.open();
        Self {
            backend,
            debouncer: Debouncer::new(config.debounce),
            min_query_chars: config.min_query_chars,
            results_tx: Arc::new(results_tx),
            results_rx,
            navigator,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<OverlayResults> {
        self.results_tx.subscribe()
    }

    pub fn results(&self) -> OverlayResults {
        self.results_rx.borrow().clone()
    }

    /// Record a keystroke. The request fires once input has been idle for the
    /// debounce interval; a newer keystroke cancels any older request.
    pub fn on_input(&mut self, text: &str) {
        let query = text.trim().to_string();
        self.navigator.open();

        if query.chars().count() < self.min_query_chars {
            self.debouncer.cancel();
            self.results_tx.send_replace(OverlayResults {
                query,
                hits: Vec::new(),
                loading: false,
            });
            return;
        }

        self.results_tx.send_modify(|results| {
            results.query = query.clone();
            results.loading = true;
        });

        let backend = Arc::clone(&self.backend);
        let results_tx = Arc::clone(&self.results_tx);
        self.debouncer.schedule(async move {
            let hits = search_or_empty(backend.as_ref(), &query).await;
            results_tx.send_replace(OverlayResults {
                query,
                hits,
                loading: false,
            });
        });
    }

    pub fn handle_key(&mut self, key: NavKey) -> NavAction {
        if self.results_rx.has_changed().unwrap_or(false) {
            let urls = self
                .results_rx
                .borrow_and_update()
                .hits
                .iter()
                .map(|hit| hit.url.clone())
                .collect();
            self.navigator.set_results(urls);
        }

        let action = self.navigator.handle_key(key);
        if matches!(action, NavAction::Navigate(_) | NavAction::Close) {
            self.debouncer.cancel();
        }
        action
    }

    pub fn click_outside(&mut self) -> NavAction {
        self.debouncer.cancel();
        self.navigator.click_outside()
    }

    pub fn is_open(&self) -> bool {
        self.navigator.is_open()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::time::Duration;

    use anyhow::{bail, Result};
    use tokio::time;

    use super::*;

    #[derive(Default)]
    struct RecordingBackend {
        queries: Mutex<Vec<String>>,
        fail: bool,
    }

    impl SearchBackend for RecordingBackend {
        async fn search(&self, query: &str) -> Result<Vec<SearchHit>> {
            self.queries.lock().unwrap().push(query.to_string());
            if self.fail {
                bail!("offline");
            }
            Ok(vec![SearchHit {
                kind: "tutorial".into(),
                title: format!("Result for {query}"),
                description: "matches description too".into(),
                url: format!("/search/{query}"),
            }])
        }
    }

    fn overlay(backend: Arc<RecordingBackend>) -> OverlaySearch<RecordingBackend> {
        OverlaySearch::new(backend, &SearchConfig::default())
    }

    #[tokio::test(start_paused = true)]
    async fn rapid_typing_issues_one_request_for_last_text() {
        let backend = Arc::new(RecordingBackend::default());
        let mut search = overlay(backend.clone());

        for text in ["py", "pyt", "pyth"] {
            search.on_input(text);
            time::sleep(Duration::from_millis(100)).await;
        }
        assert!(search.results().loading);

        time::sleep(Duration::from_millis(400)).await;
        assert_eq!(*backend.queries.lock().unwrap(), vec!["pyth".to_string()]);

        let results = search.results();
        assert!(!results.loading);
        assert_eq!(results.query, "pyth");
        assert_eq!(results.hits.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn short_query_clears_without_request() {
        let backend = Arc::new(RecordingBackend::default());
        let mut search = overlay(backend.clone());

        search.on_input("py");
        search.on_input("p");
        time::sleep(Duration::from_millis(500)).await;

        assert!(backend.queries.lock().unwrap().is_empty());
        assert!(search.results().hits.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn backend_failure_shows_empty_results() {
        let backend = Arc::new(RecordingBackend {
            fail: true,
            ..Default::default()
        });
        let mut search = overlay(backend);

        search.on_input("loops");
        time::sleep(Duration::from_millis(400)).await;

        let results = search.results();
        assert!(results.hits.is_empty());
        assert!(!results.loading);
    }

    #[tokio::test(start_paused = true)]
    async fn keyboard_selects_arrived_results() {
        let backend = Arc::new(RecordingBackend::default());
        let mut search = overlay(backend);

        search.on_input("dicts");
        time::sleep(Duration::from_millis(400)).await;

        assert_eq!(search.handle_key(NavKey::ArrowDown), NavAction::Moved(0));
        assert_eq!(
            search.handle_key(NavKey::Enter),
            NavAction::Navigate("/search/dicts".into())
        );
        assert!(!search.is_open());
    }
}
