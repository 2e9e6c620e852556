use std::sync::Arc;

use crate::models::{SearchCategory, SearchQueryState, SearchRecord};

use super::navigator::{NavAction, NavKey, SearchNavigator};

/// Static in-memory corpus behind the navbar quick search.
#[derive(Debug, Clone, Default)]
pub struct SearchIndex {
    records: Vec<SearchRecord>,
}

impl SearchIndex {
    pub fn new(records: Vec<SearchRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[SearchRecord] {
        &self.records
    }

    /// Records in the category facet whose title contains the text,
    /// case-insensitively. Text shorter than the minimum does not narrow.
    pub fn search(&self, query: &SearchQueryState) -> Vec<SearchRecord> {
        let needle = query.text.trim().to_lowercase();
        let match_text = query.shows_results();

        self.records
            .iter()
            .filter(|record| query.category.map_or(true, |c| record.category == c))
            .filter(|record| !match_text || record.title.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }
}

/// What the navbar dropdown renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickSearchView {
    pub panel_open: bool,
    pub results: Vec<SearchRecord>,
    pub selected: Option<usize>,
}

/// Navbar dropdown: filters synchronously on every keystroke, no debounce.
pub struct QuickSearch {
    index: Arc<SearchIndex>,
    query: SearchQueryState,
    results: Vec<SearchRecord>,
    navigator: SearchNavigator,
}

impl QuickSearch {
    pub fn new(index: Arc<SearchIndex>) -> Self {
        Self {
            index,
            query: SearchQueryState::default(),
            results: Vec::new(),
            navigator: SearchNavigator::default(),
        }
    }

    pub fn on_input(&mut self, text: &str) -> QuickSearchView {
        self.query.text = text.to_string();
        self.refresh();
        self.navigator.open();
        self.view()
    }

    pub fn set_category(&mut self, category: Option<SearchCategory>) -> QuickSearchView {
        self.query.category = category;
        self.refresh();
        self.view()
    }

    pub fn handle_key(&mut self, key: NavKey) -> NavAction {
        let action = self.navigator.handle_key(key);
        if let NavAction::Navigate(_) = action {
            self.query.text.clear();
            self.refresh();
        }
        action
    }

    pub fn click_outside(&mut self) -> NavAction {
        self.navigator.click_outside()
    }

    pub fn view(&self) -> QuickSearchView {
        let panel_open = self.navigator.is_open() && self.query.shows_results();
        QuickSearchView {
            panel_open,
            results: if panel_open {
                self.results.clone()
            } else {
                Vec::new()
            },
            selected: self.navigator.selected(),
        }
    }

    fn refresh(&mut self) {
        self.results = if self.query.shows_results() {
            self.index.search(&self.query)
        } else {
            Vec::new()
        };
        self.navigator
            .set_results(self.results.iter().map(|r| r.url.clone()).collect());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, title: &str, category: SearchCategory) -> SearchRecord {
        SearchRecord {
            id: id.into(),
            title: title.into(),
            category,
            url: format!("/{id}"),
        }
    }

    fn index() -> Arc<SearchIndex> {
        Arc::new(SearchIndex::new(vec![
            record("python-loops", "Python Loops", SearchCategory::Tutorial),
            record("python-dicts", "Python Dictionaries", SearchCategory::Tutorial),
            record("weather-app", "Python Weather App", SearchCategory::Project),
            record("why-rust", "Why We Teach Loops First", SearchCategory::Blog),
        ]))
    }

    #[test]
    fn title_match_is_case_insensitive() {
        let results = index().search(&SearchQueryState::new("LOOPS", None));
        let ids: Vec<_> = results.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["python-loops", "why-rust"]);
    }

    #[test]
    fn category_and_text_both_apply() {
        let results = index().search(&SearchQueryState::new(
            "python",
            Some(SearchCategory::Project),
        ));
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "weather-app");
    }

    #[test]
    fn single_character_never_opens_panel() {
        let mut quick = QuickSearch::new(index());
        let view = quick.on_input("p");
        assert!(!view.panel_open);
        assert!(view.results.is_empty());

        let view = quick.on_input("py");
        assert!(view.panel_open);
        assert_eq!(view.results.len(), 3);
    }

    #[test]
    fn no_matches_still_opens_empty_panel() {
        let mut quick = QuickSearch::new(index());
        let view = quick.on_input("zz");
        assert!(view.panel_open);
        assert!(view.results.is_empty());
    }

    #[test]
    fn enter_navigates_and_clears_query() {
        let mut quick = QuickSearch::new(index());
        quick.on_input("dict");
        assert_eq!(quick.handle_key(NavKey::ArrowDown), NavAction::Moved(0));
        assert_eq!(
            quick.handle_key(NavKey::Enter),
            NavAction::Navigate("/python-dicts".into())
        );
        assert!(!quick.view().panel_open);
    }

    #[test]
    fn click_outside_closes_panel() {
        let mut quick = QuickSearch::new(index());
        quick.on_input("python");
        assert_eq!(quick.click_outside(), NavAction::Close);
        assert!(!quick.view().panel_open);

        assert!(quick.on_input("pytho").panel_open);
    }
}
