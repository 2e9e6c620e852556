use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SearchCategory {
    Tutorial,
    Project,
    Blog,
}

/// Static entry of the navbar quick-search index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRecord {
    pub id: String,
    pub title: String,
    pub category: SearchCategory,
    pub url: String,
}

/// One result returned by the `/api/search` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub url: String,
}

/// Text plus optional category facet typed into a search surface.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQueryState {
    pub text: String,
    pub category: Option<SearchCategory>,
}

impl SearchQueryState {
    /// Queries shorter than this never show a results panel.
    pub const MIN_QUERY_CHARS: usize = 2;

    pub fn new(text: impl Into<String>, category: Option<SearchCategory>) -> Self {
        Self {
            text: text.into(),
            category,
        }
    }

    pub fn shows_results(&self) -> bool {
        self.text.trim().chars().count() >= Self::MIN_QUERY_CHARS
    }
}
