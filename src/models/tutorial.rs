//! Tutorial catalog data models.

use std::{collections::HashSet, fmt};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::search::{SearchCategory, SearchRecord};

/// Stable identifier of a tutorial; also the storage key suffix.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TutorialId(String);

impl TutorialId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TutorialId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TutorialId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Identifier of a named section inside a tutorial.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionId(String);

impl SectionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SectionId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// The fixed, ordered section list a tutorial build declares.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TutorialOutline {
    pub id: TutorialId,
    pub sections: Vec<SectionId>,
}

impl TutorialOutline {
    pub fn new<I, S>(id: impl Into<String>, sections: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_parts(
            TutorialId::new(id),
            sections.into_iter().map(|s| SectionId::new(s)),
        )
    }

    /// Keeps the first occurrence of a repeated section id, so a repeat
    /// never inflates the section total.
    pub fn from_parts(id: TutorialId, sections: impl IntoIterator<Item = SectionId>) -> Self {
        let mut seen = HashSet::new();
        let sections = sections
            .into_iter()
            .filter(|section| seen.insert(section.clone()))
            .collect();
        Self { id, sections }
    }

    pub fn declares(&self, section: &SectionId) -> bool {
        self.sections.contains(section)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [
        Difficulty::Beginner,
        Difficulty::Intermediate,
        Difficulty::Advanced,
    ];
}

/// Denormalized card data for one tutorial, read-only for the grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TutorialCatalogEntry {
    pub id: TutorialId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub author: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub level: Difficulty,
    pub rating: f32,
    #[serde(default)]
    pub likes: u32,
    #[serde(default)]
    pub dislikes: u32,
    #[serde(default)]
    pub views: u32,
    #[serde(default)]
    pub duration_minutes: u32,
    pub published_at: NaiveDate,
    pub url: String,
    #[serde(default = "default_category")]
    pub category: SearchCategory,
    #[serde(default)]
    pub sections: Vec<SectionId>,
}

fn default_category() -> SearchCategory {
    SearchCategory::Tutorial
}

impl TutorialCatalogEntry {
    pub fn outline(&self) -> TutorialOutline {
        TutorialOutline::from_parts(self.id.clone(), self.sections.iter().cloned())
    }
}

impl From<&TutorialCatalogEntry> for SearchRecord {
    fn from(entry: &TutorialCatalogEntry) -> Self {
        SearchRecord {
            id: entry.id.as_str().to_string(),
            title: entry.title.clone(),
            category: entry.category,
            url: entry.url.clone(),
        }
    }
}

/// The static tutorial catalog.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    entries: Vec<TutorialCatalogEntry>,
}

impl Catalog {
    pub fn new(entries: Vec<TutorialCatalogEntry>) -> Self {
        Self { entries }
    }

    pub fn from_json_str(json: &str) -> anyhow::Result<Self> {
        let entries: Vec<TutorialCatalogEntry> = serde_json::from_str(json)?;
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[TutorialCatalogEntry] {
        &self.entries
    }

    pub fn get(&self, id: &TutorialId) -> Option<&TutorialCatalogEntry> {
        self.entries.iter().find(|entry| &entry.id == id)
    }

    pub fn outlines(&self) -> Vec<TutorialOutline> {
        self.entries.iter().map(TutorialCatalogEntry::outline).collect()
    }

    pub fn search_records(&self) -> Vec<SearchRecord> {
        self.entries.iter().map(SearchRecord::from).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
