use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    engagement::{EngagementState, ReactionCounters},
    models::{Catalog, Difficulty, ReactionCounts, TutorialCatalogEntry, TutorialId},
    progress::ProgressTracker,
};

use super::GridSnapshot;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortOrder {
    #[default]
    Popular,
    Rating,
    Newest,
    Title,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridFilter {
    /// Matched against title, description, author and tags
    pub query: String,
    pub tag: Option<String>,
    pub level: Option<Difficulty>,
    pub saved_only: bool,
    pub sort: SortOrder,
}

/// Everything one tutorial card renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardView {
    pub id: TutorialId,
    pub title: String,
    pub description: String,
    pub author: String,
    pub tags: Vec<String>,
    pub level: Difficulty,
    pub rating: f32,
    pub views: u32,
    pub duration_minutes: u32,
    pub published_at: NaiveDate,
    pub url: String,
    pub reactions: ReactionCounts,
    pub liked: bool,
    pub disliked: bool,
    pub saved: bool,
    pub percent_complete: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelSection {
    pub level: Difficulty,
    pub cards: Vec<CardView>,
    pub total: usize,
    pub view_all: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AllSection {
    pub cards: Vec<CardView>,
    pub skeleton_count: usize,
    pub has_more: bool,
    pub total: usize,
}

/// State models a card grid reads from.
pub struct GridSources<'a> {
    pub catalog: &'a Catalog,
    pub engagement: &'a EngagementState,
    pub counters: &'a ReactionCounters,
    pub progress: &'a ProgressTracker,
}

impl GridSources<'_> {
    pub fn card(&self, entry: &TutorialCatalogEntry) -> CardView {
        CardView {
            id: entry.id.clone(),
            title: entry.title.clone(),
            description: entry.description.clone(),
            author: entry.author.clone(),
            tags: entry.tags.clone(),
            level: entry.level,
            rating: entry.rating,
            views: entry.views,
            duration_minutes: entry.duration_minutes,
            published_at: entry.published_at,
            url: entry.url.clone(),
            reactions: self.counters.counts(&entry.id),
            liked: self.engagement.is_liked(&entry.id),
            disliked: self.counters.is_disliked(&entry.id),
            saved: self.engagement.is_saved(&entry.id),
            percent_complete: self.progress.get_progress(&entry.id).percent_complete,
        }
    }

    /// Filtered and sorted cards.
    pub fn cards(&self, filter: &GridFilter) -> Vec<CardView> {
        let mut cards: Vec<CardView> = self
            .catalog
            .entries()
            .iter()
            .filter(|entry| matches_filter(entry, filter))
            .map(|entry| self.card(entry))
            .filter(|card| !filter.saved_only || card.saved)
            .collect();
        sort_cards(&mut cards, filter.sort);
        cards
    }
}

fn matches_filter(entry: &TutorialCatalogEntry, filter: &GridFilter) -> bool {
    if let Some(level) = filter.level {
        if entry.level != level {
            return false;
        }
    }

    if let Some(tag) = &filter.tag {
        if !entry.tags.iter().any(|t| t.eq_ignore_ascii_case(tag)) {
            return false;
        }
    }

    let needle = filter.query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    entry.title.to_lowercase().contains(&needle)
        || entry.description.to_lowercase().contains(&needle)
        || entry.author.to_lowercase().contains(&needle)
        || entry.tags.iter().any(|t| t.to_lowercase().contains(&needle))
}

pub fn sort_cards(cards: &mut [CardView], order: SortOrder) {
    match order {
        SortOrder::Popular => cards.sort_by(|a, b| b.reactions.likes.cmp(&a.reactions.likes)),
        SortOrder::Rating => cards.sort_by(|a, b| {
            b.rating
                .partial_cmp(&a.rating)
                .unwrap_or(Ordering::Equal)
        }),
        SortOrder::Newest => cards.sort_by(|a, b| b.published_at.cmp(&a.published_at)),
        SortOrder::Title => cards.sort_by_key(|card| card.title.to_lowercase()),
    }
}

/// One section per level, each capped at `preview_count` cards.
pub fn level_sections(cards: &[CardView], preview_count: usize) -> Vec<LevelSection> {
    Difficulty::ALL
        .iter()
        .map(|&level| {
            let matching: Vec<&CardView> = cards.iter().filter(|c| c.level == level).collect();
            LevelSection {
                level,
                total: matching.len(),
                view_all: matching.len() > preview_count,
                cards: matching.into_iter().take(preview_count).cloned().collect(),
            }
        })
        .collect()
}

/// The "All Tutorials" section, cut at the load-more cursor.
pub fn all_section(cards: &[CardView], snapshot: &GridSnapshot) -> AllSection {
    AllSection {
        cards: cards
            .iter()
            .take(snapshot.state.visible_count)
            .cloned()
            .collect(),
        skeleton_count: snapshot.skeleton_count,
        has_more: snapshot.has_more,
        total: cards.len(),
    }
}
