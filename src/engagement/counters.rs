use std::{
    collections::{HashMap, HashSet},
    sync::{Mutex, PoisonError},
};

use crate::models::{Catalog, ReactionCounts, TutorialId};

/// Like/dislike numbers shown on cards.
///
/// Seeded from the catalog and moved by one on each local toggle. Nothing is
/// sent to a server and everything resets on reload; every surface reads the
/// same instance so the shown numbers agree.
pub struct ReactionCounters {
    inner: Mutex<CounterState>,
}

#[derive(Default)]
struct CounterState {
    counts: HashMap<TutorialId, ReactionCounts>,
    disliked: HashSet<TutorialId>,
}

impl ReactionCounters {
    pub fn seed(catalog: &Catalog) -> Self {
        let counts = catalog
            .entries()
            .iter()
            .map(|entry| {
                (
                    entry.id.clone(),
                    ReactionCounts {
                        likes: entry.likes,
                        dislikes: entry.dislikes,
                    },
                )
            })
            .collect();

        Self {
            inner: Mutex::new(CounterState {
                counts,
                disliked: HashSet::new(),
            }),
        }
    }

    pub fn counts(&self, tutorial_id: &TutorialId) -> ReactionCounts {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .counts
            .get(tutorial_id)
            .copied()
            .unwrap_or_default()
    }

    /// Apply the result of a like toggle.
    pub fn record_like(&self, tutorial_id: &TutorialId, liked: bool) -> ReactionCounts {
        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        let counts = guard.counts.entry(tutorial_id.clone()).or_default();
        counts.likes = step(counts.likes, liked);
        *counts
    }

    pub fn is_disliked(&self, tutorial_id: &TutorialId) -> bool {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .disliked
            .contains(tutorial_id)
    }

    /// Flip the session-only dislike flag and return it with the new counts.
    pub fn toggle_dislike(&self, tutorial_id: &TutorialId) -> (bool, ReactionCounts) {
        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        let disliked = if guard.disliked.remove(tutorial_id) {
            false
        } else {
            guard.disliked.insert(tutorial_id.clone());
            true
        };
        let counts = guard.counts.entry(tutorial_id.clone()).or_default();
        counts.dislikes = step(counts.dislikes, disliked);
        (disliked, *counts)
    }
}

fn step(value: u32, up: bool) -> u32 {
    if up {
        value.saturating_add(1)
    } else {
        value.saturating_sub(1)
    }
}
