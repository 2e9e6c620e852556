use std::{
    collections::BTreeSet,
    sync::{PoisonError, RwLock},
};

use crate::{
    models::{EngagementRecord, TutorialId},
    storage::{keys, RecordStore, StoreEvent},
};

const ENABLE_LOGS: bool = true;

use crate::log_info;

/// Liked and saved tutorial sets. Membership is the only source of truth for
/// the flags a card shows.
pub struct EngagementState {
    store: RecordStore,
    liked: RwLock<BTreeSet<TutorialId>>,
    saved: RwLock<BTreeSet<TutorialId>>,
}

impl EngagementState {
    pub fn load(store: RecordStore) -> Self {
        let liked: BTreeSet<TutorialId> = store
            .read::<Vec<TutorialId>>(keys::LIKED_TUTORIALS)
            .unwrap_or_default()
            .into_iter()
            .collect();
        let saved: BTreeSet<TutorialId> = store
            .read::<Vec<TutorialId>>(keys::SAVED_TUTORIALS)
            .unwrap_or_default()
            .into_iter()
            .collect();

        log_info!(
            "engagement rehydrated: {} liked, {} saved",
            liked.len(),
            saved.len()
        );

        Self {
            store,
            liked: RwLock::new(liked),
            saved: RwLock::new(saved),
        }
    }

    pub fn is_liked(&self, tutorial_id: &TutorialId) -> bool {
        self.liked
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(tutorial_id)
    }

    pub fn is_saved(&self, tutorial_id: &TutorialId) -> bool {
        self.saved
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(tutorial_id)
    }

    /// Flip like membership and return the new flag.
    pub fn toggle_like(&self, tutorial_id: &TutorialId) -> bool {
        let liked = toggle(&self.store, &self.liked, keys::LIKED_TUTORIALS, tutorial_id);
        self.store
            .publish(StoreEvent::Engagement(self.record(tutorial_id)));
        liked
    }

    /// Flip bookmark membership and return the new flag.
    pub fn toggle_save(&self, tutorial_id: &TutorialId) -> bool {
        let saved = toggle(&self.store, &self.saved, keys::SAVED_TUTORIALS, tutorial_id);
        self.store
            .publish(StoreEvent::Engagement(self.record(tutorial_id)));
        saved
    }

    pub fn record(&self, tutorial_id: &TutorialId) -> EngagementRecord {
        EngagementRecord {
            tutorial_id: tutorial_id.clone(),
            liked: self.is_liked(tutorial_id),
            saved: self.is_saved(tutorial_id),
        }
    }

    pub fn liked_ids(&self) -> BTreeSet<TutorialId> {
        self.liked
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn saved_ids(&self) -> BTreeSet<TutorialId> {
        self.saved
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

fn toggle(
    store: &RecordStore,
    set: &RwLock<BTreeSet<TutorialId>>,
    key: &str,
    tutorial_id: &TutorialId,
) -> bool {
    let (now_member, snapshot) = {
        let mut guard = set.write().unwrap_or_else(PoisonError::into_inner);
        let now_member = if guard.remove(tutorial_id) {
            false
        } else {
            guard.insert(tutorial_id.clone());
            true
        };
        (now_member, guard.iter().cloned().collect::<Vec<_>>())
    };

    store.write(key, &snapshot);
    now_member
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::storage::{KeyValueStore, MemoryStore};

    #[test]
    fn flags_default_to_false() {
        let state = EngagementState::load(RecordStore::new(Arc::new(MemoryStore::new())));
        let id = TutorialId::from("python-dictionaries");
        assert!(!state.is_liked(&id));
        assert!(!state.is_saved(&id));
    }

    #[test]
    fn double_toggle_restores_membership() {
        let backend = Arc::new(MemoryStore::new());
        let state = EngagementState::load(RecordStore::new(backend.clone()));
        let id = TutorialId::from("python-dictionaries");
        let before = state.is_liked(&id);

        assert!(state.toggle_like(&id));
        assert!(!state.toggle_like(&id));

        assert_eq!(state.is_liked(&id), before);
        assert!(!state.liked_ids().contains(&id));
        assert_eq!(backend.get("likedTutorials").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn flags_survive_reload() {
        let backend = Arc::new(MemoryStore::new());
        let id = TutorialId::from("html-css-basics");
        {
            let state = EngagementState::load(RecordStore::new(backend.clone()));
            state.toggle_like(&id);
            state.toggle_save(&id);
        }

        let reloaded = EngagementState::load(RecordStore::new(backend));
        assert_eq!(
            reloaded.record(&id),
            EngagementRecord {
                tutorial_id: id.clone(),
                liked: true,
                saved: true,
            }
        );
    }

    #[test]
    fn malformed_lists_rehydrate_as_empty() {
        let backend = Arc::new(MemoryStore::new());
        backend.insert_raw("savedTutorials", "oops");
        let state = EngagementState::load(RecordStore::new(backend));
        assert!(state.saved_ids().is_empty());
    }
}
