use std::{
    collections::{BTreeSet, HashMap},
    sync::{PoisonError, RwLock},
};

use crate::{
    models::{
        percent_complete, ProgressRecord, ProgressSummary, SectionId, TutorialId,
        TutorialOutline,
    },
    storage::{keys, RecordStore, StoreEvent},
};

const ENABLE_LOGS: bool = true;

use crate::{log_info, log_warn};

/// Per-tutorial section completion, persisted after every mutation.
///
/// The declared outline is the only source for the section total, so the
/// percentage stays in `[0, 100]` even when a stored list predates an
/// outline change.
pub struct ProgressTracker {
    store: RecordStore,
    outlines: HashMap<TutorialId, TutorialOutline>,
    records: RwLock<HashMap<TutorialId, ProgressRecord>>,
}

impl ProgressTracker {
    /// Rehydrate every declared tutorial from `store`.
    pub fn load(store: RecordStore, outlines: impl IntoIterator<Item = TutorialOutline>) -> Self {
        let outlines: HashMap<TutorialId, TutorialOutline> = outlines
            .into_iter()
            .map(|outline| (outline.id.clone(), outline))
            .collect();

        let mut tracker = Self {
            store,
            outlines,
            records: RwLock::new(HashMap::new()),
        };

        let records: HashMap<TutorialId, ProgressRecord> = tracker
            .outlines
            .keys()
            .map(|id| (id.clone(), tracker.rehydrate(id)))
            .collect();
        tracker.records = RwLock::new(records);

        log_info!("progress rehydrated for {} tutorials", tracker.outlines.len());
        tracker
    }

    pub fn declared_sections(&self, tutorial_id: &TutorialId) -> &[SectionId] {
        self.outlines
            .get(tutorial_id)
            .map(|outline| outline.sections.as_slice())
            .unwrap_or(&[])
    }

    pub fn get_progress(&self, tutorial_id: &TutorialId) -> ProgressRecord {
        if let Some(record) = self
            .records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(tutorial_id)
        {
            return record.clone();
        }

        let mut guard = self.records.write().unwrap_or_else(PoisonError::into_inner);
        guard
            .entry(tutorial_id.clone())
            .or_insert_with(|| self.rehydrate(tutorial_id))
            .clone()
    }

    /// Mark `section_id` complete. Completing an already completed section
    /// changes nothing and publishes nothing.
    pub fn complete_section(
        &self,
        tutorial_id: &TutorialId,
        section_id: &SectionId,
    ) -> ProgressRecord {
        let Some(outline) = self
            .outlines
            .get(tutorial_id)
            .filter(|outline| outline.declares(section_id))
        else {
            log_warn!("ignoring undeclared section {section_id} for tutorial {tutorial_id}");
            return self.get_progress(tutorial_id);
        };

        let updated = {
            let mut guard = self.records.write().unwrap_or_else(PoisonError::into_inner);
            let record = guard
                .entry(tutorial_id.clone())
                .or_insert_with(|| self.rehydrate(tutorial_id));

            if !record.completed_section_ids.insert(section_id.clone()) {
                return record.clone();
            }
            record.percent_complete =
                percent_complete(record.completed_section_ids.len(), outline.sections.len());
            record.clone()
        };

        self.persist(&updated);
        self.store.publish(StoreEvent::Progress(updated.clone()));
        updated
    }

    pub fn reset_progress(&self, tutorial_id: &TutorialId) -> ProgressRecord {
        let cleared = ProgressRecord::empty(tutorial_id.clone());
        self.records
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(tutorial_id.clone(), cleared.clone());

        self.persist(&cleared);
        self.store.publish(StoreEvent::Progress(cleared.clone()));
        cleared
    }

    pub fn summary(&self) -> ProgressSummary {
        let guard = self.records.read().unwrap_or_else(PoisonError::into_inner);
        let mut summary = ProgressSummary {
            tutorials: self.outlines.len(),
            ..ProgressSummary::default()
        };
        for id in self.outlines.keys() {
            if let Some(record) = guard.get(id) {
                if record.is_started() {
                    summary.started += 1;
                }
                if record.is_complete() {
                    summary.completed += 1;
                }
            }
        }
        summary
    }

    fn rehydrate(&self, tutorial_id: &TutorialId) -> ProgressRecord {
        let outline = self.outlines.get(tutorial_id);
        let stored: Vec<SectionId> = self
            .store
            .read(&keys::completed_sections(tutorial_id))
            .unwrap_or_default();

        let completed: BTreeSet<SectionId> = stored
            .into_iter()
            .filter(|section| outline.is_some_and(|outline| outline.declares(section)))
            .collect();

        ProgressRecord {
            tutorial_id: tutorial_id.clone(),
            percent_complete: percent_complete(
                completed.len(),
                outline.map_or(0, |outline| outline.sections.len()),
            ),
            completed_section_ids: completed,
        }
    }

    fn persist(&self, record: &ProgressRecord) {
        let id = &record.tutorial_id;
        // Keep the stored list in declared order.
        let ordered: Vec<&SectionId> = self
            .declared_sections(id)
            .iter()
            .filter(|section| record.completed_section_ids.contains(*section))
            .collect();

        self.store.write(&keys::completed_sections(id), &ordered);
        self.store
            .write(&keys::progress_percent(id), &record.percent_complete);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::storage::{KeyValueStore, MemoryStore};

    fn python_loops() -> TutorialOutline {
        TutorialOutline::new(
            "python-loops",
            ["intro", "core", "while", "practice", "advanced", "conclusion"],
        )
    }

    fn tracker_with(backend: Arc<MemoryStore>) -> ProgressTracker {
        ProgressTracker::load(
            RecordStore::new(backend),
            [python_loops(), TutorialOutline::new("empty", Vec::<String>::new())],
        )
    }

    #[test]
    fn python_loops_scenario() {
        let tracker = tracker_with(Arc::new(MemoryStore::new()));
        let id = TutorialId::from("python-loops");

        tracker.complete_section(&id, &"intro".into());
        let record = tracker.complete_section(&id, &"core".into());
        assert_eq!(record.percent_complete, 33);

        let reset = tracker.reset_progress(&id);
        assert_eq!(reset.percent_complete, 0);
        assert!(reset.completed_section_ids.is_empty());
    }

    #[test]
    fn completing_twice_is_idempotent_and_silent() {
        let tracker = tracker_with(Arc::new(MemoryStore::new()));
        let id = TutorialId::from("python-loops");
        let mut events = tracker.store.subscribe();

        let once = tracker.complete_section(&id, &"intro".into());
        let twice = tracker.complete_section(&id, &"intro".into());

        assert_eq!(once, twice);
        assert!(events.try_recv().is_ok());
        assert!(events.try_recv().is_err());
    }

    #[test]
    fn percent_is_monotonic_and_bounded() {
        let tracker = tracker_with(Arc::new(MemoryStore::new()));
        let id = TutorialId::from("python-loops");
        let mut last = tracker.get_progress(&id).percent_complete;

        for section in python_loops().sections {
            let now = tracker.complete_section(&id, &section).percent_complete;
            assert!(now >= last);
            assert!(now <= 100);
            last = now;
        }
        assert_eq!(last, 100);
    }

    #[test]
    fn empty_outline_yields_zero() {
        let tracker = tracker_with(Arc::new(MemoryStore::new()));
        let id = TutorialId::from("empty");
        let record = tracker.complete_section(&id, &"intro".into());
        assert_eq!(record.percent_complete, 0);
        assert!(record.completed_section_ids.is_empty());
    }

    #[test]
    fn undeclared_section_is_ignored() {
        let backend = Arc::new(MemoryStore::new());
        let tracker = tracker_with(backend.clone());
        let id = TutorialId::from("python-loops");

        let record = tracker.complete_section(&id, &"bonus".into());
        assert!(record.completed_section_ids.is_empty());
        assert_eq!(
            backend.get("tutorial-python-loops-completed-sections").unwrap(),
            None
        );
    }

    #[test]
    fn repeated_outline_section_still_reaches_full() {
        let tracker = ProgressTracker::load(
            RecordStore::new(Arc::new(MemoryStore::new())),
            [TutorialOutline::new("dup", ["intro", "core", "core"])],
        );
        let id = TutorialId::from("dup");

        tracker.complete_section(&id, &"intro".into());
        let record = tracker.complete_section(&id, &"core".into());
        assert_eq!(record.percent_complete, 100);
    }

    #[test]
    fn unknown_tutorial_gets_fresh_record() {
        let tracker = tracker_with(Arc::new(MemoryStore::new()));
        let record = tracker.get_progress(&TutorialId::from("missing"));
        assert_eq!(record.percent_complete, 0);
        assert!(!record.is_started());
    }

    #[test]
    fn progress_survives_reload_and_drops_undeclared_ids() {
        let backend = Arc::new(MemoryStore::new());
        backend.insert_raw(
            "tutorial-python-loops-completed-sections",
            r#"["intro","removed-section"]"#,
        );

        let tracker = tracker_with(backend.clone());
        let id = TutorialId::from("python-loops");
        assert_eq!(tracker.get_progress(&id).completed_section_ids.len(), 1);

        tracker.complete_section(&id, &"core".into());
        assert_eq!(
            backend
                .get("tutorial-python-loops-completed-sections")
                .unwrap()
                .as_deref(),
            Some(r#"["intro","core"]"#)
        );
        assert_eq!(
            backend.get("tutorial-python-loops-progress").unwrap().as_deref(),
            Some("33")
        );

        let reloaded = tracker_with(backend);
        assert_eq!(reloaded.get_progress(&id).percent_complete, 33);
    }

    #[test]
    fn storage_failure_keeps_memory_state() {
        let backend = Arc::new(MemoryStore::new());
        let tracker = tracker_with(backend.clone());
        let id = TutorialId::from("python-loops");

        backend.set_unavailable(true);
        let record = tracker.complete_section(&id, &"intro".into());
        assert_eq!(record.percent_complete, 17);
        assert_eq!(tracker.get_progress(&id).percent_complete, 17);
    }

    #[test]
    fn summary_counts_started_and_completed() {
        let tracker = tracker_with(Arc::new(MemoryStore::new()));
        let id = TutorialId::from("python-loops");
        for section in python_loops().sections {
            tracker.complete_section(&id, &section);
        }

        let summary = tracker.summary();
        assert_eq!(summary.tutorials, 2);
        assert_eq!(summary.started, 1);
        assert_eq!(summary.completed, 1);
    }
}
