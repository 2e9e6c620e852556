use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::tutorial::{SectionId, TutorialId};

/// Completed sections of one tutorial plus the derived percentage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRecord {
    pub tutorial_id: TutorialId,
    pub completed_section_ids: BTreeSet<SectionId>,
    pub percent_complete: u8,
}

impl ProgressRecord {
    pub fn empty(tutorial_id: TutorialId) -> Self {
        Self {
            tutorial_id,
            completed_section_ids: BTreeSet::new(),
            percent_complete: 0,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.percent_complete == 100
    }

    pub fn is_started(&self) -> bool {
        !self.completed_section_ids.is_empty()
    }
}

/// `round(100 * completed / declared)` clamped to `[0, 100]`; 0 when nothing is declared.
pub fn percent_complete(completed: usize, declared: usize) -> u8 {
    if declared == 0 {
        return 0;
    }
    let ratio = completed.min(declared) as f64 / declared as f64;
    (ratio * 100.0).round().clamp(0.0, 100.0) as u8
}

/// Aggregate over every tutorial the tracker knows about.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSummary {
    pub tutorials: usize,
    pub started: usize,
    pub completed: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_rounds_to_nearest() {
        assert_eq!(percent_complete(2, 6), 33);
        assert_eq!(percent_complete(4, 6), 67);
        assert_eq!(percent_complete(1, 8), 13);
        assert_eq!(percent_complete(6, 6), 100);
    }

    #[test]
    fn percent_handles_empty_declaration() {
        assert_eq!(percent_complete(0, 0), 0);
        assert_eq!(percent_complete(3, 0), 0);
    }

    #[test]
    fn percent_never_exceeds_hundred() {
        assert_eq!(percent_complete(9, 4), 100);
    }
}
