use serde::{Deserialize, Serialize};

use super::tutorial::TutorialId;

/// View of one tutorial's like/bookmark flags, derived from set membership.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngagementRecord {
    pub tutorial_id: TutorialId,
    pub liked: bool,
    pub saved: bool,
}

/// Displayed like/dislike numbers. Local only; they reset on reload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactionCounts {
    pub likes: u32,
    pub dislikes: u32,
}
