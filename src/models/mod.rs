pub mod engagement;
pub mod preferences;
pub mod progress;
pub mod search;
pub mod tutorial;
pub mod viewer;

pub use engagement::{EngagementRecord, ReactionCounts};
pub use preferences::{FontSize, ReadingPreferences};
pub use progress::{percent_complete, ProgressRecord, ProgressSummary};
pub use search::{SearchCategory, SearchHit, SearchQueryState, SearchRecord};
pub use tutorial::{
    Catalog, Difficulty, SectionId, TutorialCatalogEntry, TutorialId, TutorialOutline,
};
pub use viewer::{AuthenticatedUser, Viewer};
