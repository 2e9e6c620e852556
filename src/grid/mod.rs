pub mod controller;
pub mod modal;
pub mod sections;
pub mod state;

pub use controller::{GridController, GridSnapshot, LoadOutcome};
pub use modal::{FocusTrap, ModalEvent, ModalOutcome, PreviewModal, ScrollLock, ScrollLockGuard};
pub use sections::{
    all_section, level_sections, sort_cards, AllSection, CardView, GridFilter, GridSources,
    LevelSection, SortOrder,
};
pub use state::{GridState, LoadStatus};
