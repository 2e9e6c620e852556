//! The two search surfaces.
//!
//! The navbar dropdown ([`QuickSearch`]) filters the static [`SearchIndex`]
//! by title on every keystroke. The modal overlay ([`OverlaySearch`]) waits
//! for typing to pause, then asks the network backend, which may match more
//! fields than the title. Both share [`SearchNavigator`] for keyboard and
//! click-outside handling.

pub mod debounce;
pub mod index;
pub mod navigator;
pub mod overlay;
pub mod remote;

pub use debounce::Debouncer;
pub use index::{QuickSearch, QuickSearchView, SearchIndex};
pub use navigator::{NavAction, NavKey, SearchNavigator};
pub use overlay::{OverlayResults, OverlaySearch};
pub use remote::{search_or_empty, HttpSearchBackend, SearchBackend};
