//! Tutorial preview overlay.
//!
//! The modal is owned by the grid root rather than by a card, so a card's
//! clipping ancestors never constrain it. While open it holds a
//! [`ScrollLockGuard`]; closing or dropping the modal releases the lock.

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use crate::models::TutorialId;

/// Page-level scroll lock. Nested holders keep it locked until the last
/// guard goes away.
#[derive(Debug, Clone, Default)]
pub struct ScrollLock {
    holders: Arc<AtomicUsize>,
}

impl ScrollLock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn acquire(&self) -> ScrollLockGuard {
        self.holders.fetch_add(1, Ordering::SeqCst);
        ScrollLockGuard {
            holders: Arc::clone(&self.holders),
        }
    }

    pub fn is_locked(&self) -> bool {
        self.holders.load(Ordering::SeqCst) > 0
    }
}

#[derive(Debug)]
pub struct ScrollLockGuard {
    holders: Arc<AtomicUsize>,
}

impl Drop for ScrollLockGuard {
    fn drop(&mut self) {
        self.holders.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Keeps Tab focus cycling inside the modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusTrap {
    focusable: usize,
    index: usize,
}

impl FocusTrap {
    pub fn new(focusable: usize) -> Self {
        Self {
            focusable: focusable.max(1),
            index: 0,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn next(&mut self) -> usize {
        self.index = (self.index + 1) % self.focusable;
        self.index
    }

    pub fn previous(&mut self) -> usize {
        self.index = (self.index + self.focusable - 1) % self.focusable;
        self.index
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalEvent {
    BackdropClick,
    CloseButton,
    Escape,
    Tab,
    ShiftTab,
    ContentClick,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalOutcome {
    None,
    Closed,
    FocusMoved(usize),
}

#[derive(Debug)]
struct OpenPreview {
    tutorial_id: TutorialId,
    focus: FocusTrap,
    _scroll: ScrollLockGuard,
}

#[derive(Debug)]
pub struct PreviewModal {
    scroll: ScrollLock,
    open: Option<OpenPreview>,
}

impl PreviewModal {
    pub fn new(scroll: ScrollLock) -> Self {
        Self { scroll, open: None }
    }

    /// Open (or retarget) the preview. `focusable` is the number of
    /// tabbable elements inside the dialog.
    pub fn open(&mut self, tutorial_id: TutorialId, focusable: usize) {
        let guard = self.scroll.acquire();
        self.open = Some(OpenPreview {
            tutorial_id,
            focus: FocusTrap::new(focusable),
            _scroll: guard,
        });
    }

    pub fn close(&mut self) -> bool {
        self.open.take().is_some()
    }

    pub fn current(&self) -> Option<&TutorialId> {
        self.open.as_ref().map(|open| &open.tutorial_id)
    }

    pub fn focused(&self) -> Option<usize> {
        self.open.as_ref().map(|open| open.focus.index())
    }

    pub fn handle(&mut self, event: ModalEvent) -> ModalOutcome {
        let Some(open) = self.open.as_mut() else {
            return ModalOutcome::None;
        };

        match event {
            ModalEvent::BackdropClick | ModalEvent::CloseButton | ModalEvent::Escape => {
                self.open = None;
                ModalOutcome::Closed
            }
            ModalEvent::Tab => ModalOutcome::FocusMoved(open.focus.next()),
            ModalEvent::ShiftTab => ModalOutcome::FocusMoved(open.focus.previous()),
            ModalEvent::ContentClick => ModalOutcome::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_close_path_releases_scroll() {
        for event in [
            ModalEvent::BackdropClick,
            ModalEvent::CloseButton,
            ModalEvent::Escape,
        ] {
            let scroll = ScrollLock::new();
            let mut modal = PreviewModal::new(scroll.clone());
            modal.open(TutorialId::from("python-loops"), 3);
            assert!(scroll.is_locked());

            assert_eq!(modal.handle(event), ModalOutcome::Closed);
            assert!(!scroll.is_locked());
            assert_eq!(modal.current(), None);
        }
    }

    #[test]
    fn dropping_open_modal_unlocks_scroll() {
        let scroll = ScrollLock::new();
        {
            let mut modal = PreviewModal::new(scroll.clone());
            modal.open(TutorialId::from("python-loops"), 3);
            assert!(scroll.is_locked());
        }
        assert!(!scroll.is_locked());
    }

    #[test]
    fn retargeting_keeps_scroll_locked() {
        let scroll = ScrollLock::new();
        let mut modal = PreviewModal::new(scroll.clone());
        modal.open(TutorialId::from("a"), 2);
        modal.open(TutorialId::from("b"), 2);
        assert!(scroll.is_locked());
        assert_eq!(modal.current(), Some(&TutorialId::from("b")));

        assert!(modal.close());
        assert!(!scroll.is_locked());
    }

    #[test]
    fn tab_wraps_within_dialog() {
        let mut modal = PreviewModal::new(ScrollLock::new());
        modal.open(TutorialId::from("a"), 3);

        assert_eq!(modal.handle(ModalEvent::ShiftTab), ModalOutcome::FocusMoved(2));
        assert_eq!(modal.handle(ModalEvent::Tab), ModalOutcome::FocusMoved(0));
        assert_eq!(modal.handle(ModalEvent::Tab), ModalOutcome::FocusMoved(1));
        assert_eq!(modal.handle(ModalEvent::ContentClick), ModalOutcome::None);
        assert_eq!(modal.focused(), Some(1));
    }

    #[test]
    fn events_on_closed_modal_do_nothing() {
        let mut modal = PreviewModal::new(ScrollLock::new());
        assert_eq!(modal.handle(ModalEvent::Escape), ModalOutcome::None);
    }
}
