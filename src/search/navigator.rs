//! Keyboard and pointer handling shared by both search surfaces.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    ArrowDown,
    ArrowUp,
    Enter,
    Escape,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavAction {
    None,
    Moved(usize),
    /// Go to this url; the surface has already closed itself.
    Navigate(String),
    Close,
}

#[derive(Debug, Clone, Default)]
pub struct SearchNavigator {
    open: bool,
    selected: Option<usize>,
    urls: Vec<String>,
}

impl SearchNavigator {
    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Replace the result list. Selection resets.
    pub fn set_results(&mut self, urls: Vec<String>) {
        self.urls = urls;
        self.selected = None;
    }

    pub fn handle_key(&mut self, key: NavKey) -> NavAction {
        if !self.open {
            return NavAction::None;
        }

        match key {
            NavKey::ArrowDown | NavKey::ArrowUp if self.urls.is_empty() => NavAction::None,
            NavKey::ArrowDown => {
                let last = self.urls.len() - 1;
                let next = self.selected.map_or(0, |i| (i + 1).min(last));
                self.selected = Some(next);
                NavAction::Moved(next)
            }
            NavKey::ArrowUp => {
                let next = self.selected.map_or(0, |i| i.saturating_sub(1));
                self.selected = Some(next);
                NavAction::Moved(next)
            }
            NavKey::Enter => match self.selected.and_then(|i| self.urls.get(i)).cloned() {
                Some(url) => {
                    self.close();
                    NavAction::Navigate(url)
                }
                None => NavAction::None,
            },
            NavKey::Escape => {
                self.close();
                NavAction::Close
            }
            NavKey::Other => NavAction::None,
        }
    }

    pub fn click_outside(&mut self) -> NavAction {
        if !self.open {
            return NavAction::None;
        }
        self.close();
        NavAction::Close
    }

    fn close(&mut self) {
        self.open = false;
        self.selected = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn navigator(n: usize) -> SearchNavigator {
        let mut nav = SearchNavigator::default();
        nav.set_results((0..n).map(|i| format!("/r/{i}")).collect());
        nav.open();
        nav
    }

    #[test]
    fn selection_is_clamped_at_both_ends() {
        let mut nav = navigator(2);
        assert_eq!(nav.handle_key(NavKey::ArrowUp), NavAction::Moved(0));
        assert_eq!(nav.handle_key(NavKey::ArrowDown), NavAction::Moved(1));
        assert_eq!(nav.handle_key(NavKey::ArrowDown), NavAction::Moved(1));
        assert_eq!(nav.handle_key(NavKey::ArrowUp), NavAction::Moved(0));
        assert_eq!(nav.handle_key(NavKey::ArrowUp), NavAction::Moved(0));
    }

    #[test]
    fn enter_without_selection_does_nothing() {
        let mut nav = navigator(3);
        assert_eq!(nav.handle_key(NavKey::Enter), NavAction::None);
        assert!(nav.is_open());
    }

    #[test]
    fn escape_closes_without_navigating() {
        let mut nav = navigator(3);
        nav.handle_key(NavKey::ArrowDown);
        assert_eq!(nav.handle_key(NavKey::Escape), NavAction::Close);
        assert!(!nav.is_open());
        assert_eq!(nav.handle_key(NavKey::Enter), NavAction::None);
    }

    #[test]
    fn arrows_on_empty_results_are_ignored() {
        let mut nav = navigator(0);
        assert_eq!(nav.handle_key(NavKey::ArrowDown), NavAction::None);
        assert_eq!(nav.selected(), None);
    }
}
