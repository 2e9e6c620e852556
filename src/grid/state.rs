use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
}

/// Reveal cursor of the "All Tutorials" section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GridState {
    pub status: LoadStatus,
    /// Only ever grows.
    pub visible_count: usize,
    pub total: usize,
    pub page_size: usize,
}

impl GridState {
    pub fn new(total: usize, page_size: usize) -> Self {
        Self {
            status: LoadStatus::Idle,
            visible_count: page_size.min(total),
            total,
            page_size,
        }
    }

    pub fn has_more(&self) -> bool {
        self.visible_count < self.total
    }

    /// Placeholders rendered while a page is in flight.
    pub fn skeleton_count(&self) -> usize {
        match self.status {
            LoadStatus::Idle => 0,
            LoadStatus::Loading => self
                .page_size
                .min(self.total.saturating_sub(self.visible_count)),
        }
    }

    /// Enter `Loading` if idle with cards left to reveal.
    pub fn begin_load(&mut self) -> bool {
        if self.status == LoadStatus::Loading || !self.has_more() {
            return false;
        }
        self.status = LoadStatus::Loading;
        true
    }

    /// Reveal one more page. A total that shrank mid-flight never pulls the
    /// cursor back.
    pub fn finish_load(&mut self) {
        let next = self.visible_count.saturating_add(self.page_size).min(self.total);
        self.visible_count = self.visible_count.max(next);
        self.status = LoadStatus::Idle;
    }

    /// The filtered card count changed. The cursor is kept.
    pub fn set_total(&mut self, total: usize) {
        self.total = total;
        if self.visible_count < self.page_size.min(total) {
            self.visible_count = self.page_size.min(total);
        }
    }
}
