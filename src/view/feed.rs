//! Vertical swipe feed: one card per viewport height, snapping to the nearest card.

/// Card index nearest to `scroll_offset`, clamped to the feed.
pub fn snap_index(scroll_offset: f64, card_height: f64, len: usize) -> usize {
    if len == 0 || card_height.is_nan() || card_height <= 0.0 || !scroll_offset.is_finite() {
        return 0;
    }
    let raw = (scroll_offset / card_height + 0.5).floor();
    if raw <= 0.0 {
        0
    } else {
        (raw as usize).min(len - 1)
    }
}

/// Per-session position in the feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedCursor {
    index: usize,
    len: usize,
}

impl FeedCursor {
    pub fn new(len: usize) -> Self {
        Self { index: 0, len }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_active(&self, card: usize) -> bool {
        self.len > 0 && card == self.index
    }

    /// Returns true when the active card changed.
    pub fn on_scroll(&mut self, scroll_offset: f64, card_height: f64) -> bool {
        let next = snap_index(scroll_offset, card_height, self.len);
        if next == self.index {
            return false;
        }
        self.index = next;
        true
    }
}
