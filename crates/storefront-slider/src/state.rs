//! Slider state and its pure transitions.

use serde::{Deserialize, Serialize};

/// Direction of a single page step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepDirection {
    Previous,
    Next,
}

impl StepDirection {
    /// Name used in analytics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Previous => "previous",
            Self::Next => "next",
        }
    }
}

/// Position of the visible window over the card strip.
///
/// `page_index` stays within `[0, max_page_index()]` after every
/// transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SliderState {
    page_index: usize,
    visible_count: usize,
    total_cards: usize,
}

impl SliderState {
    /// Create a state at the first page.
    pub fn new(total_cards: usize, visible_count: usize) -> Self {
        Self {
            page_index: 0,
            visible_count: visible_count.max(1),
            total_cards,
        }
    }

    /// Current page index.
    pub fn page_index(&self) -> usize {
        self.page_index
    }

    /// Cards visible at once.
    pub fn visible_count(&self) -> usize {
        self.visible_count
    }

    /// Cards in the strip.
    pub fn total_cards(&self) -> usize {
        self.total_cards
    }

    /// Last reachable page: `max(0, total_cards - visible_count)`.
    pub fn max_page_index(&self) -> usize {
        self.total_cards.saturating_sub(self.visible_count)
    }

    /// Check if the window is at the start.
    pub fn at_start(&self) -> bool {
        self.page_index == 0
    }

    /// Check if the window is at the end.
    pub fn at_end(&self) -> bool {
        self.page_index >= self.max_page_index()
    }

    /// Step back one page, stopping at the start.
    pub fn previous(&mut self) {
        self.page_index = self.page_index.saturating_sub(1);
    }

    /// Step forward one page, stopping at the end.
    pub fn next(&mut self) {
        self.page_index = (self.page_index + 1).min(self.max_page_index());
    }

    /// Step in `direction`, bounded.
    pub fn step(&mut self, direction: StepDirection) {
        match direction {
            StepDirection::Previous => self.previous(),
            StepDirection::Next => self.next(),
        }
    }

    /// Autoplay advance: wraps to the start from the last page.
    pub fn tick(&mut self) {
        if self.page_index >= self.max_page_index() {
            self.page_index = 0;
        } else {
            self.page_index += 1;
        }
    }

    /// Change the window size and clamp the page index to the new bound.
    pub fn set_visible_count(&mut self, visible_count: usize) {
        self.visible_count = visible_count.max(1);
        self.page_index = self.page_index.min(self.max_page_index());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(total: usize, visible: usize, index: usize) -> SliderState {
        let mut state = SliderState::new(total, visible);
        for _ in 0..index {
            state.next();
        }
        state
    }

    #[test]
    fn test_max_page_index() {
        assert_eq!(SliderState::new(10, 4).max_page_index(), 6);
        assert_eq!(SliderState::new(3, 4).max_page_index(), 0);
        assert_eq!(SliderState::new(0, 4).max_page_index(), 0);
    }

    #[test]
    fn test_next_clamps_at_end() {
        let mut state = at(10, 4, 6);
        assert_eq!(state.page_index(), 6);
        state.next();
        assert_eq!(state.page_index(), 6);
        assert!(state.at_end());
    }

    #[test]
    fn test_previous_clamps_at_start() {
        let mut state = SliderState::new(10, 4);
        state.previous();
        assert_eq!(state.page_index(), 0);
        assert!(state.at_start());
    }

    #[test]
    fn test_tick_advances_then_wraps() {
        let mut state = at(10, 4, 5);
        state.tick();
        assert_eq!(state.page_index(), 6);
        state.tick();
        assert_eq!(state.page_index(), 0);
    }

    #[test]
    fn test_tick_with_single_page_stays_at_zero() {
        let mut state = SliderState::new(2, 4);
        state.tick();
        assert_eq!(state.page_index(), 0);
    }

    #[test]
    fn test_shrinking_window_never_overshoots() {
        let mut state = at(10, 1, 9);
        assert_eq!(state.page_index(), 9);
        state.set_visible_count(4);
        assert_eq!(state.page_index(), 6);
        state.set_visible_count(12);
        assert_eq!(state.page_index(), 0);
    }

    #[test]
    fn test_zero_visible_treated_as_one() {
        let mut state = SliderState::new(5, 0);
        assert_eq!(state.visible_count(), 1);
        state.set_visible_count(0);
        assert_eq!(state.max_page_index(), 4);
    }

    #[test]
    fn test_bounds_hold_over_mixed_sequence() {
        for total in 0..12 {
            let mut state = SliderState::new(total, 3);
            let widths = [1, 4, 2, 3, 1, 4];
            for (i, visible) in widths.iter().enumerate() {
                match i % 4 {
                    0 => state.next(),
                    1 => state.tick(),
                    2 => state.previous(),
                    _ => state.step(StepDirection::Next),
                }
                state.set_visible_count(*visible);
                state.tick();
                state.next();
                assert!(state.page_index() <= state.max_page_index());
            }
        }
    }
}
