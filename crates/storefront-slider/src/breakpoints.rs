//! Responsive visible-count step function.

use storefront_core::{BreakpointConfig, SliderConfig};

/// Maps a viewport width to the number of cards shown at once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breakpoints {
    steps: Vec<BreakpointConfig>,
    wide_visible: usize,
}

impl Breakpoints {
    /// Build from explicit steps. Steps are sorted by width.
    pub fn new(mut steps: Vec<BreakpointConfig>, wide_visible: usize) -> Self {
        steps.sort_by_key(|s| s.max_width);
        Self {
            steps,
            wide_visible: wide_visible.max(1),
        }
    }

    /// Build from slider config.
    pub fn from_config(config: &SliderConfig) -> Self {
        Self::new(config.breakpoints.clone(), config.wide_visible)
    }

    /// Cards visible at `width`. Never zero.
    pub fn visible_count(&self, width: u32) -> usize {
        self.steps
            .iter()
            .find(|s| width <= s.max_width)
            .map(|s| s.visible)
            .unwrap_or(self.wide_visible)
            .max(1)
    }
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self::from_config(&SliderConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_steps() {
        let bp = Breakpoints::default();
        assert_eq!(bp.visible_count(320), 1);
        assert_eq!(bp.visible_count(480), 1);
        assert_eq!(bp.visible_count(481), 2);
        assert_eq!(bp.visible_count(768), 2);
        assert_eq!(bp.visible_count(769), 3);
        assert_eq!(bp.visible_count(1024), 3);
        assert_eq!(bp.visible_count(1025), 4);
        assert_eq!(bp.visible_count(0), 1);
    }

    #[test]
    fn test_unsorted_steps_are_sorted() {
        let bp = Breakpoints::new(
            vec![
                BreakpointConfig { max_width: 900, visible: 2 },
                BreakpointConfig { max_width: 500, visible: 1 },
            ],
            5,
        );
        assert_eq!(bp.visible_count(400), 1);
        assert_eq!(bp.visible_count(800), 2);
        assert_eq!(bp.visible_count(2000), 5);
    }
}
