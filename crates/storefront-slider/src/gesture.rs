//! Horizontal drag tracking for swipe navigation.

/// Tracks one pointer drag over the slider.
#[derive(Debug, Clone, Default)]
pub struct DragTracker {
    start_x: Option<f64>,
    current_x: f64,
}

impl DragTracker {
    /// Create an idle tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pointer went down at `x`.
    pub fn start(&mut self, x: f64) {
        self.start_x = Some(x);
        self.current_x = x;
    }

    /// Pointer moved to `x`. Ignored when no drag is active.
    pub fn move_to(&mut self, x: f64) {
        if self.start_x.is_some() {
            self.current_x = x;
        }
    }

    /// Pointer released.
    ///
    /// Returns `start - current`: positive when the finger travelled left.
    /// A release without a preceding start yields `None`.
    pub fn end(&mut self) -> Option<f64> {
        let start = self.start_x.take()?;
        Some(start - self.current_x)
    }
}
