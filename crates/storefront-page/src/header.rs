//! Sticky header that condenses once the page scrolls.

use storefront_core::{HeaderConfig, Millis, RenderCommand, Throttle};

/// What a scroll event produced.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollStep {
    /// Header change to render, if the condensed state flipped.
    pub command: Option<RenderCommand>,
    /// Arm a frame timer for this time; the last deferred offset is
    /// evaluated when it fires.
    pub frame_at: Option<Millis>,
}

/// Condensed/plain header, evaluated at most once per frame.
#[derive(Debug, Clone)]
pub struct StickyHeader {
    threshold: f64,
    condensed: bool,
    throttle: Throttle,
    pending_y: Option<f64>,
    frame_armed: bool,
}

impl StickyHeader {
    /// Create a plain header.
    pub fn new(config: &HeaderConfig) -> Self {
        Self {
            threshold: config.condense_after_px,
            condensed: false,
            throttle: Throttle::new(config.frame_ms),
            pending_y: None,
            frame_armed: false,
        }
    }

    /// Check if the header is condensed.
    pub fn is_condensed(&self) -> bool {
        self.condensed
    }

    /// Document scrolled to `y`.
    pub fn on_scroll(&mut self, now: Millis, y: f64) -> ScrollStep {
        if self.throttle.try_acquire(now) {
            return ScrollStep {
                command: self.evaluate(y),
                frame_at: None,
            };
        }

        self.pending_y = Some(y);
        let frame_at = if self.frame_armed {
            None
        } else {
            self.frame_armed = true;
            Some(self.throttle.reopens_at(now).unwrap_or(now))
        };
        ScrollStep {
            command: None,
            frame_at,
        }
    }

    /// Frame timer fired: evaluate the last deferred offset.
    pub fn on_frame(&mut self, now: Millis) -> Option<RenderCommand> {
        self.frame_armed = false;
        let y = self.pending_y.take()?;
        self.throttle.try_acquire(now);
        self.evaluate(y)
    }

    /// Forget any deferred offset.
    pub fn reset_frame(&mut self) {
        self.pending_y = None;
        self.frame_armed = false;
        self.throttle.reset();
    }

    fn evaluate(&mut self, y: f64) -> Option<RenderCommand> {
        let condensed = y > self.threshold;
        if condensed == self.condensed {
            return None;
        }
        self.condensed = condensed;
        tracing::debug!(y, condensed, "header state changed");
        Some(RenderCommand::Header { condensed })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header() -> StickyHeader {
        StickyHeader::new(&HeaderConfig::default())
    }

    #[test]
    fn test_condenses_past_threshold_only_on_change() {
        let mut h = header();
        assert_eq!(h.on_scroll(0, 50.0).command, None);
        assert_eq!(
            h.on_scroll(100, 150.0).command,
            Some(RenderCommand::Header { condensed: true })
        );
        assert_eq!(h.on_scroll(200, 400.0).command, None);
        assert_eq!(
            h.on_scroll(300, 100.0).command,
            Some(RenderCommand::Header { condensed: false })
        );
    }

    #[test]
    fn test_burst_defers_to_frame_with_last_offset() {
        let mut h = header();
        assert_eq!(h.on_scroll(0, 10.0).command, None);

        let first = h.on_scroll(4, 500.0);
        assert_eq!(first.command, None);
        assert_eq!(first.frame_at, Some(16));

        // Already armed.
        let second = h.on_scroll(8, 20.0);
        assert_eq!(second.frame_at, None);
        let third = h.on_scroll(12, 300.0);
        assert_eq!(third.frame_at, None);

        assert_eq!(
            h.on_frame(16),
            Some(RenderCommand::Header { condensed: true })
        );
        assert!(h.is_condensed());
        assert_eq!(h.on_frame(32), None);
    }
}
