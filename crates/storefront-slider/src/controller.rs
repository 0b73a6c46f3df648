//! Slider controller: wires input to state and state to render commands.

use serde::Serialize;
use storefront_core::{Millis, RenderCommand, SliderConfig};

use crate::breakpoints::Breakpoints;
use crate::gesture::DragTracker;
use crate::state::{SliderState, StepDirection};

/// What the display layer needs after a slider change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SliderRender {
    /// Page the window now shows.
    pub page_index: usize,
    /// Offset applied to every card.
    pub offset_px: f64,
    /// Transition used for the move.
    pub transition: String,
    /// Whether "previous" can be used.
    pub previous_enabled: bool,
    /// Whether "next" can be used.
    pub next_enabled: bool,
}

impl SliderRender {
    /// Render commands for the display layer.
    pub fn commands(&self) -> [RenderCommand; 2] {
        [
            RenderCommand::TranslateCards {
                offset_px: self.offset_px,
                transition: self.transition.clone(),
            },
            RenderCommand::SliderNav {
                previous_enabled: self.previous_enabled,
                next_enabled: self.next_enabled,
            },
        ]
    }
}

/// Paged, horizontally-scrolling window over a fixed list of cards.
///
/// Every input method returns whether the slider must be re-rendered.
/// A controller built over zero cards is inert: every input is ignored.
#[derive(Debug, Clone)]
pub struct SliderController {
    state: SliderState,
    breakpoints: Breakpoints,
    drag: DragTracker,
    swipe_threshold: f64,
    card_gap: f64,
    transition: String,
    autoplay_delay: Millis,
}

impl SliderController {
    /// Create a controller over `total_cards` cards for the given viewport.
    pub fn new(total_cards: usize, viewport_width: u32, config: &SliderConfig) -> Self {
        let breakpoints = Breakpoints::from_config(config);
        let visible = breakpoints.visible_count(viewport_width);
        Self {
            state: SliderState::new(total_cards, visible),
            breakpoints,
            drag: DragTracker::new(),
            swipe_threshold: config.swipe_threshold_px,
            card_gap: config.card_gap_px,
            transition: config.transition.clone(),
            autoplay_delay: config.autoplay_delay_ms,
        }
    }

    /// Check if the controller has no cards to drive.
    pub fn is_inert(&self) -> bool {
        self.state.total_cards() == 0
    }

    /// Current state.
    pub fn state(&self) -> &SliderState {
        &self.state
    }

    /// Autoplay period.
    pub fn autoplay_delay(&self) -> Millis {
        self.autoplay_delay
    }

    /// "Previous" control.
    pub fn go_to_previous(&mut self) -> bool {
        self.apply(|s| s.previous(), "previous")
    }

    /// "Next" control.
    pub fn go_to_next(&mut self) -> bool {
        self.apply(|s| s.next(), "next")
    }

    /// Autoplay tick.
    pub fn tick(&mut self) -> bool {
        self.apply(|s| s.tick(), "tick")
    }

    /// Viewport width changed.
    pub fn on_resize(&mut self, viewport_width: u32) -> bool {
        let visible = self.breakpoints.visible_count(viewport_width);
        self.apply(|s| s.set_visible_count(visible), "resize")
    }

    /// A completed horizontal drag of `delta_x` (positive = finger moved left).
    ///
    /// Drags up to the threshold are ignored. Longer drags move exactly one
    /// page, bounded, without wrapping, and return the direction stepped.
    pub fn on_swipe(&mut self, delta_x: f64) -> Option<StepDirection> {
        let direction = self.swipe_direction(delta_x)?;
        self.apply(|s| s.step(direction), "swipe")
            .then_some(direction)
    }

    /// Direction a drag of `delta_x` maps to, if it clears the threshold.
    pub fn swipe_direction(&self, delta_x: f64) -> Option<StepDirection> {
        if !delta_x.is_finite() || delta_x.abs() <= self.swipe_threshold {
            return None;
        }
        if delta_x > 0.0 {
            Some(StepDirection::Next)
        } else {
            Some(StepDirection::Previous)
        }
    }

    /// Pointer went down.
    pub fn drag_start(&mut self, x: f64) {
        if !self.is_inert() {
            self.drag.start(x);
        }
    }

    /// Pointer moved.
    pub fn drag_move(&mut self, x: f64) {
        self.drag.move_to(x);
    }

    /// Pointer released; resolves the drag as a swipe.
    ///
    /// Returns the direction stepped when the drag cleared the threshold,
    /// which is also when a render is needed.
    pub fn drag_end(&mut self) -> Option<StepDirection> {
        let delta = self.drag.end()?;
        self.on_swipe(delta)
    }

    /// Compute the render for the current state.
    ///
    /// Offset is `-(page_index * (card_width + gap))`.
    pub fn render(&self, card_width: f64) -> SliderRender {
        let stride = card_width.max(0.0) + self.card_gap;
        SliderRender {
            page_index: self.state.page_index(),
            offset_px: -(self.state.page_index() as f64 * stride),
            transition: self.transition.clone(),
            previous_enabled: !self.state.at_start(),
            next_enabled: !self.state.at_end(),
        }
    }

    fn apply(&mut self, transition: impl FnOnce(&mut SliderState), cause: &str) -> bool {
        if self.is_inert() {
            return false;
        }
        let before = self.state.page_index();
        transition(&mut self.state);
        tracing::debug!(
            cause,
            from = before,
            to = self.state.page_index(),
            visible = self.state.visible_count(),
            "slider transition"
        );
        true
    }
}
