//! Hidden features: the Konami code and the logo triple click.

use std::collections::VecDeque;

use storefront_core::{EasterEggConfig, Millis};

/// Matches a key sequence over a sliding window of recent key codes.
#[derive(Debug, Clone)]
pub struct KonamiDetector {
    sequence: Vec<String>,
    recent: VecDeque<String>,
}

impl KonamiDetector {
    /// Create a detector for `sequence`.
    pub fn new(sequence: Vec<String>) -> Self {
        Self {
            recent: VecDeque::with_capacity(sequence.len()),
            sequence,
        }
    }

    /// Record a key. Returns true when the window matches the sequence;
    /// the window is cleared afterwards.
    pub fn push(&mut self, code: &str) -> bool {
        if self.sequence.is_empty() {
            return false;
        }
        self.recent.push_back(code.to_string());
        if self.recent.len() > self.sequence.len() {
            self.recent.pop_front();
        }
        if self.recent.iter().eq(self.sequence.iter()) {
            self.recent.clear();
            return true;
        }
        false
    }
}

/// Counts rapid clicks on the logo.
#[derive(Debug, Clone)]
pub struct LogoClicks {
    required: u32,
    window: Millis,
    first_at: Option<Millis>,
    count: u32,
}

impl LogoClicks {
    /// Create a counter needing `required` clicks within `window` of the first.
    pub fn new(required: u32, window: Millis) -> Self {
        Self {
            required: required.max(1),
            window,
            first_at: None,
            count: 0,
        }
    }

    /// Record a click at `now`. Returns true when the burst completes.
    pub fn click(&mut self, now: Millis) -> bool {
        if let Some(first) = self.first_at {
            if now.saturating_sub(first) >= self.window {
                self.count = 0;
                self.first_at = None;
            }
        }
        if self.first_at.is_none() {
            self.first_at = Some(now);
        }
        self.count += 1;
        if self.count >= self.required {
            self.count = 0;
            self.first_at = None;
            return true;
        }
        false
    }
}

/// Both detectors, built from config.
#[derive(Debug, Clone)]
pub struct EasterEggs {
    pub konami: KonamiDetector,
    pub logo: LogoClicks,
}

impl EasterEggs {
    /// Create detectors from config.
    pub fn new(config: &EasterEggConfig) -> Self {
        Self {
            konami: KonamiDetector::new(config.konami_sequence.clone()),
            logo: LogoClicks::new(config.logo_clicks, config.logo_window_ms),
        }
    }
}
