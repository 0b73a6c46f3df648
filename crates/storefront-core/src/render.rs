//! Render commands and the display-layer contract.

use serde::{Deserialize, Serialize};

use crate::ids::NotificationId;
use crate::notification::NotificationKind;

/// Which hidden feature fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasterEgg {
    Konami,
    Logo,
}

/// Dialogs the page can open over its content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModalKind {
    Video,
    Search,
}

impl ModalKind {
    /// Lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Video => "video",
            Self::Search => "search",
        }
    }
}

/// An instruction for the display layer.
///
/// Controllers compute these from their state; they never touch the
/// interface directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum RenderCommand {
    /// Move every product card by the same horizontal offset.
    TranslateCards { offset_px: f64, transition: String },
    /// Enable or disable the slider navigation controls.
    SliderNav {
        previous_enabled: bool,
        next_enabled: bool,
    },
    /// Update the cart count badge.
    CartBadge { count: u32, visible: bool },
    /// Start or stop the cart button pulse.
    CartPulse { active: bool },
    /// Show a toast.
    ShowNotification {
        id: NotificationId,
        message: String,
        kind: NotificationKind,
    },
    /// Remove a toast.
    DismissNotification { id: NotificationId },
    /// Open or close the mobile menu.
    Menu { open: bool },
    /// Switch the header between its plain and condensed look.
    Header { condensed: bool },
    /// Mark a field invalid.
    FieldError { field: String, message: String },
    /// Clear a field's error.
    ClearFieldError { field: String },
    /// Update the newsletter submit button.
    NewsletterButton { label: String, disabled: bool },
    /// Empty the newsletter form.
    NewsletterFormReset,
    /// Show or hide the cookie banner.
    CookieBanner { visible: bool },
    /// Play a celebration effect.
    Celebrate { egg: EasterEgg },
    /// Open or close a modal. The page behind it does not scroll while open.
    Modal { modal: ModalKind, open: bool },
    /// Put the cursor in the search input.
    FocusSearchInput,
    /// Replace the search input's text.
    SearchQuery { query: String },
    /// Run a search for `query`.
    Search { query: String },
    /// Follow a link such as `tel:` or `mailto:`.
    OpenLink { href: String },
    /// Show or hide the full-page loading overlay.
    LoadingOverlay { visible: bool },
    /// Smooth-scroll so the section starts `margin_px` below the header.
    ScrollToSection { section: String, margin_px: f64 },
}

/// The display layer the page renders into.
pub trait DisplaySurface {
    /// Current viewport width in pixels.
    fn viewport_width(&self) -> u32;

    /// Rendered width of one product card in pixels.
    fn card_width(&self) -> f64;

    /// Apply one render command.
    fn apply(&mut self, command: RenderCommand);
}

/// A surface that records every command it receives.
///
/// Used headless: by tests, and by the CLI simulator.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    viewport_width: u32,
    card_width: f64,
    commands: Vec<RenderCommand>,
}

impl RecordingSurface {
    /// Create a surface with the given geometry.
    pub fn new(viewport_width: u32, card_width: f64) -> Self {
        Self {
            viewport_width,
            card_width,
            commands: Vec::new(),
        }
    }

    /// Change the reported viewport width.
    pub fn set_viewport_width(&mut self, width: u32) {
        self.viewport_width = width;
    }

    /// Every command received so far.
    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    /// Drain the recorded commands.
    pub fn take_commands(&mut self) -> Vec<RenderCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Most recent card offset.
    pub fn last_offset(&self) -> Option<f64> {
        self.commands.iter().rev().find_map(|c| match c {
            RenderCommand::TranslateCards { offset_px, .. } => Some(*offset_px),
            _ => None,
        })
    }

    /// Most recent navigation state as `(previous_enabled, next_enabled)`.
    pub fn last_nav(&self) -> Option<(bool, bool)> {
        self.commands.iter().rev().find_map(|c| match c {
            RenderCommand::SliderNav {
                previous_enabled,
                next_enabled,
            } => Some((*previous_enabled, *next_enabled)),
            _ => None,
        })
    }

    /// Most recent badge state as `(count, visible)`.
    pub fn last_badge(&self) -> Option<(u32, bool)> {
        self.commands.iter().rev().find_map(|c| match c {
            RenderCommand::CartBadge { count, visible } => Some((*count, *visible)),
            _ => None,
        })
    }

    /// Messages of every notification shown so far.
    pub fn notification_messages(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                RenderCommand::ShowNotification { message, .. } => Some(message.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Count commands matching a predicate.
    pub fn count(&self, pred: impl Fn(&RenderCommand) -> bool) -> usize {
        self.commands.iter().filter(|c| pred(*c)).count()
    }
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self::new(1280, 250.0)
    }
}

impl DisplaySurface for RecordingSurface {
    fn viewport_width(&self) -> u32 {
        self.viewport_width
    }

    fn card_width(&self) -> f64 {
        self.card_width
    }

    fn apply(&mut self, command: RenderCommand) {
        self.commands.push(command);
    }
}
