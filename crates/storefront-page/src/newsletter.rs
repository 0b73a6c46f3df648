//! Newsletter signup form.
//!
//! There is no server: a submission waits in `Submitting` for the
//! configured delay, shows `Subscribed`, then resets the form.

use serde::Serialize;
use storefront_core::RenderCommand;

use crate::forms::{is_valid_email, FieldError};

/// Field name the email error is reported on.
pub const NEWSLETTER_EMAIL_FIELD: &str = "newsletter_email";

/// Notification text when the opt-in box is left unchecked.
pub const OPT_IN_REQUIRED: &str = "Please accept to receive our newsletters";

/// Notification text once subscribed.
pub const SUBSCRIBED_MESSAGE: &str = "Thanks! Your discount code is on its way 🎉";

/// Form state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NewsletterState {
    #[default]
    Idle,
    Submitting,
    Subscribed,
}

impl NewsletterState {
    /// Submit button label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "Subscribe",
            Self::Submitting => "Subscribing...",
            Self::Subscribed => "✓ Subscribed!",
        }
    }
}

/// Result of a form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A submission is already in flight.
    Ignored,
    /// Opt-in box unchecked.
    NotOptedIn,
    /// Email rejected.
    Invalid(FieldError),
    /// Now submitting.
    Started,
}

/// Newsletter form state machine.
#[derive(Debug, Clone, Default)]
pub struct Newsletter {
    state: NewsletterState,
    email: Option<String>,
}

impl Newsletter {
    /// Create an idle form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> NewsletterState {
        self.state
    }

    /// Form submitted.
    pub fn submit(&mut self, email: &str, opted_in: bool) -> SubmitOutcome {
        if self.state != NewsletterState::Idle {
            return SubmitOutcome::Ignored;
        }
        if !opted_in {
            return SubmitOutcome::NotOptedIn;
        }
        let email = email.trim();
        if !is_valid_email(email) {
            return SubmitOutcome::Invalid(FieldError::InvalidEmail);
        }
        self.state = NewsletterState::Submitting;
        self.email = Some(email.to_string());
        SubmitOutcome::Started
    }

    /// Submission delay elapsed. Returns the subscribed address.
    pub fn complete(&mut self) -> Option<String> {
        if self.state != NewsletterState::Submitting {
            return None;
        }
        self.state = NewsletterState::Subscribed;
        self.email.take()
    }

    /// Confirmation delay elapsed. Returns true if the form went back to idle.
    pub fn reset(&mut self) -> bool {
        if self.state != NewsletterState::Subscribed {
            return false;
        }
        self.state = NewsletterState::Idle;
        true
    }

    /// Submit button command for the current state.
    pub fn button(&self) -> RenderCommand {
        RenderCommand::NewsletterButton {
            label: self.state.label().to_string(),
            disabled: self.state != NewsletterState::Idle,
        }
    }
}
