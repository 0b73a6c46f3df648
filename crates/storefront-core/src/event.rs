//! Input events dispatched into the page.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ids::{NotificationId, ProductId};

/// Everything the host can report to the page.
///
/// The host processes one event at a time; handlers never interleave.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PageEvent {
    /// Slider "previous" control activated.
    PreviousClicked,
    /// Slider "next" control activated.
    NextClicked,
    /// Pointer went down on the slider.
    DragStarted { x: f64 },
    /// Pointer moved while down.
    DragMoved { x: f64 },
    /// Pointer released.
    DragEnded,
    /// Viewport changed size. The page asks the surface for the new width.
    Resized,
    /// "Add to cart" activated on a product card.
    ///
    /// `price_text` is the card's displayed price, e.g. `"19,99 €"`.
    AddToCartClicked {
        product_id: ProductId,
        name: String,
        price_text: String,
    },
    /// User closed a notification.
    NotificationDismissed { id: NotificationId },
    /// Hamburger button activated.
    MenuToggled,
    /// A navigation link was followed.
    NavLinkClicked,
    /// A click landed outside the navigation bar.
    ClickedOutsideNav,
    /// Document scrolled to vertical offset `y`.
    Scrolled { y: f64 },
    /// Key pressed, identified by its physical code (`KeyA`, `ArrowUp`...).
    KeyPressed { code: String },
    /// Shop logo clicked.
    LogoClicked,
    /// A form field lost focus.
    FieldBlurred {
        field: String,
        kind: FieldKind,
        required: bool,
        value: String,
    },
    /// A form field was edited.
    FieldEdited { field: String },
    /// Newsletter form submitted.
    NewsletterSubmitted { email: String, opted_in: bool },
    /// Cookie banner answered.
    CookieConsentGiven { decision: ConsentDecision },
    /// Hero "shop now" button.
    CtaPrimaryClicked,
    /// Hero "watch the video" button.
    CtaVideoClicked,
    /// Header search button.
    SearchButtonClicked,
    /// A modal's close button.
    ModalCloseClicked,
    /// A click on the backdrop around an open modal, not on its content.
    ModalOverlayClicked,
    /// A suggestion tag in the search modal.
    SearchTagClicked { tag: String },
    /// The search input changed.
    SearchInput { query: String },
    /// One of the floating contact buttons.
    FabClicked { action: FabAction },
    /// A category card, identified by its slug.
    CategoryClicked { category: String },
}

impl PageEvent {
    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::PreviousClicked => "previous_clicked",
            Self::NextClicked => "next_clicked",
            Self::DragStarted { .. } => "drag_started",
            Self::DragMoved { .. } => "drag_moved",
            Self::DragEnded => "drag_ended",
            Self::Resized => "resized",
            Self::AddToCartClicked { .. } => "add_to_cart_clicked",
            Self::NotificationDismissed { .. } => "notification_dismissed",
            Self::MenuToggled => "menu_toggled",
            Self::NavLinkClicked => "nav_link_clicked",
            Self::ClickedOutsideNav => "clicked_outside_nav",
            Self::Scrolled { .. } => "scrolled",
            Self::KeyPressed { .. } => "key_pressed",
            Self::LogoClicked => "logo_clicked",
            Self::FieldBlurred { .. } => "field_blurred",
            Self::FieldEdited { .. } => "field_edited",
            Self::NewsletterSubmitted { .. } => "newsletter_submitted",
            Self::CookieConsentGiven { .. } => "cookie_consent_given",
            Self::CtaPrimaryClicked => "cta_primary_clicked",
            Self::CtaVideoClicked => "cta_video_clicked",
            Self::SearchButtonClicked => "search_button_clicked",
            Self::ModalCloseClicked => "modal_close_clicked",
            Self::ModalOverlayClicked => "modal_overlay_clicked",
            Self::SearchTagClicked { .. } => "search_tag_clicked",
            Self::SearchInput { .. } => "search_input",
            Self::FabClicked { .. } => "fab_clicked",
            Self::CategoryClicked { .. } => "category_clicked",
        }
    }
}

/// Validation rules a form field follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Email,
    Text,
}

/// Floating action buttons, in on-screen order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FabAction {
    Chat,
    Phone,
    Email,
}

impl FabAction {
    /// Position in the button stack, as reported to analytics.
    pub fn index(&self) -> usize {
        match self {
            Self::Chat => 0,
            Self::Phone => 1,
            Self::Email => 2,
        }
    }
}

/// Answer to the cookie banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsentDecision {
    Accepted,
    Declined,
}

impl ConsentDecision {
    /// Value persisted in storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Accepted => "accepted",
            Self::Declined => "declined",
        }
    }

    /// Parse a persisted value.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "accepted" => Some(Self::Accepted),
            "declined" => Some(Self::Declined),
            _ => None,
        }
    }
}

impl fmt::Display for ConsentDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_json_shape() {
        let event: PageEvent = serde_json::from_str(
            r#"{"type":"add_to_cart_clicked","product_id":"p1","name":"Teddy Bear","price_text":"19,99 €"}"#,
        )
        .unwrap();
        assert_eq!(
            event,
            PageEvent::AddToCartClicked {
                product_id: ProductId::new("p1"),
                name: "Teddy Bear".to_string(),
                price_text: "19,99 €".to_string(),
            }
        );
        assert_eq!(event.name(), "add_to_cart_clicked");

        let unit: PageEvent = serde_json::from_str(r#"{"type":"next_clicked"}"#).unwrap();
        assert_eq!(unit, PageEvent::NextClicked);
    }

    #[test]
    fn test_fab_event_shape() {
        let event: PageEvent =
            serde_json::from_str(r#"{"type":"fab_clicked","action":"email"}"#).unwrap();
        assert_eq!(
            event,
            PageEvent::FabClicked {
                action: FabAction::Email
            }
        );
        assert_eq!(FabAction::Email.index(), 2);
    }

    #[test]
    fn test_consent_decision_parse() {
        assert_eq!(ConsentDecision::parse("accepted"), Some(ConsentDecision::Accepted));
        assert_eq!(ConsentDecision::parse("declined"), Some(ConsentDecision::Declined));
        assert_eq!(ConsentDecision::parse("maybe"), None);
    }
}
