//! The storefront page.
//!
//! [`Storefront`] owns every controller on the page and the timer queue
//! that drives them:
//!
//! - **Slider**: paged product carousel with autoplay, swipe and resize
//! - **Cart**: badge, "added" toast and pulse on every add
//! - **Menu / Header**: mobile navigation and the condensing sticky header
//! - **Forms / Newsletter**: inline validation and the signup flow
//! - **Consent**: the cookie banner and its stored decision
//! - **Easter eggs**: Konami code and logo triple click
//! - **Modals**: the video and search dialogs, closed by button, backdrop or Escape
//! - **Landing**: hero buttons, category cards and floating contact buttons
//!
//! # Example
//!
//! ```rust
//! use storefront_cart::MemoryStore;
//! use storefront_core::{PageEvent, ProductId, RecordingSurface, StorefrontConfig};
//! use storefront_page::Storefront;
//!
//! let mut page = Storefront::start(
//!     StorefrontConfig::default(),
//!     MemoryStore::new(),
//!     RecordingSurface::default(),
//!     10,
//! );
//!
//! page.dispatch(PageEvent::AddToCartClicked {
//!     product_id: ProductId::new("p1"),
//!     name: "Teddy Bear".to_string(),
//!     price_text: "19,99 €".to_string(),
//! });
//! assert_eq!(page.surface().last_badge(), Some((1, true)));
//!
//! // Autoplay moves the slider after five seconds.
//! page.advance_to(5_000);
//! assert_eq!(page.slider().state().page_index(), 1);
//! ```

mod consent;
mod easter;
mod forms;
mod header;
mod landing;
mod menu;
mod modal;
mod newsletter;
mod page;
mod script;

pub use consent::CookieConsent;
pub use easter::{EasterEggs, KonamiDetector, LogoClicks};
pub use forms::{blur_command, is_valid_email, validate_field, FieldError};
pub use header::{ScrollStep, StickyHeader};
pub use landing::{cta_scroll, fab_link, CategoryLoader, CHAT_MESSAGE};
pub use menu::MobileMenu;
pub use modal::Modals;
pub use newsletter::{
    Newsletter, NewsletterState, SubmitOutcome, NEWSLETTER_EMAIL_FIELD, OPT_IN_REQUIRED,
    SUBSCRIBED_MESSAGE,
};
pub use page::{PageTimer, Storefront};
pub use script::{run_script, Script, ScriptRun, ScriptStep, TimedCommand};
