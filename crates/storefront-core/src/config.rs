//! Storefront configuration.
//!
//! Every section defaults to the values the storefront ships with, so an
//! empty file (or no file at all) yields a working page.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::clock::Millis;
use crate::error::StorefrontError;

/// Top-level configuration for the page and its controllers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorefrontConfig {
    /// Product slider tunables.
    pub slider: SliderConfig,
    /// Cart persistence and feedback.
    pub cart: CartConfig,
    /// Toast notifications.
    pub notifications: NotificationConfig,
    /// Viewport-driven behavior.
    pub viewport: ViewportConfig,
    /// Sticky header.
    pub header: HeaderConfig,
    /// Hidden features.
    pub easter_eggs: EasterEggConfig,
    /// Newsletter signup timings.
    pub newsletter: NewsletterConfig,
    /// Cookie consent banner.
    pub consent: ConsentConfig,
    /// Search modal.
    pub search: SearchConfig,
    /// Hero buttons and category cards.
    pub landing: LandingConfig,
    /// Floating contact buttons.
    pub contact: ContactConfig,
}

impl StorefrontConfig {
    /// Load config from a file.
    ///
    /// Files ending in `.json` are parsed as JSON, everything else as TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StorefrontError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|source| StorefrontError::ConfigRead {
                path: path.display().to_string(),
                source,
            })?;

        let config = if is_json(path) {
            Self::from_json_str(&content)?
        } else {
            Self::from_toml_str(&content)?
        };
        config.validate()?;
        tracing::debug!(path = %path.display(), "loaded storefront config");
        Ok(config)
    }

    /// Save config to a file, picking the format from the extension.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), StorefrontError> {
        let path = path.as_ref();
        let content = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content).map_err(|source| StorefrontError::ConfigWrite {
            path: path.display().to_string(),
            source,
        })
    }

    /// Parse a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, StorefrontError> {
        Ok(toml::from_str(content)?)
    }

    /// Parse a JSON document.
    pub fn from_json_str(content: &str) -> Result<Self, StorefrontError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Reject values the controllers cannot work with.
    pub fn validate(&self) -> Result<(), StorefrontError> {
        let slider = &self.slider;
        if slider.autoplay_delay_ms == 0 {
            return Err(invalid("slider.autoplay_delay_ms must be positive"));
        }
        if !slider.swipe_threshold_px.is_finite() || slider.swipe_threshold_px < 0.0 {
            return Err(invalid("slider.swipe_threshold_px must be a non-negative number"));
        }
        if !slider.card_gap_px.is_finite() || slider.card_gap_px < 0.0 {
            return Err(invalid("slider.card_gap_px must be a non-negative number"));
        }
        if slider.wide_visible == 0 || slider.breakpoints.iter().any(|b| b.visible == 0) {
            return Err(invalid("slider visible counts must be at least 1"));
        }
        if slider
            .breakpoints
            .windows(2)
            .any(|pair| pair[0].max_width >= pair[1].max_width)
        {
            return Err(invalid("slider.breakpoints must be sorted by ascending max_width"));
        }
        if self.cart.storage_key.is_empty() || self.consent.storage_key.is_empty() {
            return Err(invalid("storage keys must not be empty"));
        }
        if self.cart.storage_key == self.consent.storage_key {
            return Err(invalid("cart and consent storage keys must differ"));
        }
        if self.easter_eggs.logo_clicks == 0 {
            return Err(invalid("easter_eggs.logo_clicks must be at least 1"));
        }
        if self.landing.cta_section.is_empty() {
            return Err(invalid("landing.cta_section must not be empty"));
        }
        if !self.landing.scroll_margin_px.is_finite() {
            return Err(invalid("landing.scroll_margin_px must be a number"));
        }
        Ok(())
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

fn invalid(msg: &str) -> StorefrontError {
    StorefrontError::InvalidConfig(msg.to_string())
}

/// One step of the responsive visible-count function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakpointConfig {
    /// Widths up to and including this value use `visible`.
    pub max_width: u32,
    /// Number of cards visible at once.
    pub visible: usize,
}

/// Product slider tunables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SliderConfig {
    /// Autoplay period.
    pub autoplay_delay_ms: Millis,
    /// Horizontal drag distance a swipe must exceed.
    pub swipe_threshold_px: f64,
    /// Gap between cards, added to the rendered card width.
    pub card_gap_px: f64,
    /// CSS transition applied with every offset change.
    pub transition: String,
    /// Visible count above the widest breakpoint.
    pub wide_visible: usize,
    /// Ascending breakpoints.
    pub breakpoints: Vec<BreakpointConfig>,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            autoplay_delay_ms: 5000,
            swipe_threshold_px: 50.0,
            card_gap_px: 32.0,
            transition: "transform 0.5s cubic-bezier(0.4, 0, 0.2, 1)".to_string(),
            wide_visible: 4,
            breakpoints: vec![
                BreakpointConfig { max_width: 480, visible: 1 },
                BreakpointConfig { max_width: 768, visible: 2 },
                BreakpointConfig { max_width: 1024, visible: 3 },
            ],
        }
    }
}

/// Cart persistence and feedback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CartConfig {
    /// Key of the durable cart mirror.
    pub storage_key: String,
    /// How long the cart button pulses after an add.
    pub pulse_ms: Millis,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_key: "itiShopCart".to_string(),
            pulse_ms: 600,
        }
    }
}

/// Toast notifications.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    /// Auto-dismiss delay.
    pub auto_dismiss_ms: Millis,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            auto_dismiss_ms: 5000,
        }
    }
}

/// Viewport-driven behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    /// Quiet period before a burst of resize events is handled.
    pub resize_debounce_ms: Millis,
    /// Widths above this are desktop; the mobile menu closes there.
    pub desktop_min_width: u32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            resize_debounce_ms: 250,
            desktop_min_width: 768,
        }
    }
}

/// Sticky header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderConfig {
    /// Scroll offset past which the header condenses.
    pub condense_after_px: f64,
    /// Minimum spacing between scroll evaluations (one animation frame).
    pub frame_ms: Millis,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            condense_after_px: 100.0,
            frame_ms: 16,
        }
    }
}

/// Hidden features.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EasterEggConfig {
    /// Key codes that trigger the celebration, in order.
    pub konami_sequence: Vec<String>,
    /// Logo clicks required.
    pub logo_clicks: u32,
    /// Window, from the first click, in which the clicks must land.
    pub logo_window_ms: Millis,
}

impl Default for EasterEggConfig {
    fn default() -> Self {
        let konami = [
            "ArrowUp",
            "ArrowUp",
            "ArrowDown",
            "ArrowDown",
            "ArrowLeft",
            "ArrowRight",
            "ArrowLeft",
            "ArrowRight",
            "KeyB",
            "KeyA",
        ];
        Self {
            konami_sequence: konami.iter().map(|s| s.to_string()).collect(),
            logo_clicks: 3,
            logo_window_ms: 1000,
        }
    }
}

/// Newsletter signup timings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewsletterConfig {
    /// Time spent in the submitting state.
    pub submit_delay_ms: Millis,
    /// Time the confirmation stays before the form resets.
    pub reset_delay_ms: Millis,
}

impl Default for NewsletterConfig {
    fn default() -> Self {
        Self {
            submit_delay_ms: 2000,
            reset_delay_ms: 3000,
        }
    }
}

/// Cookie consent banner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsentConfig {
    /// Key of the persisted decision.
    pub storage_key: String,
    /// Delay before the banner slides in.
    pub reveal_delay_ms: Millis,
}

impl Default for ConsentConfig {
    fn default() -> Self {
        Self {
            storage_key: "cookieConsent".to_string(),
            reveal_delay_ms: 1000,
        }
    }
}

/// Search modal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Delay between opening the modal and focusing its input.
    pub focus_delay_ms: Millis,
    /// Shortest query, in characters, that runs a search.
    pub min_query_chars: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            focus_delay_ms: 100,
            min_query_chars: 3,
        }
    }
}

/// Hero buttons and category cards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LandingConfig {
    /// Section the primary call to action scrolls to.
    pub cta_section: String,
    /// Space left between the header and the section.
    pub scroll_margin_px: f64,
    /// How long the loading overlay shows after a category click.
    pub category_loading_ms: Millis,
}

impl Default for LandingConfig {
    fn default() -> Self {
        Self {
            cta_section: "categories".to_string(),
            scroll_margin_px: 20.0,
            category_loading_ms: 1500,
        }
    }
}

/// Floating contact buttons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    /// Link the phone button follows.
    pub phone_href: String,
    /// Link the email button follows.
    pub email_href: String,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            phone_href: "tel:0123456789".to_string(),
            email_href: "mailto:hello@itishop.fr".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = StorefrontConfig::from_toml_str("").unwrap();
        assert_eq!(config, StorefrontConfig::default());
        assert_eq!(config.slider.autoplay_delay_ms, 5000);
        assert_eq!(config.cart.storage_key, "itiShopCart");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_section_override() {
        let config = StorefrontConfig::from_toml_str(
            r#"
            [slider]
            autoplay_delay_ms = 3000

            [cart]
            storage_key = "demoCart"
            "#,
        )
        .unwrap();

        assert_eq!(config.slider.autoplay_delay_ms, 3000);
        assert_eq!(config.slider.card_gap_px, 32.0);
        assert_eq!(config.cart.storage_key, "demoCart");
        assert_eq!(config.cart.pulse_ms, 600);
    }

    #[test]
    fn test_unsorted_breakpoints_rejected() {
        let mut config = StorefrontConfig::default();
        config.slider.breakpoints.reverse();
        assert!(matches!(
            config.validate(),
            Err(StorefrontError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_landing_and_contact_defaults() {
        let config = StorefrontConfig::from_toml_str(
            r#"
            [contact]
            phone_href = "tel:0999999999"
            "#,
        )
        .unwrap();
        assert_eq!(config.contact.phone_href, "tel:0999999999");
        assert_eq!(config.contact.email_href, "mailto:hello@itishop.fr");
        assert_eq!(config.landing.category_loading_ms, 1500);
        assert_eq!(config.search.min_query_chars, 3);

        let mut config = StorefrontConfig::default();
        config.landing.cta_section.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_shared_storage_key_rejected() {
        let mut config = StorefrontConfig::default();
        config.consent.storage_key = config.cart.storage_key.clone();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = StorefrontConfig::default();
        config.header.condense_after_px = 140.0;

        for name in ["storefront.toml", "storefront.json"] {
            let path = dir.path().join(name);
            config.save(&path).unwrap();
            let loaded = StorefrontConfig::load(&path).unwrap();
            assert_eq!(loaded, config);
        }
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let err = StorefrontConfig::load("/nonexistent/storefront.toml").unwrap_err();
        assert!(matches!(err, StorefrontError::ConfigRead { .. }));
    }
}
