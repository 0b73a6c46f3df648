//! Hero buttons, category cards and the floating contact buttons.

use storefront_core::{ContactConfig, FabAction, LandingConfig, RenderCommand};

/// Toast shown by the chat button.
pub const CHAT_MESSAGE: &str = "Chat is in development! 💬";

/// Scroll command for the primary call to action.
pub fn cta_scroll(config: &LandingConfig) -> RenderCommand {
    RenderCommand::ScrollToSection {
        section: config.cta_section.clone(),
        margin_px: config.scroll_margin_px,
    }
}

/// Link a contact button follows. The chat button has none.
pub fn fab_link(action: FabAction, config: &ContactConfig) -> Option<RenderCommand> {
    let href = match action {
        FabAction::Chat => return None,
        FabAction::Phone => &config.phone_href,
        FabAction::Email => &config.email_href,
    };
    Some(RenderCommand::OpenLink { href: href.clone() })
}

/// Loading overlay shown while a category "loads".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryLoader {
    visible: bool,
}

impl CategoryLoader {
    /// Create a hidden loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the overlay is up.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// A category was clicked. Emits the overlay unless it is already up.
    pub fn start(&mut self) -> Option<RenderCommand> {
        if self.visible {
            return None;
        }
        self.visible = true;
        Some(RenderCommand::LoadingOverlay { visible: true })
    }

    /// Loading time elapsed.
    pub fn finish(&mut self) -> Option<RenderCommand> {
        if !self.visible {
            return None;
        }
        self.visible = false;
        Some(RenderCommand::LoadingOverlay { visible: false })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fab_links() {
        let contact = ContactConfig::default();
        assert_eq!(fab_link(FabAction::Chat, &contact), None);
        assert_eq!(
            fab_link(FabAction::Phone, &contact),
            Some(RenderCommand::OpenLink {
                href: "tel:0123456789".to_string()
            })
        );
        assert_eq!(
            fab_link(FabAction::Email, &contact),
            Some(RenderCommand::OpenLink {
                href: "mailto:hello@itishop.fr".to_string()
            })
        );
    }

    #[test]
    fn test_cta_scrolls_to_categories() {
        assert_eq!(
            cta_scroll(&LandingConfig::default()),
            RenderCommand::ScrollToSection {
                section: "categories".to_string(),
                margin_px: 20.0,
            }
        );
    }

    #[test]
    fn test_loader_shows_once() {
        let mut loader = CategoryLoader::new();
        assert_eq!(
            loader.start(),
            Some(RenderCommand::LoadingOverlay { visible: true })
        );
        assert_eq!(loader.start(), None);
        assert_eq!(
            loader.finish(),
            Some(RenderCommand::LoadingOverlay { visible: false })
        );
        assert_eq!(loader.finish(), None);
        assert!(!loader.is_visible());
    }
}
