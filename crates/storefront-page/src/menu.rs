//! Mobile navigation menu.

use storefront_core::RenderCommand;

/// Open/closed state of the hamburger menu.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MobileMenu {
    open: bool,
}

impl MobileMenu {
    /// Create a closed menu.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the menu is open.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Flip the menu.
    pub fn toggle(&mut self) -> RenderCommand {
        self.open = !self.open;
        RenderCommand::Menu { open: self.open }
    }

    /// Close the menu if it is open.
    pub fn close(&mut self) -> Option<RenderCommand> {
        if !self.open {
            return None;
        }
        self.open = false;
        Some(RenderCommand::Menu { open: false })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_flips() {
        let mut menu = MobileMenu::new();
        assert_eq!(menu.toggle(), RenderCommand::Menu { open: true });
        assert!(menu.is_open());
        assert_eq!(menu.toggle(), RenderCommand::Menu { open: false });
        assert!(!menu.is_open());
    }

    #[test]
    fn test_close_only_when_open() {
        let mut menu = MobileMenu::new();
        assert_eq!(menu.close(), None);
        menu.toggle();
        assert_eq!(menu.close(), Some(RenderCommand::Menu { open: false }));
        assert_eq!(menu.close(), None);
    }
}
