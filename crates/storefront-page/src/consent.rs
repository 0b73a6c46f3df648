//! Cookie consent banner.

use storefront_cart::KeyValueStore;
use storefront_core::{ConsentDecision, RenderCommand};

/// Banner state and the visitor's decision.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CookieConsent {
    decision: Option<ConsentDecision>,
    answered: bool,
    visible: bool,
}

impl CookieConsent {
    /// Read a stored decision from `key`.
    ///
    /// Any non-empty value means the visitor already answered, even one
    /// this version does not recognise. Read failures count as no answer.
    pub fn load<S: KeyValueStore>(storage: &S, key: &str) -> Self {
        let raw = match storage.get_raw(key) {
            Ok(raw) => raw.filter(|value| !value.is_empty()),
            Err(e) => {
                tracing::warn!(key, error = %e, "could not read cookie consent");
                None
            }
        };
        let decision = raw.as_deref().and_then(ConsentDecision::parse);
        if raw.is_some() && decision.is_none() {
            tracing::debug!(key, "unrecognised cookie consent value kept as answered");
        }
        Self {
            decision,
            answered: raw.is_some(),
            visible: false,
        }
    }

    /// The decision, if one was made and is recognised.
    pub fn decision(&self) -> Option<ConsentDecision> {
        self.decision
    }

    /// Check if the banner is on screen.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Check if the banner still has to be shown.
    pub fn needs_prompt(&self) -> bool {
        !self.answered
    }

    /// Reveal delay elapsed.
    pub fn reveal(&mut self) -> Option<RenderCommand> {
        if self.answered || self.visible {
            return None;
        }
        self.visible = true;
        Some(RenderCommand::CookieBanner { visible: true })
    }

    /// Record an answer. Only the first answer counts.
    pub fn decide(&mut self, decision: ConsentDecision) -> Option<RenderCommand> {
        if self.answered {
            return None;
        }
        self.answered = true;
        self.decision = Some(decision);
        self.visible = false;
        Some(RenderCommand::CookieBanner { visible: false })
    }

    /// Write the decision under `key`.
    pub fn persist<S: KeyValueStore>(&self, storage: &mut S, key: &str) -> bool {
        let Some(decision) = self.decision else {
            return false;
        };
        match storage.set_raw(key, decision.as_str()) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(key, error = %e, "failed to store cookie consent");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_cart::MemoryStore;

    const KEY: &str = "cookieConsent";

    #[test]
    fn test_no_stored_decision_prompts() {
        let mut consent = CookieConsent::load(&MemoryStore::new(), KEY);
        assert!(consent.needs_prompt());
        assert_eq!(
            consent.reveal(),
            Some(RenderCommand::CookieBanner { visible: true })
        );
        assert_eq!(consent.reveal(), None);
    }

    #[test]
    fn test_stored_decision_skips_banner() {
        let mut consent = CookieConsent::load(&MemoryStore::with_entry(KEY, "declined"), KEY);
        assert_eq!(consent.decision(), Some(ConsentDecision::Declined));
        assert_eq!(consent.reveal(), None);
    }

    #[test]
    fn test_unrecognised_value_counts_as_answered() {
        let mut consent = CookieConsent::load(&MemoryStore::with_entry(KEY, "\"yes\""), KEY);
        assert!(!consent.needs_prompt());
        assert_eq!(consent.decision(), None);
        assert_eq!(consent.reveal(), None);
        assert_eq!(consent.decide(ConsentDecision::Accepted), None);
    }

    #[test]
    fn test_empty_value_prompts() {
        let consent = CookieConsent::load(&MemoryStore::with_entry(KEY, ""), KEY);
        assert!(consent.needs_prompt());
    }

    #[test]
    fn test_first_decision_wins_and_persists() {
        let mut store = MemoryStore::new();
        let mut consent = CookieConsent::load(&store, KEY);
        consent.reveal();

        assert_eq!(
            consent.decide(ConsentDecision::Accepted),
            Some(RenderCommand::CookieBanner { visible: false })
        );
        assert_eq!(consent.decide(ConsentDecision::Declined), None);
        assert!(consent.persist(&mut store, KEY));
        assert_eq!(store.get_raw(KEY).unwrap().as_deref(), Some("accepted"));
    }
}
