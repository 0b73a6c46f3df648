//! Video and search modals.

use storefront_core::{ModalKind, RenderCommand, SearchConfig};

/// The modal on screen, if any, and the search input behind it.
///
/// One modal at a time: opening a second while one is up is ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Modals {
    open: Option<ModalKind>,
    query: String,
    min_query_chars: usize,
}

impl Modals {
    /// Create with nothing open.
    pub fn new(config: &SearchConfig) -> Self {
        Self {
            open: None,
            query: String::new(),
            min_query_chars: config.min_query_chars,
        }
    }

    /// The open modal.
    pub fn open_kind(&self) -> Option<ModalKind> {
        self.open
    }

    /// Current text of the search input.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Open `kind` unless a modal is already up.
    ///
    /// The search modal always opens with an empty input.
    pub fn open(&mut self, kind: ModalKind) -> Option<RenderCommand> {
        if let Some(current) = self.open {
            tracing::debug!(requested = kind.as_str(), current = current.as_str(), "modal already open");
            return None;
        }
        if kind == ModalKind::Search {
            self.query.clear();
        }
        self.open = Some(kind);
        Some(RenderCommand::Modal {
            modal: kind,
            open: true,
        })
    }

    /// Close whatever is open.
    pub fn close(&mut self) -> Option<RenderCommand> {
        let kind = self.open.take()?;
        Some(RenderCommand::Modal {
            modal: kind,
            open: false,
        })
    }

    /// A suggestion tag was picked: it becomes the input's text.
    ///
    /// Filling the input does not run a search by itself.
    pub fn select_tag(&mut self, tag: &str) -> Option<RenderCommand> {
        if self.open != Some(ModalKind::Search) {
            return None;
        }
        self.query = tag.to_string();
        Some(RenderCommand::SearchQuery {
            query: self.query.clone(),
        })
    }

    /// The input changed. Long enough queries run a search.
    pub fn input(&mut self, query: &str) -> Option<RenderCommand> {
        if self.open != Some(ModalKind::Search) {
            return None;
        }
        self.query = query.to_string();
        if self.query.chars().count() < self.min_query_chars {
            return None;
        }
        Some(RenderCommand::Search {
            query: self.query.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn modals() -> Modals {
        Modals::new(&SearchConfig::default())
    }

    #[test]
    fn test_one_modal_at_a_time() {
        let mut m = modals();
        assert_eq!(
            m.open(ModalKind::Video),
            Some(RenderCommand::Modal {
                modal: ModalKind::Video,
                open: true
            })
        );
        assert_eq!(m.open(ModalKind::Search), None);
        assert_eq!(m.open_kind(), Some(ModalKind::Video));

        assert_eq!(
            m.close(),
            Some(RenderCommand::Modal {
                modal: ModalKind::Video,
                open: false
            })
        );
        assert_eq!(m.close(), None);
    }

    #[test]
    fn test_search_needs_three_characters() {
        let mut m = modals();
        assert_eq!(m.input("pel"), None);

        m.open(ModalKind::Search);
        assert_eq!(m.input("pe"), None);
        assert_eq!(m.query(), "pe");
        assert_eq!(
            m.input("pel"),
            Some(RenderCommand::Search {
                query: "pel".to_string()
            })
        );
        // Counted in characters, not bytes.
        assert_eq!(m.input("bé"), None);
    }

    #[test]
    fn test_tag_fills_input_only_in_search() {
        let mut m = modals();
        m.open(ModalKind::Video);
        assert_eq!(m.select_tag("Puzzles"), None);
        m.close();

        m.open(ModalKind::Search);
        assert_eq!(
            m.select_tag("Puzzles"),
            Some(RenderCommand::SearchQuery {
                query: "Puzzles".to_string()
            })
        );
        assert_eq!(m.query(), "Puzzles");

        // Reopening starts from an empty input.
        m.close();
        m.open(ModalKind::Search);
        assert_eq!(m.query(), "");
    }
}
