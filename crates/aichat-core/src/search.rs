//! Full-text search over the in-memory message list.
//!
//! Case-insensitive substring matching, recomputed from scratch on every
//! call. The corpus is a single session's messages, so there is no index.

use crate::message::Message;

/// One search hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchMatch {
    /// Position of the message in the searched list.
    pub index: usize,
    /// Id of the matching message, for UI highlighting.
    pub id: String,
}

/// Search results with a cyclic navigation cursor.
#[derive(Debug, Default)]
pub struct MessageSearch {
    matches: Vec<SearchMatch>,
    cursor: usize,
}

impl MessageSearch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recomputes matches for `term`, resetting the cursor to the first hit.
    ///
    /// Matching is a case-insensitive substring test against `content`.
    /// An empty or whitespace-only term yields no matches, not all messages.
    /// Returns the id of the first match, if any.
    pub fn search(&mut self, messages: &[Message], term: &str) -> Option<&str> {
        self.cursor = 0;

        let term = term.trim().to_lowercase();
        if term.is_empty() {
            self.matches.clear();
            return None;
        }

        self.matches = messages
            .iter()
            .enumerate()
            .filter(|(_, m)| m.content.to_lowercase().contains(&term))
            .map(|(index, m)| SearchMatch {
                index,
                id: m.id.clone(),
            })
            .collect();

        self.current()
    }

    /// Returns the matches in original message order.
    pub fn matches(&self) -> &[SearchMatch] {
        &self.matches
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Returns the cursor position (0-based).
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Returns the id of the currently selected match.
    pub fn current(&self) -> Option<&str> {
        self.matches.get(self.cursor).map(|m| m.id.as_str())
    }

    /// Advances the cursor, wrapping from the last match to the first.
    /// No-op on an empty result set.
    pub fn next(&mut self) -> Option<&str> {
        if self.matches.is_empty() {
            return None;
        }
        self.cursor = (self.cursor + 1) % self.matches.len();
        self.current()
    }

    /// Moves the cursor back, wrapping from the first match to the last.
    /// No-op on an empty result set.
    pub fn previous(&mut self) -> Option<&str> {
        if self.matches.is_empty() {
            return None;
        }
        self.cursor = if self.cursor == 0 {
            self.matches.len() - 1
        } else {
            self.cursor - 1
        };
        self.current()
    }
}

#[cfg(test)]
mod tests {
    use crate::message::{Message, Role};

    use super::*;

    fn messages(contents: &[&str]) -> Vec<Message> {
        contents
            .iter()
            .map(|c| Message::new(*c, Role::User))
            .collect()
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let msgs = messages(&["Apple Pie", "banana split", "apple tart"]);
        let mut search = MessageSearch::new();

        search.search(&msgs, "APPLE");
        assert_eq!(search.len(), 2);

        search.search(&msgs, "an");
        assert_eq!(search.len(), 1);
        assert_eq!(search.matches()[0].index, 1);
    }

    #[test]
    fn test_scenario_apple_matches_in_original_order() {
        let msgs = messages(&["apple pie", "banana split", "apple tart"]);
        let mut search = MessageSearch::new();

        let first = search.search(&msgs, "apple").map(str::to_string);
        let indices: Vec<usize> = search.matches().iter().map(|m| m.index).collect();
        assert_eq!(indices, vec![0, 2]);
        assert_eq!(search.cursor(), 0);
        assert_eq!(first.as_deref(), Some(msgs[0].id.as_str()));
    }

    #[test]
    fn test_empty_term_yields_no_matches() {
        let msgs = messages(&["apple pie"]);
        let mut search = MessageSearch::new();

        assert_eq!(search.search(&msgs, ""), None);
        assert!(search.is_empty());
        assert_eq!(search.search(&msgs, "   "), None);
        assert!(search.is_empty());
    }

    #[test]
    fn test_missing_term_yields_no_matches() {
        let msgs = messages(&["apple pie", "banana split"]);
        let mut search = MessageSearch::new();

        assert_eq!(search.search(&msgs, "cherry"), None);
        assert!(search.is_empty());
    }

    #[test]
    fn test_next_wraps_cyclically() {
        let msgs = messages(&["apple pie", "banana split", "apple tart"]);
        let mut search = MessageSearch::new();
        search.search(&msgs, "apple");

        // N repeated next() calls return to the first match.
        let n = search.len();
        let start = search.current().map(str::to_string);
        for _ in 0..n {
            search.next();
        }
        assert_eq!(search.current().map(str::to_string), start);

        search.next();
        assert_eq!(search.cursor(), 1);
        search.next();
        assert_eq!(search.cursor(), 0); // wrapped
    }

    #[test]
    fn test_previous_wraps_cyclically() {
        let msgs = messages(&["apple pie", "banana split", "apple tart"]);
        let mut search = MessageSearch::new();
        search.search(&msgs, "apple");

        let n = search.len();
        let start = search.current().map(str::to_string);
        for _ in 0..n {
            search.previous();
        }
        assert_eq!(search.current().map(str::to_string), start);

        search.previous();
        assert_eq!(search.cursor(), n - 1); // wrapped backwards
    }

    #[test]
    fn test_navigation_on_empty_results_is_noop() {
        let mut search = MessageSearch::new();
        assert_eq!(search.next(), None);
        assert_eq!(search.previous(), None);
        assert_eq!(search.cursor(), 0);
    }

    #[test]
    fn test_search_resets_cursor() {
        let msgs = messages(&["apple pie", "apple tart"]);
        let mut search = MessageSearch::new();

        search.search(&msgs, "apple");
        search.next();
        assert_eq!(search.cursor(), 1);

        search.search(&msgs, "apple");
        assert_eq!(search.cursor(), 0);
    }
}
