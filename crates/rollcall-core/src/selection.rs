//! Checked-name tracking that survives re-renders.
//!
//! Rows are rebuilt on every render, so selection is keyed by the raw
//! roster name rather than by row position. Two rows sharing a raw name
//! share one checkbox state; the endpoint identifies students by name too.

use std::collections::BTreeSet;

use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionStore {
    names: BTreeSet<String>,
}

impl SelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold the drawn check-state into the store before the rows are rebuilt.
    pub fn capture<'a>(&mut self, states: impl IntoIterator<Item = (&'a str, bool)>) {
        for (name, checked) in states {
            if name.is_empty() {
                continue;
            }
            self.toggle(name, checked);
        }
    }

    pub fn toggle(&mut self, name: &str, checked: bool) {
        if checked {
            self.names.insert(name.to_string());
        } else {
            self.names.remove(name);
        }
    }

    /// Only called once a submission is confirmed.
    pub fn clear(&mut self) {
        debug!(count = self.names.len(), "Clearing selection");
        self.names.clear();
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Selected names in sorted order.
    pub fn names(&self) -> Vec<String> {
        self.names.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle() {
        let mut store = SelectionStore::new();
        store.toggle("Ann Lee", true);
        store.toggle("Bob Zed", true);
        store.toggle("Ann Lee", false);
        assert!(!store.contains("Ann Lee"));
        assert!(store.contains("Bob Zed"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_capture_applies_drawn_state() {
        let mut store = SelectionStore::new();
        store.toggle("Gone Kid", true);
        store.toggle("Ann Lee", true);
        store.capture([("Ann Lee", false), ("Bob Zed", true)]);
        // Names not drawn keep their state.
        assert_eq!(store.names(), vec!["Bob Zed".to_string(), "Gone Kid".to_string()]);
    }

    #[test]
    fn test_capture_skips_blank_names() {
        let mut store = SelectionStore::new();
        store.capture([("", true)]);
        assert!(store.is_empty());
    }

    #[test]
    fn test_capture_then_clear_is_empty() {
        let mut store = SelectionStore::new();
        store.toggle("Carl", true);
        store.capture([("Ann Lee", true), ("Bob Zed", true)]);
        store.clear();
        assert!(store.is_empty());
    }

    #[test]
    fn test_duplicate_names_share_state() {
        let mut store = SelectionStore::new();
        store.capture([("Sam Lee", true), ("Sam Lee", true)]);
        assert_eq!(store.len(), 1);
        store.toggle("Sam Lee", false);
        assert!(!store.contains("Sam Lee"));
    }
}
