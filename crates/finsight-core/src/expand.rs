//! Expand/collapse state for the report tree
//!
//! Modeled as a per-node override map over a single default flag; the
//! override takes precedence. Session-only, never persisted.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Expansion state: global default plus explicit per-node overrides
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpandState {
    expand_all: bool,
    overrides: HashMap<String, bool>,
}

impl Default for ExpandState {
    fn default() -> Self {
        Self::new(true)
    }
}

impl ExpandState {
    /// Create a state with the given default flag and no overrides
    pub fn new(expand_all: bool) -> Self {
        Self {
            expand_all,
            overrides: HashMap::new(),
        }
    }

    /// Answer the expansion query: per-node override if set, else the
    /// global default
    pub fn is_expanded(&self, name: &str) -> bool {
        self.overrides.get(name).copied().unwrap_or(self.expand_all)
    }

    /// Flip one node, recording an explicit override. Returns the new
    /// effective state for that node.
    pub fn toggle(&mut self, name: &str) -> bool {
        let next = !self.is_expanded(name);
        self.overrides.insert(name.to_string(), next);
        next
    }

    /// Replace the global default and clear all explicit overrides
    pub fn set_expand_all(&mut self, expand: bool) {
        self.overrides.clear();
        self.expand_all = expand;
    }

    /// The current global default flag
    pub fn expand_all(&self) -> bool {
        self.expand_all
    }

    /// Number of explicit per-node overrides
    pub fn override_count(&self) -> usize {
        self.overrides.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_flag_answers_without_overrides() {
        let state = ExpandState::new(true);
        assert!(state.is_expanded("EBT"));
        assert!(state.is_expanded("anything"));

        let state = ExpandState::new(false);
        assert!(!state.is_expanded("EBT"));
    }

    #[test]
    fn test_toggle_records_override() {
        let mut state = ExpandState::new(true);
        assert!(!state.toggle("EBT"));
        assert!(!state.is_expanded("EBT"));
        // Other nodes still follow the default
        assert!(state.is_expanded("EBIT"));
        assert_eq!(state.override_count(), 1);

        assert!(state.toggle("EBT"));
        assert!(state.is_expanded("EBT"));
    }

    #[test]
    fn test_expand_all_clears_overrides() {
        let mut state = ExpandState::new(true);
        state.toggle("EBT");
        state.toggle("EBIT");
        assert_eq!(state.override_count(), 2);

        state.set_expand_all(false);
        assert_eq!(state.override_count(), 0);
        assert!(!state.is_expanded("EBT"));
        assert!(!state.is_expanded("EBIT"));
    }
}
