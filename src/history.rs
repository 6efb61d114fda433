//! Navigation history state machine
//!
//! A current location plus two stacks: locations reachable by going back and
//! locations reachable by going forward. Every command is total; going back
//! or forward with nothing to go to leaves the state untouched.

use serde::{Deserialize, Serialize};

/// Opaque identifier of a visited destination
pub type Location = String;

/// Location shown before the first visit and after a clear
pub const HOME: &str = "Home";

// =============================================================================
// NavigationHistory
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationHistory {
    current: Location,
    /// Tail is the most recently left location
    back: Vec<Location>,
    /// Tail is the most recently left location via back
    forward: Vec<Location>,
}

impl Default for NavigationHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl NavigationHistory {
    pub fn new() -> Self {
        Self {
            current: HOME.to_string(),
            back: Vec::new(),
            forward: Vec::new(),
        }
    }

    /// Move to `destination`, recording the current location and dropping
    /// the forward branch.
    pub fn visit(&mut self, destination: impl Into<Location>) {
        let previous = std::mem::replace(&mut self.current, destination.into());
        self.back.push(previous);
        self.forward.clear();
    }

    /// Returns false when there was nothing to go back to.
    pub fn back(&mut self) -> bool {
        match self.back.pop() {
            Some(previous) => {
                let left = std::mem::replace(&mut self.current, previous);
                self.forward.push(left);
                true
            }
            None => false,
        }
    }

    /// Returns false when there was nothing to go forward to.
    pub fn forward(&mut self) -> bool {
        match self.forward.pop() {
            Some(next) => {
                let left = std::mem::replace(&mut self.current, next);
                self.back.push(left);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.back.clear();
        self.forward.clear();
        self.current = HOME.to_string();
    }

    pub fn current(&self) -> &str {
        &self.current
    }

    pub fn has_back(&self) -> bool {
        !self.back.is_empty()
    }

    pub fn has_forward(&self) -> bool {
        !self.forward.is_empty()
    }

    /// Owned copy of the state, stacks listed most-recent-first.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            current: self.current.clone(),
            back: self.back.iter().rev().cloned().collect(),
            forward: self.forward.iter().rev().cloned().collect(),
            has_back: self.has_back(),
            has_forward: self.has_forward(),
        }
    }
}

// =============================================================================
// Snapshot
// =============================================================================

/// Read-only projection handed to the presentation layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub current: Location,
    /// Next location `back` would move to comes first
    #[serde(rename = "backHistory")]
    pub back: Vec<Location>,
    /// Next location `forward` would move to comes first
    #[serde(rename = "forwardHistory")]
    pub forward: Vec<Location>,
    pub has_back: bool,
    pub has_forward: bool,
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// Stacks in push order (bottom to tail), as the state machine holds them
    fn state(history: &NavigationHistory) -> (String, Vec<String>, Vec<String>) {
        (
            history.current.clone(),
            history.back.clone(),
            history.forward.clone(),
        )
    }

    fn triple(
        current: &str,
        back: &[&str],
        forward: &[&str],
    ) -> (String, Vec<String>, Vec<String>) {
        (
            current.to_string(),
            back.iter().map(|s| s.to_string()).collect(),
            forward.iter().map(|s| s.to_string()).collect(),
        )
    }

    #[test]
    fn new_history_starts_at_home_with_empty_stacks() {
        let history = NavigationHistory::new();
        assert_eq!(state(&history), triple(HOME, &[], &[]));
        assert!(!history.has_back());
        assert!(!history.has_forward());
    }

    #[test]
    fn visit_back_forward_scenario() {
        let mut history = NavigationHistory::new();

        history.visit("A");
        assert_eq!(state(&history), triple("A", &["Home"], &[]));

        history.visit("B");
        assert_eq!(state(&history), triple("B", &["Home", "A"], &[]));

        assert!(history.back());
        assert_eq!(state(&history), triple("A", &["Home"], &["B"]));

        assert!(history.back());
        assert_eq!(state(&history), triple("Home", &[], &["B", "A"]));

        assert!(history.forward());
        assert_eq!(state(&history), triple("A", &["Home"], &["B"]));

        history.visit("C");
        assert_eq!(state(&history), triple("C", &["Home", "A"], &[]));
    }

    #[test]
    fn visit_discards_forward_branch() {
        let mut history = NavigationHistory::new();
        history.visit("A");
        history.visit("B");
        history.back();
        assert!(history.has_forward());

        history.visit("D");
        assert_eq!(history.current(), "D");
        assert!(!history.has_forward());
        assert!(!history.forward());
    }

    #[test]
    fn revisiting_current_location_still_records_history() {
        let mut history = NavigationHistory::new();
        history.visit("A");
        history.visit("A");
        assert_eq!(state(&history), triple("A", &["Home", "A"], &[]));
    }

    #[test]
    fn back_on_empty_stack_is_noop() {
        let mut history = NavigationHistory::new();
        history.visit("A");
        history.back();
        let before = history.clone();

        assert!(!history.back());
        assert_eq!(history, before);
    }

    #[test]
    fn forward_on_empty_stack_is_noop() {
        let mut history = NavigationHistory::new();
        history.visit("A");
        let before = history.clone();

        assert!(!history.forward());
        assert_eq!(history, before);
    }

    #[test]
    fn back_then_forward_restores_state() {
        let mut history = NavigationHistory::new();
        for location in ["A", "B", "C"] {
            history.visit(location);
        }
        history.back();
        let before = history.clone();

        assert!(history.back());
        assert!(history.forward());
        assert_eq!(history, before);
    }

    #[test]
    fn clear_resets_to_home_from_any_state() {
        let mut history = NavigationHistory::new();
        history.visit("A");
        history.visit("B");
        history.back();

        history.clear();
        assert_eq!(history, NavigationHistory::new());
    }

    #[test]
    fn back_and_forward_after_clear_are_noops() {
        let mut history = NavigationHistory::new();
        history.visit("A");
        history.clear();

        assert!(!history.back());
        assert!(!history.forward());
        assert_eq!(state(&history), triple(HOME, &[], &[]));
    }

    #[test]
    fn snapshot_lists_stacks_most_recent_first() {
        let mut history = NavigationHistory::new();
        history.visit("A");
        history.visit("B");
        history.visit("C");
        history.back();
        history.back();

        let snapshot = history.snapshot();
        assert_eq!(snapshot.current, "A");
        assert_eq!(snapshot.back, vec!["Home"]);
        assert_eq!(snapshot.forward, vec!["B", "C"]);
        assert!(snapshot.has_back);
        assert!(snapshot.has_forward);
    }

    #[test]
    fn snapshot_is_detached_from_history() {
        let mut history = NavigationHistory::new();
        history.visit("A");

        let mut snapshot = history.snapshot();
        snapshot.back.clear();
        snapshot.current = "tampered".to_string();

        assert_eq!(history.current(), "A");
        assert!(history.has_back());
    }

    #[test]
    fn snapshot_serializes_with_rendering_field_names() {
        let mut history = NavigationHistory::new();
        history.visit("A");

        let value = serde_json::to_value(history.snapshot()).unwrap();
        assert_eq!(
            value,
            json!({
                "current": "A",
                "backHistory": ["Home"],
                "forwardHistory": [],
                "hasBack": true,
                "hasForward": false
            })
        );
    }

    #[test]
    fn random_command_sequences_keep_accounting_balanced() {
        // Small LCG so the sequence is reproducible
        let mut seed: u64 = 0x2545_f491_4f6c_dd1d;
        let mut next = move || {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            (seed >> 33) as usize
        };

        let mut history = NavigationHistory::new();
        let mut pushes = 0usize;
        let mut pops = 0usize;
        let mut cleared = 0usize;
        let mut moves_since_clear = 0usize;

        for step in 0..2000 {
            match next() % 10 {
                0..=3 => {
                    let dropped = history.forward.len();
                    history.visit(format!("loc-{}", step));
                    pushes += 1;
                    // Forward entries dropped by a visit count as cleared
                    cleared += dropped;
                    moves_since_clear += 1;
                    assert!(history.forward.is_empty());
                }
                4..=5 => {
                    if history.back() {
                        pushes += 1;
                        pops += 1;
                    }
                    moves_since_clear += 1;
                }
                6..=7 => {
                    if history.forward() {
                        pushes += 1;
                        pops += 1;
                    }
                    moves_since_clear += 1;
                }
                8 => {
                    let snapshot = history.snapshot();
                    assert_eq!(snapshot.has_back, !snapshot.back.is_empty());
                    assert_eq!(snapshot.has_forward, !snapshot.forward.is_empty());
                }
                _ => {
                    cleared += history.back.len() + history.forward.len();
                    history.clear();
                    moves_since_clear = 0;
                }
            }

            assert!(history.back.len() <= moves_since_clear);
            assert!(history.forward.len() <= moves_since_clear);
            assert_eq!(
                pushes,
                pops + history.back.len() + history.forward.len() + cleared
            );
        }
    }
}
