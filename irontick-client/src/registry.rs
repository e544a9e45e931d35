//! Subscription registry.
//!
//! The engine task owns one registry per session. It records the desired
//! mode for each subscribed instrument token so the full subscription set
//! can be replayed after a reconnect.

use irontick_core::TickMode;
use std::collections::HashMap;

/// Mode applied to tokens subscribed without an explicit mode call.
pub const DEFAULT_MODE: TickMode = TickMode::Quote;

/// Desired subscription state, keyed by instrument token.
#[derive(Debug, Clone, Default)]
pub struct SubscriptionRegistry {
    modes: HashMap<u32, TickMode>,
}

impl SubscriptionRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the given tokens at [`DEFAULT_MODE`].
    ///
    /// Tokens already present keep their current mode.
    pub fn subscribe(&mut self, tokens: &[u32]) {
        for &token in tokens {
            self.modes.entry(token).or_insert(DEFAULT_MODE);
        }
    }

    /// Removes the given tokens.
    pub fn unsubscribe(&mut self, tokens: &[u32]) {
        for token in tokens {
            self.modes.remove(token);
        }
    }

    /// Sets the mode for the given tokens, subscribing any that are new.
    pub fn set_mode(&mut self, mode: TickMode, tokens: &[u32]) {
        for &token in tokens {
            self.modes.insert(token, mode);
        }
    }

    /// Returns the mode a token is subscribed at, if any.
    #[must_use]
    pub fn mode_of(&self, token: u32) -> Option<TickMode> {
        self.modes.get(&token).copied()
    }

    /// Number of subscribed tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.modes.len()
    }

    /// Whether no tokens are subscribed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modes.is_empty()
    }

    /// Current token-to-mode mapping.
    #[must_use]
    pub fn snapshot(&self) -> HashMap<u32, TickMode> {
        self.modes.clone()
    }

    /// Tokens grouped by mode, for replay after a reconnect.
    ///
    /// Groups and the tokens within them are sorted so replay traffic is
    /// deterministic.
    #[must_use]
    pub fn grouped(&self) -> Vec<(TickMode, Vec<u32>)> {
        let mut by_mode: HashMap<TickMode, Vec<u32>> = HashMap::new();
        for (&token, &mode) in &self.modes {
            by_mode.entry(mode).or_default().push(token);
        }
        let mut groups: Vec<(TickMode, Vec<u32>)> = by_mode.into_iter().collect();
        for (_, tokens) in &mut groups {
            tokens.sort_unstable();
        }
        groups.sort_unstable_by_key(|(mode, _)| *mode);
        groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscribe_uses_default_mode() {
        let mut registry = SubscriptionRegistry::new();
        registry.subscribe(&[738_561, 408_065]);

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.mode_of(738_561), Some(DEFAULT_MODE));
        assert_eq!(registry.mode_of(408_065), Some(DEFAULT_MODE));
    }

    #[test]
    fn test_resubscribe_keeps_existing_mode() {
        let mut registry = SubscriptionRegistry::new();
        registry.set_mode(TickMode::Full, &[738_561]);
        registry.subscribe(&[738_561]);

        assert_eq!(registry.mode_of(738_561), Some(TickMode::Full));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_set_mode_subscribes_new_tokens() {
        let mut registry = SubscriptionRegistry::new();
        registry.set_mode(TickMode::Ltp, &[5]);

        assert_eq!(registry.mode_of(5), Some(TickMode::Ltp));
    }

    #[test]
    fn test_unsubscribe_removes_tokens() {
        let mut registry = SubscriptionRegistry::new();
        registry.subscribe(&[1, 2, 3]);
        registry.unsubscribe(&[2, 7]);

        assert_eq!(registry.len(), 2);
        assert!(registry.mode_of(2).is_none());
        assert!(registry.mode_of(1).is_some());
    }

    #[test]
    fn test_interleaved_operations_collapse_to_final_state() {
        let mut registry = SubscriptionRegistry::new();
        registry.subscribe(&[1, 2]);
        registry.set_mode(TickMode::Full, &[2, 3]);
        registry.unsubscribe(&[1]);

        let snapshot = registry.snapshot();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.get(&2), Some(&TickMode::Full));
        assert_eq!(snapshot.get(&3), Some(&TickMode::Full));
        assert_eq!(registry.grouped(), vec![(TickMode::Full, vec![2, 3])]);
    }

    #[test]
    fn test_grouped_is_sorted_and_partitioned() {
        let mut registry = SubscriptionRegistry::new();
        registry.set_mode(TickMode::Full, &[30, 10]);
        registry.set_mode(TickMode::Ltp, &[20]);
        registry.subscribe(&[40]);

        let groups = registry.grouped();
        assert_eq!(
            groups,
            vec![
                (TickMode::Ltp, vec![20]),
                (TickMode::Quote, vec![40]),
                (TickMode::Full, vec![10, 30]),
            ]
        );
    }

    #[test]
    fn test_empty_registry_has_no_groups() {
        let registry = SubscriptionRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.grouped().is_empty());
    }
}
