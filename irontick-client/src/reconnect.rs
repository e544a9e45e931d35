//! Reconnection policy and backoff state.

use std::time::Duration;

/// Configuration for reconnection behavior.
#[derive(Debug, Clone)]
pub struct ReconnectPolicy {
    /// Whether reconnection is enabled.
    pub enabled: bool,
    /// Delay before the first reconnect attempt.
    pub base_delay: Duration,
    /// Maximum delay between reconnect attempts.
    pub max_delay: Duration,
    /// Multiplier for exponential backoff.
    pub backoff_multiplier: f64,
    /// Maximum number of reconnect attempts (0 = unlimited).
    pub max_attempts: usize,
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            base_delay: Duration::from_secs(2),
            max_delay: Duration::from_secs(60),
            backoff_multiplier: 2.0,
            max_attempts: 50,
        }
    }
}

/// Tracks reconnection attempts and calculates backoff delays.
///
/// A policy with `max_attempts = n` grants exactly `n` delays before
/// reporting exhaustion.
pub struct ReconnectState {
    policy: ReconnectPolicy,
    attempts: usize,
    current_delay: Duration,
}

impl ReconnectState {
    /// Creates a new reconnect state with the given policy.
    #[must_use]
    pub fn new(policy: ReconnectPolicy) -> Self {
        let base_delay = policy.base_delay;
        Self {
            policy,
            attempts: 0,
            current_delay: base_delay,
        }
    }

    /// Records a failed connection attempt and returns the delay before
    /// the next attempt.
    ///
    /// Returns `None` once the attempt budget is spent or reconnection is
    /// disabled.
    pub fn on_failure(&mut self) -> Option<Duration> {
        if !self.policy.enabled {
            return None;
        }

        self.attempts += 1;

        if self.policy.max_attempts > 0 && self.attempts > self.policy.max_attempts {
            return None;
        }

        let delay = self.current_delay;

        // Calculate next delay with exponential backoff
        let next_delay = Duration::from_secs_f64(
            self.current_delay.as_secs_f64() * self.policy.backoff_multiplier,
        );
        self.current_delay = next_delay.min(self.policy.max_delay);

        Some(delay)
    }

    /// Resets the backoff state after a successful connection.
    pub fn on_success(&mut self) {
        self.reset();
    }

    /// Clears attempt counting and restores the base delay.
    pub fn reset(&mut self) {
        self.attempts = 0;
        self.current_delay = self.policy.base_delay;
    }

    /// Returns the number of reconnection attempts made since the last
    /// successful connection.
    #[must_use]
    pub fn attempts(&self) -> usize {
        self.attempts
    }

    /// Returns true if more reconnection attempts are allowed.
    #[must_use]
    pub fn can_retry(&self) -> bool {
        self.policy.enabled
            && (self.policy.max_attempts == 0 || self.attempts < self.policy.max_attempts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(base_secs: u64, max_secs: u64, max_attempts: usize) -> ReconnectPolicy {
        ReconnectPolicy {
            enabled: true,
            base_delay: Duration::from_secs(base_secs),
            max_delay: Duration::from_secs(max_secs),
            backoff_multiplier: 2.0,
            max_attempts,
        }
    }

    #[test]
    fn test_backoff_sequence_then_exhaustion() {
        let mut state = ReconnectState::new(policy(1, 30, 5));

        let delays: Vec<_> = (0..5).map(|_| state.on_failure().unwrap()).collect();
        assert_eq!(
            delays,
            [1, 2, 4, 8, 16].map(Duration::from_secs).to_vec()
        );

        // Budget of five is spent; the sixth failure is terminal.
        assert!(state.on_failure().is_none());
        assert!(!state.can_retry());
    }

    #[test]
    fn test_backoff_caps_at_max_delay() {
        let mut state = ReconnectState::new(policy(10, 15, 0));

        assert_eq!(state.on_failure(), Some(Duration::from_secs(10)));
        assert_eq!(state.on_failure(), Some(Duration::from_secs(15)));
        assert_eq!(state.on_failure(), Some(Duration::from_secs(15)));
    }

    #[test]
    fn test_success_resets_backoff() {
        let mut state = ReconnectState::new(policy(1, 30, 5));

        state.on_failure();
        state.on_failure();
        assert_eq!(state.attempts(), 2);

        state.on_success();
        assert_eq!(state.attempts(), 0);
        assert_eq!(state.on_failure(), Some(Duration::from_secs(1)));
    }

    #[test]
    fn test_disabled_policy_never_retries() {
        let mut state = ReconnectState::new(ReconnectPolicy {
            enabled: false,
            ..Default::default()
        });
        assert!(state.on_failure().is_none());
        assert!(!state.can_retry());
    }

    #[test]
    fn test_zero_max_attempts_is_unlimited() {
        let mut state = ReconnectState::new(policy(1, 4, 0));
        for _ in 0..100 {
            assert!(state.on_failure().is_some());
        }
        assert!(state.can_retry());
    }
}
