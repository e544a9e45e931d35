//! Connection lifecycle states.

use std::sync::atomic::{AtomicU8, Ordering};

/// Lifecycle state of the streaming connection.
///
/// Transitions are driven solely by the engine task; handles observe the
/// state through a shared atomic, so readers may see a value that is one
/// transition stale but never a torn one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ConnectionState {
    /// No connection and no attempt in flight.
    Disconnected = 0,
    /// Handshake in progress.
    Connecting = 1,
    /// Live session, ticks flowing.
    Connected = 2,
    /// Waiting out a backoff delay before the next attempt.
    Reconnecting = 3,
    /// Terminal. The engine will make no further attempts.
    Closed = 4,
}

impl ConnectionState {
    /// Returns the state's byte encoding.
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Decodes a state byte, mapping unknown values to [`Self::Closed`].
    #[must_use]
    pub fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::Disconnected,
            1 => Self::Connecting,
            2 => Self::Connected,
            3 => Self::Reconnecting,
            _ => Self::Closed,
        }
    }

    /// Reads the state out of a shared atomic.
    #[must_use]
    pub fn from_atomic(state: &AtomicU8) -> Self {
        Self::from_u8(state.load(Ordering::Acquire))
    }

    /// Publishes this state into a shared atomic.
    pub fn store(self, state: &AtomicU8) {
        state.store(self.as_u8(), Ordering::Release);
    }

    /// Whether a live session is established.
    #[must_use]
    pub fn is_connected(self) -> bool {
        self == Self::Connected
    }

    /// Whether the connection is terminally closed.
    #[must_use]
    pub fn is_closed(self) -> bool {
        self == Self::Closed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_byte_roundtrip() {
        for state in [
            ConnectionState::Disconnected,
            ConnectionState::Connecting,
            ConnectionState::Connected,
            ConnectionState::Reconnecting,
            ConnectionState::Closed,
        ] {
            assert_eq!(ConnectionState::from_u8(state.as_u8()), state);
        }
    }

    #[test]
    fn test_unknown_byte_maps_to_closed() {
        assert_eq!(ConnectionState::from_u8(99), ConnectionState::Closed);
    }

    #[test]
    fn test_atomic_store_load() {
        let shared = AtomicU8::new(ConnectionState::Disconnected.as_u8());
        ConnectionState::Connected.store(&shared);
        assert_eq!(
            ConnectionState::from_atomic(&shared),
            ConnectionState::Connected
        );
        assert!(ConnectionState::from_atomic(&shared).is_connected());
    }

    #[test]
    fn test_predicates() {
        assert!(ConnectionState::Connected.is_connected());
        assert!(!ConnectionState::Reconnecting.is_connected());
        assert!(ConnectionState::Closed.is_closed());
        assert!(!ConnectionState::Connecting.is_closed());
    }
}
