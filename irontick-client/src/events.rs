//! Typed events emitted by the streaming engine.

use irontick_core::Tick;
use std::time::Duration;

/// An event observed on the streaming session.
///
/// Errors are carried as rendered strings so events stay `Clone` and can
/// fan out to any number of handlers.
#[derive(Debug, Clone)]
pub enum TickerEvent {
    /// A batch of decoded ticks from one binary frame.
    Ticks(Vec<Tick>),
    /// The session is established and subscriptions have been replayed.
    Connect,
    /// The session dropped with an error.
    Disconnect {
        /// Rendered error that ended the session.
        error: String,
    },
    /// A session-level error that did not end the connection by itself.
    Error {
        /// Rendered error message.
        error: String,
    },
    /// The session ended cleanly and the engine will not reconnect.
    Close {
        /// Close code from the server, if it sent one.
        code: Option<u16>,
        /// Close reason text.
        reason: String,
    },
    /// A reconnect attempt is scheduled.
    Reconnect {
        /// 1-based attempt number.
        attempt: usize,
        /// Backoff delay before the attempt.
        delay: Duration,
    },
    /// The reconnect budget is exhausted; no further attempts follow.
    Noreconnect,
    /// An order postback from the venue, payload untyped.
    OrderUpdate(serde_json::Value),
    /// Raw bytes of a binary frame, before decoding.
    Message(Vec<u8>),
}
