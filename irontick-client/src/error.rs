//! Error types for streaming client operations.

use thiserror::Error;

/// Error type for streaming client operations.
#[derive(Debug, Error)]
pub enum TickerError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// WebSocket protocol or transport error.
    #[error("websocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    /// Wire-format error.
    #[error("wire error: {0}")]
    Wire(#[from] irontick_core::WireError),

    /// Connection timeout.
    #[error("connection timeout")]
    ConnectTimeout,

    /// Connection closed by server.
    #[error("connection closed by server (code: {code:?}, reason: {reason:?})")]
    ConnectionClosed {
        /// Close code sent by the server, if any.
        code: Option<u16>,
        /// Close reason sent by the server, if any.
        reason: Option<String>,
    },

    /// Credentials rejected during the WebSocket handshake.
    #[error("authentication rejected with HTTP status {status}")]
    AuthRejected {
        /// HTTP status returned by the handshake.
        status: u16,
    },

    /// Maximum reconnect attempts reached.
    #[error("maximum reconnect attempts reached")]
    MaxReconnectAttempts,

    /// Channel error.
    #[error("channel error")]
    Channel,
}
