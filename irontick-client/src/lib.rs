//! # IronTick Client
//!
//! Async streaming engine for IronTick market data.
//!
//! This crate provides:
//! - Ticker builder with connection and backoff configuration
//! - WebSocket session lifecycle with automatic reconnection
//! - Subscription registry with replay after reconnect
//! - Typed events fanned out to registered handlers

pub mod builder;
pub mod dispatcher;
pub mod error;
pub mod events;
pub mod reconnect;
pub mod registry;
pub mod session;
pub mod state;

pub use builder::{DEFAULT_ROOT_URL, Ticker, TickerBuilder, TickerCommand, TickerHandle};
pub use dispatcher::Dispatcher;
pub use error::TickerError;
pub use events::TickerEvent;
pub use reconnect::{ReconnectPolicy, ReconnectState};
pub use registry::{DEFAULT_MODE, SubscriptionRegistry};
pub use session::TickerSession;
pub use state::ConnectionState;
