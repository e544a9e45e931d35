//! # IronTick
//!
//! Market-data streaming client with binary tick decoding for trading
//! venues.
//!
//! IronTick maintains a persistent WebSocket session against a venue's
//! streaming endpoint, decodes its big-endian binary tick format into
//! structured per-instrument records, and keeps the server-side
//! subscription state alive across reconnects.
//!
//! ## Features
//!
//! - **Length-keyed binary decoding** - LTP, quote and full-depth segment
//!   shapes resolved from a lookup table, unknown shapes skipped
//! - **Automatic reconnection** - exponential backoff with a bounded
//!   attempt budget and full subscription replay
//! - **Typed events** - tick batches, lifecycle and order postbacks fanned
//!   out to any number of panic-isolated handlers
//! - **Single-owner concurrency** - one engine task owns the socket; the
//!   cloneable handle talks to it over a command channel
//!
//! ## Quick Start
//!
//! ```ignore
//! use irontick::prelude::*;
//!
//! let mut dispatcher = Dispatcher::new();
//! dispatcher.on_ticks(|ticks| {
//!     for tick in ticks {
//!         println!("{} @ {}", tick.instrument_token, tick.last_price);
//!     }
//! });
//!
//! let (mut ticker, handle) = TickerBuilder::new(api_key, access_token)
//!     .build(dispatcher);
//!
//! tokio::spawn(async move { ticker.run().await });
//! handle.subscribe(vec![738_561]).await?;
//! ```
//!
//! ## Crate Organization
//!
//! - [`core`] - Tick data model, frame decoder, divisor tables, wire
//!   commands and postbacks
//! - [`client`] - Builder, WebSocket session, reconnect state machine,
//!   subscription registry, event dispatch

pub mod prelude;

/// Wire-format layer: tick model, decoder, divisors, commands.
pub mod core {
    pub use irontick_core::*;
}

/// Streaming engine: builder, session, registry, dispatcher.
pub mod client {
    pub use irontick_client::*;
}

// Re-export commonly used items at the crate root
pub use irontick_core::{
    DepthLevel, MarketDepth, Ohlc, Postback, PriceDivisors, Tick, TickMode, WireCommand,
    decode_frame,
};

pub use irontick_client::{
    ConnectionState, Dispatcher, ReconnectPolicy, Ticker, TickerBuilder, TickerEvent,
    TickerHandle,
};
