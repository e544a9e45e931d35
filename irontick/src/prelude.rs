//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and traits.
//!
//! ```ignore
//! use irontick::prelude::*;
//! ```

// Wire-format types
pub use irontick_core::{
    DepthLevel, MarketDepth, Ohlc, Postback, PriceDivisors, ReadBuffer, Tick, TickMode,
    WireCommand, WireError, decode_frame,
};

// Engine types
pub use irontick_client::{
    ConnectionState, DEFAULT_ROOT_URL, Dispatcher, ReconnectPolicy, Ticker, TickerBuilder,
    TickerCommand, TickerError, TickerEvent, TickerHandle,
};
