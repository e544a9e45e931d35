//! # IronTick Core
//!
//! Wire-format layer for the IronTick market-data client.
//!
//! This crate provides:
//! - The tick data model (Tick, TickMode, OHLC and market depth types)
//! - Big-endian buffer accessors used by the frame decoder
//! - The binary frame decoder with length-keyed segment shapes
//! - Price divisor tables for exchange segments
//! - Outbound venue commands and inbound text postback parsing
//! - Error types for wire operations

pub mod buffer;
pub mod commands;
pub mod decoder;
pub mod divisors;
pub mod error;
pub mod postback;
pub mod types;

pub use buffer::ReadBuffer;
pub use commands::WireCommand;
pub use decoder::{
    SEGMENT_LEN_FULL, SEGMENT_LEN_FULL_DEPTH, SEGMENT_LEN_LTP, SEGMENT_LEN_QUOTE, decode_frame,
};
pub use divisors::PriceDivisors;
pub use error::{Result, WireError};
pub use postback::Postback;
pub use types::{DepthLevel, MarketDepth, Ohlc, Tick, TickMode};
