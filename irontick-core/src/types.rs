//! Tick data model: per-instrument market snapshots.

use crate::error::WireError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Streaming detail level requested per instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TickMode {
    /// Last traded price only.
    Ltp,
    /// Price plus volume and OHLC.
    Quote,
    /// Quote plus timestamps, open interest and market depth.
    Full,
}

impl TickMode {
    /// Returns the wire name of the mode.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            TickMode::Ltp => "ltp",
            TickMode::Quote => "quote",
            TickMode::Full => "full",
        }
    }
}

impl std::fmt::Display for TickMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TickMode {
    type Err = WireError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ltp" => Ok(TickMode::Ltp),
            "quote" => Ok(TickMode::Quote),
            "full" => Ok(TickMode::Full),
            other => Err(WireError::UnknownMode(other.to_string())),
        }
    }
}

/// Open, high, low and close prices for the current session.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Ohlc {
    /// Session opening price.
    pub open: f64,
    /// Session high.
    pub high: f64,
    /// Session low.
    pub low: f64,
    /// Previous session's closing price.
    pub close: f64,
}

/// One resting order-book level.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DepthLevel {
    /// Total quantity resting at this level.
    pub quantity: u32,
    /// Level price.
    pub price: f64,
    /// Number of orders making up the level.
    pub order_count: u16,
}

/// Top five buy and sell levels of the order book.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MarketDepth {
    /// Best five buy levels, best first.
    pub buy: [DepthLevel; 5],
    /// Best five sell levels, best first.
    pub sell: [DepthLevel; 5],
}

/// One instrument's market snapshot at a point in time.
///
/// Every decoded tick is a fresh value: fields outside the tick's
/// [`TickMode`] coverage keep their default values and are never carried
/// over from an earlier tick of the same instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    /// Unique instrument identifier.
    pub instrument_token: u32,
    /// Detail level carried by this tick.
    pub mode: TickMode,
    /// Last traded price.
    pub last_price: f64,
    /// Quantity of the last trade (`Quote`/`Full`).
    pub last_traded_quantity: u32,
    /// Volume-weighted average traded price (`Quote`/`Full`).
    pub average_traded_price: f64,
    /// Volume traded so far today (`Quote`/`Full`).
    pub volume_traded: u32,
    /// Total buy-side demand (`Quote`/`Full`).
    pub total_buy_quantity: u32,
    /// Total sell-side demand (`Quote`/`Full`).
    pub total_sell_quantity: u32,
    /// Session OHLC (`Quote`/`Full`).
    pub ohlc: Option<Ohlc>,
    /// Percentage change of `last_price` against the session close.
    pub change: f64,
    /// Time of the last trade (`Full`).
    pub last_trade_time: Option<DateTime<Utc>>,
    /// Open interest (`Full`, derivatives only).
    pub oi: u32,
    /// Session open-interest high (`Full`).
    pub oi_day_high: u32,
    /// Session open-interest low (`Full`).
    pub oi_day_low: u32,
    /// Venue-side timestamp of the tick (`Full`).
    pub exchange_timestamp: Option<DateTime<Utc>>,
    /// Order-book depth (`Full` payloads that carry it).
    pub depth: Option<MarketDepth>,
}

impl Tick {
    /// Creates an empty tick for the given instrument and mode.
    #[must_use]
    pub fn new(instrument_token: u32, mode: TickMode) -> Self {
        Self {
            instrument_token,
            mode,
            last_price: 0.0,
            last_traded_quantity: 0,
            average_traded_price: 0.0,
            volume_traded: 0,
            total_buy_quantity: 0,
            total_sell_quantity: 0,
            ohlc: None,
            change: 0.0,
            last_trade_time: None,
            oi: 0,
            oi_day_high: 0,
            oi_day_low: 0,
            exchange_timestamp: None,
            depth: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_mode_wire_names() {
        assert_eq!(TickMode::Ltp.as_str(), "ltp");
        assert_eq!(TickMode::Quote.as_str(), "quote");
        assert_eq!(TickMode::Full.as_str(), "full");
    }

    #[test]
    fn test_mode_from_str() {
        assert_eq!(TickMode::from_str("ltp").unwrap(), TickMode::Ltp);
        assert_eq!(TickMode::from_str("quote").unwrap(), TickMode::Quote);
        assert_eq!(TickMode::from_str("full").unwrap(), TickMode::Full);
    }

    #[test]
    fn test_mode_from_str_rejects_unknown() {
        let err = TickMode::from_str("depth").unwrap_err();
        assert!(matches!(err, WireError::UnknownMode(ref s) if s == "depth"));
    }

    #[test]
    fn test_mode_display_matches_wire_name() {
        assert_eq!(TickMode::Full.to_string(), "full");
    }

    #[test]
    fn test_new_tick_is_empty() {
        let tick = Tick::new(42, TickMode::Ltp);
        assert_eq!(tick.instrument_token, 42);
        assert_eq!(tick.mode, TickMode::Ltp);
        assert_eq!(tick.last_price, 0.0);
        assert!(tick.ohlc.is_none());
        assert!(tick.last_trade_time.is_none());
        assert!(tick.depth.is_none());
    }

    #[test]
    fn test_tick_serializes_mode_lowercase() {
        let tick = Tick::new(7, TickMode::Quote);
        let json = serde_json::to_string(&tick).unwrap();
        assert!(json.contains("\"mode\":\"quote\""));
    }
}
