//! Price divisor table keyed by exchange segment.
//!
//! Wire prices are unsigned integers; the divisor that turns them into
//! decimal prices depends on the exchange segment carried in the
//! instrument token's low byte and is not part of the tick payload.

use std::collections::HashMap;

/// Currency derivatives segment.
const SEGMENT_CDS: u8 = 3;
/// BSE currency segment.
const SEGMENT_BCD: u8 = 6;

/// Divisor table mapping exchange segments to price divisors.
///
/// The defaults cover the confirmed venue segments: currency derivatives
/// quote in 1e-7 units and BSE currency in 1e-4 units; every other
/// segment trades in hundredths.
#[derive(Debug, Clone)]
pub struct PriceDivisors {
    overrides: HashMap<u8, f64>,
    default: f64,
}

impl Default for PriceDivisors {
    fn default() -> Self {
        let mut overrides = HashMap::new();
        overrides.insert(SEGMENT_CDS, 10_000_000.0);
        overrides.insert(SEGMENT_BCD, 10_000.0);
        Self {
            overrides,
            default: 100.0,
        }
    }
}

impl PriceDivisors {
    /// Adds or replaces the divisor for an exchange segment.
    #[must_use]
    pub fn with_divisor(mut self, segment: u8, divisor: f64) -> Self {
        self.overrides.insert(segment, divisor);
        self
    }

    /// Returns the divisor for the given instrument token.
    #[must_use]
    pub fn for_token(&self, instrument_token: u32) -> f64 {
        let segment = (instrument_token & 0xFF) as u8;
        self.overrides
            .get(&segment)
            .copied()
            .unwrap_or(self.default)
    }

    /// Converts a wire price into a decimal price for the given token.
    #[must_use]
    pub fn price(&self, instrument_token: u32, raw: u32) -> f64 {
        f64::from(raw) / self.for_token(instrument_token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_equity_divisor() {
        let divisors = PriceDivisors::default();
        // Token 738561 sits on segment 1.
        assert_eq!(divisors.for_token(738_561), 100.0);
        assert_eq!(divisors.price(738_561, 250_000), 2500.0);
    }

    #[test]
    fn test_currency_segments() {
        let divisors = PriceDivisors::default();
        let cds_token = (1 << 8) | u32::from(SEGMENT_CDS);
        let bcd_token = (1 << 8) | u32::from(SEGMENT_BCD);
        assert_eq!(divisors.for_token(cds_token), 10_000_000.0);
        assert_eq!(divisors.for_token(bcd_token), 10_000.0);
    }

    #[test]
    fn test_override_wins() {
        let divisors = PriceDivisors::default().with_divisor(9, 1000.0);
        let token = (77 << 8) | 9;
        assert_eq!(divisors.for_token(token), 1000.0);
        assert_eq!(divisors.price(token, 123_456), 123.456);
    }

    #[test]
    fn test_unknown_segment_falls_back() {
        let divisors = PriceDivisors::default();
        assert_eq!(divisors.for_token(0xFF), 100.0);
    }
}
