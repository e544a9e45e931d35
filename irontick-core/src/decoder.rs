//! Binary frame decoder.
//!
//! One frame holds a big-endian `u16` segment count followed by that many
//! length-prefixed segments, each a self-contained tick payload. The
//! segment shape is keyed by its byte length alone; there is no tag byte
//! in this protocol. Unrecognized lengths are skipped so newer server
//! shapes never break decoding of the rest of the frame.

use crate::buffer::ReadBuffer;
use crate::divisors::PriceDivisors;
use crate::types::{DepthLevel, MarketDepth, Ohlc, Tick, TickMode};
use chrono::{DateTime, Utc};

/// Frame header: big-endian segment count.
const FRAME_HEADER_LEN: usize = 2;
/// Per-segment header: big-endian payload length.
const SEGMENT_HEADER_LEN: usize = 2;

/// LTP segment: instrument token and price.
pub const SEGMENT_LEN_LTP: usize = 8;
/// Quote segment: LTP plus volume and OHLC fields.
pub const SEGMENT_LEN_QUOTE: usize = 44;
/// Full segment without depth: quote plus timestamps and open interest.
pub const SEGMENT_LEN_FULL: usize = 64;
/// Full segment with the ten-level depth block appended.
pub const SEGMENT_LEN_FULL_DEPTH: usize = 184;

const DEPTH_LEVELS: usize = 5;
const DEPTH_LEVEL_LEN: usize = 12;
const DEPTH_BLOCK_LEN: usize = 2 * DEPTH_LEVELS * DEPTH_LEVEL_LEN;

type SegmentDecoder = fn(&[u8], &PriceDivisors) -> Tick;

/// Recognized segment shapes, keyed by exact payload length.
///
/// Adding a server-side shape is an entry here plus its decoder.
const SEGMENT_SHAPES: &[(usize, SegmentDecoder)] = &[
    (SEGMENT_LEN_LTP, decode_ltp),
    (SEGMENT_LEN_QUOTE, decode_quote),
    (SEGMENT_LEN_FULL, decode_full),
    (SEGMENT_LEN_FULL_DEPTH, decode_full),
];

/// Decodes one binary frame into its tick segments.
///
/// The decode is total: truncated frames and unrecognized segment lengths
/// are skipped with a diagnostic, and every remaining valid segment still
/// decodes. Tick order matches segment order on the wire. A frame with a
/// zero segment count (the venue's heartbeat) yields an empty vector.
///
/// # Arguments
/// * `frame` - Raw frame bytes as received from the transport
/// * `divisors` - Price divisor table for the venue's exchange segments
#[must_use]
pub fn decode_frame(frame: &[u8], divisors: &PriceDivisors) -> Vec<Tick> {
    if frame.len() < FRAME_HEADER_LEN {
        return Vec::new();
    }

    let count = frame.get_u16_be(0) as usize;
    let mut ticks = Vec::with_capacity(count);
    let mut offset = FRAME_HEADER_LEN;

    for _ in 0..count {
        if frame.len() < offset + SEGMENT_HEADER_LEN {
            tracing::warn!(offset, "frame truncated inside segment header");
            break;
        }
        let len = frame.get_u16_be(offset) as usize;
        offset += SEGMENT_HEADER_LEN;

        if frame.len() < offset + len {
            tracing::warn!(
                declared = len,
                available = frame.len() - offset,
                "frame truncated inside segment payload"
            );
            break;
        }
        let segment = frame.get_bytes(offset, len);
        offset += len;

        match SEGMENT_SHAPES.iter().find(|(shape_len, _)| *shape_len == len) {
            Some((_, decode)) => ticks.push(decode(segment, divisors)),
            None => tracing::debug!(len, "skipping unrecognized segment shape"),
        }
    }

    ticks
}

fn decode_ltp(segment: &[u8], divisors: &PriceDivisors) -> Tick {
    let token = segment.get_u32_be(0);
    let mut tick = Tick::new(token, TickMode::Ltp);
    tick.last_price = divisors.price(token, segment.get_u32_be(4));
    tick
}

fn decode_quote(segment: &[u8], divisors: &PriceDivisors) -> Tick {
    let token = segment.get_u32_be(0);
    let mut tick = Tick::new(token, TickMode::Quote);
    fill_quote_fields(&mut tick, segment, divisors.for_token(token));
    tick
}

fn decode_full(segment: &[u8], divisors: &PriceDivisors) -> Tick {
    let token = segment.get_u32_be(0);
    let divisor = divisors.for_token(token);
    let mut tick = Tick::new(token, TickMode::Full);
    fill_quote_fields(&mut tick, segment, divisor);
    tick.last_trade_time = epoch_seconds(segment.get_u32_be(44));
    tick.oi = segment.get_u32_be(48);
    tick.oi_day_high = segment.get_u32_be(52);
    tick.oi_day_low = segment.get_u32_be(56);
    tick.exchange_timestamp = epoch_seconds(segment.get_u32_be(60));
    if segment.len() == SEGMENT_LEN_FULL_DEPTH {
        tick.depth = Some(decode_depth(
            segment.get_bytes(SEGMENT_LEN_FULL, DEPTH_BLOCK_LEN),
            divisor,
        ));
    }
    tick
}

/// Fields shared by the quote and full layouts, offsets 4..44.
fn fill_quote_fields(tick: &mut Tick, segment: &[u8], divisor: f64) {
    tick.last_price = f64::from(segment.get_u32_be(4)) / divisor;
    tick.last_traded_quantity = segment.get_u32_be(8);
    tick.average_traded_price = f64::from(segment.get_u32_be(12)) / divisor;
    tick.volume_traded = segment.get_u32_be(16);
    tick.total_buy_quantity = segment.get_u32_be(20);
    tick.total_sell_quantity = segment.get_u32_be(24);
    let ohlc = Ohlc {
        open: f64::from(segment.get_u32_be(28)) / divisor,
        high: f64::from(segment.get_u32_be(32)) / divisor,
        low: f64::from(segment.get_u32_be(36)) / divisor,
        close: f64::from(segment.get_u32_be(40)) / divisor,
    };
    tick.change = percent_change(tick.last_price, ohlc.close);
    tick.ohlc = Some(ohlc);
}

fn decode_depth(block: &[u8], divisor: f64) -> MarketDepth {
    let mut depth = MarketDepth::default();
    for level in 0..DEPTH_LEVELS {
        depth.buy[level] = decode_depth_level(block, level * DEPTH_LEVEL_LEN, divisor);
        depth.sell[level] =
            decode_depth_level(block, (DEPTH_LEVELS + level) * DEPTH_LEVEL_LEN, divisor);
    }
    depth
}

fn decode_depth_level(block: &[u8], offset: usize, divisor: f64) -> DepthLevel {
    // Each level is 12 bytes: quantity, price, order count, 2 bytes padding.
    DepthLevel {
        quantity: block.get_u32_be(offset),
        price: f64::from(block.get_u32_be(offset + 4)) / divisor,
        order_count: block.get_u16_be(offset + 8),
    }
}

fn percent_change(last_price: f64, close: f64) -> f64 {
    if close == 0.0 {
        0.0
    } else {
        (last_price - close) * 100.0 / close
    }
}

fn epoch_seconds(secs: u32) -> Option<DateTime<Utc>> {
    if secs == 0 {
        return None;
    }
    DateTime::from_timestamp(i64::from(secs), 0)
}
