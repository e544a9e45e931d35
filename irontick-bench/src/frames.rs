//! Synthetic wire frames for decoder benchmarks.

const LTP_LEN: u16 = 8;
const QUOTE_LEN: u16 = 44;
const FULL_DEPTH_LEN: u16 = 184;

fn ltp_segment(out: &mut Vec<u8>, token: u32, price: u32) {
    out.extend_from_slice(&LTP_LEN.to_be_bytes());
    out.extend_from_slice(&token.to_be_bytes());
    out.extend_from_slice(&price.to_be_bytes());
}

fn quote_segment(out: &mut Vec<u8>, token: u32) {
    out.extend_from_slice(&QUOTE_LEN.to_be_bytes());
    out.extend_from_slice(&token.to_be_bytes());
    for field in 1u32..=10 {
        out.extend_from_slice(&(field * 1_000).to_be_bytes());
    }
}

fn full_depth_segment(out: &mut Vec<u8>, token: u32) {
    out.extend_from_slice(&FULL_DEPTH_LEN.to_be_bytes());
    out.extend_from_slice(&token.to_be_bytes());
    for field in 1u32..=15 {
        out.extend_from_slice(&(field * 1_000).to_be_bytes());
    }
    for level in 0u32..10 {
        out.extend_from_slice(&(100 + level).to_be_bytes());
        out.extend_from_slice(&(250_000 + level * 25).to_be_bytes());
        out.extend_from_slice(&((level as u16 + 1).to_be_bytes()));
        out.extend_from_slice(&[0, 0]);
    }
}

/// Builds a frame of `count` LTP segments.
#[must_use]
pub fn ltp_frame(count: u16) -> Vec<u8> {
    let mut frame = Vec::new();
    frame.extend_from_slice(&count.to_be_bytes());
    for i in 0..count {
        ltp_segment(&mut frame, 738_561 + u32::from(i), 250_000 + u32::from(i));
    }
    frame
}

/// Builds a frame of `count` quote segments.
#[must_use]
pub fn quote_frame(count: u16) -> Vec<u8> {
    let mut frame = Vec::new();
    frame.extend_from_slice(&count.to_be_bytes());
    for i in 0..count {
        quote_segment(&mut frame, 738_561 + u32::from(i));
    }
    frame
}

/// Builds a frame of `count` full segments with depth.
#[must_use]
pub fn full_depth_frame(count: u16) -> Vec<u8> {
    let mut frame = Vec::new();
    frame.extend_from_slice(&count.to_be_bytes());
    for i in 0..count {
        full_depth_segment(&mut frame, 738_561 + u32::from(i));
    }
    frame
}

/// Builds a frame cycling LTP, quote and full-depth segments.
#[must_use]
pub fn mixed_frame(count: u16) -> Vec<u8> {
    let mut frame = Vec::new();
    frame.extend_from_slice(&count.to_be_bytes());
    for i in 0..count {
        let token = 738_561 + u32::from(i);
        match i % 3 {
            0 => ltp_segment(&mut frame, token, 250_000),
            1 => quote_segment(&mut frame, token),
            _ => full_depth_segment(&mut frame, token),
        }
    }
    frame
}

#[cfg(test)]
mod tests {
    use super::*;
    use irontick_core::{PriceDivisors, TickMode, decode_frame};

    #[test]
    fn test_frames_decode_fully() {
        let divisors = PriceDivisors::default();
        assert_eq!(decode_frame(&ltp_frame(16), &divisors).len(), 16);
        assert_eq!(decode_frame(&quote_frame(16), &divisors).len(), 16);
        assert_eq!(decode_frame(&full_depth_frame(16), &divisors).len(), 16);

        let ticks = decode_frame(&mixed_frame(9), &divisors);
        assert_eq!(ticks.len(), 9);
        assert_eq!(ticks[0].mode, TickMode::Ltp);
        assert_eq!(ticks[1].mode, TickMode::Quote);
        assert_eq!(ticks[2].mode, TickMode::Full);
        assert!(ticks[2].depth.is_some());
    }
}
