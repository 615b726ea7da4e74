use num_bigint::BigInt;

use crate::bits::{BitBuffer, Cursor};
use crate::error::{DecodeError, DecodeResult};

const TETRADE_BITS: usize = 4;
const DECLET_BITS: usize = 10;
const MAX_TETRADE: u8 = 9;
const MAX_DECLET: u16 = 999;

/// Encode the significand `d0.d1d2...` into the provided [`BitBuffer`].
///
/// Uses a tetrade (4 bits) for the leading digit and declets (10 bits per 3
/// digits) for the fractional digits, the last group padded with decimal
/// zeros. A fraction made only of zeros emits no declets. If `negative` is
/// true, `10 - m` is encoded instead of `m`; `digits` is complemented in place.
pub fn encode_significand(bits: &mut BitBuffer, digits: &mut [u8], negative: bool) {
    let Some((&first, _)) = digits.split_first() else {
        return;
    };
    debug_assert!((1..=MAX_TETRADE).contains(&first));

    if negative {
        compute_complement_in_place(digits);
    }

    bits.append_bits(TETRADE_BITS, u64::from(digits[0]));

    let fraction = &digits[1..];
    if fraction.iter().all(|&d| d == 0) {
        return;
    }

    for group in fraction.chunks(3) {
        // Pad with zeros
        let declet = (0..3).fold(0u16, |acc, i| {
            acc * 10 + u16::from(group.get(i).copied().unwrap_or(0))
        });
        bits.append_bits(DECLET_BITS, u64::from(declet));
    }
}

/// Compute `10 - m` in-place, overwriting `digits`.
///
/// For example: [1, 0, 3, 2] (1.032) → [8, 9, 6, 8] (8.968)
fn compute_complement_in_place(digits: &mut [u8]) {
    let mut borrow = 0u8;

    // Start from the last digit (rightmost)
    for i in (0..digits.len()).rev() {
        let minuend = if i == 0 { 10u8 } else { 0u8 };
        let sub = digits[i] + borrow;
        if minuend < sub {
            digits[i] = minuend + 10 - sub;
            borrow = 1;
        } else {
            digits[i] = minuend - sub;
            borrow = 0;
        }
    }
}

/// A decoded significand as an unscaled integer: the value is
/// `unscaled / 10^fraction_digits`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedSignificand {
    pub unscaled: BigInt,
    pub fraction_digits: usize,
}

/// Decode the significand from a tetrade and as many declets as fit.
///
/// Declets are read while at least 10 bits remain, so zero padding at the end
/// of the last byte is ignored. If `negative` is true the result is `m - 10`,
/// undoing the complement applied during encoding.
///
/// # Errors
///
/// Returns [`DecodeError::InvalidSignificand`] for a tetrade above 9,
/// [`DecodeError::InvalidDeclet`] for a declet above 999, or
/// [`DecodeError::Bits`] if the tetrade is truncated.
#[allow(clippy::cast_possible_truncation)]
pub fn decode_significand(cursor: &mut Cursor<'_>, negative: bool) -> DecodeResult<DecodedSignificand> {
    let tetrade = cursor.next_bits(TETRADE_BITS)? as u8;
    if tetrade > MAX_TETRADE {
        tracing::debug!(tetrade, "rejecting leading significand digit");
        return Err(DecodeError::InvalidSignificand(tetrade));
    }

    let mut unscaled = BigInt::from(tetrade);
    // 10^fraction_digits, times ten: what `m` is subtracted from for negatives
    let mut ten_shifted = BigInt::from(10u32);
    let mut fraction_digits = 0usize;

    while cursor.remaining() >= DECLET_BITS {
        let declet = cursor.next_bits(DECLET_BITS)? as u16;
        if declet > MAX_DECLET {
            tracing::debug!(declet, position = Cursor::position(cursor), "rejecting significand group");
            return Err(DecodeError::InvalidDeclet(declet));
        }
        unscaled = unscaled * 1000u32 + u32::from(declet);
        ten_shifted = ten_shifted * 1000u32;
        fraction_digits += 3;
    }

    if negative {
        unscaled -= ten_shifted;
    }

    Ok(DecodedSignificand {
        unscaled,
        fraction_digits,
    })
}
