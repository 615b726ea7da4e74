//! Encoding logic for decimalInfinite format
//!
//! Based on the paper "decimalInfinite: All Decimals In Bits" by Ghislain Fourny.

use bigdecimal::BigDecimal;
use num_bigint::Sign;

use crate::bits::BitBuffer;
use crate::gamma::{encode_exponent, field_len};
use crate::significand::encode_significand;

/// Encoded zero: the sign code `10`, zero padded to one byte.
pub const ZERO_BYTE: u8 = 0b1000_0000;

/// A non-zero value in `d.fff... × 10^exponent` form with `1 <= d.fff < 10`.
#[derive(Debug, PartialEq, Eq)]
struct Normalized {
    positive: bool,
    exponent: i128,
    /// `d, f, f, ...`; the first digit is never zero
    digits: Vec<u8>,
}

/// Shift the decimal point of `value` until one non-zero digit precedes it.
///
/// Works on the unscaled digits directly: `value = digits × 10^-scale`, so
/// the exponent of the leading digit is `len(digits) - 1 - scale`. Trailing
/// zeros of the unscaled value stay in the significand. Returns `None` for
/// zero.
#[allow(clippy::cast_possible_wrap)]
fn normalize(value: &BigDecimal) -> Option<Normalized> {
    let (unscaled, scale) = value.as_bigint_and_exponent();
    let positive = match unscaled.sign() {
        Sign::NoSign => return None,
        Sign::Plus => true,
        Sign::Minus => false,
    };
    let digits = unscaled.magnitude().to_radix_be(10);
    let exponent = digits.len() as i128 - 1 - i128::from(scale);
    Some(Normalized {
        positive,
        exponent,
        digits,
    })
}

/// Encode `value` into a new [`BitBuffer`].
///
/// Zero encodes to the 2-bit sequence `10`. Any other value is laid out as
/// `S` (2 bits: `10` positive, `00` negative), the gamma-coded exponent whose
/// first bit is the exponent sign `T`, then the significand (or `10 - m` for
/// negative values). Never fails.
#[must_use]
pub fn encode(value: &BigDecimal) -> BitBuffer {
    let Some(Normalized {
        positive,
        exponent,
        mut digits,
    }) = normalize(value)
    else {
        let mut bits = BitBuffer::with_byte_capacity(1);
        bits.push(true);
        bits.push(false);
        return bits;
    };

    let exponent_positive = exponent >= 0;
    let magnitude = exponent.unsigned_abs();
    tracing::trace!(
        positive,
        %exponent,
        significand_digits = digits.len(),
        "encoding decimal"
    );

    // Estimate capacity: sign(2) + gamma(2N-1) + tetrade(4) + declets(10 per 3 digits)
    let total_bits = 2 + field_len(magnitude) + 4 + (digits.len() - 1).div_ceil(3) * 10;
    let mut bits = BitBuffer::with_byte_capacity(total_bits.div_ceil(8));

    // S: 1 for positive, 0 for negative; the second bit is always 0
    bits.push(positive);
    bits.push(false);

    // TE: T is 1 when the value sign and the exponent sign agree; the gamma
    // field is flipped otherwise
    let t = positive == exponent_positive;
    encode_exponent(&mut bits, magnitude, t);

    // M: for negative decimals, encode (10 - m) instead of m
    encode_significand(&mut bits, &mut digits, !positive);

    bits
}

/// Encode `value` straight to bytes, last byte zero padded.
#[must_use]
pub fn encode_to_vec(value: &BigDecimal) -> Vec<u8> {
    encode(value).to_bytes()
}
