//! Decoding logic for decimalInfinite format
//!
//! Based on the paper "decimalInfinite: All Decimals In Bits" by Ghislain Fourny

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use num_traits::Zero;

use crate::bits::BitBuffer;
use crate::encoder::ZERO_BYTE;
use crate::error::{DecodeError, DecodeResult};
use crate::gamma::decode_exponent;
use crate::significand::{decode_significand, DecodedSignificand};

/// Position of the exponent field: right after the two sign bits.
const EXPONENT_START: usize = 2;

/// Most zero digits [`decode`] appends to the unscaled value to bring a scale
/// below `i64::MIN` back into range.
///
/// `BigDecimal::new(10, i64::MIN)` encodes with no fraction digits, so its
/// decoded scale lands one below the limit and takes one zero back. Past this
/// bound the exponent is rejected.
pub const MAX_SCALE_PADDING: u32 = 4096;

/// Bring `unscaled × 10^-scale` to an `i64` scale without changing its value.
///
/// A scale above `i64::MAX` drops trailing zero digits, at most
/// `fraction_digits` of them. A scale below `i64::MIN` appends at most
/// [`MAX_SCALE_PADDING`] zeros. Returns `None` when neither fits.
fn fit_scale(unscaled: BigInt, scale: i128, fraction_digits: usize) -> Option<(BigInt, i64)> {
    if let Ok(scale) = i64::try_from(scale) {
        return Some((unscaled, scale));
    }

    if scale > 0 {
        let excess = scale - i128::from(i64::MAX);
        if excess > fraction_digits as i128 {
            return None;
        }
        let mut unscaled = unscaled;
        for _ in 0..excess {
            if !(&unscaled % 10u32).is_zero() {
                return None;
            }
            unscaled /= 10u32;
        }
        Some((unscaled, i64::MAX))
    } else {
        let deficit = u32::try_from(i128::from(i64::MIN) - scale).ok()?;
        if deficit > MAX_SCALE_PADDING {
            return None;
        }
        Some((unscaled * BigInt::from(10u32).pow(deficit), i64::MIN))
    }
}

/// Decode bytes produced by [`encode`](crate::encode) back to a decimal.
///
/// Decoding is a single pass: sign bits, gamma-coded exponent, tetrade, then
/// declets for as long as 10 bits remain. Trailing zero padding is ignored.
///
/// The scale is not preserved. The result carries every digit of the last
/// declet, so its scale is a multiple of 3 minus the exponent: `0.140` comes
/// back as `0.1400`. It always compares equal to the encoded value. Near the
/// `i64` limits the scale is moved back into range by dropping or adding
/// trailing zeros.
///
/// # Errors
///
/// Returns [`DecodeError::EndOfInput`] for empty input, an invalid-encoding
/// variant (see [`DecodeError::is_invalid_encoding`]) for a malformed bit
/// pattern, or [`DecodeError::Bits`] for input truncated mid-field.
pub fn decode(bytes: &[u8]) -> DecodeResult<BigDecimal> {
    if bytes.is_empty() {
        return Err(DecodeError::EndOfInput);
    }
    if bytes == [ZERO_BYTE] {
        return Ok(BigDecimal::zero());
    }

    let mut bits = BitBuffer::from_bytes(bytes);

    // S and T: bit 0 is the overall sign, bit 1 must be 0, bit 2 is T
    let (positive, t) = {
        let mut cursor = bits.cursor();
        let positive = cursor.next_bit()?;
        if cursor.next_bit()? {
            tracing::debug!(first_byte = bytes[0], "rejecting sign bits");
            return Err(DecodeError::InvalidSignBits);
        }
        (positive, cursor.next_bit()?)
    };
    let exponent_positive = if positive { t } else { !t };

    // E: flips the field back in `bits` when T is 0
    let (magnitude, end) = decode_exponent(&mut bits, EXPONENT_START, t)?;

    // M
    let mut cursor = bits.cursor_at(end)?;
    let DecodedSignificand {
        unscaled,
        fraction_digits,
    } = decode_significand(&mut cursor, !positive)?;

    let exponent = if exponent_positive {
        i128::from(magnitude)
    } else {
        -i128::from(magnitude)
    };
    #[allow(clippy::cast_possible_wrap)]
    let scale = fraction_digits as i128 - exponent;
    let (unscaled, scale) = fit_scale(unscaled, scale, fraction_digits).ok_or_else(|| {
        tracing::debug!(%exponent, fraction_digits, "rejecting exponent, no i64 scale fits");
        DecodeError::UnsupportedExponent(u128::from(magnitude))
    })?;

    Ok(BigDecimal::new(unscaled, scale))
}
