//! Modified Elias gamma code for the exponent field.
//!
//! The exponent magnitude is offset by +2 so the coded value always has at
//! least two binary digits. For an offset value of `N` binary digits the field
//! is `N-1` ones, a terminating zero, then the low `N-1` digits of the value:
//! `2N-1` bits in total, self-delimiting. When the exponent sign bit `T` is 0
//! the whole field is flipped, which is what keeps negative exponents (and the
//! negative-number branch) in lexicographic order.

use crate::bits::BitBuffer;
use crate::error::{BitsError, DecodeError, DecodeResult};

/// Added to the exponent magnitude before gamma coding.
const EXPONENT_OFFSET: u128 = 2;

/// Largest chunk [`BitBuffer::push_bits`] accepts.
const MAX_CHUNK: usize = 63;

/// Number of binary digits of `n`.
#[inline]
#[must_use]
pub const fn bit_length(n: u128) -> usize {
    if n == 0 {
        1
    } else {
        (128 - n.leading_zeros()) as usize
    }
}

/// Length in bits of the gamma field for an exponent magnitude.
#[must_use]
pub const fn field_len(magnitude: u128) -> usize {
    2 * bit_length(magnitude + EXPONENT_OFFSET) - 1
}

/// Append the gamma field for `magnitude`, flipped when `t` is false.
///
/// Returns the number of bits appended.
#[allow(clippy::cast_possible_truncation)]
pub fn encode_exponent(bits: &mut BitBuffer, magnitude: u128, t: bool) -> usize {
    let start = bits.len();
    let offset_exp = magnitude + EXPONENT_OFFSET;
    let n = bit_length(offset_exp);

    // offset_exp >= 2, so there is always at least one prefix bit and one
    // value bit
    bits.append_repeated(n - 1, true);
    bits.push(false);

    // Remaining N-1 digits, leading 1 dropped, high chunk first
    let mut remaining = n - 1;
    while remaining > 0 {
        let take = remaining.min(MAX_CHUNK);
        let chunk = (offset_exp >> (remaining - take)) as u64 & (u64::MAX >> (64 - take));
        bits.append_bits(take, chunk);
        remaining -= take;
    }

    let end = bits.len();
    if !t {
        bits.flip_unchecked(start, end);
    }
    end - start
}

/// Decode the gamma field starting at bit `start`, given the exponent sign bit
/// `t` (which is also the field's first bit).
///
/// When `t` is false the field is flipped back in place before its value is
/// read. Returns the exponent magnitude and the position just past the field.
///
/// # Errors
///
/// [`DecodeError::ExponentFieldTooWide`] when the length prefix is 64 bits or
/// more (the magnitude would not fit a `u64`), [`DecodeError::Bits`] when the
/// input ends inside the field.
pub fn decode_exponent(bits: &mut BitBuffer, start: usize, t: bool) -> DecodeResult<(u64, usize)> {
    // Prefix: bits equal to `t`, ended by the first differing bit
    let prefix = {
        let mut cursor = bits.cursor_at(start)?;
        let mut n = 0usize;
        while cursor.next_bit()? == t {
            n += 1;
        }
        n
    };

    if prefix >= 64 {
        tracing::debug!(prefix, "rejecting gamma field wider than 64 bits");
        return Err(DecodeError::ExponentFieldTooWide(prefix));
    }

    let value_start = start + prefix + 1;
    let end = value_start + prefix;
    if end > bits.len() {
        return Err(BitsError::Exhausted {
            requested: prefix,
            remaining: bits.len() - value_start,
        }
        .into());
    }

    if !t {
        bits.flip_unchecked(start, end);
    }

    let mut cursor = bits.cursor_at(value_start)?;
    let low = cursor.next_bits(prefix)?;
    let offset_exp = (1u128 << prefix) | u128::from(low);
    let magnitude = offset_exp - EXPONENT_OFFSET;

    let exp = u64::try_from(magnitude).map_err(|_| {
        tracing::debug!(%magnitude, "rejecting exponent beyond supported range");
        DecodeError::UnsupportedExponent(magnitude)
    })?;
    Ok((exp, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoded(magnitude: u128, t: bool) -> BitBuffer {
        let mut bits = BitBuffer::new();
        encode_exponent(&mut bits, magnitude, t);
        bits
    }

    #[test]
    fn test_encode_small_exponents() {
        let cases = [
            (0, "100"),
            (1, "101"),
            (2, "1100 0"),
            (5, "1101 1"),
            (6, "1110 000"),
            (9, "1110 011"),
        ];
        for (magnitude, expected) in cases {
            assert_eq!(encoded(magnitude, true).to_bit_string(), expected, "exp {magnitude}");
        }
    }

    #[test]
    fn test_encode_flipped() {
        assert_eq!(encoded(1, false).to_bit_string(), "010");
        assert_eq!(encoded(2, false).to_bit_string(), "0011 1");
    }

    #[test]
    fn test_field_length_is_2n_minus_1() {
        for magnitude in [0u128, 1, 2, 5, 6, 13, 14, 1000, 1 << 40, u64::MAX as u128] {
            let n = bit_length(magnitude + 2);
            for t in [true, false] {
                let bits = encoded(magnitude, t);
                assert_eq!(bits.len(), 2 * n - 1, "exp {magnitude}");
                assert_eq!(field_len(magnitude), 2 * n - 1);
            }
        }
    }

    #[test]
    fn test_encode_appends_after_existing_bits() {
        let mut bits = BitBuffer::new();
        bits.push_digits(&[1, 0]).unwrap();
        let written = encode_exponent(&mut bits, 2, false);
        assert_eq!(written, 5);
        // only the field is flipped, not the preceding bits
        assert_eq!(bits.to_bit_string(), "1000 111");
    }

    #[test]
    fn test_decode_roundtrip() {
        for magnitude in [0u128, 1, 2, 3, 7, 100, 65_535, 1 << 40, u128::from(u64::MAX - 2)] {
            for t in [true, false] {
                let mut bits = BitBuffer::new();
                bits.push_digits(&[1, 0]).unwrap();
                encode_exponent(&mut bits, magnitude, t);
                bits.push_bits(4, 0b1010).unwrap();

                let (exp, end) = decode_exponent(&mut bits, 2, t).unwrap();
                assert_eq!(u128::from(exp), magnitude);
                assert_eq!(end, 2 + field_len(magnitude));
                assert_eq!(bits.cursor_at(end).unwrap().next_bits(4).unwrap(), 0b1010);
            }
        }
    }

    #[test]
    fn test_decode_flips_field_back() {
        let mut bits = encoded(2, false);
        assert_eq!(bits.to_bit_string(), "0011 1");
        decode_exponent(&mut bits, 0, false).unwrap();
        assert_eq!(bits.to_bit_string(), "1100 0");
    }

    #[test]
    fn test_bit_length() {
        assert_eq!(bit_length(0), 1);
        assert_eq!(bit_length(1), 1);
        assert_eq!(bit_length(2), 2);
        assert_eq!(bit_length(255), 8);
        assert_eq!(bit_length(256), 9);
        assert_eq!(bit_length(u128::from(u64::MAX)), 64);
    }

    #[test]
    fn test_decode_widest_field() {
        // 63-bit prefix: the largest magnitude a u64 holds, 2^64 - 3
        let mut bits = BitBuffer::new();
        bits.push_repeated(63, true).unwrap();
        bits.push(false);
        bits.push_repeated(63, true).unwrap();
        let (exp, end) = decode_exponent(&mut bits, 0, true).unwrap();
        assert_eq!(exp, u64::MAX - 2);
        assert_eq!(end, 127);
    }

    #[test]
    fn test_decode_rejects_oversized_exponent() {
        let mut bits = BitBuffer::new();
        bits.push_repeated(70, true).unwrap();
        bits.push(false);
        let err = decode_exponent(&mut bits, 0, true).unwrap_err();
        assert_eq!(err, DecodeError::ExponentFieldTooWide(70));
    }

    #[test]
    fn test_decode_truncated_field() {
        let mut bits = BitBuffer::new();
        bits.push_digits(&[1, 1, 1, 0, 1]).unwrap();
        let err = decode_exponent(&mut bits, 0, true).unwrap_err();
        assert!(matches!(err, DecodeError::Bits(BitsError::Exhausted { .. })));

        let mut bits = BitBuffer::new();
        bits.push_repeated(5, true).unwrap();
        let err = decode_exponent(&mut bits, 0, true).unwrap_err();
        assert!(matches!(err, DecodeError::Bits(BitsError::Exhausted { .. })));
    }
}
