use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use bigdecimal::BigDecimal;

use crate::decoder::decode;
use crate::encoder::{encode_to_vec, ZERO_BYTE};
use crate::error::{DecodeError, DecodeResult, EncodeError};

/// A decimal number stored in its canonical encoded form
///
/// This struct stores the decimal as encoded bytes, providing:
/// - Zero-copy access via `as_bytes()`
/// - Direct byte comparison for Ord (order-preserving)
/// - A ready-made sort key for databases and ordered maps
///
/// Values are normalized (trailing zeros stripped) before encoding, so two
/// numerically equal decimals always produce the same bytes: `1.5` and
/// `1.5000` are the same key. To get the number back, use
/// [`to_big_decimal()`](Self::to_big_decimal).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DecimalKey {
    bytes: Vec<u8>,
}

impl DecimalKey {
    /// Create from pre-encoded bytes without validation
    ///
    /// The bytes are used as-is; if they are not a canonical encoding,
    /// equality and ordering against other keys may disagree with the numbers.
    #[must_use]
    pub const fn from_bytes_unchecked(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Create from pre-encoded bytes with validation
    ///
    /// The bytes are decoded and re-encoded in canonical form, so the stored
    /// bytes may be shorter than `bytes` (trailing zero groups dropped).
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError`] if the bytes do not represent a valid encoding.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        let value = decode(bytes)?;
        Ok(Self::from(&value))
    }

    /// Get the encoded bytes (zero-copy)
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consume and return the encoded bytes
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Decode back to a [`BigDecimal`].
    ///
    /// # Errors
    ///
    /// Only fails for keys built with
    /// [`from_bytes_unchecked`](Self::from_bytes_unchecked) from invalid bytes.
    pub fn to_big_decimal(&self) -> DecodeResult<BigDecimal> {
        decode(&self.bytes)
    }

    /// Check if this is zero
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.bytes == [ZERO_BYTE]
    }

    /// Check if this is strictly below zero (overall sign bits `00`)
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.bytes.first().is_some_and(|b| b & 0x80 == 0)
    }
}

impl From<&BigDecimal> for DecimalKey {
    fn from(value: &BigDecimal) -> Self {
        Self {
            bytes: encode_to_vec(&value.normalized()),
        }
    }
}

impl From<BigDecimal> for DecimalKey {
    fn from(value: BigDecimal) -> Self {
        Self::from(&value)
    }
}

impl From<i64> for DecimalKey {
    fn from(value: i64) -> Self {
        Self::from(BigDecimal::from(value))
    }
}

impl From<u64> for DecimalKey {
    fn from(value: u64) -> Self {
        Self::from(BigDecimal::from(value))
    }
}

impl From<i128> for DecimalKey {
    fn from(value: i128) -> Self {
        Self::from(BigDecimal::from(value))
    }
}

impl From<u128> for DecimalKey {
    fn from(value: u128) -> Self {
        Self::from(BigDecimal::from(value))
    }
}

// Smaller signed types: widen to i64
impl From<i32> for DecimalKey {
    fn from(value: i32) -> Self {
        Self::from(i64::from(value))
    }
}

// Smaller unsigned types: widen to u64
impl From<u32> for DecimalKey {
    fn from(value: u32) -> Self {
        Self::from(u64::from(value))
    }
}

impl FromStr for DecimalKey {
    type Err = EncodeError;

    /// Parse any decimal literal accepted by [`BigDecimal`], including
    /// exponent notation such as `1.5E-7`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = BigDecimal::from_str(s.trim())
            .map_err(|e| EncodeError::InvalidFormat(format!("{s:?}: {e}")))?;
        Ok(Self::from(&value))
    }
}

impl fmt::Display for DecimalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_big_decimal() {
            Ok(value) => write!(f, "{}", value.normalized()),
            Err(_) => f.write_str("<invalid>"),
        }
    }
}

impl PartialOrd for DecimalKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DecimalKey {
    fn cmp(&self, other: &Self) -> Ordering {
        // Direct byte comparison for order preservation
        self.bytes.cmp(&other.bytes)
    }
}
