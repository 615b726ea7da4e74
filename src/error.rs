use thiserror::Error;

/// Errors raised by [`BitBuffer`](crate::BitBuffer) and [`Cursor`](crate::Cursor) operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BitsError {
    #[error("Invalid capacity: {0} bits is not a positive multiple of 8")]
    InvalidCapacity(usize),

    #[error("Bit count {count} is outside valid range [{min}, {max}]")]
    BitCountOutOfRange { count: usize, min: usize, max: usize },

    #[error("Invalid bit value {0}: only 0 or 1 are allowed")]
    InvalidBitValue(u8),

    #[error("Invalid range [{start}, {end}) for a sequence of {len} bits")]
    InvalidRange { start: usize, end: usize, len: usize },

    #[error("Destination too small: need {needed} bytes at offset {offset}, buffer holds {available}")]
    DestinationTooSmall {
        needed: usize,
        offset: usize,
        available: usize,
    },

    #[error("Position {position} is out of bounds of {len}")]
    OutOfBounds { position: usize, len: usize },

    #[error("Bit sequence exhausted: requested {requested} bits, {remaining} remaining")]
    Exhausted { requested: usize, remaining: usize },
}

impl BitsError {
    /// True when the caller passed an out-of-domain parameter, as opposed to
    /// reading past the end of the sequence.
    #[must_use]
    pub const fn is_argument_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidCapacity(_)
                | Self::BitCountOutOfRange { .. }
                | Self::InvalidBitValue(_)
                | Self::InvalidRange { .. }
                | Self::DestinationTooSmall { .. }
        )
    }
}

/// Errors that can occur during decoding of decimalInfinite bytes
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Cannot decode empty input, should contain at least 1 byte")]
    EndOfInput,

    #[error("Invalid encoding: invalid sign bits")]
    InvalidSignBits,

    #[error("Invalid encoding: unsupported exponent value of {0}")]
    UnsupportedExponent(u128),

    #[error("Invalid encoding: unsupported exponent value, gamma prefix of {0} bits")]
    ExponentFieldTooWide(usize),

    #[error("Invalid encoding: invalid significand of {0}")]
    InvalidSignificand(u8),

    #[error("Invalid encoding: invalid significand decimal group of {0}")]
    InvalidDeclet(u16),

    #[error(transparent)]
    Bits(#[from] BitsError),
}

impl DecodeError {
    /// True for well-formed-length input whose bit pattern is semantically invalid.
    #[must_use]
    pub const fn is_invalid_encoding(&self) -> bool {
        matches!(
            self,
            Self::InvalidSignBits
                | Self::UnsupportedExponent(_)
                | Self::ExponentFieldTooWide(_)
                | Self::InvalidSignificand(_)
                | Self::InvalidDeclet(_)
        )
    }
}

/// Errors that can occur when building a [`DecimalKey`](crate::DecimalKey) from text
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    #[error("Invalid decimal format: {0}")]
    InvalidFormat(String),
}

/// Result type for bit buffer operations
pub type BitsResult<T> = Result<T, BitsError>;

/// Result type for decoding operations
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Result type for encoding operations
pub type EncodeResult<T> = Result<T, EncodeError>;
