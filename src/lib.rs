//! # decimal-infinite
//!
//! An implementation of the **decimalInfinite** binary encoding format for arbitrary-precision
//! decimal numbers with order-preserving properties.
//!
//! This encoding scheme, described in the paper "decimalInfinite: All Decimals In Bits.
//! No Loss. Same Order. Simple." by Ghislain Fourny, provides:
//!
//! - **Arbitrary precision**: No loss of information for any [`BigDecimal`]
//! - **Order preservation**: Unsigned lexicographic comparison of encoded bytes matches
//!   numerical comparison
//! - **Variable length**: No fixed-width ceiling on the exponent or the significand
//!
//! ## Examples
//!
//! ```rust
//! use std::str::FromStr;
//! use decimal_infinite::{decode, encode, BigDecimal};
//!
//! let value = BigDecimal::from_str("-103.2").unwrap();
//! let bits = encode(&value);
//! assert_eq!(bits.to_bit_string(), "0000 1111 0001 1110 0100 0");
//!
//! let decoded = decode(&bits.to_bytes()).unwrap();
//! assert_eq!(decoded, value);
//!
//! // Order preservation: lexicographic byte comparison = numerical comparison
//! let a = encode(&BigDecimal::from_str("-1.5").unwrap()).to_bytes();
//! let b = encode(&BigDecimal::from_str("-1.25").unwrap()).to_bytes();
//! assert!(a < b);
//! ```
//!
//! [`DecimalKey`] wraps the canonical encoding as a ready-made sort key:
//!
//! ```rust
//! use decimal_infinite::DecimalKey;
//!
//! let a: DecimalKey = "1.5".parse().unwrap();
//! let b: DecimalKey = "2.5".parse().unwrap();
//! assert!(a < b);
//! assert_eq!(a, "1.500".parse::<DecimalKey>().unwrap());
//! ```
//!
//! ## Format Overview
//!
//! The encoding uses a STEM layout (Sign, exponent sign (T), Exponent, Mantissa/significand),
//! bit-packed MSB-first with the last byte zero-padded:
//!
//! - **S** (2 bits): Overall sign (00=negative, 10=positive); zero is exactly `10`
//! - **T** (1 bit): 1 when the value sign and the exponent sign agree
//! - **E** (variable): `|exponent| + 2` in a modified Elias gamma code, flipped when T is 0
//! - **M** (variable): Significand (`10 - m` for negatives) as a tetrade (4 bits) and
//!   declets (10 bits per 3 digits)
//!
//! Decoding restores the number, not its scale: the last declet always yields
//! three digits, so `0.140` decodes as `0.1400`. Use [`DecimalKey`] when one
//! canonical form per number matters.

pub(crate) mod bits;
pub(crate) mod decimal;
pub(crate) mod decoder;
pub(crate) mod encoder;
pub(crate) mod error;
pub(crate) mod gamma;
pub(crate) mod significand;

// Re-export main types and functions
pub use bigdecimal::BigDecimal;
pub use bits::{BitBuffer, Cursor};
pub use decimal::DecimalKey;
pub use decoder::{decode, MAX_SCALE_PADDING};
pub use encoder::{encode, encode_to_vec, ZERO_BYTE};
pub use error::{BitsError, BitsResult, DecodeError, DecodeResult, EncodeError, EncodeResult};
