//! Growable, MSB-first bit sequence and its sequential read cursor.
//!
//! Bit 0 is the most significant bit of byte 0, bit 8 the most significant bit
//! of byte 1, and so on. Bits past [`BitBuffer::len`] inside the last used byte
//! are always zero, so the materialized bytes are padded with zeros.

use std::fmt;
use std::io;

use crate::error::{BitsError, BitsResult};

/// Mask selecting the bits from `offset` (0 = MSB) to the end of a byte.
#[inline]
const fn from_offset_mask(offset: usize) -> u8 {
    0xFF >> offset
}

/// Mask selecting the bits before `end_offset`. A range ending on a byte
/// boundary has `end_offset == 0` and selects the whole byte.
#[inline]
const fn until_offset_mask(end_offset: usize) -> u8 {
    if end_offset == 0 {
        0xFF
    } else {
        !(0xFF >> end_offset)
    }
}

/// An owned, growable sequence of bits.
///
/// Appends are the only way to lengthen the sequence; [`flip`](Self::flip) is
/// the only way to change bits already written. Every byte extraction
/// ([`to_bytes`](Self::to_bytes), [`write_into`](Self::write_into),
/// [`write_to`](Self::write_to)) copies, so nothing outside the buffer can
/// alias its storage.
#[derive(Clone)]
pub struct BitBuffer {
    // Always `capacity / 8` bytes long, zero past `len` bits.
    bytes: Vec<u8>,
    len: usize,
}

impl BitBuffer {
    /// Capacity, in bits, of a buffer created with [`new`](Self::new).
    pub const DEFAULT_CAPACITY: usize = 32;

    /// Create an empty buffer with [`DEFAULT_CAPACITY`](Self::DEFAULT_CAPACITY)
    #[must_use]
    pub fn new() -> Self {
        Self {
            bytes: vec![0; Self::DEFAULT_CAPACITY / 8],
            len: 0,
        }
    }

    /// Create an empty buffer able to hold `capacity_bits` bits before growing.
    ///
    /// # Errors
    ///
    /// Returns [`BitsError::InvalidCapacity`] unless `capacity_bits` is a
    /// positive multiple of 8.
    pub fn with_capacity(capacity_bits: usize) -> BitsResult<Self> {
        if capacity_bits == 0 || capacity_bits % 8 != 0 {
            return Err(BitsError::InvalidCapacity(capacity_bits));
        }
        Ok(Self {
            bytes: vec![0; capacity_bits / 8],
            len: 0,
        })
    }

    /// Empty buffer sized for an estimated number of bytes; never fails.
    pub(crate) fn with_byte_capacity(bytes: usize) -> Self {
        Self {
            bytes: vec![0; bytes.max(1)],
            len: 0,
        }
    }

    /// Create a full buffer holding a copy of `bytes`; its length is
    /// `bytes.len() * 8`.
    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self::from(bytes.to_vec())
    }

    /// Number of bits written
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of bits that fit before the next reallocation
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.bytes.len() * 8
    }

    /// Number of bytes needed to hold [`len`](Self::len) bits
    #[must_use]
    pub const fn byte_len(&self) -> usize {
        self.len.div_ceil(8)
    }

    /// Grow the backing storage so `additional` more bits fit.
    ///
    /// Growth is geometric: the new capacity is at least twice the old one and
    /// at least twice the required length (rounded down to whole bytes).
    fn reserve_bits(&mut self, additional: usize) {
        let required = self.len + additional;
        if required <= self.capacity() {
            return;
        }
        let new_bytes = (required * 2 / 8)
            .max(self.bytes.len() * 2)
            .max(required.div_ceil(8));
        self.bytes.resize(new_bytes, 0);
    }

    /// Append a single bit
    pub fn push(&mut self, bit: bool) {
        self.reserve_bits(1);
        if bit {
            self.bytes[self.len / 8] |= 0x80 >> (self.len % 8);
        }
        self.len += 1;
    }

    /// Append `count` bits, all set to `bit`.
    ///
    /// # Errors
    ///
    /// Returns [`BitsError::BitCountOutOfRange`] if `count` is zero.
    pub fn push_repeated(&mut self, count: usize, bit: bool) -> BitsResult<()> {
        if count == 0 {
            return Err(BitsError::BitCountOutOfRange {
                count,
                min: 1,
                max: usize::MAX,
            });
        }
        self.append_repeated(count, bit);
        Ok(())
    }

    /// [`push_repeated`](Self::push_repeated) without the argument check;
    /// appending zero bits is a no-op.
    pub(crate) fn append_repeated(&mut self, count: usize, bit: bool) {
        if count == 0 {
            return;
        }
        self.reserve_bits(count);
        if bit {
            self.apply_to_bytes(self.len, self.len + count, |byte, mask| byte | mask);
        }
        self.len += count;
    }

    /// Append the low `count` bits of `value`, most significant first.
    ///
    /// Packs a byte-sized chunk at a time using shift+mask rather than looping
    /// one bit at a time; the codec's hot paths are tetrades (4 bits) and
    /// declets (10 bits).
    ///
    /// # Errors
    ///
    /// Returns [`BitsError::BitCountOutOfRange`] unless `1 <= count <= 63`.
    pub fn push_bits(&mut self, count: usize, value: u64) -> BitsResult<()> {
        if !(1..=63).contains(&count) {
            return Err(BitsError::BitCountOutOfRange {
                count,
                min: 1,
                max: 63,
            });
        }
        self.append_bits(count, value);
        Ok(())
    }

    /// [`push_bits`](Self::push_bits) without the argument check; the caller
    /// guarantees `1 <= count <= 63`.
    #[allow(clippy::cast_possible_truncation)]
    pub(crate) fn append_bits(&mut self, count: usize, value: u64) {
        debug_assert!((1..=63).contains(&count));
        self.reserve_bits(count);

        let mut remaining = count;
        // Shift so the first bit to append sits at bit 63
        let mut val = value << (64 - count);

        while remaining > 0 {
            let space = 8 - self.len % 8;
            let take = remaining.min(space);

            let chunk = (val >> (64 - take)) as u8;
            self.bytes[self.len / 8] |= chunk << (space - take);

            val <<= take;
            remaining -= take;
            self.len += take;
        }
    }

    /// Append every bit in `bits`
    pub fn push_slice(&mut self, bits: &[bool]) {
        self.reserve_bits(bits.len());
        for &bit in bits {
            self.push(bit);
        }
    }

    /// Append bits given as `0`/`1` values.
    ///
    /// # Errors
    ///
    /// Returns [`BitsError::InvalidBitValue`] for any value other than 0 or 1;
    /// nothing is appended in that case.
    pub fn push_digits(&mut self, digits: &[u8]) -> BitsResult<()> {
        if let Some(&bad) = digits.iter().find(|&&d| d > 1) {
            return Err(BitsError::InvalidBitValue(bad));
        }
        self.reserve_bits(digits.len());
        for &d in digits {
            self.push(d == 1);
        }
        Ok(())
    }

    /// Flip every bit in `[start, end)`.
    ///
    /// # Errors
    ///
    /// Returns [`BitsError::InvalidRange`] if `end <= start` or `end > len`.
    pub fn flip(&mut self, start: usize, end: usize) -> BitsResult<()> {
        if end <= start || end > self.len {
            return Err(BitsError::InvalidRange {
                start,
                end,
                len: self.len,
            });
        }
        self.flip_unchecked(start, end);
        Ok(())
    }

    /// [`flip`](Self::flip) without the range check; the caller guarantees
    /// `start < end <= len`.
    pub(crate) fn flip_unchecked(&mut self, start: usize, end: usize) {
        debug_assert!(start < end && end <= self.len);
        self.apply_to_bytes(start, end, |byte, mask| byte ^ mask);
    }

    /// Apply `op` to each byte touching the bit range `[start, end)`, passing a
    /// mask with a 1 for every bit of that byte inside the range.
    fn apply_to_bytes(&mut self, start: usize, end: usize, op: impl Fn(u8, u8) -> u8) {
        let first = start / 8;
        // end is exclusive, `last` is the index of the last byte touched
        let last = (end - 1) / 8;
        for idx in first..=last {
            let mut mask = 0xFF;
            if idx == first {
                mask &= from_offset_mask(start % 8);
            }
            if idx == last {
                // same byte as `first` when the range is short
                mask &= until_offset_mask(end % 8);
            }
            self.bytes[idx] = op(self.bytes[idx], mask);
        }
    }

    #[inline]
    fn bit(&self, position: usize) -> bool {
        self.bytes[position / 8] & (0x80 >> (position % 8)) != 0
    }

    /// Read the bit at `position`.
    ///
    /// # Errors
    ///
    /// Returns [`BitsError::OutOfBounds`] if `position >= len`.
    pub fn get(&self, position: usize) -> BitsResult<bool> {
        if position >= self.len {
            return Err(BitsError::OutOfBounds {
                position,
                len: self.len,
            });
        }
        Ok(self.bit(position))
    }

    /// Create a cursor positioned at bit 0
    #[must_use]
    pub const fn cursor(&self) -> Cursor<'_> {
        Cursor {
            buffer: self,
            position: 0,
        }
    }

    /// Create a cursor positioned at `position`.
    ///
    /// # Errors
    ///
    /// Returns [`BitsError::OutOfBounds`] if `position > len`.
    pub fn cursor_at(&self, position: usize) -> BitsResult<Cursor<'_>> {
        if position > self.len {
            return Err(BitsError::OutOfBounds {
                position,
                len: self.len,
            });
        }
        Ok(Cursor {
            buffer: self,
            position,
        })
    }

    /// Copy the bits out as bytes; the last byte is zero-padded.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        self.bytes[..self.byte_len()].to_vec()
    }

    /// Copy the bits into `dest` starting at byte `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`BitsError::DestinationTooSmall`] if the bytes do not fit;
    /// `dest` is left untouched in that case.
    pub fn write_into(&self, dest: &mut [u8], offset: usize) -> BitsResult<()> {
        let needed = self.byte_len();
        match offset.checked_add(needed) {
            Some(end) if end <= dest.len() => {
                dest[offset..end].copy_from_slice(&self.bytes[..needed]);
                Ok(())
            }
            _ => Err(BitsError::DestinationTooSmall {
                needed,
                offset,
                available: dest.len(),
            }),
        }
    }

    /// Write the bytes to `sink`.
    ///
    /// # Errors
    ///
    /// Propagates any error returned by `sink`.
    pub fn write_to<W: io::Write>(&self, sink: &mut W) -> io::Result<()> {
        sink.write_all(&self.bytes[..self.byte_len()])
    }

    /// Render as `0`/`1` characters in groups of 4, e.g. `1001 1000 01`.
    #[must_use]
    pub fn to_bit_string(&self) -> String {
        let mut out = String::with_capacity(self.len + self.len / 4);
        for (position, bit) in self.cursor().enumerate() {
            if position > 0 && position % 4 == 0 {
                out.push(' ');
            }
            out.push(if bit { '1' } else { '0' });
        }
        out
    }
}

impl Default for BitBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Vec<u8>> for BitBuffer {
    fn from(bytes: Vec<u8>) -> Self {
        let len = bytes.len() * 8;
        Self { bytes, len }
    }
}

impl Extend<bool> for BitBuffer {
    fn extend<I: IntoIterator<Item = bool>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.reserve_bits(iter.size_hint().0);
        for bit in iter {
            self.push(bit);
        }
    }
}

// Capacity is not part of the value.
impl PartialEq for BitBuffer {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.bytes[..self.byte_len()] == other.bytes[..other.byte_len()]
    }
}

impl Eq for BitBuffer {}

impl fmt::Display for BitBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_bit_string())
    }
}

impl fmt::Debug for BitBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BitBuffer")
            .field("len", &self.len)
            .field("capacity", &self.capacity())
            .field("bits", &self.to_bit_string())
            .finish()
    }
}

/// Sequential read view over a [`BitBuffer`].
///
/// The cursor borrows its buffer, so the buffer cannot be mutated while a
/// cursor is alive; to read after a mutation, create a new cursor with
/// [`BitBuffer::cursor_at`]. Any number of cursors may read the same buffer,
/// each with its own position.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    buffer: &'a BitBuffer,
    position: usize,
}

impl Cursor<'_> {
    /// Check if there are more bits to read
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.position < self.buffer.len
    }

    /// Get current bit position
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Get remaining bits count
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.buffer.len - self.position
    }

    /// Read a single bit
    ///
    /// # Errors
    ///
    /// Returns [`BitsError::Exhausted`] if no bits remain.
    pub fn next_bit(&mut self) -> BitsResult<bool> {
        if !self.has_next() {
            return Err(BitsError::Exhausted {
                requested: 1,
                remaining: 0,
            });
        }
        let bit = self.buffer.bit(self.position);
        self.position += 1;
        Ok(bit)
    }

    /// Read the next `count` bits as an unsigned integer; the last bit read is
    /// the least significant bit of the result.
    ///
    /// Extracts bits in byte-aligned chunks using shift+mask.
    ///
    /// # Errors
    ///
    /// Returns [`BitsError::BitCountOutOfRange`] unless `1 <= count <= 64`, or
    /// [`BitsError::Exhausted`] if fewer than `count` bits remain. The cursor
    /// does not move on error.
    pub fn next_bits(&mut self, count: usize) -> BitsResult<u64> {
        if !(1..=64).contains(&count) {
            return Err(BitsError::BitCountOutOfRange {
                count,
                min: 1,
                max: 64,
            });
        }
        if self.remaining() < count {
            return Err(BitsError::Exhausted {
                requested: count,
                remaining: self.remaining(),
            });
        }

        let bytes = &self.buffer.bytes;
        let mut value = 0u64;
        let mut remaining = count;

        while remaining > 0 {
            let available = 8 - self.position % 8; // bits left in this byte
            let take = remaining.min(available);

            let shift = available - take;
            let mask = from_offset_mask(8 - take);
            let bits = (bytes[self.position / 8] >> shift) & mask;

            value = (value << take) | u64::from(bits);
            self.position += take;
            remaining -= take;
        }

        Ok(value)
    }
}

impl Iterator for Cursor<'_> {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        self.next_bit().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining(), Some(self.remaining()))
    }
}

impl ExactSizeIterator for Cursor<'_> {}
