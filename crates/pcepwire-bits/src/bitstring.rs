use std::fmt;
use std::str::FromStr;

use bytes::Bytes;

use crate::error::{BitError, Result};

/// A sequence of bits of known width.
///
/// Bits are packed MSB-first (network bit order): bit 0 is the most
/// significant bit of the first byte. Unused low bits of the final storage
/// byte are always zero, so equality and hashing are structural.
///
/// `BitString` is a pure value — cheap to clone, no sharing, no interior
/// mutability. All operations validate widths before touching any state.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BitString {
    bits: Vec<u8>,
    width: usize,
}

impl BitString {
    /// An all-zero bit string of the given width.
    pub fn zeros(width: usize) -> Self {
        Self {
            bits: vec![0u8; width.div_ceil(8)],
            width,
        }
    }

    /// The zero-padded binary representation of `value` in exactly `width` bits.
    ///
    /// Fails with [`BitError::ValueOutOfRange`] if `value > 2^width - 1`.
    pub fn from_value(value: u64, width: usize) -> Result<Self> {
        if value > Self::max_value(width) {
            return Err(BitError::ValueOutOfRange { value, width });
        }
        let mut out = Self::zeros(width);
        for i in 0..width.min(64) {
            if (value >> i) & 1 == 1 {
                out.set_bit(width - 1 - i, true);
            }
        }
        Ok(out)
    }

    /// The largest value representable in `width` bits (saturating at `u64::MAX`).
    pub const fn max_value(width: usize) -> u64 {
        if width >= 64 {
            u64::MAX
        } else {
            (1u64 << width) - 1
        }
    }

    /// Interpret the bits as an unsigned big-endian integer.
    ///
    /// Fails with [`BitError::WidthTooWide`] if the string is wider than 64
    /// bits; truncating silently would corrupt the value.
    pub fn value(&self) -> Result<u64> {
        if self.width > 64 {
            return Err(BitError::WidthTooWide { width: self.width });
        }
        let mut value = 0u64;
        for i in 0..self.width {
            value = (value << 1) | self.get_bit(i) as u64;
        }
        Ok(value)
    }

    /// Width in bits.
    pub fn width(&self) -> usize {
        self.width
    }

    /// True if the string holds no bits.
    pub fn is_empty(&self) -> bool {
        self.width == 0
    }

    /// The bit at `index`, or `None` past the end.
    pub fn bit(&self, index: usize) -> Option<bool> {
        (index < self.width).then(|| self.get_bit(index))
    }

    /// Left-pad with zero bits out to `width`.
    ///
    /// Fails with [`BitError::InvalidFieldWidth`] if the string is already
    /// wider than `width`.
    pub fn pad_to(&self, width: usize) -> Result<Self> {
        if self.width > width {
            return Err(BitError::InvalidFieldWidth {
                got: self.width,
                want: width,
            });
        }
        Self::zeros(width).splice(width - self.width, self)
    }

    /// A copy with `[start_bit, start_bit + replacement.width())` replaced by
    /// `replacement` and every other bit unchanged.
    ///
    /// Fails with [`BitError::RangeOutOfBounds`] if the range does not fit.
    pub fn splice(&self, start_bit: usize, replacement: &BitString) -> Result<Self> {
        self.check_range(start_bit, replacement.width)?;
        let mut out = self.clone();
        for i in 0..replacement.width {
            out.set_bit(start_bit + i, replacement.get_bit(i));
        }
        Ok(out)
    }

    /// The sub-range `[start_bit, start_bit + width)` as a new bit string.
    pub fn slice(&self, start_bit: usize, width: usize) -> Result<Self> {
        self.check_range(start_bit, width)?;
        let mut out = Self::zeros(width);
        for i in 0..width {
            if self.get_bit(start_bit + i) {
                out.set_bit(i, true);
            }
        }
        Ok(out)
    }

    /// `self` followed by `other`.
    pub fn concat(&self, other: &BitString) -> BitString {
        let mut out = Self::zeros(self.width + other.width);
        for i in 0..self.width {
            if self.get_bit(i) {
                out.set_bit(i, true);
            }
        }
        for i in 0..other.width {
            if other.get_bit(i) {
                out.set_bit(self.width + i, true);
            }
        }
        out
    }

    /// The packed byte image, MSB-first.
    ///
    /// Fails with [`BitError::InvalidFieldWidth`] unless the width is a byte
    /// multiple — partial trailing bytes have no meaning on the wire.
    pub fn to_bytes(&self) -> Result<Bytes> {
        if self.width % 8 != 0 {
            return Err(BitError::InvalidFieldWidth {
                got: self.width,
                want: self.width.div_ceil(8) * 8,
            });
        }
        Ok(Bytes::copy_from_slice(&self.bits))
    }

    /// Rebuild from a packed MSB-first byte image of exactly
    /// `width.div_ceil(8)` bytes. Unused low bits of the final byte are
    /// discarded.
    pub fn from_bytes(data: &[u8], width: usize) -> Result<Self> {
        let need = width.div_ceil(8);
        if data.len() != need {
            return Err(BitError::InvalidFieldWidth {
                got: data.len() * 8,
                want: width,
            });
        }
        let mut out = Self {
            bits: data.to_vec(),
            width,
        };
        out.mask_tail();
        Ok(out)
    }

    fn check_range(&self, start_bit: usize, width: usize) -> Result<()> {
        let end = start_bit.checked_add(width);
        match end {
            Some(end) if end <= self.width => Ok(()),
            _ => Err(BitError::RangeOutOfBounds {
                start: start_bit,
                width,
                len: self.width,
            }),
        }
    }

    fn get_bit(&self, index: usize) -> bool {
        (self.bits[index / 8] >> (7 - index % 8)) & 1 == 1
    }

    fn set_bit(&mut self, index: usize, value: bool) {
        let mask = 1u8 << (7 - index % 8);
        if value {
            self.bits[index / 8] |= mask;
        } else {
            self.bits[index / 8] &= !mask;
        }
    }

    /// Zero the unused low bits of the final byte (canonical form).
    fn mask_tail(&mut self) {
        let rem = self.width % 8;
        if rem != 0 {
            if let Some(last) = self.bits.last_mut() {
                *last &= 0xFFu8 << (8 - rem);
            }
        }
    }
}

impl From<u8> for BitString {
    fn from(value: u8) -> Self {
        Self {
            bits: value.to_be_bytes().to_vec(),
            width: 8,
        }
    }
}

impl From<u16> for BitString {
    fn from(value: u16) -> Self {
        Self {
            bits: value.to_be_bytes().to_vec(),
            width: 16,
        }
    }
}

impl From<u32> for BitString {
    fn from(value: u32) -> Self {
        Self {
            bits: value.to_be_bytes().to_vec(),
            width: 32,
        }
    }
}

impl From<u64> for BitString {
    fn from(value: u64) -> Self {
        Self {
            bits: value.to_be_bytes().to_vec(),
            width: 64,
        }
    }
}

impl FromStr for BitString {
    type Err = BitError;

    /// Parse a textual `'0'`/`'1'` string, one character per bit.
    fn from_str(s: &str) -> Result<Self> {
        let mut out = Self::zeros(s.len());
        for (position, found) in s.chars().enumerate() {
            match found {
                '0' => {}
                '1' => out.set_bit(position, true),
                _ => return Err(BitError::MalformedBinaryString { position, found }),
            }
        }
        Ok(out)
    }
}

impl fmt::Display for BitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.width {
            f.write_str(if self.get_bit(i) { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl fmt::Debug for BitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BitString({}/{})", self, self.width)
    }
}
