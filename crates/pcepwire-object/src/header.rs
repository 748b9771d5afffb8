//! The RFC 5440 common object header.

use std::fmt;

use pcepwire_bits::{BitError, BitString};

use crate::error::Result;

/// Header width in bits: class (8) + type (4) + reserved (2) + P (1) + I (1)
/// + length (16).
pub const HEADER_BIT_WIDTH: usize = 32;

/// Header length in bytes.
pub const HEADER_BYTE_LENGTH: usize = 4;

/// The fixed-layout prefix shared by all object types.
///
/// Owned exclusively by one object frame. The length field counts header plus
/// body in bytes and is kept in sync by the owning frame's setters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectHeader {
    class: u8,
    object_type: u8,
    reserved: u8,
    processing: bool,
    ignore: bool,
    length: u16,
}

impl ObjectHeader {
    /// Create a header for the given class and type codes.
    ///
    /// Flags start unset and the length starts at the header's own size.
    /// Fails with `ValueOutOfRange` if the type code exceeds its 4-bit field.
    pub fn new(class: u8, object_type: u8) -> Result<Self> {
        if object_type > 0x0F {
            return Err(BitError::ValueOutOfRange {
                value: object_type as u64,
                width: 4,
            }
            .into());
        }
        Ok(Self {
            class,
            object_type,
            reserved: 0,
            processing: false,
            ignore: false,
            length: HEADER_BYTE_LENGTH as u16,
        })
    }

    /// Object-class code.
    pub fn class(&self) -> u8 {
        self.class
    }

    /// Object-type code (4 bits).
    pub fn object_type(&self) -> u8 {
        self.object_type
    }

    /// The P (processing-rule) flag.
    pub fn processing(&self) -> bool {
        self.processing
    }

    /// Set or clear the P flag.
    pub fn set_processing(&mut self, on: bool) {
        self.processing = on;
    }

    /// The I (ignore) flag.
    pub fn ignore(&self) -> bool {
        self.ignore
    }

    /// Set or clear the I flag.
    pub fn set_ignore(&mut self, on: bool) {
        self.ignore = on;
    }

    /// Declared object length in bytes (header + body).
    pub fn length_bytes(&self) -> u16 {
        self.length
    }

    /// Update the declared length.
    ///
    /// Fails with `ValueOutOfRange` if `n` exceeds the 16-bit length field.
    pub fn set_length_bytes(&mut self, n: usize) -> Result<()> {
        self.length = u16::try_from(n).map_err(|_| BitError::ValueOutOfRange {
            value: n as u64,
            width: 16,
        })?;
        Ok(())
    }

    /// The 32-bit header image in protocol bit order.
    pub fn header_bits(&self) -> BitString {
        let mut word = (self.class as u32) << 24;
        word |= ((self.object_type & 0x0F) as u32) << 20;
        word |= ((self.reserved & 0x03) as u32) << 18;
        word |= (self.processing as u32) << 17;
        word |= (self.ignore as u32) << 16;
        word |= self.length as u32;
        BitString::from(word)
    }

    /// Decode a header from exactly [`HEADER_BIT_WIDTH`] bits.
    ///
    /// Reserved bits are preserved as received.
    pub fn from_bits(bits: &BitString) -> Result<Self> {
        if bits.width() != HEADER_BIT_WIDTH {
            return Err(BitError::InvalidFieldWidth {
                got: bits.width(),
                want: HEADER_BIT_WIDTH,
            }
            .into());
        }
        let word = bits.value()? as u32;
        Ok(Self {
            class: (word >> 24) as u8,
            object_type: ((word >> 20) & 0x0F) as u8,
            reserved: ((word >> 18) & 0x03) as u8,
            processing: (word >> 17) & 1 == 1,
            ignore: (word >> 16) & 1 == 1,
            length: word as u16,
        })
    }
}

impl fmt::Display for ObjectHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<Header class={} type={} P={} I={} length={}B>",
            self.class,
            self.object_type,
            u8::from(self.processing),
            u8::from(self.ignore),
            self.length
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bit_layout_is_exact() {
        let mut header = ObjectHeader::new(5, 1).unwrap();
        header.set_length_bytes(8).unwrap();
        header.set_processing(true);

        // class=5 | type=1 | res=00 | P=1 | I=0 | length=8
        let expected = "00000101_0001_00_1_0_0000000000001000".replace('_', "");
        assert_eq!(header.header_bits().to_string(), expected);
    }

    #[test]
    fn header_roundtrip() {
        let mut header = ObjectHeader::new(6, 1).unwrap();
        header.set_length_bytes(12).unwrap();
        header.set_ignore(true);

        let decoded = ObjectHeader::from_bits(&header.header_bits()).unwrap();
        assert_eq!(decoded, header);
    }

    #[test]
    fn new_rejects_wide_type_code() {
        let err = ObjectHeader::new(5, 16).unwrap_err();
        assert_eq!(
            err,
            crate::error::ObjectError::Bits(BitError::ValueOutOfRange {
                value: 16,
                width: 4
            })
        );
    }

    #[test]
    fn length_starts_at_header_size() {
        let header = ObjectHeader::new(5, 1).unwrap();
        assert_eq!(header.length_bytes() as usize, HEADER_BYTE_LENGTH);
    }

    #[test]
    fn set_length_enforces_field_range() {
        let mut header = ObjectHeader::new(5, 1).unwrap();
        header.set_length_bytes(u16::MAX as usize).unwrap();
        assert!(header.set_length_bytes(u16::MAX as usize + 1).is_err());
    }

    #[test]
    fn from_bits_requires_exact_width() {
        let short = BitString::zeros(31);
        assert!(ObjectHeader::from_bits(&short).is_err());
    }

    #[test]
    fn display_is_deterministic() {
        let header = ObjectHeader::new(5, 1).unwrap();
        assert_eq!(
            header.to_string(),
            "<Header class=5 type=1 P=0 I=0 length=4B>"
        );
    }
}
