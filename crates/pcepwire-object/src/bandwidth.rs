//! The BANDWIDTH object (RFC 5440 §7.7) — the reference variant.
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                          Bandwidth                            |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```

use std::fmt;

use pcepwire_bits::{BitError, BitString};

use crate::error::Result;
use crate::header::{ObjectHeader, HEADER_BIT_WIDTH};
use crate::layout::ObjectLayout;
use crate::object::{aligned_byte_length, ObjectFrame};

/// Field name the layout must declare.
pub const BANDWIDTH_FIELD: &str = "bandwidth";

/// A BANDWIDTH object: one bandwidth field filling the whole body.
///
/// The field width comes from the layout handed to the constructor
/// (conventionally 32 bits), not from a global constant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BandwidthObject {
    header: ObjectHeader,
    bandwidth: BitString,
}

impl BandwidthObject {
    /// Construct from a decimal bandwidth value (encode path).
    pub fn new(header: ObjectHeader, layout: &ObjectLayout, bandwidth: u64) -> Result<Self> {
        let width = Self::field_width(&header, layout)?;
        let bits = BitString::from_value(bandwidth, width)?;
        let mut object = Self {
            header,
            bandwidth: bits,
        };
        object.sync_header_length()?;
        Ok(object)
    }

    /// Construct from a decoded header plus sliced body bits (decode path).
    pub fn from_body(header: ObjectHeader, layout: &ObjectLayout, body: &BitString) -> Result<Self> {
        let width = Self::field_width(&header, layout)?;
        let mut object = Self {
            header,
            bandwidth: BitString::zeros(width),
        };
        object.set_body_bits(body)?;
        Ok(object)
    }

    fn field_width(header: &ObjectHeader, layout: &ObjectLayout) -> Result<usize> {
        layout.validate()?;
        layout.check_matches(header.class(), header.object_type())?;
        layout.check_fields(&[BANDWIDTH_FIELD])?;
        Ok(layout.field(BANDWIDTH_FIELD)?.width_bits)
    }

    /// Bandwidth as an unsigned decimal value.
    pub fn bandwidth(&self) -> Result<u64> {
        Ok(self.bandwidth.value()?)
    }

    /// The raw bandwidth field bits.
    pub fn bandwidth_bits(&self) -> &BitString {
        &self.bandwidth
    }

    /// Re-encode the bandwidth from a decimal value at the declared width.
    pub fn set_bandwidth(&mut self, value: u64) -> Result<()> {
        self.bandwidth = BitString::from_value(value, self.bandwidth.width())?;
        self.sync_header_length()
    }

    /// Set the bandwidth field from bits, left-padding shorter input to the
    /// declared width.
    pub fn set_bandwidth_bits(&mut self, bits: &BitString) -> Result<()> {
        self.bandwidth = bits.pad_to(self.bandwidth.width())?;
        self.sync_header_length()
    }

    /// Overwrite part of the bandwidth field starting at `start_bit`.
    pub fn set_bandwidth_bits_at(&mut self, start_bit: usize, bits: &BitString) -> Result<()> {
        self.bandwidth = self.bandwidth.splice(start_bit, bits)?;
        self.sync_header_length()
    }

    fn sync_header_length(&mut self) -> Result<()> {
        let length = aligned_byte_length(HEADER_BIT_WIDTH + self.bandwidth.width());
        self.header.set_length_bytes(length)
    }
}

impl ObjectFrame for BandwidthObject {
    fn header(&self) -> &ObjectHeader {
        &self.header
    }

    fn header_mut(&mut self) -> &mut ObjectHeader {
        &mut self.header
    }

    fn body_bits(&self) -> BitString {
        self.bandwidth.clone()
    }

    fn set_body_bits(&mut self, bits: &BitString) -> Result<()> {
        let want = self.bandwidth.width();
        if bits.width() != want {
            return Err(BitError::InvalidFieldWidth {
                got: bits.width(),
                want,
            }
            .into());
        }
        self.bandwidth = bits.clone();
        self.sync_header_length()
    }

    fn tag(&self) -> &'static str {
        "Bandwidth"
    }
}

impl fmt::Display for BandwidthObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.bandwidth.value() {
            Ok(value) => write!(f, "{}<Bandwidth:bandwidth={}>", self.header, value),
            Err(_) => write!(f, "{}<Bandwidth:bandwidth=0b{}>", self.header, self.bandwidth),
        }
    }
}
