//! The METRIC object (RFC 5440 §7.8).
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |          Reserved             |    Flags  |C|B|       T       |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                          metric-value                         |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```
//!
//! Second variant of the closed set; unlike BANDWIDTH its body is a
//! multi-field tiling, which is what exercises the generic contract.

use std::fmt;

use pcepwire_bits::{BitError, BitString};

use crate::error::Result;
use crate::header::{ObjectHeader, HEADER_BIT_WIDTH};
use crate::layout::ObjectLayout;
use crate::object::{aligned_byte_length, ObjectFrame};

/// Field names the layout must declare, in body order.
pub const METRIC_FIELDS: [&str; 4] = ["reserved", "flags", "metric-type", "metric-value"];

/// A METRIC object: reserved | flags (C/B in the low bits) | type | value.
///
/// The metric value is carried as an unsigned field, matching the integer
/// decimal model of the rest of this layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricObject {
    header: ObjectHeader,
    reserved: BitString,
    flags: BitString,
    metric_type: BitString,
    metric_value: BitString,
}

impl MetricObject {
    /// Construct from decimal type and value codes (encode path).
    ///
    /// Reserved bits and flags start zeroed.
    pub fn new(
        header: ObjectHeader,
        layout: &ObjectLayout,
        metric_type: u64,
        metric_value: u64,
    ) -> Result<Self> {
        let widths = Self::field_widths(&header, layout)?;
        let mut object = Self {
            header,
            reserved: BitString::zeros(widths[0]),
            flags: BitString::zeros(widths[1]),
            metric_type: BitString::from_value(metric_type, widths[2])?,
            metric_value: BitString::from_value(metric_value, widths[3])?,
        };
        object.sync_header_length()?;
        Ok(object)
    }

    /// Construct from a decoded header plus sliced body bits (decode path).
    pub fn from_body(header: ObjectHeader, layout: &ObjectLayout, body: &BitString) -> Result<Self> {
        let widths = Self::field_widths(&header, layout)?;
        let mut object = Self {
            header,
            reserved: BitString::zeros(widths[0]),
            flags: BitString::zeros(widths[1]),
            metric_type: BitString::zeros(widths[2]),
            metric_value: BitString::zeros(widths[3]),
        };
        object.set_body_bits(body)?;
        Ok(object)
    }

    fn field_widths(header: &ObjectHeader, layout: &ObjectLayout) -> Result<[usize; 4]> {
        layout.validate()?;
        layout.check_matches(header.class(), header.object_type())?;
        layout.check_fields(&METRIC_FIELDS)?;
        let mut widths = [0usize; 4];
        for (slot, name) in widths.iter_mut().zip(METRIC_FIELDS) {
            *slot = layout.field(name)?.width_bits;
        }
        Ok(widths)
    }

    /// Metric type code (T).
    pub fn metric_type(&self) -> Result<u64> {
        Ok(self.metric_type.value()?)
    }

    /// Re-encode the metric type at its declared width.
    pub fn set_metric_type(&mut self, value: u64) -> Result<()> {
        self.metric_type = BitString::from_value(value, self.metric_type.width())?;
        self.sync_header_length()
    }

    /// Metric value as an unsigned decimal.
    pub fn metric_value(&self) -> Result<u64> {
        Ok(self.metric_value.value()?)
    }

    /// Re-encode the metric value at its declared width.
    pub fn set_metric_value(&mut self, value: u64) -> Result<()> {
        self.metric_value = BitString::from_value(value, self.metric_value.width())?;
        self.sync_header_length()
    }

    /// The raw flags field.
    pub fn flags(&self) -> &BitString {
        &self.flags
    }

    /// The B (bound) flag — lowest bit of the flags field.
    pub fn bound_flag(&self) -> bool {
        self.flags
            .width()
            .checked_sub(1)
            .and_then(|i| self.flags.bit(i))
            .unwrap_or(false)
    }

    /// Set or clear the B flag.
    pub fn set_bound_flag(&mut self, on: bool) -> Result<()> {
        self.set_flag_bit(1, on)
    }

    /// The C (computed-metric) flag — second-lowest bit of the flags field.
    pub fn computed_flag(&self) -> bool {
        self.flags
            .width()
            .checked_sub(2)
            .and_then(|i| self.flags.bit(i))
            .unwrap_or(false)
    }

    /// Set or clear the C flag.
    pub fn set_computed_flag(&mut self, on: bool) -> Result<()> {
        self.set_flag_bit(2, on)
    }

    fn set_flag_bit(&mut self, from_end: usize, on: bool) -> Result<()> {
        let index = self
            .flags
            .width()
            .checked_sub(from_end)
            .ok_or(BitError::RangeOutOfBounds {
                start: 0,
                width: from_end,
                len: self.flags.width(),
            })?;
        let bit = BitString::from_value(on as u64, 1)?;
        self.flags = self.flags.splice(index, &bit)?;
        self.sync_header_length()
    }

    fn body_width(&self) -> usize {
        self.reserved.width()
            + self.flags.width()
            + self.metric_type.width()
            + self.metric_value.width()
    }

    fn sync_header_length(&mut self) -> Result<()> {
        let length = aligned_byte_length(HEADER_BIT_WIDTH + self.body_width());
        self.header.set_length_bytes(length)
    }
}

impl ObjectFrame for MetricObject {
    fn header(&self) -> &ObjectHeader {
        &self.header
    }

    fn header_mut(&mut self) -> &mut ObjectHeader {
        &mut self.header
    }

    fn body_bits(&self) -> BitString {
        self.reserved
            .concat(&self.flags)
            .concat(&self.metric_type)
            .concat(&self.metric_value)
    }

    fn set_body_bits(&mut self, bits: &BitString) -> Result<()> {
        let want = self.body_width();
        if bits.width() != want {
            return Err(BitError::InvalidFieldWidth {
                got: bits.width(),
                want,
            }
            .into());
        }

        // Extract every field before committing any of them.
        let mut offset = 0usize;
        let reserved = bits.slice(offset, self.reserved.width())?;
        offset += self.reserved.width();
        let flags = bits.slice(offset, self.flags.width())?;
        offset += self.flags.width();
        let metric_type = bits.slice(offset, self.metric_type.width())?;
        offset += self.metric_type.width();
        let metric_value = bits.slice(offset, self.metric_value.width())?;

        self.reserved = reserved;
        self.flags = flags;
        self.metric_type = metric_type;
        self.metric_value = metric_value;
        self.sync_header_length()
    }

    fn tag(&self) -> &'static str {
        "Metric"
    }
}

impl fmt::Display for MetricObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.metric_type.value(), self.metric_value.value()) {
            (Ok(metric_type), Ok(metric_value)) => write!(
                f,
                "{}<Metric:type={} value={} C={} B={}>",
                self.header,
                metric_type,
                metric_value,
                u8::from(self.computed_flag()),
                u8::from(self.bound_flag())
            ),
            _ => write!(f, "{}<Metric:0b{}>", self.header, self.body_bits()),
        }
    }
}
