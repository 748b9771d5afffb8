//! The generic object-frame contract and the closed variant set.

use std::fmt;

use bytes::Bytes;
use pcepwire_bits::{BitError, BitString};
use tracing::debug;

use crate::bandwidth::BandwidthObject;
use crate::error::{ObjectError, Result};
use crate::header::{ObjectHeader, HEADER_BIT_WIDTH, HEADER_BYTE_LENGTH};
use crate::layout::{classes, LayoutTable};
use crate::metric::MetricObject;

/// Object lengths are padded to a multiple of 4 bytes (word alignment).
pub const WORD_BYTES: usize = 4;

/// Bytes needed to carry `total_bits`: rounded up to the next whole byte,
/// then up to the next 4-byte word.
pub fn aligned_byte_length(total_bits: usize) -> usize {
    total_bits.div_ceil(8).div_ceil(WORD_BYTES) * WORD_BYTES
}

/// Capability contract implemented once per concrete object type.
///
/// An implementation is a pure value with one consistency invariant: the
/// header's length field always equals [`frame_byte_length`] immediately
/// after every successful construction or mutation. Failed mutations leave
/// the prior valid state observable.
///
/// [`frame_byte_length`]: ObjectFrame::frame_byte_length
pub trait ObjectFrame {
    /// The common object header.
    fn header(&self) -> &ObjectHeader;

    /// Mutable header access, for the P/I flags. The length field is managed
    /// by the frame's own setters; [`ObjectFrame::validate`] catches drift.
    fn header_mut(&mut self) -> &mut ObjectHeader;

    /// Concatenation of the declared body fields in declared bit order.
    fn body_bits(&self) -> BitString;

    /// Replace the whole body, re-extracting every field.
    ///
    /// Fails with `InvalidFieldWidth` unless the width equals the object
    /// type's declared body width; on failure nothing changes.
    fn set_body_bits(&mut self, bits: &BitString) -> Result<()>;

    /// Short diagnostic tag, e.g. `Bandwidth`.
    fn tag(&self) -> &'static str;

    /// Total encoded size in bytes: header + body, byte- then word-aligned.
    fn frame_byte_length(&self) -> usize {
        aligned_byte_length(HEADER_BIT_WIDTH + self.body_bits().width())
    }

    /// The exact wire payload for this object: header bits then body bits.
    fn frame_bits(&self) -> BitString {
        self.header().header_bits().concat(&self.body_bits())
    }

    /// Raw-bit dump bracketed per part, diagnostic only.
    fn binary_info(&self) -> String {
        format!(
            "[{}][{}]",
            self.header().header_bits(),
            self.body_bits()
        )
    }

    /// The byte image the message assembler consumes, zero-padded out to the
    /// declared word-aligned length.
    fn frame_bytes(&self) -> Result<Bytes> {
        let bits = self.frame_bits();
        let padding = self.frame_byte_length() * 8 - bits.width();
        Ok(bits.concat(&BitString::zeros(padding)).to_bytes()?)
    }

    /// Re-check the header-length invariant.
    ///
    /// A mismatch means a programming error somewhere in the mutation path,
    /// never an expected runtime condition.
    fn validate(&self) -> Result<()> {
        let declared = self.header().length_bytes();
        let computed = self.frame_byte_length();
        if declared as usize != computed {
            return Err(ObjectError::InconsistentHeaderLength { declared, computed });
        }
        Ok(())
    }
}

/// One PCEP protocol object.
///
/// The variant set is closed: object types are finite and known at compile
/// time, so decode is a match on (class, type), not open subclassing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PcepObject {
    /// BANDWIDTH object (class 5).
    Bandwidth(BandwidthObject),
    /// METRIC object (class 6).
    Metric(MetricObject),
}

impl PcepObject {
    /// Build the matching variant from a decoded header plus the body bits
    /// the decoder sliced off the stream.
    pub fn decode(header: ObjectHeader, body: &BitString, table: &LayoutTable) -> Result<Self> {
        debug!(
            class = header.class(),
            object_type = header.object_type(),
            body_bits = body.width(),
            "decoding object body"
        );
        let layout = table
            .get(header.class(), header.object_type())
            .ok_or(ObjectError::UnknownObject {
                class: header.class(),
                object_type: header.object_type(),
            })?;
        match layout.class {
            classes::BANDWIDTH => Ok(Self::Bandwidth(BandwidthObject::from_body(
                header, layout, body,
            )?)),
            classes::METRIC => Ok(Self::Metric(MetricObject::from_body(header, layout, body)?)),
            _ => Err(ObjectError::UnsupportedObject {
                class: header.class(),
                object_type: header.object_type(),
            }),
        }
    }

    /// Decode a whole frame image: 4 header bytes followed by the body bytes
    /// the header declares. Alignment padding past the layout's body width is
    /// stripped before dispatch.
    pub fn decode_bytes(data: &[u8], table: &LayoutTable) -> Result<Self> {
        if data.len() < HEADER_BYTE_LENGTH {
            return Err(BitError::InvalidFieldWidth {
                got: data.len() * 8,
                want: HEADER_BIT_WIDTH,
            }
            .into());
        }
        let header_bits = BitString::from_bytes(&data[..HEADER_BYTE_LENGTH], HEADER_BIT_WIDTH)?;
        let header = ObjectHeader::from_bits(&header_bits)?;

        let declared = header.length_bytes() as usize;
        if data.len() != declared {
            return Err(BitError::InvalidFieldWidth {
                got: data.len() * 8,
                want: declared * 8,
            }
            .into());
        }
        let layout = table
            .get(header.class(), header.object_type())
            .ok_or(ObjectError::UnknownObject {
                class: header.class(),
                object_type: header.object_type(),
            })?;
        let expected = aligned_byte_length(HEADER_BIT_WIDTH + layout.body_width_bits);
        if declared != expected {
            return Err(BitError::InvalidFieldWidth {
                got: declared * 8,
                want: expected * 8,
            }
            .into());
        }
        let body_bytes = &data[HEADER_BYTE_LENGTH..];
        let padded = BitString::from_bytes(body_bytes, body_bytes.len() * 8)?;
        let body = padded.slice(0, layout.body_width_bits)?;
        Self::decode(header, &body, table)
    }

    fn inner(&self) -> &dyn ObjectFrame {
        match self {
            Self::Bandwidth(object) => object,
            Self::Metric(object) => object,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn ObjectFrame {
        match self {
            Self::Bandwidth(object) => object,
            Self::Metric(object) => object,
        }
    }
}

impl ObjectFrame for PcepObject {
    fn header(&self) -> &ObjectHeader {
        self.inner().header()
    }

    fn header_mut(&mut self) -> &mut ObjectHeader {
        self.inner_mut().header_mut()
    }

    fn body_bits(&self) -> BitString {
        self.inner().body_bits()
    }

    fn set_body_bits(&mut self, bits: &BitString) -> Result<()> {
        self.inner_mut().set_body_bits(bits)
    }

    fn tag(&self) -> &'static str {
        self.inner().tag()
    }
}

impl fmt::Display for PcepObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bandwidth(object) => object.fmt(f),
            Self::Metric(object) => object.fmt(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{bandwidth_layout, FieldSpec, ObjectLayout};

    #[test]
    fn alignment_rounds_up_to_words() {
        assert_eq!(aligned_byte_length(0), 0);
        assert_eq!(aligned_byte_length(1), 4);
        assert_eq!(aligned_byte_length(32), 4);
        assert_eq!(aligned_byte_length(33), 8);
        assert_eq!(aligned_byte_length(64), 8);
        assert_eq!(aligned_byte_length(65), 12);
    }

    #[test]
    fn decode_dispatches_on_class_and_type() {
        let table = LayoutTable::standard();

        let header = ObjectHeader::new(classes::BANDWIDTH, 1).unwrap();
        let body = BitString::from_value(42, 32).unwrap();
        let object = PcepObject::decode(header, &body, &table).unwrap();
        assert!(matches!(object, PcepObject::Bandwidth(_)));
        assert_eq!(object.tag(), "Bandwidth");

        let header = ObjectHeader::new(classes::METRIC, 1).unwrap();
        let body = BitString::zeros(64);
        let object = PcepObject::decode(header, &body, &table).unwrap();
        assert!(matches!(object, PcepObject::Metric(_)));
    }

    #[test]
    fn decode_rejects_unknown_object() {
        let table = LayoutTable::standard();
        let header = ObjectHeader::new(99, 1).unwrap();
        let err = PcepObject::decode(header, &BitString::zeros(32), &table).unwrap_err();
        assert_eq!(
            err,
            ObjectError::UnknownObject {
                class: 99,
                object_type: 1
            }
        );
    }

    #[test]
    fn decode_bytes_roundtrip() {
        let table = LayoutTable::standard();
        let header = ObjectHeader::new(classes::BANDWIDTH, 1).unwrap();
        let object =
            BandwidthObject::new(header, &bandwidth_layout(), 1_000_000).unwrap();

        let wire = object.frame_bytes().unwrap();
        let decoded = PcepObject::decode_bytes(&wire, &table).unwrap();
        assert_eq!(decoded, PcepObject::Bandwidth(object));
    }

    #[test]
    fn decode_bytes_strips_alignment_padding() {
        // A 16-bit body encodes to 6 bytes, so the frame carries two
        // padding bytes the decoder must not feed to the body fields.
        let narrow = ObjectLayout {
            class: classes::BANDWIDTH,
            object_type: 1,
            body_width_bits: 16,
            fields: vec![FieldSpec::new("bandwidth", 0, 16)],
        };
        let mut table = LayoutTable::new();
        table.insert(narrow.clone()).unwrap();

        let header = ObjectHeader::new(classes::BANDWIDTH, 1).unwrap();
        let object = BandwidthObject::new(header, &narrow, 0xBEEF).unwrap();
        let wire = object.frame_bytes().unwrap();
        assert_eq!(wire.len(), 8);

        let decoded = PcepObject::decode_bytes(&wire, &table).unwrap();
        assert_eq!(decoded, PcepObject::Bandwidth(object));
    }

    #[test]
    fn decode_bytes_rejects_layout_length_mismatch() {
        // Frame encoded under the 32-bit standard layout, decoded against a
        // table whose registered layout declares a 64-bit body.
        let header = ObjectHeader::new(classes::BANDWIDTH, 1).unwrap();
        let object = BandwidthObject::new(header, &bandwidth_layout(), 1).unwrap();
        let wire = object.frame_bytes().unwrap();

        let mut wide = bandwidth_layout();
        wide.body_width_bits = 64;
        wide.fields = vec![FieldSpec::new("bandwidth", 0, 64)];
        let mut table = LayoutTable::new();
        table.insert(wide).unwrap();

        let err = PcepObject::decode_bytes(&wire, &table).unwrap_err();
        assert_eq!(
            err,
            ObjectError::Bits(BitError::InvalidFieldWidth { got: 64, want: 96 })
        );
    }

    #[test]
    fn decode_distinguishes_unimplemented_class() {
        let mut table = LayoutTable::standard();
        table
            .insert(ObjectLayout {
                class: 7,
                object_type: 1,
                body_width_bits: 32,
                fields: vec![FieldSpec::new("value", 0, 32)],
            })
            .unwrap();

        let header = ObjectHeader::new(7, 1).unwrap();
        let err = PcepObject::decode(header, &BitString::zeros(32), &table).unwrap_err();
        assert_eq!(
            err,
            ObjectError::UnsupportedObject {
                class: 7,
                object_type: 1
            }
        );
    }

    #[test]
    fn decode_bytes_rejects_length_mismatch() {
        let table = LayoutTable::standard();
        let header = ObjectHeader::new(classes::BANDWIDTH, 1).unwrap();
        let object = BandwidthObject::new(header, &bandwidth_layout(), 7).unwrap();

        let wire = object.frame_bytes().unwrap();
        assert!(PcepObject::decode_bytes(&wire[..wire.len() - 1], &table).is_err());
    }

    #[test]
    fn validate_catches_header_drift() {
        let header = ObjectHeader::new(classes::BANDWIDTH, 1).unwrap();
        let mut object =
            PcepObject::Bandwidth(BandwidthObject::new(header, &bandwidth_layout(), 1).unwrap());
        object.validate().unwrap();

        object.header_mut().set_length_bytes(400).unwrap();
        assert_eq!(
            object.validate(),
            Err(ObjectError::InconsistentHeaderLength {
                declared: 400,
                computed: 8
            })
        );
    }
}
