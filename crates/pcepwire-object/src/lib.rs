//! PCEP object framing (RFC 5440).
//!
//! Every PCEP object on the wire is a 4-byte common header followed by a
//! type-specific body of bit-aligned fields:
//!
//! ```text
//! ┌──────────────┬──────────┬─────┬───┬───┬───────────────┐
//! │ Object-Class │ OT (4b)  │ Res │ P │ I │ Object Length │
//! │ (8 bits)     │          │(2b) │(1)│(1)│ (16 bits, B)  │
//! ├──────────────┴──────────┴─────┴───┴───┴───────────────┤
//! │ Body (bit-aligned fields, padded to a 4-byte word)    │
//! └───────────────────────────────────────────────────────┘
//! ```
//!
//! This crate provides the header codec, the per-object-type field layout
//! configuration, and the closed set of object variants behind the
//! [`ObjectFrame`] capability contract. The invariant it exists to keep: an
//! object's declared length always equals its actual encoded size, at every
//! observable point.
//!
//! Message-level assembly and the session state machine live above this
//! layer; they only consume [`ObjectFrame::frame_bytes`] and
//! [`ObjectFrame::frame_byte_length`].

pub mod bandwidth;
pub mod error;
pub mod header;
pub mod layout;
pub mod metric;
pub mod object;

pub use bandwidth::BandwidthObject;
pub use error::{ObjectError, Result};
pub use header::{ObjectHeader, HEADER_BIT_WIDTH, HEADER_BYTE_LENGTH};
pub use layout::{
    bandwidth_layout, class_name, classes, metric_layout, FieldSpec, LayoutTable, ObjectLayout,
};
pub use metric::MetricObject;
pub use object::{aligned_byte_length, ObjectFrame, PcepObject, WORD_BYTES};
