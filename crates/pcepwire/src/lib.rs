//! PCEP (RFC 5440) object framing and bit-field encoding.
//!
//! pcepwire encodes and decodes the fixed-format binary objects carried
//! inside PCEP messages: a 4-byte common header plus a body of bit-aligned
//! fields, with the declared object length kept consistent with the encoded
//! size at every observable point.
//!
//! # Crate Structure
//!
//! - [`bits`] — The [`BitString`](bits::BitString) value type and bit
//!   arithmetic (value↔bits, padding, splicing, slicing)
//! - [`object`] — Common object header, per-type field layouts, and the
//!   closed set of object variants behind the
//!   [`ObjectFrame`](object::ObjectFrame) contract

/// Re-export bit-string types.
pub mod bits {
    pub use pcepwire_bits::*;
}

/// Re-export object-framing types.
pub mod object {
    pub use pcepwire_object::*;
}
