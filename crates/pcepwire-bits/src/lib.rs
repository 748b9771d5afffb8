//! Fixed-width bit strings and bit arithmetic for PCEP object encoding.
//!
//! PCEP objects (RFC 5440) are built from bit-aligned fields whose widths are
//! not byte multiples — 4-bit type codes, 2-bit reserved ranges, 1-bit flags.
//! [`BitString`] is the value type everything above this crate is built from:
//! a sequence of bits of explicit width, packed MSB-first in network bit
//! order, with the conversions between decimal values and fixed-width binary
//! representations that the object layer needs.
//!
//! This is the lowest layer of pcepwire. Everything else builds on top of
//! the [`BitString`] type provided here.

pub mod bitstring;
pub mod error;

pub use bitstring::BitString;
pub use error::{BitError, Result};
