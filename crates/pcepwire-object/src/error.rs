use pcepwire_bits::BitError;

/// Errors that can occur while building or mutating PCEP objects.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ObjectError {
    /// A bit-arithmetic failure (value range, field width, malformed text).
    #[error(transparent)]
    Bits(#[from] BitError),

    /// The header's length field disagrees with the recomputed frame size.
    /// Internal invariant violation — never expected in correct use.
    #[error("header declares {declared} bytes but frame encodes to {computed}")]
    InconsistentHeaderLength { declared: u16, computed: usize },

    /// No layout is registered for the given class/type pair.
    #[error("no layout for object class {class} type {object_type}")]
    UnknownObject { class: u8, object_type: u8 },

    /// A layout is registered for the class/type pair, but no variant
    /// implements it.
    #[error("no decoder for object class {class} type {object_type}")]
    UnsupportedObject { class: u8, object_type: u8 },

    /// A supplied layout fails its structural invariants.
    #[error("invalid object layout: {reason}")]
    InvalidLayout { reason: String },
}

pub type Result<T> = std::result::Result<T, ObjectError>;
