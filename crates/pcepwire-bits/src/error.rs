/// Errors that can occur in bit-string arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BitError {
    /// The decimal value does not fit the field's declared width.
    #[error("value {value} does not fit in {width} bits")]
    ValueOutOfRange { value: u64, width: usize },

    /// A bit string's width does not match the width a caller declared.
    #[error("bit string is {got} bits wide, expected {want}")]
    InvalidFieldWidth { got: usize, want: usize },

    /// A textual bit string contains something other than '0' or '1'.
    #[error("malformed binary string: {found:?} at position {position}")]
    MalformedBinaryString { position: usize, found: char },

    /// A splice or slice range falls outside the target bit string.
    #[error("bit range [{start}, {start}+{width}) exceeds string width {len}")]
    RangeOutOfBounds {
        start: usize,
        width: usize,
        len: usize,
    },

    /// The bit string is too wide to read as a single 64-bit value.
    #[error("bit string of {width} bits does not fit a 64-bit value")]
    WidthTooWide { width: usize },
}

pub type Result<T> = std::result::Result<T, BitError>;
