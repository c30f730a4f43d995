use std::fmt;

#[derive(Debug, PartialEq, Eq)]
pub enum PackingError {
    /// Byte 3 of a packed color must be zero.
    NonZeroReservedByte(u8),
    NanAlpha,
}

impl fmt::Display for PackingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PackingError::NonZeroReservedByte(byte) => {
                write!(f, "packed color has non-zero reserved byte {:#04x}", byte)
            }
            PackingError::NanAlpha => write!(f, "packed color has a NaN alpha"),
        }
    }
}

impl std::error::Error for PackingError {}
