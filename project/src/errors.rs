use std::fmt;

#[derive(Debug)]
pub enum DocumentError {
    CouldNotEncode(String),
    /// Malformed, missing or mistyped fields. Nothing partial is ever returned.
    CouldNotDecode(String),
}

impl fmt::Display for DocumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentError::CouldNotEncode(reason) => write!(f, "could not encode project: {}", reason),
            DocumentError::CouldNotDecode(reason) => write!(f, "could not decode project: {}", reason),
        }
    }
}

impl std::error::Error for DocumentError {}
