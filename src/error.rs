//! Crate-level error types.
//!
//! Only configuration, skeleton loading, and the recognition client return
//! errors. The animation core degrades to "nothing happens" instead.

use std::fmt;

/// Errors produced by the signpose crate.
#[derive(Debug)]
pub enum SignposeError {
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options or pose table parsing/serialization failure.
    OptionsParse(String),
    /// Malformed skeleton description.
    SkeletonParse(String),
    /// Two bones registered under the same name.
    DuplicateBone(String),
    /// Recognition service request or response failure.
    Recognition(String),
}

impl fmt::Display for SignposeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::SkeletonParse(msg) => {
                write!(f, "skeleton parse error: {msg}")
            }
            Self::DuplicateBone(name) => {
                write!(f, "bone `{name}` registered twice")
            }
            Self::Recognition(msg) => write!(f, "recognition error: {msg}"),
        }
    }
}

impl std::error::Error for SignposeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SignposeError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
