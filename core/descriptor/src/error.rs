//! FILENAME: core/descriptor/src/error.rs

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum XdataError {
    #[error("Invalid argument: {0}")]
    InvalidArgumentType(String),

    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),

    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("{what} index {index} out of range [0, {len})")]
    IndexOutOfRange {
        what: &'static str,
        index: usize,
        len: usize,
    },

    #[error("Unknown flag: {0}")]
    UnknownFlag(String),

    #[error("Unknown value type: {0}")]
    UnknownType(String),
}

pub type Result<T> = std::result::Result<T, XdataError>;

/// Bounds check shared by every row/column/axis accessor.
pub fn check_index(what: &'static str, index: usize, len: usize) -> Result<()> {
    if index >= len {
        return Err(XdataError::IndexOutOfRange { what, index, len });
    }
    Ok(())
}
