//! Stage-level errors

use std::fmt;

/// Errors raised by the individual pipeline stages.
///
/// Absence of a match (no escapes, no declarations, no references) is never an
/// error; the affected token passes through unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeobError {
    /// A stage received a value of the wrong shape, e.g. an empty element list
    /// handed to the nested array parser or an empty delimiter.
    InvalidInput(String),
}

impl fmt::Display for DeobError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeobError::InvalidInput(msg) => write!(f, "Invalid input: {msg}"),
        }
    }
}

impl std::error::Error for DeobError {}
