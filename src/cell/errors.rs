use thiserror::Error;

/// A constructed cell breaks one of its domain invariants.
///
/// Seen when data loaded from storage fails re-validation, which means the
/// store itself holds corrupt values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid data: {reason} in {cell}")]
pub struct InvalidDataError {
    /// What was wrong.
    pub reason: String,
    /// Printed form of the offending cell.
    pub cell: String,
}

impl InvalidDataError {
    pub fn new(reason: impl Into<String>, cell: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            cell: cell.into(),
        }
    }
}

/// Text input that does not describe a cell.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("invalid character literal: {0}")]
    InvalidCharacter(String),
    #[error("invalid hex: {0}")]
    InvalidHex(String),
    #[error("invalid address: {0}")]
    InvalidAddress(String),
    #[error("invalid integer: {0}")]
    InvalidInteger(String),
}
