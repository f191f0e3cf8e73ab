//! Minimal error set for core-domain validation & parsing.

use core::fmt;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CoreError {
    InvalidId,
    InvalidToken,
    InvalidPriority,
    DuplicateCategory,
    DomainOutOfRange(&'static str),
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoreError::InvalidId => write!(f, "invalid id"),
            CoreError::InvalidToken => write!(f, "invalid token"),
            CoreError::InvalidPriority => write!(f, "invalid priority level"),
            CoreError::DuplicateCategory => write!(f, "duplicate category id"),
            CoreError::DomainOutOfRange(k) => write!(f, "domain out of range: {k}"),
        }
    }
}
