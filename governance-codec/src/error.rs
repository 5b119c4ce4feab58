//! Error definitions for the governance payload codecs.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("Invalid length for {field}: expected {expected} bytes, got {got}")]
    InvalidLength {
        field: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("Truncated payload: need {needed} bytes, have {available}")]
    TruncatedPayload { needed: usize, available: usize },

    #[error("Malformed input: expected {expected} bytes, got {got}")]
    MalformedInput { expected: usize, got: usize },

    #[error("Sentinel name must be 32 bytes or less, got {len}")]
    NameTooLong { len: usize },

    #[error("Invalid header field {field}: expected {expected}, got {got}")]
    InvalidHeader {
        field: &'static str,
        expected: String,
        got: String,
    },

    #[error("{field} of {len} does not fit the wire format (max {max})")]
    FieldOverflow {
        field: &'static str,
        len: usize,
        max: usize,
    },
}

pub type Result<T> = std::result::Result<T, CodecError>;
