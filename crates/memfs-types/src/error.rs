use thiserror::Error;

/// Errors produced by type conversions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("timestamp out of range: {0} seconds since epoch")]
    TimestampOutOfRange(i64),
}
