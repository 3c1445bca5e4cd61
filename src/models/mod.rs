pub mod enums;
pub mod reading;

pub use enums::{Posture, SeverityLevel};
pub use reading::*;

use thiserror::Error;

/// Rejection of a malformed reading at the boundary, before it reaches the
/// classification engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid number for {field}: {value}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("Value out of range for {field}: {value}")]
    OutOfRange { field: &'static str, value: String },

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("Invalid enum value for {field}: {value}")]
    InvalidEnum { field: String, value: String },

    #[error("Invalid time window: {0}")]
    InvalidWindow(String),
}
