//! Core error types for localnotify-core.
//!
//! This module defines the error hierarchy using thiserror. Decode
//! failures are fatal to the single fire they occur in and never crash
//! the process; collaborator outcomes are opaque to the core and have no
//! error representation here.

use thiserror::Error;

/// Core error type for localnotify-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Payload decoding errors
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),
}

/// Payload-decoding errors.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// Payload bytes are not a valid structured descriptor
    #[error("Malformed payload: {0}")]
    Malformed(#[from] serde_json::Error),

    /// `scheduledDateTime` could not be parsed
    #[error("Invalid scheduledDateTime '{value}': expected ISO-8601 local date-time")]
    InvalidDateTime { value: String },

    /// Empty payload with no legacy notification attached to the trigger
    #[error("Empty payload and no legacy notification attached")]
    MissingLegacy,
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
