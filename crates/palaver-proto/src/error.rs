//! Protocol error types.
//!
//! Codec failures are the only fallible surface of this crate. They are
//! never fatal to a running client: a payload that fails to decode is
//! logged and the carrying message dropped.

use thiserror::Error;

/// Errors from encoding or decoding structured message content.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProtocolError {
    /// Payload could not be serialized.
    #[error("payload encode failed: {reason}")]
    Encode {
        /// Underlying codec failure.
        reason: String,
    },

    /// Payload bytes did not parse into the expected predicate shape.
    #[error("payload decode failed: {reason}")]
    Decode {
        /// Underlying codec failure.
        reason: String,
    },
}
