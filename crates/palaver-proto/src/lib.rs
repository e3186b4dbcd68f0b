//! Wire-level message model for the Palaver chat protocol.
//!
//! Palaver clients exchange point-to-point addressed messages tagged with a
//! performative (speech act) and a conversation id used to correlate a
//! message with the subscription or chat stream it belongs to. The message
//! content is an opaque byte payload: roster notifications carry a
//! CBOR-encoded [`RosterDelta`], chat utterances carry plain UTF-8 text.
//!
//! This crate is transport-agnostic. Delivery semantics (asynchronous,
//! unordered across senders, at-most-once per send) belong to the message
//! channel that carries these values.

mod error;
mod message;
mod participant;
mod payload;

pub use error::ProtocolError;

/// Capability name under which manager actors advertise themselves in the
/// directory.
pub const MANAGER_CAPABILITY: &str = "manager";

pub use message::{AclMessage, Performative};
pub use participant::ParticipantId;
pub use payload::RosterDelta;
