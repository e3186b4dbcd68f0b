//! Driver trait for abstracting I/O operations.
//!
//! The [`Driver`] trait decouples the runtime from specific transport and
//! directory implementations. A production frontend wires it to a real
//! message channel and directory service; the simulation harness provides a
//! deterministic in-memory implementation so the same orchestration code
//! runs in both.

use std::{future::Future, ops::Sub, time::Duration};

use palaver_proto::{AclMessage, ParticipantId};

use crate::UserEvent;

/// Abstracts I/O operations for the client runtime.
///
/// # Associated Types
///
/// - [`Error`](Driver::Error): platform-specific error type
/// - [`Instant`](Driver::Instant): time representation (real or virtual)
pub trait Driver: Send {
    /// Platform-specific error type.
    type Error: std::error::Error + Send + 'static;

    /// Time instant type. Enables virtual time in simulation.
    type Instant: Copy + Ord + Send + Sync + Sub<Output = Duration>;

    /// Query the directory for actors advertising the manager capability.
    ///
    /// # Errors
    ///
    /// Returns an error on a transient lookup failure. The runtime treats
    /// this as non-fatal and retries on the next cycle.
    fn lookup_managers(
        &mut self,
    ) -> impl Future<Output = Result<Vec<ParticipantId>, Self::Error>> + Send;

    /// Send a message over the channel. Fire-and-forget per send.
    ///
    /// # Errors
    ///
    /// Returns an error if the channel rejects or cannot deliver the
    /// message. The runtime logs the failure and does not retry.
    fn send_message(&mut self, msg: AclMessage)
    -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Non-blocking poll for the next inbound message.
    ///
    /// Returns `None` when nothing is queued; the runtime yields until the
    /// next tick rather than blocking.
    fn poll_inbound(&mut self) -> Option<AclMessage>;

    /// Poll for the next user event.
    ///
    /// Returns `None` if no event is ready this cycle.
    ///
    /// # Errors
    ///
    /// Returns an error if the input source fails; this ends the runtime.
    fn poll_user(&mut self) -> impl Future<Output = Result<Option<UserEvent>, Self::Error>> + Send;

    /// Current time instant.
    fn now(&self) -> Self::Instant;
}
