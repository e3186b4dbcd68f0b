//! In-memory message channel and capability directory.
//!
//! `SimNetwork` models the two external collaborators of the protocol core:
//! the point-to-point message channel (per-participant FIFO inboxes; a send
//! enqueues a copy for every receiver, so delivery is reliable per send and
//! FIFO per sender-receiver pair but unordered across senders) and the
//! directory lookup service (capability name to advertisers, with transient
//! failure injection for retry testing).

use std::{
    collections::{HashMap, VecDeque},
    sync::{Arc, Mutex, PoisonError},
};

use palaver_proto::{AclMessage, ParticipantId};
use thiserror::Error;

/// Errors produced by the simulated collaborators.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SimError {
    /// The directory service is (transiently) unavailable.
    #[error("directory unavailable")]
    DirectoryUnavailable,
}

#[derive(Default)]
struct Inner {
    inboxes: HashMap<ParticipantId, VecDeque<AclMessage>>,
    directory: HashMap<String, Vec<ParticipantId>>,
    failing_lookups: u32,
}

/// Shared in-memory network, cloned into each participant's driver.
#[derive(Clone, Default)]
pub struct SimNetwork {
    inner: Arc<Mutex<Inner>>,
}

impl SimNetwork {
    /// Create an empty network.
    pub fn new() -> Self {
        Self::default()
    }

    fn locked(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Advertise `id` under the given capability name.
    pub fn advertise(&self, capability: &str, id: ParticipantId) {
        let mut inner = self.locked();
        let entries = inner.directory.entry(capability.to_string()).or_default();
        if !entries.contains(&id) {
            entries.push(id);
        }
    }

    /// Withdraw `id` from the given capability.
    pub fn withdraw(&self, capability: &str, id: &ParticipantId) {
        if let Some(entries) = self.locked().directory.get_mut(capability) {
            entries.retain(|e| e != id);
        }
    }

    /// Make the next `n` lookups fail with [`SimError::DirectoryUnavailable`].
    pub fn fail_next_lookups(&self, n: u32) {
        self.locked().failing_lookups = n;
    }

    /// Query the directory for actors advertising a capability.
    pub fn lookup(&self, capability: &str) -> Result<Vec<ParticipantId>, SimError> {
        let mut inner = self.locked();
        if inner.failing_lookups > 0 {
            inner.failing_lookups -= 1;
            return Err(SimError::DirectoryUnavailable);
        }
        Ok(inner.directory.get(capability).cloned().unwrap_or_default())
    }

    /// Deliver a message to every addressed receiver's inbox.
    ///
    /// A message with no receivers goes nowhere, matching the channel
    /// semantics the initial unaddressed subscribe relies on.
    pub fn deliver(&self, msg: AclMessage) {
        let mut inner = self.locked();
        for receiver in &msg.receivers {
            inner.inboxes.entry(receiver.clone()).or_default().push_back(msg.clone());
        }
    }

    /// Pop the next queued message for a participant, if any.
    pub fn next_message(&self, id: &ParticipantId) -> Option<AclMessage> {
        self.locked().inboxes.get_mut(id).and_then(VecDeque::pop_front)
    }

    /// Drain everything queued for a participant.
    pub fn drain_inbox(&self, id: &ParticipantId) -> Vec<AclMessage> {
        self.locked().inboxes.get_mut(id).map(|q| q.drain(..).collect()).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use palaver_proto::MANAGER_CAPABILITY;

    use super::*;

    fn id(name: &str) -> ParticipantId {
        ParticipantId::new(name)
    }

    #[test]
    fn delivery_fans_out_to_all_receivers() {
        let net = SimNetwork::new();
        let msg = AclMessage::inform(id("a@p"), vec![id("b@p"), id("c@p")], "x", b"hi".to_vec());
        net.deliver(msg);

        assert!(net.next_message(&id("b@p")).is_some());
        assert!(net.next_message(&id("c@p")).is_some());
        assert!(net.next_message(&id("a@p")).is_none());
    }

    #[test]
    fn per_pair_order_is_preserved() {
        let net = SimNetwork::new();
        for content in [b"1".to_vec(), b"2".to_vec()] {
            net.deliver(AclMessage::inform(id("a@p"), vec![id("b@p")], "x", content));
        }

        let first = net.next_message(&id("b@p")).map(|m| m.content);
        let second = net.next_message(&id("b@p")).map(|m| m.content);
        assert_eq!(first, Some(b"1".to_vec()));
        assert_eq!(second, Some(b"2".to_vec()));
    }

    #[test]
    fn unaddressed_message_goes_nowhere() {
        let net = SimNetwork::new();
        net.deliver(AclMessage::subscribe(id("a@p"), Vec::new(), "C-a"));
        assert!(net.next_message(&id("a@p")).is_none());
    }

    #[test]
    fn lookup_reflects_advertise_and_withdraw() {
        let net = SimNetwork::new();
        net.advertise(MANAGER_CAPABILITY, id("m1@p"));
        net.advertise(MANAGER_CAPABILITY, id("m1@p"));
        assert_eq!(net.lookup(MANAGER_CAPABILITY), Ok(vec![id("m1@p")]));

        net.withdraw(MANAGER_CAPABILITY, &id("m1@p"));
        assert_eq!(net.lookup(MANAGER_CAPABILITY), Ok(Vec::new()));
    }

    #[test]
    fn injected_failures_are_transient() {
        let net = SimNetwork::new();
        net.fail_next_lookups(1);
        assert_eq!(net.lookup(MANAGER_CAPABILITY), Err(SimError::DirectoryUnavailable));
        assert_eq!(net.lookup(MANAGER_CAPABILITY), Ok(Vec::new()));
    }
}
