//! Roster subscription management.
//!
//! Owns the client's own subscription to the active manager and applies the
//! roster deltas that arrive on it. The subscribe handshake is
//! fire-and-forget: no acknowledgment is awaited, and a manager that was
//! abandoned mid-switch may keep a stale subscription until its own timeout
//! policy reaps it.
//!
//! The subscription is correlated by a locally generated conversation id,
//! `"C-" + local_name`. Deltas are matched by that id only, not by the
//! sending manager's identity, so notifications from a previously bound
//! manager that are still in flight will be applied. This matches the wire
//! behavior of deployed peers and is deliberately not tightened here.

use std::collections::BTreeSet;

use palaver_proto::{AclMessage, ParticipantId, Performative, RosterDelta};

use crate::event::ClientAction;

/// Lifecycle of the client's subscription.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SubscriptionState {
    /// No subscribe request has been sent yet.
    Unsubscribed,
    /// Subscribe sent without an addressee; the manager was still unknown.
    Pending,
    /// Subscribe sent to a specific manager.
    Subscribed {
        /// The manager this subscription is bound to.
        manager: ParticipantId,
    },
}

/// State machine owning the subscription and the roster it feeds.
pub(crate) struct SubscriptionManager {
    me: ParticipantId,
    state: SubscriptionState,
    correlation_id: String,
}

impl SubscriptionManager {
    pub(crate) fn new(me: ParticipantId) -> Self {
        let correlation_id = format!("C-{}", me.local_name());
        Self { me, state: SubscriptionState::Unsubscribed, correlation_id }
    }

    /// Conversation id correlating roster notifications to this client.
    pub(crate) fn correlation_id(&self) -> &str {
        &self.correlation_id
    }

    /// The manager this subscription is currently bound to, if any.
    pub(crate) fn bound_manager(&self) -> Option<&ParticipantId> {
        match &self.state {
            SubscriptionState::Subscribed { manager } => Some(manager),
            SubscriptionState::Unsubscribed | SubscriptionState::Pending => None,
        }
    }

    /// Initial subscribe request, sent before any manager is known.
    ///
    /// The message has no receivers; it exists so the subscription is
    /// already announced the moment a manager appears.
    pub(crate) fn start(&mut self) -> AclMessage {
        self.state = SubscriptionState::Pending;
        AclMessage::subscribe(self.me.clone(), Vec::new(), self.correlation_id.clone())
    }

    /// Re-subscribe if the active manager changed since the last send.
    ///
    /// Produces exactly one subscribe request per manager change, addressed
    /// only to the new manager. The old manager is simply no longer a
    /// receiver; there is no acknowledged unsubscribe handshake.
    pub(crate) fn sync(&mut self, active: Option<&ParticipantId>) -> Option<AclMessage> {
        let active = active?;
        if self.bound_manager() == Some(active) {
            return None;
        }

        tracing::debug!(manager = %active, "subscribing to manager");
        self.state = SubscriptionState::Subscribed { manager: active.clone() };
        Some(AclMessage::subscribe(
            self.me.clone(),
            vec![active.clone()],
            self.correlation_id.clone(),
        ))
    }

    /// Apply an inbound notification on our correlation id to the roster.
    ///
    /// Joined and left deltas mutate the set idempotently. Malformed
    /// content and unexpected performatives are logged and dropped; the
    /// roster stays temporarily stale until the next successful delta.
    pub(crate) fn handle_notification(
        &self,
        msg: &AclMessage,
        participants: &mut BTreeSet<ParticipantId>,
    ) -> Option<ClientAction> {
        if msg.performative != Performative::Inform {
            crate::client::warn_unexpected(msg);
            return None;
        }

        let delta = match RosterDelta::decode(&msg.content) {
            Ok(delta) => delta,
            Err(e) => {
                tracing::warn!(sender = %msg.sender, error = %e, "malformed roster delta dropped");
                return None;
            },
        };

        match delta {
            RosterDelta::Joined { who } => {
                for id in who {
                    participants.insert(id);
                }
            },
            RosterDelta::Left { who } => {
                for id in &who {
                    participants.remove(id);
                }
            },
        }

        let names = participants.iter().map(|p| p.local_name().to_string()).collect();
        Some(ClientAction::ParticipantsChanged { names })
    }
}
