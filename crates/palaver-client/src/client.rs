//! Client state machine.
//!
//! [`Client`] composes the four protocol concerns (manager location, roster
//! subscription, utterance listening, utterance fan-out) over the shared
//! state they coordinate through: the active manager and the participant
//! set. It is driven by a single-threaded caller, so the shared state needs
//! no locking; each field has exactly one writer (the locator writes the
//! active manager, the subscription writes the participant set).

use std::collections::BTreeSet;

use palaver_proto::{AclMessage, ParticipantId};

use crate::{
    env::Environment,
    event::{ClientAction, ClientEvent},
    listener::ChatListener,
    locator,
    speaker,
    subscription::SubscriptionManager,
};

/// Client identity.
///
/// The identity this actor participates in the chat under. Display name is
/// derived from it, as is the subscription correlation id.
#[derive(Debug, Clone)]
pub struct ClientIdentity {
    /// Full agent name of this actor.
    pub id: ParticipantId,
}

impl ClientIdentity {
    /// Create a new client identity with the given participant id.
    pub fn new(id: ParticipantId) -> Self {
        Self { id }
    }
}

/// Chat client protocol core.
///
/// Consumes [`ClientEvent`] inputs and produces [`ClientAction`]
/// instructions for the runtime to execute. Never fails: per-message errors
/// are logged and the offending message dropped, leaving the client running
/// with possibly stale state.
pub struct Client<E: Environment> {
    /// Environment for randomness and timing.
    env: E,

    /// This actor's identity.
    me: ParticipantId,

    /// The manager currently believed authoritative. Written only by the
    /// locator; absent until the directory first yields candidates.
    active_manager: Option<ParticipantId>,

    /// Current roster. Written only by the subscription manager; ordered so
    /// display notifications carry names in a defined order.
    participants: BTreeSet<ParticipantId>,

    /// Roster subscription state machine.
    subscription: SubscriptionManager,

    /// Inbound utterance filter.
    listener: ChatListener,
}

impl<E: Environment> Client<E> {
    /// Create a new client with the given identity.
    pub fn new(env: E, identity: ClientIdentity) -> Self {
        let subscription = SubscriptionManager::new(identity.id.clone());
        Self {
            env,
            me: identity.id,
            active_manager: None,
            participants: BTreeSet::new(),
            subscription,
            listener: ChatListener::new(),
        }
    }

    /// This actor's identity.
    pub fn id(&self) -> &ParticipantId {
        &self.me
    }

    /// The manager currently believed authoritative, if any.
    pub fn active_manager(&self) -> Option<&ParticipantId> {
        self.active_manager.as_ref()
    }

    /// Current roster snapshot.
    pub fn participants(&self) -> &BTreeSet<ParticipantId> {
        &self.participants
    }

    /// Display names of the current roster, in sorted order.
    pub fn participant_names(&self) -> Vec<String> {
        self.participants.iter().map(|p| p.local_name().to_string()).collect()
    }

    /// Conversation id this client's roster subscription is correlated on.
    pub fn subscription_conversation_id(&self) -> &str {
        self.subscription.correlation_id()
    }

    /// Announce the subscription before any manager is known.
    ///
    /// Emits the initial subscribe request with no addressee; the runtime
    /// should call this exactly once at startup.
    pub fn start(&mut self) -> Vec<ClientAction> {
        vec![ClientAction::Send(self.subscription.start())]
    }

    /// Process an event and return resulting actions.
    pub fn handle(&mut self, event: ClientEvent) -> Vec<ClientAction> {
        match event {
            ClientEvent::DirectoryUpdate { candidates } => self.handle_directory(&candidates),
            ClientEvent::MessageReceived(msg) => self.handle_message(&msg),
            ClientEvent::Speak { sentence } => {
                speaker::broadcast(&self.me, self.active_manager.as_ref(), &self.participants, &sentence)
            },
        }
    }

    /// One manager-location cycle: select, retarget, re-subscribe.
    fn handle_directory(&mut self, candidates: &[ParticipantId]) -> Vec<ClientAction> {
        self.active_manager = locator::select(&self.env, self.active_manager.take(), candidates);
        self.listener.retarget(self.active_manager.as_ref());

        match self.subscription.sync(self.active_manager.as_ref()) {
            Some(subscribe) => vec![ClientAction::Send(subscribe)],
            None => Vec::new(),
        }
    }

    /// Classify an inbound message by its correlation id and dispatch.
    ///
    /// The roster feed is matched on the locally generated subscription id;
    /// the chat stream on the manager's raw identity. Anything else is
    /// unexpected and dropped.
    fn handle_message(&mut self, msg: &AclMessage) -> Vec<ClientAction> {
        if msg.conversation_id == self.subscription.correlation_id() {
            self.subscription
                .handle_notification(msg, &mut self.participants)
                .into_iter()
                .collect()
        } else if self.listener.matches(msg) {
            self.listener.handle(msg).into_iter().collect()
        } else {
            warn_unexpected(msg);
            Vec::new()
        }
    }
}

/// Log an unexpected message with its sender and content, then drop it.
pub(crate) fn warn_unexpected(msg: &AclMessage) {
    tracing::warn!(
        sender = %msg.sender,
        performative = ?msg.performative,
        content = %msg.content_str(),
        "unexpected message dropped"
    );
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use palaver_proto::{Performative, RosterDelta};

    use super::*;

    #[derive(Clone)]
    struct TestEnv;

    impl Environment for TestEnv {
        type Instant = std::time::Instant;

        fn now(&self) -> Self::Instant {
            std::time::Instant::now()
        }

        fn sleep(&self, _duration: Duration) -> impl std::future::Future<Output = ()> + Send {
            std::future::ready(())
        }

        fn random_bytes(&self, buffer: &mut [u8]) {
            buffer.fill(0);
        }
    }

    fn id(name: &str) -> ParticipantId {
        ParticipantId::new(name)
    }

    fn client() -> Client<TestEnv> {
        Client::new(TestEnv, ClientIdentity::new(id("alice@p")))
    }

    fn sends(actions: &[ClientAction]) -> Vec<&AclMessage> {
        actions
            .iter()
            .filter_map(|a| match a {
                ClientAction::Send(msg) => Some(msg),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn start_announces_unaddressed_subscription() {
        let mut client = client();
        let actions = client.start();

        let sent = sends(&actions);
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].performative, Performative::Subscribe);
        assert!(sent[0].receivers.is_empty());
    }

    #[test]
    fn directory_update_resolves_manager_and_subscribes() {
        let mut client = client();
        client.start();

        let actions =
            client.handle(ClientEvent::DirectoryUpdate { candidates: vec![id("m1@p")] });

        assert_eq!(client.active_manager(), Some(&id("m1@p")));
        let sent = sends(&actions);
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].receivers, vec![id("m1@p")]);
    }

    #[test]
    fn unchanged_directory_produces_no_traffic() {
        let mut client = client();
        client.start();
        client.handle(ClientEvent::DirectoryUpdate { candidates: vec![id("m1@p")] });

        let actions =
            client.handle(ClientEvent::DirectoryUpdate { candidates: vec![id("m1@p")] });
        assert!(actions.is_empty());
    }

    #[test]
    fn roster_delta_updates_participants_and_notifies() {
        let mut client = client();
        client.start();
        client.handle(ClientEvent::DirectoryUpdate { candidates: vec![id("m1@p")] });

        let content = RosterDelta::Joined { who: vec![id("b@p"), id("c@p")] }.encode().unwrap();
        let msg = AclMessage::inform(id("m1@p"), vec![id("alice@p")], "C-alice", content);

        let actions = client.handle(ClientEvent::MessageReceived(msg));
        assert_eq!(
            actions,
            vec![ClientAction::ParticipantsChanged { names: vec!["b".into(), "c".into()] }]
        );
        assert_eq!(client.participant_names(), vec!["b", "c"]);
    }

    #[test]
    fn utterance_on_manager_stream_is_forwarded() {
        let mut client = client();
        client.start();
        client.handle(ClientEvent::DirectoryUpdate { candidates: vec![id("m1@p")] });

        let msg = AclMessage::inform(id("bob@p"), vec![id("alice@p")], "m1@p", b"hey".to_vec());
        let actions = client.handle(ClientEvent::MessageReceived(msg));
        assert_eq!(
            actions,
            vec![ClientAction::Spoken { speaker: "bob".into(), sentence: "hey".into() }]
        );
    }

    #[test]
    fn unknown_conversation_id_is_dropped() {
        let mut client = client();
        client.start();
        client.handle(ClientEvent::DirectoryUpdate { candidates: vec![id("m1@p")] });

        let msg =
            AclMessage::inform(id("bob@p"), vec![id("alice@p")], "somewhere-else", b"x".to_vec());
        assert!(client.handle(ClientEvent::MessageReceived(msg)).is_empty());
    }

    #[test]
    fn speak_fans_out_to_roster_snapshot() {
        let mut client = client();
        client.start();
        client.handle(ClientEvent::DirectoryUpdate { candidates: vec![id("m1@p")] });

        let content = RosterDelta::Joined { who: vec![id("b@p")] }.encode().unwrap();
        let msg = AclMessage::inform(id("m1@p"), vec![id("alice@p")], "C-alice", content);
        client.handle(ClientEvent::MessageReceived(msg));

        let actions = client.handle(ClientEvent::Speak { sentence: "hello".into() });
        let sent = sends(&actions);
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].receivers, vec![id("b@p")]);
        assert_eq!(sent[0].conversation_id, "m1@p");
        assert!(
            actions
                .iter()
                .any(|a| matches!(a, ClientAction::Spoken { speaker, .. } if speaker == "alice"))
        );
    }
}
