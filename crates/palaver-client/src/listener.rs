//! Inbound utterance listening.
//!
//! The listener keeps a receive filter keyed on the active manager's raw
//! identity string used as the conversation id, recomputed whenever the
//! active manager changes. Note the asymmetry with the roster subscription,
//! which correlates on a locally generated id: the chat stream is
//! correlated on the manager's own name. Deployed peers address utterances
//! exactly this way, so the rule is preserved verbatim for compatibility.

use palaver_proto::{AclMessage, ParticipantId, Performative};

use crate::event::ClientAction;

/// Filter and forwarder for inbound spoken sentences.
pub(crate) struct ChatListener {
    /// Conversation id to match: the active manager's raw identity.
    filter: Option<String>,
}

impl ChatListener {
    pub(crate) fn new() -> Self {
        Self { filter: None }
    }

    /// Recompute the filter for a newly selected manager.
    ///
    /// A transient "no manager" state leaves the previous filter in place,
    /// mirroring the conservative manager-retention policy.
    pub(crate) fn retarget(&mut self, active: Option<&ParticipantId>) {
        if let Some(manager) = active
            && self.filter.as_deref() != Some(manager.name())
        {
            self.filter = Some(manager.name().to_string());
        }
    }

    /// Whether an inbound message matches the current filter.
    pub(crate) fn matches(&self, msg: &AclMessage) -> bool {
        self.filter.as_deref() == Some(msg.conversation_id.as_str())
    }

    /// Forward a matching message to the display surface.
    ///
    /// Inform messages become spoken lines attributed to the sender's
    /// display name; anything else on this stream is unexpected.
    pub(crate) fn handle(&self, msg: &AclMessage) -> Option<ClientAction> {
        if msg.performative == Performative::Inform {
            Some(ClientAction::Spoken {
                speaker: msg.sender.local_name().to_string(),
                sentence: msg.content_str().into_owned(),
            })
        } else {
            crate::client::warn_unexpected(msg);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(name: &str) -> ParticipantId {
        ParticipantId::new(name)
    }

    fn utterance(conversation_id: &str) -> AclMessage {
        AclMessage::inform(id("bob@p"), vec![id("alice@p")], conversation_id, b"hi".to_vec())
    }

    #[test]
    fn filter_is_keyed_on_raw_manager_identity() {
        let mut listener = ChatListener::new();
        listener.retarget(Some(&id("m1@p")));

        // The filter is the manager's full name, not a generated id.
        assert!(listener.matches(&utterance("m1@p")));
        assert!(!listener.matches(&utterance("C-alice")));
    }

    #[test]
    fn no_filter_matches_nothing() {
        let listener = ChatListener::new();
        assert!(!listener.matches(&utterance("m1@p")));
    }

    #[test]
    fn retarget_follows_manager_change() {
        let mut listener = ChatListener::new();
        listener.retarget(Some(&id("m1@p")));
        listener.retarget(Some(&id("m2@p")));

        assert!(!listener.matches(&utterance("m1@p")));
        assert!(listener.matches(&utterance("m2@p")));
    }

    #[test]
    fn transient_no_manager_keeps_previous_filter() {
        let mut listener = ChatListener::new();
        listener.retarget(Some(&id("m1@p")));
        listener.retarget(None);
        assert!(listener.matches(&utterance("m1@p")));
    }

    #[test]
    fn inform_becomes_spoken_with_local_name() {
        let listener = ChatListener::new();
        let action = listener.handle(&utterance("m1@p"));
        assert_eq!(
            action,
            Some(ClientAction::Spoken { speaker: "bob".into(), sentence: "hi".into() })
        );
    }

    #[test]
    fn non_inform_on_chat_stream_is_dropped() {
        let listener = ChatListener::new();
        let mut msg = utterance("m1@p");
        msg.performative = Performative::Failure;
        assert_eq!(listener.handle(&msg), None);
    }
}
