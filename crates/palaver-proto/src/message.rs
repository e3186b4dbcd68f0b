//! Addressed protocol messages.

use std::borrow::Cow;

use crate::ParticipantId;

/// Speech-act tag carried by every message.
///
/// `Subscribe` and `Inform` carry the chat protocol; the remaining variants
/// exist so an unexpected performative is a real value rather than a parse
/// failure, and can be logged and dropped at the receiving side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Performative {
    /// Register interest in a notification stream.
    Subscribe,
    /// Convey a statement: a roster delta or a spoken sentence.
    Inform,
    /// Ask the receiver to perform an action.
    Request,
    /// Report that a requested action failed.
    Failure,
    /// Report that a received message could not be interpreted.
    NotUnderstood,
}

/// A point-to-point addressed message.
///
/// Messages are constructed fresh and immutable per send; there is no reused
/// mutable template whose receiver list is toggled in place. Delivery is
/// at-most-once per send with no ordering across distinct senders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AclMessage {
    /// Identity of the sending actor.
    pub sender: ParticipantId,
    /// Identities the message is addressed to. May be empty: the channel
    /// then has nowhere to deliver, which the subscribe handshake exploits
    /// on startup when no manager is known yet.
    pub receivers: Vec<ParticipantId>,
    /// Speech-act tag.
    pub performative: Performative,
    /// Correlation token tying this message to a subscription or chat
    /// stream.
    pub conversation_id: String,
    /// Opaque payload bytes.
    pub content: Vec<u8>,
}

impl AclMessage {
    /// Build a subscribe request on the given conversation id.
    pub fn subscribe(
        sender: ParticipantId,
        receivers: Vec<ParticipantId>,
        conversation_id: impl Into<String>,
    ) -> Self {
        Self {
            sender,
            receivers,
            performative: Performative::Subscribe,
            conversation_id: conversation_id.into(),
            content: Vec::new(),
        }
    }

    /// Build an inform message with the given payload.
    pub fn inform(
        sender: ParticipantId,
        receivers: Vec<ParticipantId>,
        conversation_id: impl Into<String>,
        content: Vec<u8>,
    ) -> Self {
        Self {
            sender,
            receivers,
            performative: Performative::Inform,
            conversation_id: conversation_id.into(),
            content,
        }
    }

    /// Content as UTF-8 text (lossy conversion).
    pub fn content_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscribe_starts_with_empty_content() {
        let msg = AclMessage::subscribe(ParticipantId::new("alice@p"), Vec::new(), "C-alice");
        assert_eq!(msg.performative, Performative::Subscribe);
        assert!(msg.receivers.is_empty());
        assert!(msg.content.is_empty());
    }

    #[test]
    fn content_str_decodes_utf8() {
        let msg = AclMessage::inform(
            ParticipantId::new("alice@p"),
            vec![ParticipantId::new("bob@p")],
            "manager@p",
            b"hello".to_vec(),
        );
        assert_eq!(msg.content_str(), "hello");
    }
}
