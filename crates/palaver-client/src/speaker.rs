//! Utterance fan-out.
//!
//! One invocation per user-initiated "speak" request; there is no
//! continuously scheduled state here. The outgoing message is built fresh
//! each time: the receiver list is a snapshot of the participant set at
//! invocation time (participants that join mid-flight do not receive this
//! particular sentence), and the conversation id is bound to the active
//! manager's raw identity so peers' listeners will match it.

use std::collections::BTreeSet;

use palaver_proto::{AclMessage, ParticipantId};

use crate::event::ClientAction;

/// Fan a spoken sentence out to the current participant snapshot.
///
/// The local echo is emitted before the send so the speaker sees their own
/// line immediately, independent of delivery latency. Exactly one send is
/// produced; a failed send is not retried.
pub(crate) fn broadcast(
    me: &ParticipantId,
    active_manager: Option<&ParticipantId>,
    participants: &BTreeSet<ParticipantId>,
    sentence: &str,
) -> Vec<ClientAction> {
    let receivers: Vec<ParticipantId> = participants.iter().cloned().collect();
    // Before any manager has resolved there is no correlation target; the
    // participant set is necessarily empty then as well.
    let conversation_id = active_manager.map(|m| m.name().to_string()).unwrap_or_default();

    vec![
        ClientAction::Spoken { speaker: me.local_name().to_string(), sentence: sentence.to_string() },
        ClientAction::Send(AclMessage::inform(
            me.clone(),
            receivers,
            conversation_id,
            sentence.as_bytes().to_vec(),
        )),
    ]
}
