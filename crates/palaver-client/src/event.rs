//! Client events and actions.

use palaver_proto::{AclMessage, ParticipantId};

/// Events the caller feeds into the client.
///
/// The caller is responsible for:
/// - Querying the directory service periodically and reporting the result
/// - Receiving messages from the channel and forwarding them
/// - Forwarding user intents (a spoken sentence)
#[derive(Debug, Clone)]
pub enum ClientEvent {
    /// Result of a directory lookup for actors advertising the manager
    /// role. Possibly empty; a failed lookup produces no event at all.
    DirectoryUpdate {
        /// Actors currently advertising the manager capability.
        candidates: Vec<ParticipantId>,
    },

    /// Message received from the channel.
    MessageReceived(AclMessage),

    /// The user spoke a sentence; fan it out to the current participants.
    Speak {
        /// Literal sentence text.
        sentence: String,
    },
}

/// Actions the client produces for the caller to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientAction {
    /// Send a message over the channel. Fire-and-forget; the client never
    /// retries a failed send.
    Send(AclMessage),

    /// The participant roster changed; update the display surface.
    ParticipantsChanged {
        /// Display names in sorted order.
        names: Vec<String>,
    },

    /// A sentence was spoken; show it on the display surface.
    Spoken {
        /// Display name of the speaker.
        speaker: String,
        /// Sentence text.
        sentence: String,
    },
}
