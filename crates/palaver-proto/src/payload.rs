//! Roster notification payloads.
//!
//! Roster deltas are the structured content carried on a subscription feed:
//! the manager informs each subscriber about participants that joined or
//! left since the last notification. The encoding is CBOR; everything else
//! in the protocol treats the bytes as opaque.

use serde::{Deserialize, Serialize};

use crate::{ParticipantId, error::ProtocolError};

/// A roster change notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RosterDelta {
    /// Participants that joined since the last notification.
    Joined {
        /// Affected identities.
        who: Vec<ParticipantId>,
    },
    /// Participants that left since the last notification.
    Left {
        /// Affected identities.
        who: Vec<ParticipantId>,
    },
}

impl RosterDelta {
    /// Encode to CBOR bytes.
    pub fn encode(&self) -> Result<Vec<u8>, ProtocolError> {
        let mut buf = Vec::new();
        ciborium::into_writer(self, &mut buf)
            .map_err(|e| ProtocolError::Encode { reason: e.to_string() })?;
        Ok(buf)
    }

    /// Decode from CBOR bytes.
    pub fn decode(bytes: &[u8]) -> Result<Self, ProtocolError> {
        ciborium::from_reader(bytes).map_err(|e| ProtocolError::Decode { reason: e.to_string() })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn joined_delta_round_trips() {
        let delta = RosterDelta::Joined {
            who: vec![ParticipantId::new("alice@p"), ParticipantId::new("bob@p")],
        };
        let bytes = delta.encode().unwrap();
        assert_eq!(RosterDelta::decode(&bytes).unwrap(), delta);
    }

    #[test]
    fn garbage_bytes_fail_to_decode() {
        let result = RosterDelta::decode(b"not cbor at all");
        assert!(matches!(result, Err(ProtocolError::Decode { .. })));
    }
}
