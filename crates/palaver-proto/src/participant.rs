//! Participant identity.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identity of a chat participant.
///
/// Wraps the full agent name in `local@platform` form. Identities are
/// compared, ordered, and hashed by the full name; the part before the `@`
/// is the human-facing display name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId {
    name: String,
}

impl ParticipantId {
    /// Create an identity from a full agent name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Full agent name, unique across the platform.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Display name: the portion of the full name before `@`.
    ///
    /// Falls back to the full name when it carries no platform suffix.
    pub fn local_name(&self) -> &str {
        self.name.split('@').next().unwrap_or(&self.name)
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl From<&str> for ParticipantId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_name_strips_platform_suffix() {
        let id = ParticipantId::new("alice@Main-Container");
        assert_eq!(id.local_name(), "alice");
        assert_eq!(id.name(), "alice@Main-Container");
    }

    #[test]
    fn local_name_without_suffix_is_full_name() {
        let id = ParticipantId::new("bob");
        assert_eq!(id.local_name(), "bob");
    }

    #[test]
    fn ordering_follows_full_name() {
        let a = ParticipantId::new("alice@p");
        let b = ParticipantId::new("bob@p");
        assert!(a < b);
    }
}
