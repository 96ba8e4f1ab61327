//! Stable participant identity.
//!
//! The chat platform resolves messages to an opaque handle (for Discord,
//! `name#discriminator`). The engine never interprets it; it is only a
//! unique, immutable key into the roster.

use serde::{Deserialize, Serialize};

/// Opaque chat-platform handle for a participant.
///
/// Unique across the roster and immutable after registration. Compared
/// byte-for-byte; the engine assigns no structure to the contents.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerIdentity(String);

impl PlayerIdentity {
    /// Wrap a raw platform handle.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The raw handle.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PlayerIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerIdentity {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl AsRef<str> for PlayerIdentity {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_equality_is_exact() {
        assert_eq!(PlayerIdentity::new("ash#1234"), "ash#1234".into());
        assert_ne!(PlayerIdentity::new("ash#1234"), "Ash#1234".into());
    }

    #[test]
    fn test_identity_serializes_transparently() {
        let id = PlayerIdentity::new("ash#1234");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"ash#1234\"");

        let back: PlayerIdentity = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
