//! Player records and the derived game phase.
//!
//! ## Player
//!
//! One record per registered participant, with the exact field shape the
//! store document persists: `{display_name, target_identity, status,
//! identity, pending_submission}`. `target_identity` and
//! `pending_submission` are nullable; `status` only ever moves alive→dead.
//!
//! ## GamePhase
//!
//! There is no stored phase flag. The phase is derived from the roster:
//! the game is active as soon as any player has a target assigned.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::identity::PlayerIdentity;

/// Whether a player is still in the game.
///
/// Monotonic: a dead player never returns to alive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerStatus {
    Alive,
    Dead,
}

/// One registered participant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Human-entered full name, display only, immutable after registration.
    pub display_name: String,

    /// Who this player is hunting; `None` until the ring is built. Frozen
    /// at the moment of death, kept only to donate to the killer.
    pub target_identity: Option<PlayerIdentity>,

    /// Alive or dead.
    pub status: PlayerStatus,

    /// Unique, immutable platform handle.
    pub identity: PlayerIdentity,

    /// Stored evidence artifact awaiting review, if any.
    pub pending_submission: Option<PathBuf>,
}

impl Player {
    /// Create a freshly registered player: alive, no target, no submission.
    #[must_use]
    pub fn new(identity: PlayerIdentity, display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            target_identity: None,
            status: PlayerStatus::Alive,
            identity,
            pending_submission: None,
        }
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.status == PlayerStatus::Alive
    }

    /// Mark this player dead. The target is left frozen in place.
    pub fn mark_dead(&mut self) {
        self.status = PlayerStatus::Dead;
    }
}

/// Game phase, derived from the roster (see [`Roster::phase`]).
///
/// [`Roster::phase`]: crate::store::Roster::phase
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GamePhase {
    /// No targets assigned yet; registration is open.
    Registration,
    /// At least one target is assigned; registration is closed.
    Active,
}

impl std::fmt::Display for GamePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Registration => f.write_str("registration"),
            Self::Active => f.write_str("active"),
        }
    }
}
