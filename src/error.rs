//! Error taxonomy for engine operations.
//!
//! Three families share one enum:
//!
//! - **Authorization**: a privileged command presented the wrong secret.
//!   Reported privately; the presented value is never logged or echoed.
//! - **Validation**: the command was well-formed but impossible in the
//!   current game state. No state change has happened.
//! - **Resource**: store or evidence I/O failed. State that was already
//!   persisted before the failure is not rolled back.
//!
//! Transport delivery failures are a separate type ([`DeliveryError`]) owned
//! by the `Messenger` port, because delivery is best-effort by contract.
//!
//! [`DeliveryError`]: crate::engine::ports::DeliveryError

use std::path::PathBuf;

use thiserror::Error;

use crate::core::identity::PlayerIdentity;

/// Any failure an engine operation can report to a caller.
#[derive(Debug, Error)]
pub enum Error {
    /// A privileged command presented a secret that does not match.
    #[error("invalid admin secret")]
    Unauthorized,

    /// Registration (or pre-start removal) attempted after targets exist.
    #[error("the game has already started")]
    GameAlreadyStarted,

    /// The identity is already present in the roster.
    #[error("{identity} is already registered")]
    AlreadyRegistered { identity: PlayerIdentity },

    /// No player record with this identity exists.
    #[error("no player registered as {identity}")]
    UnknownPlayer { identity: PlayerIdentity },

    /// The caller must be a registered, alive player for this operation.
    #[error("{identity} is not an alive registered player")]
    NotEligible { identity: PlayerIdentity },

    /// Ring construction needs at least two alive players; a single-player
    /// ring would be a self-loop.
    #[error("need at least 2 alive players to build a target ring, have {alive}")]
    RosterTooSmall { alive: usize },

    /// A kill submission carried no image-like attachment.
    #[error("no image attachment in submission")]
    NoEvidence,

    /// A recognized command with arguments that could not be parsed.
    #[error("malformed command, usage: {usage}")]
    MalformedCommand { usage: &'static str },

    /// Player store I/O or encoding failure.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Evidence artifact I/O failure.
    #[error(transparent)]
    Evidence(#[from] EvidenceError),
}

impl Error {
    /// True for errors the caller can fix by changing the command, as
    /// opposed to authorization or infrastructure failures.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::GameAlreadyStarted
                | Self::AlreadyRegistered { .. }
                | Self::UnknownPlayer { .. }
                | Self::NotEligible { .. }
                | Self::RosterTooSmall { .. }
                | Self::NoEvidence
                | Self::MalformedCommand { .. }
        )
    }
}

/// Player store persistence failure.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading the store document failed for a reason other than absence.
    #[error("failed to read store at {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Writing or renaming the store document failed.
    #[error("failed to write store at {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Encoding the roster to JSON failed.
    #[error("failed to encode store: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Evidence artifact storage failure.
#[derive(Debug, Error)]
pub enum EvidenceError {
    /// Writing the artifact bytes failed.
    #[error("failed to store evidence at {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Removing a consumed artifact failed.
    #[error("failed to remove evidence at {path}: {source}")]
    Remove {
        path: PathBuf,
        source: std::io::Error,
    },
}
