//! # manhunt
//!
//! Game-state engine for a chat-run "assassination" game: players register
//! over a group chat, each is secretly assigned the next player in a
//! shuffled ring, kills are claimed with a photo and confirmed by an admin,
//! and every confirmed elimination rewires the ring until one player is
//! left.
//!
//! ## Design Principles
//!
//! 1. **One gate, whole-document persistence**: the roster is the only
//!    shared mutable state. Every mutating operation locks one async
//!    mutex, applies the change, and atomically rewrites the store file.
//!
//! 2. **Transport-agnostic core**: the chat platform appears only as the
//!    opaque identities it resolves and the [`Messenger`] port the
//!    embedding binary implements. Nothing in the engine knows how a
//!    message is sent.
//!
//! 3. **Derived phase, no hidden state**: whether the game is running is
//!    read off the roster itself (anyone with a target ⇒ active), so the
//!    store document is the entire truth.
//!
//! ## Modules
//!
//! - `core`: identities, player records, RNG, configuration
//! - `store`: the roster and its file-backed document
//! - `ring`: target-ring construction, relinking, auditing
//! - `evidence`: kill-photo validation and artifact storage
//! - `engine`: the gated operations and their outbound events
//! - `commands`: text command parsing and dispatch
//! - `probe`: liveness endpoint

pub mod commands;
pub mod core;
pub mod engine;
pub mod error;
pub mod evidence;
pub mod probe;
pub mod ring;
pub mod store;

// Re-export commonly used types
pub use crate::core::{
    AdminSecret, Config, ConfigError, GamePhase, GameRng, Player, PlayerIdentity, PlayerStatus,
};

pub use crate::commands::{Command, CommandContext, Dispatcher};

pub use crate::engine::{
    Announcement, DeliveryError, Elimination, GameEngine, Messenger, ReviewPost,
};

pub use crate::error::{Error, EvidenceError, StoreError};

pub use crate::evidence::{Attachment, EvidenceStore};

pub use crate::ring::{Relink, RingViolation};

pub use crate::store::{FileStore, Roster};
