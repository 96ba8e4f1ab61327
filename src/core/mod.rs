//! Core types: identities, player records, RNG, configuration.
//!
//! Everything here is transport-agnostic. The chat platform appears only
//! as the opaque [`PlayerIdentity`] it hands us.

pub mod config;
pub mod identity;
pub mod player;
pub mod rng;

pub use config::{AdminSecret, Config, ConfigError};
pub use identity::PlayerIdentity;
pub use player::{GamePhase, Player, PlayerStatus};
pub use rng::GameRng;
