//! The player store: an identity-unique roster of player records.
//!
//! The `Roster` owns all player records and provides lookup by identity.
//! It enforces the two registration rules (identity uniqueness, phase
//! gating) and derives the game phase. Durability lives in [`file`];
//! serializing a roster is serializing its player list.
//!
//! All mutation happens through the engine's concurrency gate; the roster
//! itself is a plain single-threaded structure.

pub mod file;

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::core::identity::PlayerIdentity;
use crate::core::player::{GamePhase, Player};
use crate::error::Error;

pub use file::FileStore;

/// A loaded store document repeated an identity.
#[derive(Debug, Error)]
#[error("duplicate identity in store document: {0}")]
pub struct DuplicateIdentity(pub PlayerIdentity);

/// Ordered collection of player records with an identity index.
///
/// Record order is insertion order and is preserved across save/load; the
/// index is rebuilt on load and on removal.
#[derive(Clone, Debug, Default)]
pub struct Roster {
    players: Vec<Player>,
    index: FxHashMap<PlayerIdentity, usize>,
}

impl Roster {
    /// Create an empty roster.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a roster from loaded records, rejecting duplicate identities.
    pub fn from_players(players: Vec<Player>) -> Result<Self, DuplicateIdentity> {
        let mut index = FxHashMap::default();
        for (i, player) in players.iter().enumerate() {
            if index.insert(player.identity.clone(), i).is_some() {
                return Err(DuplicateIdentity(player.identity.clone()));
            }
        }
        Ok(Self { players, index })
    }

    /// Derived game phase: active once any player has a target.
    #[must_use]
    pub fn phase(&self) -> GamePhase {
        if self.players.iter().any(|p| p.target_identity.is_some()) {
            GamePhase::Active
        } else {
            GamePhase::Registration
        }
    }

    /// Register a new player.
    ///
    /// Fails with [`Error::GameAlreadyStarted`] once the ring exists and
    /// with [`Error::AlreadyRegistered`] on a duplicate identity.
    pub fn register(
        &mut self,
        identity: PlayerIdentity,
        display_name: impl Into<String>,
    ) -> Result<&Player, Error> {
        if self.phase() == GamePhase::Active {
            return Err(Error::GameAlreadyStarted);
        }
        if self.index.contains_key(&identity) {
            return Err(Error::AlreadyRegistered { identity });
        }

        self.index.insert(identity.clone(), self.players.len());
        self.players.push(Player::new(identity, display_name));
        Ok(self.players.last().expect("just pushed"))
    }

    /// Look up a player by identity.
    #[must_use]
    pub fn get(&self, identity: &PlayerIdentity) -> Option<&Player> {
        self.index.get(identity).map(|&i| &self.players[i])
    }

    /// Mutable lookup by identity.
    ///
    /// Callers must not change the record's `identity`; the index is keyed
    /// on it.
    pub fn get_mut(&mut self, identity: &PlayerIdentity) -> Option<&mut Player> {
        self.index.get(identity).map(|&i| &mut self.players[i])
    }

    #[must_use]
    pub fn contains(&self, identity: &PlayerIdentity) -> bool {
        self.index.contains_key(identity)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.players.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// All records, in insertion order. This is the persisted document.
    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Iterate over all players.
    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.players.iter()
    }

    /// Iterate over alive players.
    pub fn alive(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| p.is_alive())
    }

    #[must_use]
    pub fn alive_count(&self) -> usize {
        self.alive().count()
    }

    /// The alive player hunting `victim`, if any.
    ///
    /// This is the relink search: dead players are never considered, and a
    /// player is never their own hunter because the ring has no self-loops.
    #[must_use]
    pub fn hunter_of(&self, victim: &PlayerIdentity) -> Option<&Player> {
        self.alive()
            .find(|p| p.target_identity.as_ref() == Some(victim) && &p.identity != victim)
    }

    /// The last player standing, if the roster is down to one alive player.
    ///
    /// Read-only query; the engine never acts on it.
    #[must_use]
    pub fn sole_survivor(&self) -> Option<&Player> {
        let mut alive = self.alive();
        let first = alive.next()?;
        alive.next().is_none().then_some(first)
    }

    /// Remove a record outright and return it.
    ///
    /// The identity index is rebuilt; callers are responsible for ring
    /// repair when the game is active.
    pub fn remove(&mut self, identity: &PlayerIdentity) -> Option<Player> {
        let i = self.index.remove(identity)?;
        let removed = self.players.remove(i);
        for (j, player) in self.players.iter().enumerate().skip(i) {
            self.index.insert(player.identity.clone(), j);
        }
        Some(removed)
    }
}
