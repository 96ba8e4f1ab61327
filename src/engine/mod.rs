//! The game engine: every mutating operation behind one gate.
//!
//! ## Concurrency discipline
//!
//! The roster is the only shared mutable state in the process. One
//! `tokio::sync::Mutex` guards it, and every operation follows the same
//! critical section: lock, mutate, persist the whole document, unlock.
//! Two confirmations racing on the same snapshot could otherwise both
//! relink from a stale hunter and lose one rewire.
//!
//! Evidence bytes are written outside the gate, since artifact storage is the
//! one high-latency I/O, and only the resulting handle is recorded under
//! it.
//!
//! ## Authorization
//!
//! Privileged operations (`start_game`, `confirm_kill`, `clear_submission`,
//! `remove_player`, `dump`) take the presented secret as an argument and
//! check it before touching state. The configured secret never appears in
//! logs or errors.

pub mod events;
pub mod ports;

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::core::config::{AdminSecret, Config};
use crate::core::identity::PlayerIdentity;
use crate::core::player::{GamePhase, Player};
use crate::core::rng::GameRng;
use crate::error::{Error, StoreError};
use crate::evidence::{Attachment, EvidenceStore};
use crate::ring::{self, Relink};
use crate::store::{FileStore, Roster};

pub use events::{Announcement, Elimination, ReviewPost};
pub use ports::{DeliveryError, Messenger};

/// Everything the gate protects.
struct GameState {
    roster: Roster,
    store: FileStore,
    rng: GameRng,
}

impl GameState {
    async fn persist(&self) -> Result<(), StoreError> {
        self.store.save(&self.roster).await
    }
}

struct EngineInner {
    gate: Mutex<GameState>,
    evidence: EvidenceStore,
    secret: AdminSecret,
}

/// The game-state engine. Cheap to clone; all clones share the gate.
#[derive(Clone)]
pub struct GameEngine {
    inner: Arc<EngineInner>,
}

impl GameEngine {
    /// Assemble an engine from its parts. Tests use this with a seeded RNG
    /// and temp paths; production goes through [`GameEngine::load`].
    #[must_use]
    pub fn new(
        roster: Roster,
        store: FileStore,
        evidence: EvidenceStore,
        secret: AdminSecret,
        rng: GameRng,
    ) -> Self {
        Self {
            inner: Arc::new(EngineInner {
                gate: Mutex::new(GameState { roster, store, rng }),
                evidence,
                secret,
            }),
        }
    }

    /// Load the engine from configuration: read the store document (empty
    /// roster if absent) and seed the RNG from entropy.
    pub async fn load(config: &Config) -> Result<Self, Error> {
        let store = FileStore::new(&config.store_path);
        let roster = store.load().await?;
        let rng = GameRng::from_entropy();
        tracing::info!(
            players = roster.len(),
            phase = %roster.phase(),
            rng_seed = rng.seed(),
            "engine loaded"
        );

        Ok(Self::new(
            roster,
            store,
            EvidenceStore::new(&config.evidence_dir),
            config.admin_secret.clone(),
            rng,
        ))
    }

    fn authorize(&self, presented: &str) -> Result<(), Error> {
        if self.inner.secret.verify(presented) {
            Ok(())
        } else {
            Err(Error::Unauthorized)
        }
    }

    /// Register a new player. Registration phase only.
    pub async fn register(
        &self,
        identity: PlayerIdentity,
        display_name: impl Into<String>,
    ) -> Result<Player, Error> {
        let mut state = self.inner.gate.lock().await;
        let player = state.roster.register(identity, display_name)?.clone();
        state.persist().await?;

        tracing::info!(identity = %player.identity, name = %player.display_name, "registered new player");
        Ok(player)
    }

    /// Build the target ring over alive players, or destructively reshuffle
    /// it if the game is already active. Returns the ring size.
    pub async fn start_game(&self, secret: &str) -> Result<usize, Error> {
        self.authorize(secret)?;

        let mut state = self.inner.gate.lock().await;
        let reshuffle = state.roster.phase() == GamePhase::Active;
        let GameState { roster, rng, .. } = &mut *state;
        ring::build(roster, rng)?;
        state.persist().await?;

        let alive = state.roster.alive_count();
        tracing::info!(players = alive, reshuffle, "target ring built");
        Ok(alive)
    }

    /// Record a kill submission.
    ///
    /// Each image-like attachment is stored and overwrites the pending
    /// handle in turn (last one wins); one review post per stored artifact
    /// is returned for the dispatcher to forward.
    pub async fn submit_kill(
        &self,
        identity: &PlayerIdentity,
        attachments: &[Attachment],
    ) -> Result<Vec<ReviewPost>, Error> {
        let images: Vec<&Attachment> = attachments.iter().filter(|a| a.is_image()).collect();
        if images.is_empty() {
            return Err(Error::NoEvidence);
        }

        // Fail fast before touching the disk; checked again when recording.
        {
            let state = self.inner.gate.lock().await;
            match state.roster.get(identity) {
                Some(player) if player.is_alive() => {}
                _ => {
                    return Err(Error::NotEligible {
                        identity: identity.clone(),
                    })
                }
            }
        }

        let mut stored = Vec::with_capacity(images.len());
        for attachment in images {
            stored.push(self.inner.evidence.save(attachment).await?);
        }

        let mut state = self.inner.gate.lock().await;
        let eligible = matches!(state.roster.get(identity), Some(p) if p.is_alive());
        if !eligible {
            // Submitter vanished or died while the artifacts were being
            // written; drop them again.
            drop(state);
            for path in &stored {
                let _ = self.inner.evidence.remove(path).await;
            }
            return Err(Error::NotEligible {
                identity: identity.clone(),
            });
        }

        let player = state
            .roster
            .get_mut(identity)
            .expect("eligibility checked above");
        for path in &stored {
            player.pending_submission = Some(path.clone());
        }
        let target = player.target_identity.clone();
        state.persist().await?;
        drop(state);

        tracing::info!(
            identity = %identity,
            artifacts = stored.len(),
            "kill submission recorded"
        );

        Ok(stored
            .into_iter()
            .map(|evidence| ReviewPost {
                submitter: identity.clone(),
                target: target.clone(),
                evidence,
            })
            .collect())
    }

    /// Confirm a kill: mark the victim dead, relink the ring, persist, and
    /// return the announcement payload.
    ///
    /// Succeeds whether or not an alive hunter is found; an elimination
    /// can be admin-initiated. The victim's pending artifact, if any, rides
    /// along in the announcement; the dispatcher calls
    /// [`GameEngine::resolve_confirmed_submission`] after delivering it.
    pub async fn confirm_kill(
        &self,
        secret: &str,
        victim: &PlayerIdentity,
    ) -> Result<Elimination, Error> {
        self.authorize(secret)?;

        let mut state = self.inner.gate.lock().await;
        let Some(player) = state.roster.get_mut(victim) else {
            return Err(Error::UnknownPlayer {
                identity: victim.clone(),
            });
        };
        let victim_name = player.display_name.clone();
        player.mark_dead();

        let relink = ring::relink_on_elimination(&mut state.roster, victim);
        state.persist().await?;
        let evidence = state
            .roster
            .get(victim)
            .and_then(|p| p.pending_submission.clone());
        drop(state);

        match &relink {
            Relink::Relinked { killer } => {
                tracing::info!(victim = %victim, killer = %killer, "player eliminated");
            }
            Relink::NoKiller => {
                tracing::info!(victim = %victim, "player eliminated (no killer found)");
            }
        }

        Ok(Elimination {
            announcement: Announcement {
                victim: victim.clone(),
                victim_name,
                evidence,
            },
            relink,
        })
    }

    /// Consume a confirmed kill's artifact after the announcement went out:
    /// delete the file, clear the handle, persist again.
    pub async fn resolve_confirmed_submission(
        &self,
        victim: &PlayerIdentity,
    ) -> Result<(), Error> {
        let cleared = self.discard_artifact(victim).await?;
        if let Some(path) = cleared {
            tracing::info!(victim = %victim, path = %path.display(), "consumed kill evidence");
        }
        Ok(())
    }

    /// Discard a pending submission without confirming a kill. Returns the
    /// removed artifact path, or `None` if there was nothing pending.
    pub async fn clear_submission(
        &self,
        secret: &str,
        identity: &PlayerIdentity,
    ) -> Result<Option<PathBuf>, Error> {
        self.authorize(secret)?;

        let cleared = self.discard_artifact(identity).await?;
        if let Some(path) = &cleared {
            tracing::info!(identity = %identity, path = %path.display(), "cleared pending submission");
        }
        Ok(cleared)
    }

    /// Delete the artifact file, then null the handle and persist. The file
    /// goes first so a dangling handle can heal on retry; the store is only
    /// rewritten once the artifact is really gone.
    async fn discard_artifact(
        &self,
        identity: &PlayerIdentity,
    ) -> Result<Option<PathBuf>, Error> {
        let path = {
            let state = self.inner.gate.lock().await;
            let Some(player) = state.roster.get(identity) else {
                return Err(Error::UnknownPlayer {
                    identity: identity.clone(),
                });
            };
            player.pending_submission.clone()
        };
        let Some(path) = path else {
            return Ok(None);
        };

        self.inner.evidence.remove(&path).await?;

        let mut state = self.inner.gate.lock().await;
        let still_present = match state.roster.get_mut(identity) {
            Some(player) => {
                player.pending_submission = None;
                true
            }
            None => false,
        };
        if still_present {
            state.persist().await?;
        }
        Ok(Some(path))
    }

    /// Remove a player record outright.
    ///
    /// During an active game the ring is first relinked exactly like an
    /// elimination with no kill photo, so the cycle survives the removal.
    /// Any pending artifact is discarded. No announcement is emitted.
    pub async fn remove_player(
        &self,
        secret: &str,
        identity: &PlayerIdentity,
    ) -> Result<Player, Error> {
        self.authorize(secret)?;

        let mut state = self.inner.gate.lock().await;
        if !state.roster.contains(identity) {
            return Err(Error::UnknownPlayer {
                identity: identity.clone(),
            });
        }

        if state.roster.phase() == GamePhase::Active {
            ring::relink_on_elimination(&mut state.roster, identity);
        }
        let removed = state
            .roster
            .remove(identity)
            .expect("presence checked above");
        state.persist().await?;
        drop(state);

        if let Some(path) = &removed.pending_submission {
            if let Err(error) = self.inner.evidence.remove(path).await {
                tracing::warn!(identity = %identity, %error, "orphaned evidence after removal");
            }
        }

        tracing::info!(identity = %identity, name = %removed.display_name, "removed player record");
        Ok(removed)
    }

    /// The whole store as pretty-printed JSON. Debug affordance.
    pub async fn dump(&self, secret: &str) -> Result<String, Error> {
        self.authorize(secret)?;

        let state = self.inner.gate.lock().await;
        let text = serde_json::to_string_pretty(state.roster.players())
            .map_err(StoreError::Encode)?;
        Ok(text)
    }

    /// Read-only copy of the roster, for listings and tests.
    pub async fn roster_snapshot(&self) -> Vec<Player> {
        self.inner.gate.lock().await.roster.players().to_vec()
    }
}
