//! Whole-document persistence for the roster.
//!
//! The store is one JSON array of player records. Every save rewrites the
//! whole document through a temp-file-then-rename so a crash mid-write can
//! never leave a half-mutated roster on disk. A missing or unparsable
//! document loads as an empty roster: the game simply has no players yet.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::fs;

use crate::core::player::Player;
use crate::error::StoreError;

use super::Roster;

/// File-backed roster document.
#[derive(Clone, Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the roster.
    ///
    /// A missing file, invalid JSON, or a document with duplicate
    /// identities all yield an empty roster (with a warning for the latter
    /// two). Any other I/O failure is an error.
    pub async fn load(&self) -> Result<Roster, StoreError> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(source) if source.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no store document, starting empty");
                return Ok(Roster::new());
            }
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let players: Vec<Player> = match serde_json::from_slice(&bytes) {
            Ok(players) => players,
            Err(error) => {
                tracing::warn!(
                    path = %self.path.display(),
                    %error,
                    "store document is not valid JSON, starting empty"
                );
                return Ok(Roster::new());
            }
        };

        match Roster::from_players(players) {
            Ok(roster) => Ok(roster),
            Err(duplicate) => {
                tracing::warn!(
                    path = %self.path.display(),
                    %duplicate,
                    "store document violates identity uniqueness, starting empty"
                );
                Ok(Roster::new())
            }
        }
    }

    /// Persist the roster atomically.
    pub async fn save(&self, roster: &Roster) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(roster.players())?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(|source| StoreError::Write {
                path: self.path.clone(),
                source,
            })?;
        }

        let mut tmp = self.path.as_os_str().to_owned();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, &bytes).await.map_err(|source| StoreError::Write {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &self.path)
            .await
            .map_err(|source| StoreError::Write {
                path: self.path.clone(),
                source,
            })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::identity::PlayerIdentity;

    #[tokio::test]
    async fn test_missing_document_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("players.json"));

        let roster = store.load().await.unwrap();
        assert!(roster.is_empty());
    }

    #[tokio::test]
    async fn test_save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("players.json"));

        let mut roster = Roster::new();
        roster
            .register(PlayerIdentity::new("ash#1"), "Ash Williams")
            .unwrap();
        roster
            .register(PlayerIdentity::new("kelly#2"), "Kelly Maxwell")
            .unwrap();
        store.save(&roster).await.unwrap();

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded.players(), roster.players());
    }

    #[tokio::test]
    async fn test_garbage_document_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("players.json");
        std::fs::write(&path, b"{not json").unwrap();

        let roster = FileStore::new(&path).load().await.unwrap();
        assert!(roster.is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_identities_load_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("players.json");
        let doc = serde_json::json!([
            {
                "display_name": "Ash",
                "target_identity": null,
                "status": "alive",
                "identity": "ash#1",
                "pending_submission": null
            },
            {
                "display_name": "Ash again",
                "target_identity": null,
                "status": "alive",
                "identity": "ash#1",
                "pending_submission": null
            }
        ]);
        std::fs::write(&path, serde_json::to_vec(&doc).unwrap()).unwrap();

        let roster = FileStore::new(&path).load().await.unwrap();
        assert!(roster.is_empty());
    }

    #[tokio::test]
    async fn test_save_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("players.json"));

        store.save(&Roster::new()).await.unwrap();

        let entries: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("players.json")]);
    }
}
