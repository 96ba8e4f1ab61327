//! Process configuration from the environment.
//!
//! The embedding binary calls [`Config::load_dotenv`] then
//! [`Config::from_env`] before accepting any command. A missing admin
//! secret is fatal by contract: there is no unauthenticated mode.
//!
//! | Variable | Default | Meaning |
//! |---|---|---|
//! | `ADMIN_SECRET` | required | shared credential for privileged commands |
//! | `STORE_PATH` | `players.json` | player store document |
//! | `EVIDENCE_DIR` | `evidence` | directory for kill-photo artifacts |
//! | `PROBE_PORT` | `8080` | liveness probe HTTP port |

use std::path::PathBuf;

use thiserror::Error;

/// Shared credential gating privileged operations.
///
/// Deliberately not `Display`; `Debug` is redacted so the value cannot
/// leak through logs or error chains.
#[derive(Clone)]
pub struct AdminSecret(String);

impl AdminSecret {
    #[must_use]
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// Check a presented secret against the configured one.
    #[must_use]
    pub fn verify(&self, presented: &str) -> bool {
        self.0 == presented
    }
}

impl std::fmt::Debug for AdminSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AdminSecret(..)")
    }
}

/// Configuration failure; aborts the process before commands are accepted.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("ADMIN_SECRET is not set; refusing to start without one")]
    MissingAdminSecret,

    #[error("PROBE_PORT is not a port number: {0:?}")]
    InvalidProbePort(String),
}

/// Everything the engine and probe need from the environment.
#[derive(Clone, Debug)]
pub struct Config {
    pub admin_secret: AdminSecret,
    pub store_path: PathBuf,
    pub evidence_dir: PathBuf,
    pub probe_port: u16,
}

impl Config {
    /// Load `.env` from the working directory if present.
    pub fn load_dotenv() {
        let _ = dotenvy::dotenv();
    }

    /// Read configuration from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let admin_secret = std::env::var("ADMIN_SECRET")
            .ok()
            .filter(|s| !s.is_empty())
            .map(AdminSecret::new)
            .ok_or(ConfigError::MissingAdminSecret)?;

        let store_path = std::env::var("STORE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("players.json"));

        let evidence_dir = std::env::var("EVIDENCE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("evidence"));

        let probe_port = match std::env::var("PROBE_PORT") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| ConfigError::InvalidProbePort(raw))?,
            Err(_) => 8080,
        };

        Ok(Self {
            admin_secret,
            store_path,
            evidence_dir,
            probe_port,
        })
    }
}
