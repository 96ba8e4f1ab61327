//! Kill-photo attachments and durable artifact storage.
//!
//! A submission carries zero or more attachments as the transport
//! downloaded them. Only image-like attachments count as evidence:
//! declared content type starting `image/`, or a recognized image filename
//! suffix. Stored artifacts live as plain files in the evidence directory;
//! the roster records the path as the pending-submission handle.
//!
//! Artifact writes are the one high-latency I/O in the system and happen
//! outside the store gate; only the resulting handle is recorded under it.

use std::path::{Path, PathBuf};

use tokio::fs;

use crate::error::EvidenceError;

/// Filename suffixes accepted as images when no content type is declared.
const IMAGE_SUFFIXES: [&str; 5] = [".png", ".jpg", ".jpeg", ".gif", ".webp"];

/// One attachment as received from the chat transport.
#[derive(Clone, Debug)]
pub struct Attachment {
    /// Filename as sent by the platform. Untrusted; sanitized on store.
    pub filename: String,
    /// Declared MIME type, when the platform provides one.
    pub content_type: Option<String>,
    /// Raw bytes, already downloaded by the transport.
    pub bytes: Vec<u8>,
}

impl Attachment {
    /// Whether this attachment counts as kill evidence.
    #[must_use]
    pub fn is_image(&self) -> bool {
        if let Some(content_type) = &self.content_type {
            if content_type.starts_with("image/") {
                return true;
            }
        }

        let lower = self.filename.to_lowercase();
        IMAGE_SUFFIXES.iter().any(|suffix| lower.ends_with(suffix))
    }
}

/// Directory-backed artifact storage.
#[derive(Clone, Debug)]
pub struct EvidenceStore {
    dir: PathBuf,
}

impl EvidenceStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write an attachment's bytes into the evidence directory and return
    /// the stored path. An existing artifact with the same filename is
    /// overwritten, matching the last-one-wins submission policy.
    pub async fn save(&self, attachment: &Attachment) -> Result<PathBuf, EvidenceError> {
        fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| EvidenceError::Write {
                path: self.dir.clone(),
                source,
            })?;

        let path = self.dir.join(sanitize_filename(&attachment.filename));
        fs::write(&path, &attachment.bytes)
            .await
            .map_err(|source| EvidenceError::Write {
                path: path.clone(),
                source,
            })?;

        Ok(path)
    }

    /// Delete a consumed artifact. An already-missing file is fine.
    pub async fn remove(&self, path: &Path) -> Result<(), EvidenceError> {
        match fs::remove_file(path).await {
            Ok(()) => Ok(()),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(EvidenceError::Remove {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

/// Reduce an untrusted filename to its final component so a submission
/// cannot escape the evidence directory.
fn sanitize_filename(raw: &str) -> String {
    let name = raw
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(raw)
        .trim_matches('.');

    if name.is_empty() {
        "evidence.bin".to_string()
    } else {
        name.to_string()
    }
}
