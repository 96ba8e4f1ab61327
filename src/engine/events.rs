//! Outbound payloads produced by engine operations.
//!
//! The engine never talks to the chat platform; it returns these values
//! and the dispatcher delivers them through the [`Messenger`] port.
//!
//! [`Messenger`]: super::ports::Messenger

use std::path::PathBuf;

use crate::core::identity::PlayerIdentity;
use crate::ring::Relink;

/// A kill submission forwarded to the moderation channel for review.
#[derive(Clone, Debug)]
pub struct ReviewPost {
    /// Who submitted the kill.
    pub submitter: PlayerIdentity,
    /// Who the submitter is currently hunting (context for reviewers).
    pub target: Option<PlayerIdentity>,
    /// Stored artifact to attach.
    pub evidence: PathBuf,
}

impl ReviewPost {
    /// Moderation-channel text.
    #[must_use]
    pub fn message(&self) -> String {
        match &self.target {
            Some(target) => {
                format!("Kill submission from {} targeting {}", self.submitter, target)
            }
            None => format!("Kill submission from {} (no target assigned)", self.submitter),
        }
    }
}

/// The public post announcing a confirmed elimination.
#[derive(Clone, Debug)]
pub struct Announcement {
    pub victim: PlayerIdentity,
    pub victim_name: String,
    /// Kill photo to attach, when the victim had a pending submission.
    pub evidence: Option<PathBuf>,
}

impl Announcement {
    /// Public-channel text.
    #[must_use]
    pub fn message(&self) -> String {
        format!("**{}** has been pegged! @{}", self.victim_name, self.victim)
    }
}

/// Result of a confirmed elimination.
#[derive(Clone, Debug)]
pub struct Elimination {
    pub announcement: Announcement,
    /// Whether a hunter inherited the victim's target. Messaging only;
    /// the elimination succeeds either way.
    pub relink: Relink,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_announcement_message() {
        let announcement = Announcement {
            victim: PlayerIdentity::new("ash#1234"),
            victim_name: "Ash Williams".to_string(),
            evidence: None,
        };
        assert_eq!(
            announcement.message(),
            "**Ash Williams** has been pegged! @ash#1234"
        );
    }

    #[test]
    fn test_review_post_message_includes_target() {
        let post = ReviewPost {
            submitter: PlayerIdentity::new("ash#1234"),
            target: Some(PlayerIdentity::new("kelly#5678")),
            evidence: PathBuf::from("evidence/proof.png"),
        };
        assert_eq!(
            post.message(),
            "Kill submission from ash#1234 targeting kelly#5678"
        );
    }
}
