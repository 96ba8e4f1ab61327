//! Transport port implemented by the embedding chat integration.
//!
//! Everything platform-specific (identity resolution, attachment
//! downloads, channel routing, message formatting limits) lives behind
//! this trait. Delivery is best-effort: the engine's state changes are
//! never rolled back because a post failed.

use async_trait::async_trait;
use thiserror::Error;

use crate::core::identity::PlayerIdentity;

use super::events::{Announcement, ReviewPost};

/// An outbound send failed. Carries the transport's own description.
#[derive(Debug, Error)]
#[error("outbound delivery failed: {0}")]
pub struct DeliveryError(pub String);

/// Outbound side of the chat transport.
#[async_trait]
pub trait Messenger: Send + Sync {
    /// Send a private reply to one participant.
    async fn reply_private(
        &self,
        to: &PlayerIdentity,
        text: &str,
    ) -> Result<(), DeliveryError>;

    /// Post a kill submission to the moderation channel.
    async fn post_review(&self, post: &ReviewPost) -> Result<(), DeliveryError>;

    /// Post a confirmed elimination to the public channel.
    async fn post_announcement(
        &self,
        announcement: &Announcement,
    ) -> Result<(), DeliveryError>;
}
