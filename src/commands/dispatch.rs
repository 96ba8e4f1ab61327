//! Command dispatch: engine results in, outbound messages out.
//!
//! One handler invocation per inbound message. The dispatcher never
//! returns errors to its caller: every outcome, success or failure,
//! becomes a private reply, a review post, or an announcement, and
//! delivery failures are logged and swallowed (best-effort by contract).

use std::sync::Arc;

use crate::core::identity::PlayerIdentity;
use crate::engine::{GameEngine, Messenger};
use crate::error::Error;
use crate::evidence::Attachment;

use super::Command;

/// Rules text sent to a freshly registered player.
const RULES_TEXT: &str = "Find your target, tag them in person, and photograph it. \
Submit the photo with !kill. An admin confirms every elimination, and you inherit \
your victim's target. Last one standing wins.";

/// Per-message context the transport resolved for us.
#[derive(Clone, Debug)]
pub struct CommandContext {
    /// Who sent the message.
    pub sender: PlayerIdentity,
    /// Downloaded attachments, in message order.
    pub attachments: Vec<Attachment>,
}

impl CommandContext {
    #[must_use]
    pub fn new(sender: PlayerIdentity) -> Self {
        Self {
            sender,
            attachments: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_attachments(mut self, attachments: Vec<Attachment>) -> Self {
        self.attachments = attachments;
        self
    }
}

/// Routes parsed commands into the engine and delivers the results.
pub struct Dispatcher {
    engine: GameEngine,
    messenger: Arc<dyn Messenger>,
}

impl Dispatcher {
    #[must_use]
    pub fn new(engine: GameEngine, messenger: Arc<dyn Messenger>) -> Self {
        Self { engine, messenger }
    }

    /// Handle one inbound chat message. Non-commands are ignored.
    pub async fn handle_message(&self, ctx: CommandContext, text: &str) {
        let Some(parsed) = Command::parse(text) else {
            return;
        };

        match parsed {
            Ok(command) => self.handle_command(ctx, command).await,
            Err(error) => self.reply(&ctx.sender, &render_error(&error)).await,
        }
    }

    async fn handle_command(&self, ctx: CommandContext, command: Command) {
        match command {
            Command::Join { full_name } => {
                match self.engine.register(ctx.sender.clone(), full_name).await {
                    Ok(player) => {
                        let text = format!(
                            "You are registered!\n{RULES_TEXT}\nYour full name: {}",
                            player.display_name
                        );
                        self.reply(&ctx.sender, &text).await;
                    }
                    Err(error) => self.reply_error(&ctx.sender, &error).await,
                }
            }

            Command::Start { secret } => match self.engine.start_game(&secret).await {
                Ok(players) => {
                    let text = format!("Target ring built over {players} players.");
                    self.reply(&ctx.sender, &text).await;
                }
                Err(error) => self.reply_error(&ctx.sender, &error).await,
            },

            Command::Kill => {
                match self.engine.submit_kill(&ctx.sender, &ctx.attachments).await {
                    Ok(posts) => {
                        self.reply(&ctx.sender, "Submission received. Processing...")
                            .await;
                        for post in posts {
                            if let Err(error) = self.messenger.post_review(&post).await {
                                tracing::warn!(%error, submitter = %post.submitter, "failed to forward kill submission");
                                self.reply(
                                    &ctx.sender,
                                    "Couldn't forward your image. Notify an admin.",
                                )
                                .await;
                            }
                        }
                    }
                    Err(error) => self.reply_error(&ctx.sender, &error).await,
                }
            }

            Command::ConfirmKill { secret, victim } => {
                match self.engine.confirm_kill(&secret, &victim).await {
                    Ok(elimination) => {
                        match self
                            .messenger
                            .post_announcement(&elimination.announcement)
                            .await
                        {
                            Ok(()) => {
                                if let Err(error) =
                                    self.engine.resolve_confirmed_submission(&victim).await
                                {
                                    tracing::warn!(%error, %victim, "failed to consume kill evidence");
                                }
                            }
                            Err(error) => {
                                // The elimination is already persisted;
                                // only the announcement is lost.
                                tracing::warn!(%error, %victim, "failed to announce elimination");
                                self.reply(
                                    &ctx.sender,
                                    "Kill confirmed but couldn't announce it publicly.",
                                )
                                .await;
                            }
                        }
                    }
                    Err(error) => self.reply_error(&ctx.sender, &error).await,
                }
            }

            Command::ClearKill { secret, identity } => {
                match self.engine.clear_submission(&secret, &identity).await {
                    Ok(Some(_)) => {
                        let text = format!("Cleared pending submission for {identity}.");
                        self.reply(&ctx.sender, &text).await;
                    }
                    Ok(None) => {
                        let text = format!("{identity} has no pending submission.");
                        self.reply(&ctx.sender, &text).await;
                    }
                    Err(error) => self.reply_error(&ctx.sender, &error).await,
                }
            }

            Command::DeleteUser { secret, identity } => {
                match self.engine.remove_player(&secret, &identity).await {
                    Ok(removed) => {
                        let text = format!("Removed {}.", removed.display_name);
                        self.reply(&ctx.sender, &text).await;
                    }
                    Err(error) => self.reply_error(&ctx.sender, &error).await,
                }
            }

            Command::Dump { secret } => match self.engine.dump(&secret).await {
                Ok(document) => {
                    let text = format!("```json\n{document}\n```");
                    self.reply(&ctx.sender, &text).await;
                }
                Err(error) => self.reply_error(&ctx.sender, &error).await,
            },
        }
    }

    async fn reply_error(&self, to: &PlayerIdentity, error: &Error) {
        if !error.is_validation() && !matches!(error, Error::Unauthorized) {
            tracing::warn!(%error, sender = %to, "command failed");
        }
        self.reply(to, &render_error(error)).await;
    }

    async fn reply(&self, to: &PlayerIdentity, text: &str) {
        if let Err(error) = self.messenger.reply_private(to, text).await {
            tracing::warn!(%error, recipient = %to, "failed to deliver private reply");
        }
    }
}

/// User-facing text for each failure. Never echoes a presented secret.
fn render_error(error: &Error) -> String {
    match error {
        Error::Unauthorized => "Invalid password.".to_string(),
        Error::GameAlreadyStarted => {
            "The game has already started, no more registrations.".to_string()
        }
        Error::AlreadyRegistered { .. } => "You are already registered!".to_string(),
        Error::UnknownPlayer { .. } => "That player doesn't exist.".to_string(),
        Error::NotEligible { .. } => {
            "Only registered, alive players can do that.".to_string()
        }
        Error::RosterTooSmall { alive } => {
            format!("Need at least 2 alive players to build the ring (have {alive}).")
        }
        Error::NoEvidence => "No image attached.".to_string(),
        Error::MalformedCommand { usage } => format!("Format: `{usage}`"),
        Error::Store(_) | Error::Evidence(_) => {
            "Something went wrong on our side. Try again.".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_error_hides_internals() {
        let err = Error::Store(crate::error::StoreError::Encode(
            serde_json::from_str::<serde_json::Value>("{").unwrap_err(),
        ));
        assert_eq!(render_error(&err), "Something went wrong on our side. Try again.");
    }

    #[test]
    fn test_render_unauthorized_never_echoes_secret() {
        assert_eq!(render_error(&Error::Unauthorized), "Invalid password.");
    }
}
