//! The text command surface.
//!
//! Commands are `!`-prefixed chat messages. Parsing is deliberately
//! forgiving about what it ignores: text without the prefix, or with an
//! unrecognized command word, is simply not a command (`None`). A
//! recognized command with unusable arguments is an error the dispatcher
//! reports back privately.
//!
//! Secrets are single whitespace-free tokens; identities may not contain
//! whitespace either (platform handles never do).

pub mod dispatch;

use crate::core::identity::PlayerIdentity;
use crate::error::Error;

pub use dispatch::{CommandContext, Dispatcher};

/// A parsed inbound command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// `!join <full name>`: register the sender.
    Join { full_name: String },
    /// `!start <secret>`: build or destructively reshuffle the ring.
    Start { secret: String },
    /// `!kill`: submit the attached kill evidence.
    Kill,
    /// `!confirm_kill <secret> <identity>`: eliminate, relink, announce.
    ConfirmKill {
        secret: String,
        victim: PlayerIdentity,
    },
    /// `!clear_kill <secret> <identity>`: discard a pending submission.
    ClearKill {
        secret: String,
        identity: PlayerIdentity,
    },
    /// `!delete_user <secret> <identity>`: remove a player record.
    DeleteUser {
        secret: String,
        identity: PlayerIdentity,
    },
    /// `!dump <secret>`: the full store as JSON text.
    Dump { secret: String },
}

impl Command {
    /// Parse a chat message. `None` means "not a command, ignore it".
    pub fn parse(text: &str) -> Option<Result<Self, Error>> {
        let body = text.trim().strip_prefix('!')?;
        let (word, rest) = match body.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (body, ""),
        };

        let parsed = match word {
            "join" => Self::parse_join(rest),
            "start" => Self::parse_secret_only(rest, "!start <secret>")
                .map(|secret| Self::Start { secret }),
            "kill" => Ok(Self::Kill),
            "confirm_kill" => Self::parse_secret_and_identity(rest, "!confirm_kill <secret> <identity>")
                .map(|(secret, victim)| Self::ConfirmKill { secret, victim }),
            "clear_kill" => Self::parse_secret_and_identity(rest, "!clear_kill <secret> <identity>")
                .map(|(secret, identity)| Self::ClearKill { secret, identity }),
            "delete_user" => Self::parse_secret_and_identity(rest, "!delete_user <secret> <identity>")
                .map(|(secret, identity)| Self::DeleteUser { secret, identity }),
            "dump" => Self::parse_secret_only(rest, "!dump <secret>")
                .map(|secret| Self::Dump { secret }),
            _ => return None,
        };

        Some(parsed)
    }

    fn parse_join(rest: &str) -> Result<Self, Error> {
        if rest.is_empty() {
            return Err(Error::MalformedCommand {
                usage: "!join <full name>",
            });
        }
        Ok(Self::Join {
            full_name: rest.to_string(),
        })
    }

    fn parse_secret_only(rest: &str, usage: &'static str) -> Result<String, Error> {
        let mut tokens = rest.split_whitespace();
        match (tokens.next(), tokens.next()) {
            (Some(secret), None) => Ok(secret.to_string()),
            _ => Err(Error::MalformedCommand { usage }),
        }
    }

    fn parse_secret_and_identity(
        rest: &str,
        usage: &'static str,
    ) -> Result<(String, PlayerIdentity), Error> {
        let mut tokens = rest.split_whitespace();
        match (tokens.next(), tokens.next(), tokens.next()) {
            (Some(secret), Some(identity), None) => {
                Ok((secret.to_string(), PlayerIdentity::new(identity)))
            }
            _ => Err(Error::MalformedCommand { usage }),
        }
    }
}
