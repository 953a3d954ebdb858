//! Outbound mail delivery.
//!
//! Account flows hand activation and reset plaintexts to the user through a `Mailer`.
//! The default `LogMailer` records that a message was sent without its contents, so
//! no plaintext token ever appears in logs.

use async_trait::async_trait;

use crate::server::{error::AppError, model::token::IssuedToken};

/// A message addressed to one user.
#[derive(Debug)]
pub enum Mail {
    /// Sent on registration; carries the first activation token.
    Welcome {
        recipient: String,
        name: String,
        token: IssuedToken,
    },
    /// Sent when a user asks for a new activation token.
    Activation { recipient: String, token: IssuedToken },
    /// Sent when a user asks to reset their password.
    PasswordReset { recipient: String, token: IssuedToken },
}

impl Mail {
    pub fn recipient(&self) -> &str {
        match self {
            Self::Welcome { recipient, .. }
            | Self::Activation { recipient, .. }
            | Self::PasswordReset { recipient, .. } => recipient,
        }
    }

    pub fn template(&self) -> &'static str {
        match self {
            Self::Welcome { .. } => "user_welcome",
            Self::Activation { .. } => "token_activation",
            Self::PasswordReset { .. } => "token_password_reset",
        }
    }

    pub fn token(&self) -> &IssuedToken {
        match self {
            Self::Welcome { token, .. }
            | Self::Activation { token, .. }
            | Self::PasswordReset { token, .. } => token,
        }
    }
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, mail: Mail) -> Result<(), AppError>;
}

/// Mailer that only logs the recipient and template of each message.
#[derive(Debug, Default, Clone)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, mail: Mail) -> Result<(), AppError> {
        tracing::info!(
            recipient = %mail.recipient(),
            template = mail.template(),
            "mail sent"
        );
        Ok(())
    }
}
