//! Fire-and-forget transactional mail contract.

use crate::email::message::OutboundEmail;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for mailer operations.
pub type MailerResult<T> = Result<T, MailerError>;

/// Transactional email transport contract.
///
/// Callers never block on or retry a failed send; failures are logged and
/// the primary operation proceeds.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TransactionalMailer: Send + Sync {
    /// Dispatches one composed email.
    ///
    /// # Errors
    ///
    /// Returns [`MailerError`] when the transport rejects or cannot reach
    /// the provider.
    async fn send(&self, email: &OutboundEmail) -> MailerResult<()>;
}

/// Errors returned by mailer implementations.
#[derive(Debug, Clone, Error)]
pub enum MailerError {
    /// The transport provider rejected the message.
    #[error("email rejected by provider: {0}")]
    Rejected(String),

    /// Transport-level failure.
    #[error("email transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl MailerError {
    /// Wraps a transport error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}
