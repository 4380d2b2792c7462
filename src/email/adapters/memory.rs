//! Test-double mailers.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::email::message::OutboundEmail;
use crate::email::ports::{MailerError, MailerResult, TransactionalMailer};

/// Mailer that records every send for later inspection.
#[derive(Debug, Clone, Default)]
pub struct RecordingMailer {
    sent: Arc<RwLock<Vec<OutboundEmail>>>,
}

impl RecordingMailer {
    /// Creates an empty recording mailer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of everything sent so far.
    ///
    /// # Errors
    ///
    /// Returns [`MailerError::Transport`] when the record lock is poisoned.
    pub fn sent(&self) -> MailerResult<Vec<OutboundEmail>> {
        let sent = self
            .sent
            .read()
            .map_err(|err| MailerError::transport(std::io::Error::other(err.to_string())))?;
        Ok(sent.clone())
    }
}

#[async_trait]
impl TransactionalMailer for RecordingMailer {
    async fn send(&self, email: &OutboundEmail) -> MailerResult<()> {
        let mut sent = self
            .sent
            .write()
            .map_err(|err| MailerError::transport(std::io::Error::other(err.to_string())))?;
        sent.push(email.clone());
        Ok(())
    }
}

/// Mailer that accepts and discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMailer;

#[async_trait]
impl TransactionalMailer for NoopMailer {
    async fn send(&self, _email: &OutboundEmail) -> MailerResult<()> {
        Ok(())
    }
}
