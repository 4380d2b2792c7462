//! Ledger port for notification rows.

use crate::directory::domain::ActorId;
use crate::notification::domain::{Notification, NotificationId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for notification ledger operations.
pub type NotificationLedgerResult<T> = Result<T, NotificationLedgerError>;

/// Append/delete-only persistence contract for notification rows.
#[async_trait]
pub trait NotificationLedger: Send + Sync {
    /// Appends a notification row unconditionally.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationLedgerError::DuplicateNotification`] when the
    /// id already exists.
    async fn append(&self, notification: &Notification) -> NotificationLedgerResult<()>;

    /// Appends a `user_login` row with pair-scoped deduplication.
    ///
    /// Atomically, for the `(sender_id, recipient_id)` pair: when a
    /// `user_login` row created at or after `window_start` already exists
    /// the append is skipped; otherwise older `user_login` rows for the
    /// pair are pruned and the new row inserted. At most one row for the
    /// pair exists at any instant, including under concurrent callers.
    ///
    /// Returns `true` when the row was inserted, `false` when skipped.
    async fn append_login_deduped(
        &self,
        notification: &Notification,
        window_start: DateTime<Utc>,
    ) -> NotificationLedgerResult<bool>;

    /// Returns up to `limit` rows for the recipient, newest first.
    async fn list_for_recipient(
        &self,
        recipient_id: ActorId,
        limit: usize,
    ) -> NotificationLedgerResult<Vec<Notification>>;

    /// Returns the total row count for the recipient.
    ///
    /// Existence is the unread state, so this is the unread count.
    async fn count_for_recipient(&self, recipient_id: ActorId) -> NotificationLedgerResult<u64>;

    /// Deletes one row. Deleting an absent id is not an error.
    async fn delete(&self, id: NotificationId) -> NotificationLedgerResult<()>;

    /// Deletes every row addressed to the recipient.
    async fn delete_for_recipient(&self, recipient_id: ActorId) -> NotificationLedgerResult<()>;
}

/// Errors returned by notification ledger implementations.
#[derive(Debug, Clone, Error)]
pub enum NotificationLedgerError {
    /// A row with the same identifier already exists.
    #[error("duplicate notification identifier: {0}")]
    DuplicateNotification(NotificationId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl NotificationLedgerError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
