//! In-memory notification ledger for tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::{Arc, RwLock};

use crate::directory::domain::ActorId;
use crate::notification::domain::{Notification, NotificationId, NotificationKind};
use crate::notification::ports::{
    NotificationLedger, NotificationLedgerError, NotificationLedgerResult,
};

/// Thread-safe in-memory notification ledger.
///
/// Rows are held in append order, which the adapter treats as creation
/// order when listing newest first.
#[derive(Debug, Clone, Default)]
pub struct InMemoryNotificationLedger {
    rows: Arc<RwLock<Vec<Notification>>>,
}

impl InMemoryNotificationLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_write(
    rows: &Arc<RwLock<Vec<Notification>>>,
) -> NotificationLedgerResult<std::sync::RwLockWriteGuard<'_, Vec<Notification>>> {
    rows.write()
        .map_err(|err| NotificationLedgerError::persistence(std::io::Error::other(err.to_string())))
}

fn lock_read(
    rows: &Arc<RwLock<Vec<Notification>>>,
) -> NotificationLedgerResult<std::sync::RwLockReadGuard<'_, Vec<Notification>>> {
    rows.read()
        .map_err(|err| NotificationLedgerError::persistence(std::io::Error::other(err.to_string())))
}

fn is_login_for_pair(row: &Notification, sender: Option<ActorId>, recipient: ActorId) -> bool {
    row.kind == NotificationKind::UserLogin
        && row.sender_id == sender
        && row.recipient_id == recipient
}

#[async_trait]
impl NotificationLedger for InMemoryNotificationLedger {
    async fn append(&self, notification: &Notification) -> NotificationLedgerResult<()> {
        let mut rows = lock_write(&self.rows)?;
        if rows.iter().any(|row| row.id == notification.id) {
            return Err(NotificationLedgerError::DuplicateNotification(
                notification.id,
            ));
        }
        rows.push(notification.clone());
        Ok(())
    }

    async fn append_login_deduped(
        &self,
        notification: &Notification,
        window_start: DateTime<Utc>,
    ) -> NotificationLedgerResult<bool> {
        // The whole check-prune-insert sequence runs under one write lock,
        // so the at-most-one-row-per-pair invariant holds under concurrent
        // callers.
        let mut rows = lock_write(&self.rows)?;
        let pair_exists_in_window = rows.iter().any(|row| {
            is_login_for_pair(row, notification.sender_id, notification.recipient_id)
                && row.created_at >= window_start
        });
        if pair_exists_in_window {
            return Ok(false);
        }
        rows.retain(|row| {
            !is_login_for_pair(row, notification.sender_id, notification.recipient_id)
        });
        rows.push(notification.clone());
        Ok(true)
    }

    async fn list_for_recipient(
        &self,
        recipient_id: ActorId,
        limit: usize,
    ) -> NotificationLedgerResult<Vec<Notification>> {
        let rows = lock_read(&self.rows)?;
        Ok(rows
            .iter()
            .rev()
            .filter(|row| row.recipient_id == recipient_id)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn count_for_recipient(&self, recipient_id: ActorId) -> NotificationLedgerResult<u64> {
        let rows = lock_read(&self.rows)?;
        let count = rows
            .iter()
            .filter(|row| row.recipient_id == recipient_id)
            .count();
        Ok(u64::try_from(count).unwrap_or(u64::MAX))
    }

    async fn delete(&self, id: NotificationId) -> NotificationLedgerResult<()> {
        let mut rows = lock_write(&self.rows)?;
        rows.retain(|row| row.id != id);
        Ok(())
    }

    async fn delete_for_recipient(&self, recipient_id: ActorId) -> NotificationLedgerResult<()> {
        let mut rows = lock_write(&self.rows)?;
        rows.retain(|row| row.recipient_id != recipient_id);
        Ok(())
    }
}
