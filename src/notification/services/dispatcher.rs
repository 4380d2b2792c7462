//! Notification dispatcher: emit, dedup, list, and retire.

use chrono::Duration;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

use crate::directory::domain::{Actor, ActorId};
use crate::directory::ports::{ActorDirectory, ActorDirectoryError};
use crate::notification::domain::{
    NewNotification, Notification, NotificationId, NotificationKind,
};
use crate::notification::ports::{NotificationLedger, NotificationLedgerError};

/// Width of the `user_login` deduplication window, in minutes.
pub const LOGIN_DEDUP_WINDOW_MINUTES: i64 = 60;

/// Service-level errors for notification dispatch.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Ledger operation failed.
    #[error(transparent)]
    Ledger(#[from] NotificationLedgerError),
    /// Directory lookup failed.
    #[error(transparent)]
    Directory(#[from] ActorDirectoryError),
}

/// Result type for dispatcher operations.
pub type DispatchResult<T> = Result<T, DispatchError>;

/// Outcome of an emit call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmitOutcome {
    /// A row was written to the ledger.
    Delivered(Notification),
    /// A `user_login` row inside the dedup window already covers the event.
    Deduplicated,
    /// The recipient is unknown or inactive; nothing was written.
    RecipientUnavailable,
}

/// Sender identity resolved for feed display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SenderProfile {
    /// Sender display name.
    pub full_name: String,
    /// Sender email address.
    pub email: String,
}

/// A feed entry with its sender resolved for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationFeedItem {
    /// The ledger row.
    pub notification: Notification,
    /// Sender profile, when the sender still resolves.
    pub sender: Option<SenderProfile>,
}

/// Notification dispatch orchestration service.
pub struct NotificationDispatcher<L, D, C>
where
    L: NotificationLedger,
    D: ActorDirectory,
    C: Clock + Send + Sync,
{
    ledger: Arc<L>,
    directory: Arc<D>,
    clock: Arc<C>,
}

// Derived Clone would require the port types themselves to be Clone; only
// the Arc handles need cloning.
impl<L, D, C> Clone for NotificationDispatcher<L, D, C>
where
    L: NotificationLedger,
    D: ActorDirectory,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            ledger: Arc::clone(&self.ledger),
            directory: Arc::clone(&self.directory),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<L, D, C> NotificationDispatcher<L, D, C>
where
    L: NotificationLedger,
    D: ActorDirectory,
    C: Clock + Send + Sync,
{
    /// Creates a new dispatcher.
    #[must_use]
    pub const fn new(ledger: Arc<L>, directory: Arc<D>, clock: Arc<C>) -> Self {
        Self {
            ledger,
            directory,
            clock,
        }
    }

    /// Writes a notification row for the pending event.
    ///
    /// `user_login` events are deduplicated per `(sender, recipient)` pair
    /// within the trailing window; every other kind inserts unconditionally.
    /// Unknown or inactive recipients are skipped without error, matching
    /// the rule that an inactive actor is not selectable for new events.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError`] when the directory lookup or ledger write
    /// fails.
    pub async fn emit(&self, pending: NewNotification) -> DispatchResult<EmitOutcome> {
        let recipient = self.directory.find_by_id(pending.recipient_id).await?;
        let is_deliverable = recipient.as_ref().is_some_and(Actor::is_active);
        if !is_deliverable {
            tracing::debug!(
                recipient = %pending.recipient_id,
                kind = %pending.kind,
                "skipping notification for unavailable recipient"
            );
            return Ok(EmitOutcome::RecipientUnavailable);
        }

        let notification = Notification::materialise(pending, &*self.clock);
        if notification.kind == NotificationKind::UserLogin && notification.sender_id.is_some() {
            let window_start =
                notification.created_at - Duration::minutes(LOGIN_DEDUP_WINDOW_MINUTES);
            if self
                .ledger
                .append_login_deduped(&notification, window_start)
                .await?
            {
                return Ok(EmitOutcome::Delivered(notification));
            }
            tracing::debug!(
                recipient = %notification.recipient_id,
                "skipping duplicate login notification inside dedup window"
            );
            return Ok(EmitOutcome::Deduplicated);
        }

        self.ledger.append(&notification).await?;
        Ok(EmitOutcome::Delivered(notification))
    }

    /// Returns up to `limit` feed entries for the recipient, newest first,
    /// with sender identities resolved for display.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError`] when the ledger or directory fails.
    pub async fn feed(
        &self,
        recipient_id: ActorId,
        limit: usize,
    ) -> DispatchResult<Vec<NotificationFeedItem>> {
        let rows = self.ledger.list_for_recipient(recipient_id, limit).await?;
        let mut items = Vec::with_capacity(rows.len());
        for notification in rows {
            let sender = match notification.sender_id {
                Some(sender_id) => {
                    self.directory
                        .find_by_id(sender_id)
                        .await?
                        .map(|actor| SenderProfile {
                            full_name: actor.full_name().to_owned(),
                            email: actor.email().to_owned(),
                        })
                }
                None => None,
            };
            items.push(NotificationFeedItem {
                notification,
                sender,
            });
        }
        Ok(items)
    }

    /// Returns the unread count for the recipient.
    ///
    /// Unread equals existing: the count is the total row count.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::Ledger`] when the ledger fails.
    pub async fn unread_count(&self, recipient_id: ActorId) -> DispatchResult<u64> {
        Ok(self.ledger.count_for_recipient(recipient_id).await?)
    }

    /// Acknowledges one notification by deleting its row.
    ///
    /// Idempotent: acknowledging an absent id succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::Ledger`] when the ledger fails.
    pub async fn acknowledge(&self, id: NotificationId) -> DispatchResult<()> {
        Ok(self.ledger.delete(id).await?)
    }

    /// Acknowledges every notification addressed to the recipient.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::Ledger`] when the ledger fails.
    pub async fn acknowledge_all(&self, recipient_id: ActorId) -> DispatchResult<()> {
        Ok(self.ledger.delete_for_recipient(recipient_id).await?)
    }

    /// Fans a sign-in event out to every active admin except the actor.
    ///
    /// Returns the number of rows actually written; dedup-window skips and
    /// unavailable recipients do not count.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError`] when the admin lookup or a ledger write
    /// fails.
    pub async fn broadcast_login(&self, user: &Actor) -> DispatchResult<usize> {
        self.broadcast(user, |admin_id| {
            NewNotification::user_login(admin_id, user.id(), user.full_name(), user.email())
        })
        .await
    }

    /// Fans a signup event out to every active admin except the actor.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError`] when the admin lookup or a ledger write
    /// fails.
    pub async fn broadcast_signup(&self, user: &Actor) -> DispatchResult<usize> {
        self.broadcast(user, |admin_id| {
            NewNotification::user_signup(admin_id, user.id(), user.full_name(), user.email())
        })
        .await
    }

    async fn broadcast(
        &self,
        user: &Actor,
        build: impl Fn(ActorId) -> NewNotification + Send,
    ) -> DispatchResult<usize> {
        let admins = self.directory.admins().await?;
        let mut delivered = 0;
        for admin in admins {
            if admin.id() == user.id() {
                continue;
            }
            if matches!(self.emit(build(admin.id())).await?, EmitOutcome::Delivered(_)) {
                delivered += 1;
            }
        }
        Ok(delivered)
    }
}
