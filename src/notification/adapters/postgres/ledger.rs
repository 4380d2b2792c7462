//! `PostgreSQL` notification ledger implementation.

use super::{
    models::{NewNotificationRow, NotificationRow},
    schema::notifications,
};
use crate::directory::domain::ActorId;
use crate::notification::domain::{Notification, NotificationId, NotificationKind};
use crate::notification::ports::{
    NotificationLedger, NotificationLedgerError, NotificationLedgerResult,
};
use crate::task::domain::TaskId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by notification adapters.
pub type NotificationPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed notification ledger.
#[derive(Debug, Clone)]
pub struct PostgresNotificationLedger {
    pool: NotificationPgPool,
}

impl PostgresNotificationLedger {
    /// Creates a new ledger from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: NotificationPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> NotificationLedgerResult<T>
    where
        F: FnOnce(&mut PgConnection) -> NotificationLedgerResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(NotificationLedgerError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(NotificationLedgerError::persistence)?
    }
}

#[async_trait]
impl NotificationLedger for PostgresNotificationLedger {
    async fn append(&self, notification: &Notification) -> NotificationLedgerResult<()> {
        let notification_id = notification.id;
        let new_row = to_new_row(notification);
        self.run_blocking(move |connection| {
            diesel::insert_into(notifications::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        NotificationLedgerError::DuplicateNotification(notification_id)
                    }
                    _ => NotificationLedgerError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn append_login_deduped(
        &self,
        notification: &Notification,
        window_start: DateTime<Utc>,
    ) -> NotificationLedgerResult<bool> {
        let recipient = notification.recipient_id.into_inner();
        let sender = notification.sender_id.map(ActorId::into_inner);
        let new_row = to_new_row(notification);
        self.run_blocking(move |connection| {
            let inserted = connection
                .transaction::<bool, DieselError, _>(|conn| {
                    // Lock the pair's rows so concurrent logins serialise on
                    // the check-prune-insert sequence.
                    let existing: Vec<DateTime<Utc>> = notifications::table
                        .filter(notifications::kind.eq(NotificationKind::UserLogin.as_str()))
                        .filter(notifications::recipient_id.eq(recipient))
                        .filter(notifications::sender_id.eq(sender))
                        .select(notifications::created_at)
                        .for_update()
                        .load(conn)?;

                    if existing.iter().any(|created| *created >= window_start) {
                        return Ok(false);
                    }

                    diesel::delete(
                        notifications::table
                            .filter(
                                notifications::kind.eq(NotificationKind::UserLogin.as_str()),
                            )
                            .filter(notifications::recipient_id.eq(recipient))
                            .filter(notifications::sender_id.eq(sender)),
                    )
                    .execute(conn)?;

                    diesel::insert_into(notifications::table)
                        .values(&new_row)
                        .execute(conn)?;
                    Ok(true)
                })
                .map_err(NotificationLedgerError::persistence)?;
            Ok(inserted)
        })
        .await
    }

    async fn list_for_recipient(
        &self,
        recipient_id: ActorId,
        limit: usize,
    ) -> NotificationLedgerResult<Vec<Notification>> {
        let recipient = recipient_id.into_inner();
        let row_limit = i64::try_from(limit).unwrap_or(i64::MAX);
        self.run_blocking(move |connection| {
            let rows = notifications::table
                .filter(notifications::recipient_id.eq(recipient))
                .order(notifications::created_at.desc())
                .limit(row_limit)
                .select(NotificationRow::as_select())
                .load::<NotificationRow>(connection)
                .map_err(NotificationLedgerError::persistence)?;
            rows.into_iter().map(row_to_notification).collect()
        })
        .await
    }

    async fn count_for_recipient(&self, recipient_id: ActorId) -> NotificationLedgerResult<u64> {
        let recipient = recipient_id.into_inner();
        self.run_blocking(move |connection| {
            let count: i64 = notifications::table
                .filter(notifications::recipient_id.eq(recipient))
                .count()
                .get_result(connection)
                .map_err(NotificationLedgerError::persistence)?;
            Ok(u64::try_from(count).unwrap_or(0))
        })
        .await
    }

    async fn delete(&self, id: NotificationId) -> NotificationLedgerResult<()> {
        let row_id = id.into_inner();
        self.run_blocking(move |connection| {
            diesel::delete(notifications::table.filter(notifications::id.eq(row_id)))
                .execute(connection)
                .map_err(NotificationLedgerError::persistence)?;
            Ok(())
        })
        .await
    }

    async fn delete_for_recipient(&self, recipient_id: ActorId) -> NotificationLedgerResult<()> {
        let recipient = recipient_id.into_inner();
        self.run_blocking(move |connection| {
            diesel::delete(
                notifications::table.filter(notifications::recipient_id.eq(recipient)),
            )
            .execute(connection)
            .map_err(NotificationLedgerError::persistence)?;
            Ok(())
        })
        .await
    }
}

fn to_new_row(notification: &Notification) -> NewNotificationRow {
    NewNotificationRow {
        id: notification.id.into_inner(),
        recipient_id: notification.recipient_id.into_inner(),
        sender_id: notification.sender_id.map(ActorId::into_inner),
        kind: notification.kind.as_str().to_owned(),
        title: notification.title.clone(),
        message: notification.message.clone(),
        related_task_id: notification.related_task_id.map(TaskId::into_inner),
        created_at: notification.created_at,
    }
}

fn row_to_notification(row: NotificationRow) -> NotificationLedgerResult<Notification> {
    let kind = NotificationKind::try_from(row.kind.as_str())
        .map_err(NotificationLedgerError::persistence)?;
    Ok(Notification {
        id: NotificationId::from_uuid(row.id),
        recipient_id: ActorId::from_uuid(row.recipient_id),
        sender_id: row.sender_id.map(ActorId::from_uuid),
        kind,
        title: row.title,
        message: row.message,
        related_task_id: row.related_task_id.map(TaskId::from_uuid),
        created_at: row.created_at,
    })
}
