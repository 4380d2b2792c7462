//! Diesel row models for notification persistence.

use super::schema::notifications;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for notification records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = notifications)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NotificationRow {
    /// Row identifier.
    pub id: uuid::Uuid,
    /// Recipient actor.
    pub recipient_id: uuid::Uuid,
    /// Originating actor, absent for system-originated events.
    pub sender_id: Option<uuid::Uuid>,
    /// Event kind.
    pub kind: String,
    /// Short heading shown in the feed.
    pub title: String,
    /// Human-readable event description.
    pub message: String,
    /// Related task, when any.
    pub related_task_id: Option<uuid::Uuid>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for notification records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = notifications)]
pub struct NewNotificationRow {
    /// Row identifier.
    pub id: uuid::Uuid,
    /// Recipient actor.
    pub recipient_id: uuid::Uuid,
    /// Originating actor, absent for system-originated events.
    pub sender_id: Option<uuid::Uuid>,
    /// Event kind.
    pub kind: String,
    /// Short heading shown in the feed.
    pub title: String,
    /// Human-readable event description.
    pub message: String,
    /// Related task, when any.
    pub related_task_id: Option<uuid::Uuid>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}
