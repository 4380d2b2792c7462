//! Notification records and their canonical copy.

use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

use crate::directory::domain::ActorId;
use crate::task::domain::TaskId;

/// Comment bodies longer than this are truncated in notification copy.
const COMMENT_PREVIEW_LIMIT: usize = 50;

/// Unique identifier for a notification row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationId(Uuid);

impl NotificationId {
    /// Creates a new random notification identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a notification identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for NotificationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Closed enumeration of workspace event kinds.
///
/// New kinds must not be added without versioning the storage contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// A task was assigned to the recipient.
    TaskAssigned,
    /// A task the recipient created was completed.
    TaskCompleted,
    /// A task the recipient created was started.
    TaskInProgress,
    /// A comment was added to a task the recipient is party to.
    CommentAdded,
    /// A task the recipient is party to was edited.
    TaskUpdated,
    /// An invited user accepted and created an account.
    UserSignup,
    /// A user signed in.
    UserLogin,
}

impl NotificationKind {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TaskAssigned => "task_assigned",
            Self::TaskCompleted => "task_completed",
            Self::TaskInProgress => "task_in_progress",
            Self::CommentAdded => "comment_added",
            Self::TaskUpdated => "task_updated",
            Self::UserSignup => "user_signup",
            Self::UserLogin => "user_login",
        }
    }
}

impl TryFrom<&str> for NotificationKind {
    type Error = ParseNotificationKindError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "task_assigned" => Ok(Self::TaskAssigned),
            "task_completed" => Ok(Self::TaskCompleted),
            "task_in_progress" => Ok(Self::TaskInProgress),
            "comment_added" => Ok(Self::CommentAdded),
            "task_updated" => Ok(Self::TaskUpdated),
            "user_signup" => Ok(Self::UserSignup),
            "user_login" => Ok(Self::UserLogin),
            _ => Err(ParseNotificationKindError(value.to_owned())),
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned while parsing notification kinds from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown notification kind: {0}")]
pub struct ParseNotificationKindError(pub String);

/// A persisted, recipient-addressed notification.
///
/// Deleting the row is the read acknowledgement; there is no read flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Row identifier.
    pub id: NotificationId,
    /// The single actor this notification is addressed to.
    pub recipient_id: ActorId,
    /// Originating actor; `None` for system-originated events.
    pub sender_id: Option<ActorId>,
    /// Event kind.
    pub kind: NotificationKind,
    /// Short heading shown in the feed.
    pub title: String,
    /// Human-readable event description.
    pub message: String,
    /// Task the event relates to, when any.
    pub related_task_id: Option<TaskId>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Materialises a pending notification into a ledger row.
    #[must_use]
    pub fn materialise(pending: NewNotification, clock: &impl Clock) -> Self {
        Self {
            id: NotificationId::new(),
            recipient_id: pending.recipient_id,
            sender_id: pending.sender_id,
            kind: pending.kind,
            title: pending.title,
            message: pending.message,
            related_task_id: pending.related_task_id,
            created_at: clock.utc(),
        }
    }
}

/// A notification that has been decided but not yet written to the ledger.
///
/// The factory constructors carry the canonical title and message copy for
/// each event kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNotification {
    /// The single actor the notification is addressed to.
    pub recipient_id: ActorId,
    /// Originating actor; `None` for system-originated events.
    pub sender_id: Option<ActorId>,
    /// Event kind.
    pub kind: NotificationKind,
    /// Short heading shown in the feed.
    pub title: String,
    /// Human-readable event description.
    pub message: String,
    /// Task the event relates to, when any.
    pub related_task_id: Option<TaskId>,
}

impl NewNotification {
    /// A task was assigned to `recipient_id` by `sender_id`.
    #[must_use]
    pub fn task_assigned(
        recipient_id: ActorId,
        sender_id: ActorId,
        task_id: TaskId,
        task_title: &str,
    ) -> Self {
        Self {
            recipient_id,
            sender_id: Some(sender_id),
            kind: NotificationKind::TaskAssigned,
            title: "New Task Assigned".to_owned(),
            message: format!("You have been assigned a new task: \"{task_title}\""),
            related_task_id: Some(task_id),
        }
    }

    /// A task was marked completed by `sender_id`.
    #[must_use]
    pub fn task_completed(
        recipient_id: ActorId,
        sender_id: ActorId,
        task_id: TaskId,
        task_title: &str,
    ) -> Self {
        Self {
            recipient_id,
            sender_id: Some(sender_id),
            kind: NotificationKind::TaskCompleted,
            title: "Task Completed".to_owned(),
            message: format!("Task \"{task_title}\" has been marked as completed"),
            related_task_id: Some(task_id),
        }
    }

    /// A task was started by `sender_id`.
    #[must_use]
    pub fn task_in_progress(
        recipient_id: ActorId,
        sender_id: ActorId,
        task_id: TaskId,
        task_title: &str,
    ) -> Self {
        Self {
            recipient_id,
            sender_id: Some(sender_id),
            kind: NotificationKind::TaskInProgress,
            title: "Task Started".to_owned(),
            message: format!("Task \"{task_title}\" has been marked as in progress"),
            related_task_id: Some(task_id),
        }
    }

    /// A task was edited; `details` is the change-diff summary.
    #[must_use]
    pub fn task_updated(
        recipient_id: ActorId,
        sender_id: ActorId,
        task_id: TaskId,
        task_title: &str,
        details: &str,
    ) -> Self {
        Self {
            recipient_id,
            sender_id: Some(sender_id),
            kind: NotificationKind::TaskUpdated,
            title: "Task Updated".to_owned(),
            message: format!("Task \"{task_title}\" has been updated: {details}"),
            related_task_id: Some(task_id),
        }
    }

    /// A comment was added to a task the recipient is party to.
    ///
    /// The comment body is truncated to a short preview.
    #[must_use]
    pub fn comment_added(
        recipient_id: ActorId,
        sender_id: ActorId,
        task_id: TaskId,
        task_title: &str,
        comment_body: &str,
    ) -> Self {
        let preview = truncate_preview(comment_body);
        Self {
            recipient_id,
            sender_id: Some(sender_id),
            kind: NotificationKind::CommentAdded,
            title: "New Comment".to_owned(),
            message: format!("New comment on \"{task_title}\": {preview}"),
            related_task_id: Some(task_id),
        }
    }

    /// An invited user accepted and signed up.
    #[must_use]
    pub fn user_signup(
        recipient_id: ActorId,
        new_user_id: ActorId,
        user_name: &str,
        user_email: &str,
    ) -> Self {
        Self {
            recipient_id,
            sender_id: Some(new_user_id),
            kind: NotificationKind::UserSignup,
            title: "New User Signup".to_owned(),
            message: format!(
                "{user_name} ({user_email}) has accepted the invitation and signed up"
            ),
            related_task_id: None,
        }
    }

    /// A user signed in.
    #[must_use]
    pub fn user_login(
        recipient_id: ActorId,
        user_id: ActorId,
        user_name: &str,
        user_email: &str,
    ) -> Self {
        Self {
            recipient_id,
            sender_id: Some(user_id),
            kind: NotificationKind::UserLogin,
            title: "User Login".to_owned(),
            message: format!("{user_name} ({user_email}) has logged in successfully"),
            related_task_id: None,
        }
    }
}

fn truncate_preview(body: &str) -> String {
    if body.chars().count() <= COMMENT_PREVIEW_LIMIT {
        body.to_owned()
    } else {
        let preview: String = body.chars().take(COMMENT_PREVIEW_LIMIT).collect();
        format!("{preview}...")
    }
}
