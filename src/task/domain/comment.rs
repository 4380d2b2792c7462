//! Append-only task comments.

use super::{CommentId, TaskDomainError, TaskId};
use crate::directory::domain::ActorId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A comment on a task. Comments are never edited or deleted individually.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    id: CommentId,
    task_id: TaskId,
    author_id: ActorId,
    body: String,
    created_at: DateTime<Utc>,
}

impl Comment {
    /// Creates a comment on the given task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyCommentBody`] when the trimmed body
    /// is empty.
    pub fn new(
        task_id: TaskId,
        author_id: ActorId,
        body: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<Self, TaskDomainError> {
        let body = body.into().trim().to_owned();
        if body.is_empty() {
            return Err(TaskDomainError::EmptyCommentBody);
        }
        Ok(Self {
            id: CommentId::new(),
            task_id,
            author_id,
            body,
            created_at: clock.utc(),
        })
    }

    /// Returns the comment identifier.
    #[must_use]
    pub const fn id(&self) -> CommentId {
        self.id
    }

    /// Returns the commented task.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the authoring actor.
    #[must_use]
    pub const fn author_id(&self) -> ActorId {
        self.author_id
    }

    /// Returns the comment text.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
