//! Repository ports for task and comment persistence.

use crate::task::domain::{Comment, Task, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
///
/// The backing store is externally owned; this port only names the access
/// the workflow needs, including fetch-then-update against the same row for
/// snapshot diffing.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the task
    /// identifier already exists.
    async fn insert(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Persists changes to an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::TaskNotFound`] when the task does not
    /// exist.
    async fn update(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::TaskNotFound`] when the task does not
    /// exist.
    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()>;
}

/// Comment persistence contract.
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Appends a comment.
    async fn append(&self, comment: &Comment) -> TaskRepositoryResult<()>;

    /// Returns the comments on a task in creation order.
    async fn list_for_task(&self, task_id: TaskId) -> TaskRepositoryResult<Vec<Comment>>;

    /// Removes every comment on a task. Idempotent.
    async fn delete_for_task(&self, task_id: TaskId) -> TaskRepositoryResult<()>;
}

/// Errors returned by task persistence implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task does not exist.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// The backing store failed.
    #[error("task persistence failure: {0}")]
    Persistence(#[source] Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a backend failure in the persistence variant.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
