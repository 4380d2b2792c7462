//! In-memory task and comment repositories for tests and composition.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::task::domain::{Comment, Task, TaskId};
use crate::task::ports::{
    CommentRepository, TaskRepository, TaskRepositoryError, TaskRepositoryResult,
};

/// Thread-safe in-memory task repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<HashMap<TaskId, Task>>>,
}

impl InMemoryTaskRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(err: impl std::fmt::Display) -> TaskRepositoryError {
    TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn insert(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        if state.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }
        state.insert(task.id(), task.clone());
        Ok(())
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        match state.get_mut(&task.id()) {
            Some(existing) => {
                *existing = task.clone();
                Ok(())
            }
            None => Err(TaskRepositoryError::TaskNotFound(task.id())),
        }
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.get(&id).cloned())
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        match state.remove(&id) {
            Some(_) => Ok(()),
            None => Err(TaskRepositoryError::TaskNotFound(id)),
        }
    }
}

/// Thread-safe in-memory comment repository.
///
/// Comments are held in append order, which doubles as creation order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCommentRepository {
    rows: Arc<RwLock<Vec<Comment>>>,
}

impl InMemoryCommentRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepository {
    async fn append(&self, comment: &Comment) -> TaskRepositoryResult<()> {
        let mut rows = self.rows.write().map_err(poisoned)?;
        rows.push(comment.clone());
        Ok(())
    }

    async fn list_for_task(&self, task_id: TaskId) -> TaskRepositoryResult<Vec<Comment>> {
        let rows = self.rows.read().map_err(poisoned)?;
        Ok(rows
            .iter()
            .filter(|comment| comment.task_id() == task_id)
            .cloned()
            .collect())
    }

    async fn delete_for_task(&self, task_id: TaskId) -> TaskRepositoryResult<()> {
        let mut rows = self.rows.write().map_err(poisoned)?;
        rows.retain(|comment| comment.task_id() != task_id);
        Ok(())
    }
}
