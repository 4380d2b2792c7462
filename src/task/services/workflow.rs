//! Task workflow orchestration: create, patch, comment, delete, and the
//! notification and email fan-out each of those triggers.

use std::sync::Arc;

use mockable::Clock;
use thiserror::Error;

use crate::config::CoreConfig;
use crate::directory::domain::{Actor, ActorId};
use crate::directory::ports::{ActorDirectory, ActorDirectoryError};
use crate::email::ports::TransactionalMailer;
use crate::email::{Mailbox, task_assignment_email};
use crate::notification::domain::NewNotification;
use crate::notification::ports::NotificationLedger;
use crate::notification::services::NotificationDispatcher;
use crate::task::domain::{
    Comment, Task, TaskDomainError, TaskDraft, TaskId, TaskPatch, diff,
};
use crate::task::ports::{CommentRepository, TaskRepository, TaskRepositoryError};
use crate::task::services::routing::route_update;

/// Errors surfaced by task workflow operations.
///
/// Only the primary write path fails hard; notification and email fan-out
/// failures are logged and swallowed.
#[derive(Debug, Error)]
pub enum TaskWorkflowError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// The task store failed or rejected the write.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),

    /// The actor directory failed.
    #[error(transparent)]
    Directory(#[from] ActorDirectoryError),

    /// The requested assignee does not exist or is inactive.
    #[error("assignee is unknown or inactive: {0}")]
    AssigneeUnavailable(ActorId),
}

/// Result type for task workflow operations.
pub type TaskWorkflowResult<T> = Result<T, TaskWorkflowError>;

/// Orchestrates task mutations and the resulting fan-out.
pub struct TaskWorkflowService<T, C, L, D, M, K>
where
    T: TaskRepository,
    C: CommentRepository,
    L: NotificationLedger,
    D: ActorDirectory,
    M: TransactionalMailer,
    K: Clock + Send + Sync,
{
    tasks: Arc<T>,
    comments: Arc<C>,
    directory: Arc<D>,
    dispatcher: NotificationDispatcher<L, D, K>,
    mailer: Arc<M>,
    config: Arc<CoreConfig>,
    clock: Arc<K>,
}

// Derived Clone would require the port types themselves to be Clone; only
// the Arc handles need cloning.
impl<T, C, L, D, M, K> Clone for TaskWorkflowService<T, C, L, D, M, K>
where
    T: TaskRepository,
    C: CommentRepository,
    L: NotificationLedger,
    D: ActorDirectory,
    M: TransactionalMailer,
    K: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            tasks: Arc::clone(&self.tasks),
            comments: Arc::clone(&self.comments),
            directory: Arc::clone(&self.directory),
            dispatcher: self.dispatcher.clone(),
            mailer: Arc::clone(&self.mailer),
            config: Arc::clone(&self.config),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<T, C, L, D, M, K> TaskWorkflowService<T, C, L, D, M, K>
where
    T: TaskRepository,
    C: CommentRepository,
    L: NotificationLedger,
    D: ActorDirectory,
    M: TransactionalMailer,
    K: Clock + Send + Sync,
{
    /// Creates a new workflow service.
    #[must_use]
    pub const fn new(
        tasks: Arc<T>,
        comments: Arc<C>,
        directory: Arc<D>,
        dispatcher: NotificationDispatcher<L, D, K>,
        mailer: Arc<M>,
        config: Arc<CoreConfig>,
        clock: Arc<K>,
    ) -> Self {
        Self {
            tasks,
            comments,
            directory,
            dispatcher,
            mailer,
            config,
            clock,
        }
    }

    /// Creates a task, then fans out the assignment notification and email
    /// when the draft carries an assignee.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError`] when validation, the assignee lookup,
    /// or the insert fails. Fan-out failures are logged and swallowed.
    pub async fn create_task(
        &self,
        actor: &Actor,
        draft: TaskDraft,
    ) -> TaskWorkflowResult<Task> {
        let assignee = match draft.assigned_to {
            Some(assignee_id) => Some(self.require_active_assignee(assignee_id).await?),
            None => None,
        };

        let task = Task::new(draft, actor.id(), &*self.clock)?;
        self.tasks.insert(&task).await?;
        tracing::info!(task = %task.id(), actor = %actor.id(), "task created");

        if let Some(assignee) = assignee
            && assignee.id() != actor.id()
        {
            self.notify_soft(NewNotification::task_assigned(
                assignee.id(),
                actor.id(),
                task.id(),
                task.title(),
            ))
            .await;
            self.email_assignment_soft(&assignee, actor.full_name(), &task)
                .await;
        }
        Ok(task)
    }

    /// Applies a patch to a task and fans out the resulting event.
    ///
    /// The diff is computed against the snapshot fetched here, never against
    /// client-supplied prior values. An assignment to a new actor takes
    /// precedence over the update event; a patch that changes nothing writes
    /// nothing and notifies nobody.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError`] when the task is missing, the new
    /// assignee is unavailable, validation fails, or the write fails.
    pub async fn apply_change(
        &self,
        actor: &Actor,
        task_id: TaskId,
        patch: TaskPatch,
    ) -> TaskWorkflowResult<Task> {
        let before = self.require_task(task_id).await?;

        let newly_assigned = match patch.assigned_to {
            Some(Some(assignee_id)) if before.assigned_to() != Some(assignee_id) => {
                Some(self.require_active_assignee(assignee_id).await?)
            }
            _ => None,
        };

        let mut after = before.clone();
        let changed = after.apply_patch(&patch, &*self.clock)?;
        if !changed {
            return Ok(after);
        }
        self.tasks.update(&after).await?;
        tracing::info!(task = %task_id, actor = %actor.id(), "task updated");

        if let Some(assignee) = newly_assigned {
            if assignee.id() != actor.id() {
                self.notify_soft(NewNotification::task_assigned(
                    assignee.id(),
                    actor.id(),
                    after.id(),
                    after.title(),
                ))
                .await;
                self.email_assignment_soft(&assignee, actor.full_name(), &after)
                    .await;
            }
        } else if let Some(pending) = route_update(actor.id(), &after, &diff(&before, &after)) {
            self.notify_soft(pending).await;
        }
        Ok(after)
    }

    /// Appends a comment and notifies the counterpart party.
    ///
    /// The creator's comments notify the assignee and vice versa; the author
    /// is never notified, and an unassigned task commented on by its creator
    /// notifies nobody.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError`] when the task is missing, the body is
    /// empty, or the append fails.
    pub async fn add_comment(
        &self,
        actor: &Actor,
        task_id: TaskId,
        body: impl Into<String> + Send,
    ) -> TaskWorkflowResult<Comment> {
        let task = self.require_task(task_id).await?;
        let comment = Comment::new(task_id, actor.id(), body, &*self.clock)?;
        self.comments.append(&comment).await?;

        let counterpart = if actor.id() == task.created_by() {
            task.assigned_to()
        } else {
            Some(task.created_by())
        };
        if let Some(recipient) = counterpart.filter(|candidate| *candidate != actor.id()) {
            self.notify_soft(NewNotification::comment_added(
                recipient,
                actor.id(),
                task.id(),
                task.title(),
                comment.body(),
            ))
            .await;
        }
        Ok(comment)
    }

    /// Returns the comments on a task in creation order.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError`] when the task is missing or the store
    /// fails.
    pub async fn list_comments(&self, task_id: TaskId) -> TaskWorkflowResult<Vec<Comment>> {
        self.require_task(task_id).await?;
        Ok(self.comments.list_for_task(task_id).await?)
    }

    /// Deletes a task and its comments.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::Repository`] with
    /// [`TaskRepositoryError::TaskNotFound`] when the task does not exist.
    pub async fn delete_task(&self, task_id: TaskId) -> TaskWorkflowResult<()> {
        self.tasks.delete(task_id).await?;
        self.comments.delete_for_task(task_id).await?;
        tracing::info!(task = %task_id, "task deleted");
        Ok(())
    }

    async fn require_task(&self, task_id: TaskId) -> TaskWorkflowResult<Task> {
        self.tasks
            .find_by_id(task_id)
            .await?
            .ok_or(TaskWorkflowError::Repository(
                TaskRepositoryError::TaskNotFound(task_id),
            ))
    }

    async fn require_active_assignee(&self, assignee_id: ActorId) -> TaskWorkflowResult<Actor> {
        self.directory
            .find_by_id(assignee_id)
            .await?
            .filter(Actor::is_active)
            .ok_or(TaskWorkflowError::AssigneeUnavailable(assignee_id))
    }

    async fn notify_soft(&self, pending: NewNotification) {
        if let Err(error) = self.dispatcher.emit(pending).await {
            tracing::warn!(error = %error, "notification fan-out failed after task write");
        }
    }

    async fn email_assignment_soft(&self, assignee: &Actor, assigner_name: &str, task: &Task) {
        let mailbox = Mailbox::new(assignee.email(), assignee.full_name());
        let email = match task_assignment_email(
            &self.config,
            &mailbox,
            assigner_name,
            task.title(),
            &self.config.task_url(task.id()),
        ) {
            Ok(email) => email,
            Err(error) => {
                tracing::warn!(error = %error, task = %task.id(), "assignment email render failed");
                return;
            }
        };
        if let Err(error) = self.mailer.send(&email).await {
            tracing::warn!(error = %error, task = %task.id(), "assignment email send failed");
        }
    }
}
