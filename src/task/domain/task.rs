//! Task aggregate root and the patch applied to it.

use super::{TaskDomainError, TaskId};
use super::{ParseTaskPriorityError, ParseTaskStatusError};
use crate::directory::domain::ActorId;
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Task workflow status.
///
/// The three values are the whole lifecycle; there is no separate completion
/// timestamp, so `updated_at` doubles as the completion instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// No work has started.
    NotPicked,
    /// The assignee has started the task.
    InProgress,
    /// The task is done.
    Completed,
}

impl TaskStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotPicked => "not_picked",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }

    /// Returns the human-readable form used in notification copy.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::NotPicked => "not picked",
            Self::InProgress => "in progress",
            Self::Completed => "completed",
        }
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "not_picked" => Ok(Self::NotPicked),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

/// Task priority level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    /// Low urgency.
    Low,
    /// Default urgency.
    Medium,
    /// High urgency.
    High,
}

impl TaskPriority {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Returns the human-readable form used in notification copy.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        self.as_str()
    }
}

impl TryFrom<&str> for TaskPriority {
    type Error = ParseTaskPriorityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(ParseTaskPriorityError(value.to_owned())),
        }
    }
}

/// Fields supplied when creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    /// Task title.
    pub title: String,
    /// Free-text description.
    pub description: String,
    /// Priority level.
    pub priority: TaskPriority,
    /// Due date.
    pub deadline: NaiveDate,
    /// Initial assignee, when any.
    pub assigned_to: Option<ActorId>,
}

impl TaskDraft {
    /// Creates a draft with no assignee.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        priority: TaskPriority,
        deadline: NaiveDate,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            priority,
            deadline,
            assigned_to: None,
        }
    }

    /// Sets the initial assignee.
    #[must_use]
    pub const fn assigned_to(mut self, assignee: ActorId) -> Self {
        self.assigned_to = Some(assignee);
        self
    }
}

/// The task aggregate.
///
/// `updated_at` advances on every mutating write and only then; consumers
/// read it as "when did this task last change".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: String,
    description: String,
    status: TaskStatus,
    priority: TaskPriority,
    deadline: NaiveDate,
    assigned_to: Option<ActorId>,
    created_by: ActorId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Raw field values used to rehydrate a task from persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Task identifier.
    pub id: TaskId,
    /// Task title.
    pub title: String,
    /// Free-text description.
    pub description: String,
    /// Workflow status.
    pub status: TaskStatus,
    /// Priority level.
    pub priority: TaskPriority,
    /// Due date.
    pub deadline: NaiveDate,
    /// Current assignee, when any.
    pub assigned_to: Option<ActorId>,
    /// Creating actor.
    pub created_by: ActorId,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new task from a draft.
    ///
    /// The task starts in [`TaskStatus::NotPicked`] with both timestamps set
    /// to the clock's current instant.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the trimmed title is
    /// empty.
    pub fn new(
        draft: TaskDraft,
        created_by: ActorId,
        clock: &impl Clock,
    ) -> Result<Self, TaskDomainError> {
        let title = draft.title.trim().to_owned();
        if title.is_empty() {
            return Err(TaskDomainError::EmptyTitle);
        }
        let now = clock.utc();
        Ok(Self {
            id: TaskId::new(),
            title,
            description: draft.description,
            status: TaskStatus::NotPicked,
            priority: draft.priority,
            deadline: draft.deadline,
            assigned_to: draft.assigned_to,
            created_by,
            created_at: now,
            updated_at: now,
        })
    }

    /// Rehydrates a task from persisted field values.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            status: data.status,
            priority: data.priority,
            deadline: data.deadline,
            assigned_to: data.assigned_to,
            created_by: data.created_by,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the workflow status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the due date.
    #[must_use]
    pub const fn deadline(&self) -> NaiveDate {
        self.deadline
    }

    /// Returns the current assignee, when any.
    #[must_use]
    pub const fn assigned_to(&self) -> Option<ActorId> {
        self.assigned_to
    }

    /// Returns the creating actor.
    #[must_use]
    pub const fn created_by(&self) -> ActorId {
        self.created_by
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Applies a patch, returning whether any field actually changed.
    ///
    /// `updated_at` advances only when a field changed, so a no-op patch
    /// leaves the aggregate bit-for-bit identical.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the patch carries a
    /// title that is empty after trimming.
    pub fn apply_patch(
        &mut self,
        patch: &TaskPatch,
        clock: &impl Clock,
    ) -> Result<bool, TaskDomainError> {
        let mut changed = false;
        if let Some(status) = patch.status
            && status != self.status
        {
            self.status = status;
            changed = true;
        }
        if let Some(priority) = patch.priority
            && priority != self.priority
        {
            self.priority = priority;
            changed = true;
        }
        if let Some(deadline) = patch.deadline
            && deadline != self.deadline
        {
            self.deadline = deadline;
            changed = true;
        }
        if let Some(title) = &patch.title {
            let title = title.trim();
            if title.is_empty() {
                return Err(TaskDomainError::EmptyTitle);
            }
            if title != self.title {
                self.title = title.to_owned();
                changed = true;
            }
        }
        if let Some(description) = &patch.description
            && *description != self.description
        {
            self.description.clone_from(description);
            changed = true;
        }
        if let Some(assignee) = patch.assigned_to
            && assignee != self.assigned_to
        {
            self.assigned_to = assignee;
            changed = true;
        }
        if changed {
            self.updated_at = clock.utc();
        }
        Ok(changed)
    }
}

/// Partial update applied to a task.
///
/// The outer `Option` on `assigned_to` distinguishes "leave assignment
/// alone" from "set it", and the inner one carries unassignment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    /// New status, when changing.
    pub status: Option<TaskStatus>,
    /// New priority, when changing.
    pub priority: Option<TaskPriority>,
    /// New due date, when changing.
    pub deadline: Option<NaiveDate>,
    /// New title, when changing.
    pub title: Option<String>,
    /// New description, when changing.
    pub description: Option<String>,
    /// New assignment, when changing.
    pub assigned_to: Option<Option<ActorId>>,
}

impl TaskPatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_deadline(mut self, deadline: NaiveDate) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Sets the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Assigns the task to an actor.
    #[must_use]
    pub const fn assign_to(mut self, assignee: ActorId) -> Self {
        self.assigned_to = Some(Some(assignee));
        self
    }

    /// Clears the assignment.
    #[must_use]
    pub const fn unassign(mut self) -> Self {
        self.assigned_to = Some(None);
        self
    }

    /// Returns whether the patch touches no field at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.priority.is_none()
            && self.deadline.is_none()
            && self.title.is_none()
            && self.description.is_none()
            && self.assigned_to.is_none()
    }
}
