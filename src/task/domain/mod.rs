//! Domain model for the task workflow.
//!
//! The aggregate, its patch, comments, and the pure snapshot diff live here,
//! with all infrastructure concerns outside the domain boundary.

mod comment;
mod diff;
mod error;
mod ids;
mod task;

pub use comment::Comment;
pub use diff::{FieldChange, diff, summarize};
pub use error::{ParseTaskPriorityError, ParseTaskStatusError, TaskDomainError};
pub use ids::{CommentId, TaskId};
pub use task::{PersistedTaskData, Task, TaskDraft, TaskPatch, TaskPriority, TaskStatus};
