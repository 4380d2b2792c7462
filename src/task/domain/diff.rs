//! Pure change diffing between task snapshots.
//!
//! The diff feeds the `task_updated` notification message and nothing else.
//! Field order is fixed: status, priority, deadline, title, description.

use super::{Task, TaskPriority, TaskStatus};
use std::fmt;

/// A single observed field change between two task snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldChange {
    /// Status changed to the carried value.
    Status(TaskStatus),
    /// Priority changed to the carried value.
    Priority(TaskPriority),
    /// Due date changed.
    Deadline,
    /// Title changed.
    Title,
    /// Description changed.
    Description,
}

impl fmt::Display for FieldChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Status(status) => write!(f, "status to {}", status.display_name()),
            Self::Priority(priority) => write!(f, "priority to {}", priority.display_name()),
            Self::Deadline => f.write_str("deadline"),
            Self::Title => f.write_str("title"),
            Self::Description => f.write_str("description"),
        }
    }
}

/// Returns the ordered field changes between two snapshots.
///
/// Assignment changes are deliberately excluded; they route through the
/// assignment event, not the update summary. An empty result means the
/// snapshots are field-wise equal.
#[must_use]
pub fn diff(before: &Task, after: &Task) -> Vec<FieldChange> {
    let mut changes = Vec::new();
    if before.status() != after.status() {
        changes.push(FieldChange::Status(after.status()));
    }
    if before.priority() != after.priority() {
        changes.push(FieldChange::Priority(after.priority()));
    }
    if before.deadline() != after.deadline() {
        changes.push(FieldChange::Deadline);
    }
    if before.title() != after.title() {
        changes.push(FieldChange::Title);
    }
    if before.description() != after.description() {
        changes.push(FieldChange::Description);
    }
    changes
}

/// Joins change descriptors into the update-notification message text.
#[must_use]
pub fn summarize(changes: &[FieldChange]) -> String {
    changes
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
