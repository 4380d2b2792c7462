//! Decision table for "which party is notified" on a task update.
//!
//! The rules are keyed by who acted and where the status moved, replacing
//! the scattered conditionals this logic tends to accrete. Assignment events
//! are decided upstream and never reach this table.

use crate::directory::domain::ActorId;
use crate::notification::domain::NewNotification;
use crate::task::domain::{FieldChange, Task, TaskStatus, summarize};

/// Which side of the task the acting actor is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ActingParty {
    /// The actor is the current assignee.
    Assignee,
    /// The actor is the creator or another admin editing the task.
    CreatorSide,
}

/// Where the status moved, if it moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusMove {
    Completed,
    Started,
    OtherOrNone,
}

/// What the table decided to send.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UpdateRoute {
    /// Specific completion event to the creator.
    CompletedToCreator,
    /// Specific start event to the creator.
    StartedToCreator,
    /// Generic diff summary to the creator.
    SummaryToCreator,
    /// Generic diff summary to the assignee, when one exists.
    SummaryToAssignee,
}

fn acting_party(actor_id: ActorId, task: &Task) -> ActingParty {
    if task.assigned_to() == Some(actor_id) {
        ActingParty::Assignee
    } else {
        ActingParty::CreatorSide
    }
}

fn status_move(changes: &[FieldChange]) -> StatusMove {
    changes
        .iter()
        .find_map(|change| match change {
            FieldChange::Status(TaskStatus::Completed) => Some(StatusMove::Completed),
            FieldChange::Status(TaskStatus::InProgress) => Some(StatusMove::Started),
            FieldChange::Status(TaskStatus::NotPicked) => Some(StatusMove::OtherOrNone),
            _ => None,
        })
        .unwrap_or(StatusMove::OtherOrNone)
}

const fn decide(party: ActingParty, movement: StatusMove) -> UpdateRoute {
    match (party, movement) {
        (ActingParty::Assignee, StatusMove::Completed) => UpdateRoute::CompletedToCreator,
        (ActingParty::Assignee, StatusMove::Started) => UpdateRoute::StartedToCreator,
        (ActingParty::Assignee, StatusMove::OtherOrNone) => UpdateRoute::SummaryToCreator,
        (ActingParty::CreatorSide, _) => UpdateRoute::SummaryToAssignee,
    }
}

/// Builds the update notification for a changed task, or `None` when no
/// counterpart should hear about it.
///
/// Self-notification is always suppressed: whatever the table picks, an
/// event addressed to the acting actor is dropped.
#[must_use]
pub fn route_update(
    actor_id: ActorId,
    task: &Task,
    changes: &[FieldChange],
) -> Option<NewNotification> {
    if changes.is_empty() {
        return None;
    }
    let route = decide(acting_party(actor_id, task), status_move(changes));
    let recipient = match route {
        UpdateRoute::CompletedToCreator
        | UpdateRoute::StartedToCreator
        | UpdateRoute::SummaryToCreator => Some(task.created_by()),
        UpdateRoute::SummaryToAssignee => task.assigned_to(),
    };
    let recipient = recipient.filter(|candidate| *candidate != actor_id)?;
    let notification = match route {
        UpdateRoute::CompletedToCreator => {
            NewNotification::task_completed(recipient, actor_id, task.id(), task.title())
        }
        UpdateRoute::StartedToCreator => {
            NewNotification::task_in_progress(recipient, actor_id, task.id(), task.title())
        }
        UpdateRoute::SummaryToCreator | UpdateRoute::SummaryToAssignee => {
            NewNotification::task_updated(
                recipient,
                actor_id,
                task.id(),
                task.title(),
                &summarize(changes),
            )
        }
    };
    Some(notification)
}
