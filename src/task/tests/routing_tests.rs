//! Decision-table tests for update-notification routing.

use chrono::NaiveDate;
use mockable::DefaultClock;
use rstest::rstest;

use crate::directory::domain::ActorId;
use crate::notification::domain::NotificationKind;
use crate::task::domain::{
    FieldChange, Task, TaskDraft, TaskPriority, TaskStatus,
};
use crate::task::services::route_update;

fn task_with(creator: ActorId, assignee: Option<ActorId>) -> Task {
    let mut draft = TaskDraft::new(
        "Fence",
        "Paint it",
        TaskPriority::Medium,
        NaiveDate::from_ymd_opt(2025, 12, 31).expect("valid date"),
    );
    if let Some(assignee) = assignee {
        draft = draft.assigned_to(assignee);
    }
    Task::new(draft, creator, &DefaultClock).expect("task creation should succeed")
}

#[rstest]
fn no_changes_routes_nowhere() {
    let creator = ActorId::new();
    let task = task_with(creator, Some(ActorId::new()));
    assert!(route_update(creator, &task, &[]).is_none());
}

#[rstest]
#[case(TaskStatus::Completed, NotificationKind::TaskCompleted)]
#[case(TaskStatus::InProgress, NotificationKind::TaskInProgress)]
fn assignee_status_move_sends_specific_kind_to_creator(
    #[case] status: TaskStatus,
    #[case] kind: NotificationKind,
) {
    let creator = ActorId::new();
    let assignee = ActorId::new();
    let task = task_with(creator, Some(assignee));

    let pending = route_update(assignee, &task, &[FieldChange::Status(status)])
        .expect("route should produce an event");

    assert_eq!(pending.kind, kind);
    assert_eq!(pending.recipient_id, creator);
    assert_eq!(pending.sender_id, Some(assignee));
}

#[rstest]
fn assignee_reverting_to_not_picked_sends_generic_update() {
    let creator = ActorId::new();
    let assignee = ActorId::new();
    let task = task_with(creator, Some(assignee));

    let pending = route_update(
        assignee,
        &task,
        &[FieldChange::Status(TaskStatus::NotPicked)],
    )
    .expect("route should produce an event");

    assert_eq!(pending.kind, NotificationKind::TaskUpdated);
    assert_eq!(pending.recipient_id, creator);
}

#[rstest]
fn assignee_non_status_edit_sends_summary_to_creator() {
    let creator = ActorId::new();
    let assignee = ActorId::new();
    let task = task_with(creator, Some(assignee));

    let pending = route_update(assignee, &task, &[FieldChange::Deadline])
        .expect("route should produce an event");

    assert_eq!(pending.kind, NotificationKind::TaskUpdated);
    assert_eq!(pending.recipient_id, creator);
    assert!(pending.message.contains("deadline"));
}

#[rstest]
fn creator_edit_sends_summary_to_assignee() {
    let creator = ActorId::new();
    let assignee = ActorId::new();
    let task = task_with(creator, Some(assignee));

    let pending = route_update(
        creator,
        &task,
        &[FieldChange::Priority(TaskPriority::High)],
    )
    .expect("route should produce an event");

    assert_eq!(pending.kind, NotificationKind::TaskUpdated);
    assert_eq!(pending.recipient_id, assignee);
    assert!(pending.message.contains("priority to high"));
}

#[rstest]
fn creator_edit_on_unassigned_task_routes_nowhere() {
    let creator = ActorId::new();
    let task = task_with(creator, None);

    assert!(route_update(creator, &task, &[FieldChange::Title]).is_none());
}

#[rstest]
fn self_notification_is_suppressed_when_creator_is_assignee() {
    let actor = ActorId::new();
    let task = task_with(actor, Some(actor));

    let pending = route_update(
        actor,
        &task,
        &[FieldChange::Status(TaskStatus::Completed)],
    );

    assert!(pending.is_none());
}
