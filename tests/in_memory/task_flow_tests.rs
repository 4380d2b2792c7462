//! End-to-end task lifecycle flows with their notification fan-out.

use crate::in_memory::helpers::{Workspace, onboard_employee, workspace};
use atelier::directory::ports::ActorDirectory;
use atelier::notification::domain::NotificationKind;
use atelier::task::domain::{TaskDraft, TaskPatch, TaskPriority, TaskStatus};
use chrono::NaiveDate;
use rstest::rstest;

fn deadline() -> Result<NaiveDate, eyre::Report> {
    NaiveDate::from_ymd_opt(2025, 12, 31).ok_or_else(|| eyre::eyre!("invalid date"))
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn assignment_through_completion_notifies_both_parties(
    workspace: Workspace,
) -> Result<(), eyre::Report> {
    let employee = onboard_employee(&workspace, "Eve Employee", "eve@example.com").await?;
    workspace
        .dispatcher
        .acknowledge_all(workspace.admin.id())
        .await?;

    let draft = TaskDraft::new(
        "Install the sign",
        "Front entrance, above the door",
        TaskPriority::High,
        deadline()?,
    )
    .assigned_to(employee.id());
    let task = workspace.workflow.create_task(&workspace.admin, draft).await?;

    // Assignment: the employee hears about it and gets the email.
    let unread = workspace.dispatcher.unread_count(employee.id()).await?;
    eyre::ensure!(unread == 1, "assignee should have one unread event");
    let sent = workspace.mailer.sent()?;
    eyre::ensure!(
        sent.iter().any(|email| email.to.email == "eve@example.com"
            && email.html_body.contains("Install the sign")),
        "assignment email should reach the assignee"
    );

    // The employee starts, then completes; the creator hears each move.
    workspace
        .workflow
        .apply_change(
            &employee,
            task.id(),
            TaskPatch::new().with_status(TaskStatus::InProgress),
        )
        .await?;
    workspace
        .workflow
        .apply_change(
            &employee,
            task.id(),
            TaskPatch::new().with_status(TaskStatus::Completed),
        )
        .await?;

    let feed = workspace.dispatcher.feed(workspace.admin.id(), 10).await?;
    let kinds: Vec<NotificationKind> =
        feed.iter().map(|item| item.notification.kind).collect();
    eyre::ensure!(
        kinds == vec![NotificationKind::TaskCompleted, NotificationKind::TaskInProgress],
        "creator should see the two status moves, newest first"
    );

    // Acknowledging empties the feed.
    workspace
        .dispatcher
        .acknowledge_all(workspace.admin.id())
        .await?;
    let remaining = workspace.dispatcher.unread_count(workspace.admin.id()).await?;
    eyre::ensure!(remaining == 0, "acknowledged feed should be empty");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn comments_cross_between_the_parties_only(
    workspace: Workspace,
) -> Result<(), eyre::Report> {
    let employee = onboard_employee(&workspace, "Eve Employee", "eve@example.com").await?;
    workspace
        .dispatcher
        .acknowledge_all(workspace.admin.id())
        .await?;
    let task = workspace
        .workflow
        .create_task(
            &workspace.admin,
            TaskDraft::new("Fit shelving", "Stock room", TaskPriority::Medium, deadline()?)
                .assigned_to(employee.id()),
        )
        .await?;

    workspace
        .workflow
        .add_comment(&workspace.admin, task.id(), "Shelf units arrive Tuesday")
        .await?;
    workspace
        .workflow
        .add_comment(&employee, task.id(), "Understood, starting Wednesday")
        .await?;

    let admin_feed = workspace.dispatcher.feed(workspace.admin.id(), 10).await?;
    eyre::ensure!(admin_feed.len() == 1, "admin hears the employee's comment only");
    let admin_event = admin_feed
        .first()
        .ok_or_else(|| eyre::eyre!("expected a comment event"))?;
    eyre::ensure!(
        admin_event.notification.kind == NotificationKind::CommentAdded,
        "event should be the comment"
    );
    let sender = admin_event
        .sender
        .as_ref()
        .ok_or_else(|| eyre::eyre!("sender should resolve"))?;
    eyre::ensure!(
        sender.email == "eve@example.com",
        "sender profile should be the employee"
    );

    let employee_kinds: Vec<NotificationKind> = workspace
        .dispatcher
        .feed(employee.id(), 10)
        .await?
        .iter()
        .map(|item| item.notification.kind)
        .collect();
    eyre::ensure!(
        employee_kinds
            == vec![NotificationKind::CommentAdded, NotificationKind::TaskAssigned],
        "employee hears the admin's comment and the assignment"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn edits_after_deactivation_stop_reaching_the_former_assignee(
    workspace: Workspace,
) -> Result<(), eyre::Report> {
    let employee = onboard_employee(&workspace, "Eve Employee", "eve@example.com").await?;
    let task = workspace
        .workflow
        .create_task(
            &workspace.admin,
            TaskDraft::new("Audit stock", "Quarterly", TaskPriority::Low, deadline()?)
                .assigned_to(employee.id()),
        )
        .await?;
    let unread_before = workspace.dispatcher.unread_count(employee.id()).await?;

    workspace
        .directory
        .deactivate_by_email("eve@example.com")
        .await?;
    workspace
        .workflow
        .apply_change(
            &workspace.admin,
            task.id(),
            TaskPatch::new().with_priority(TaskPriority::High),
        )
        .await?;

    // The write lands; the event is skipped for the inactive recipient,
    // and earlier rows stay where they are.
    let unread_after = workspace.dispatcher.unread_count(employee.id()).await?;
    eyre::ensure!(
        unread_after == unread_before,
        "no new event should reach a deactivated account"
    );
    Ok(())
}
