//! Sign-in broadcast and its deduplication window across the workspace.

use crate::in_memory::helpers::{Workspace, onboard_employee, workspace};
use atelier::notification::domain::NotificationKind;
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn login_broadcast_reaches_active_admins_once_per_window(
    workspace: Workspace,
) -> Result<(), eyre::Report> {
    let employee = onboard_employee(&workspace, "Eve Employee", "eve@example.com").await?;
    workspace
        .dispatcher
        .acknowledge_all(workspace.admin.id())
        .await?;

    let first = workspace.dispatcher.broadcast_login(&employee).await?;
    eyre::ensure!(first == 1, "one admin should hear the sign-in");

    // Straight away again: inside the window, nothing new lands.
    let second = workspace.dispatcher.broadcast_login(&employee).await?;
    eyre::ensure!(second == 0, "repeat sign-in should be absorbed by the window");

    let feed = workspace.dispatcher.feed(workspace.admin.id(), 10).await?;
    eyre::ensure!(feed.len() == 1, "feed should carry a single sign-in row");
    let event = feed
        .first()
        .ok_or_else(|| eyre::eyre!("expected a sign-in event"))?;
    eyre::ensure!(
        event.notification.kind == NotificationKind::UserLogin,
        "event should be the sign-in"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn admins_own_logins_are_not_echoed_back(
    workspace: Workspace,
) -> Result<(), eyre::Report> {
    let delivered = workspace.dispatcher.broadcast_login(&workspace.admin).await?;
    eyre::ensure!(delivered == 0, "the actor never hears their own sign-in");

    let unread = workspace.dispatcher.unread_count(workspace.admin.id()).await?;
    eyre::ensure!(unread == 0, "no row should be written");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn logins_from_different_people_are_kept_apart(
    workspace: Workspace,
) -> Result<(), eyre::Report> {
    let eve = onboard_employee(&workspace, "Eve Employee", "eve@example.com").await?;
    let sam = onboard_employee(&workspace, "Sam Staff", "sam@example.com").await?;
    workspace
        .dispatcher
        .acknowledge_all(workspace.admin.id())
        .await?;

    let from_eve = workspace.dispatcher.broadcast_login(&eve).await?;
    let from_sam = workspace.dispatcher.broadcast_login(&sam).await?;
    eyre::ensure!(
        from_eve == 1 && from_sam == 1,
        "the window is per sender, not global"
    );

    let unread = workspace.dispatcher.unread_count(workspace.admin.id()).await?;
    eyre::ensure!(unread == 2, "both sign-ins should be on the feed");
    Ok(())
}
