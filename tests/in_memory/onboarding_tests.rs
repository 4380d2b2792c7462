//! Invitation onboarding flows across the composed workspace.

use crate::in_memory::helpers::{Workspace, onboard_employee, workspace};
use atelier::directory::domain::ActorRole;
use atelier::directory::ports::ActorDirectory;
use atelier::invitation::services::{InvitationError, RedemptionProfile};
use atelier::notification::domain::NotificationKind;
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn invitation_flow_provisions_an_account_and_tells_the_admin(
    workspace: Workspace,
) -> Result<(), eyre::Report> {
    let employee = onboard_employee(&workspace, "Eve Employee", "eve@example.com").await?;

    eyre::ensure!(employee.is_active(), "redeemed account should be active");
    eyre::ensure!(
        employee.role() == ActorRole::Employee,
        "role should come from the invitation"
    );

    let feed = workspace.dispatcher.feed(workspace.admin.id(), 10).await?;
    eyre::ensure!(feed.len() == 1, "admin should see one event");
    let signup = feed
        .first()
        .ok_or_else(|| eyre::eyre!("expected a signup event"))?;
    eyre::ensure!(
        signup.notification.kind == NotificationKind::UserSignup,
        "event should be the signup"
    );
    eyre::ensure!(
        signup.notification.message.contains("eve@example.com"),
        "signup copy should carry the email"
    );

    let sent = workspace.mailer.sent()?;
    eyre::ensure!(sent.len() == 1, "exactly the invitation email goes out");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn redeemed_token_cannot_be_replayed(workspace: Workspace) -> Result<(), eyre::Report> {
    let issued = workspace
        .coordinator
        .invite(&workspace.admin, "eve@example.com", ActorRole::Employee)
        .await?;
    workspace
        .coordinator
        .redeem(
            &issued.token,
            RedemptionProfile::new("Eve Employee", "eve@example.com"),
        )
        .await?;

    let replay = workspace
        .coordinator
        .redeem(
            &issued.token,
            RedemptionProfile::new("Eve Again", "eve@example.com"),
        )
        .await;

    eyre::ensure!(
        matches!(replay, Err(InvitationError::UserAlreadyExists(_))),
        "replay should be rejected"
    );
    let account = workspace
        .directory
        .find_by_email("eve@example.com")
        .await?
        .ok_or_else(|| eyre::eyre!("account should exist"))?;
    eyre::ensure!(account.is_active(), "the single account survives");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn revoking_an_accepted_invitation_locks_the_account_out_of_new_events(
    workspace: Workspace,
) -> Result<(), eyre::Report> {
    let issued = workspace
        .coordinator
        .invite(&workspace.admin, "eve@example.com", ActorRole::Employee)
        .await?;
    let employee = workspace
        .coordinator
        .redeem(
            &issued.token,
            RedemptionProfile::new("Eve Employee", "eve@example.com"),
        )
        .await?;

    workspace.coordinator.revoke(issued.invitation.id()).await?;

    let account = workspace
        .directory
        .find_by_id(employee.id())
        .await?
        .ok_or_else(|| eyre::eyre!("account should still exist"))?;
    eyre::ensure!(!account.is_active(), "account should be deactivated");
    Ok(())
}
