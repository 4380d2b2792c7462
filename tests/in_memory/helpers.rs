//! Shared wiring for in-memory integration tests.
//!
//! Builds a fully composed workspace: directory, notification dispatcher,
//! invitation coordinator, task workflow, and a recording mailer, all on the
//! in-memory adapters.

use std::sync::Arc;

use atelier::config::CoreConfig;
use atelier::directory::adapters::InMemoryActorDirectory;
use atelier::directory::domain::{Actor, ActorId, ActorRole, ActorStatus};
use atelier::email::adapters::RecordingMailer;
use atelier::invitation::adapters::InMemoryInvitationLedger;
use atelier::invitation::services::{InvitationCoordinator, RedemptionProfile};
use atelier::notification::adapters::InMemoryNotificationLedger;
use atelier::notification::services::NotificationDispatcher;
use atelier::task::adapters::{InMemoryCommentRepository, InMemoryTaskRepository};
use atelier::task::services::TaskWorkflowService;
use mockable::DefaultClock;
use rstest::fixture;

/// Dispatcher wired to the in-memory ledger and directory.
pub type TestDispatcher =
    NotificationDispatcher<InMemoryNotificationLedger, InMemoryActorDirectory, DefaultClock>;

/// Invitation coordinator on in-memory adapters.
pub type TestCoordinator = InvitationCoordinator<
    InMemoryInvitationLedger,
    InMemoryActorDirectory,
    InMemoryNotificationLedger,
    RecordingMailer,
    DefaultClock,
>;

/// Task workflow service on in-memory adapters.
pub type TestWorkflow = TaskWorkflowService<
    InMemoryTaskRepository,
    InMemoryCommentRepository,
    InMemoryNotificationLedger,
    InMemoryActorDirectory,
    RecordingMailer,
    DefaultClock,
>;

/// A fully wired in-memory workspace with one active admin.
pub struct Workspace {
    /// Actor directory shared by every service.
    pub directory: Arc<InMemoryActorDirectory>,
    /// Notification dispatcher, for feed and count assertions.
    pub dispatcher: TestDispatcher,
    /// Invitation coordinator.
    pub coordinator: TestCoordinator,
    /// Task workflow service.
    pub workflow: TestWorkflow,
    /// Records every outbound email.
    pub mailer: RecordingMailer,
    /// The workspace's administrator.
    pub admin: Actor,
}

/// Provides a freshly wired workspace for each test.
#[fixture]
pub fn workspace() -> Workspace {
    let directory = Arc::new(InMemoryActorDirectory::new());
    let admin = Actor::new(
        ActorId::new(),
        "Ada Admin",
        "ada@example.com",
        ActorRole::Admin,
        ActorStatus::Active,
    );
    directory
        .register(admin.clone())
        .expect("admin registration should succeed");

    let clock = Arc::new(DefaultClock);
    let config = Arc::new(CoreConfig::new(
        "https://tasks.example.com",
        "noreply@example.com",
        "Task Desk",
        "Task Desk",
    ));
    let mailer = RecordingMailer::new();
    let notification_ledger = Arc::new(InMemoryNotificationLedger::new());
    let dispatcher = NotificationDispatcher::new(
        Arc::clone(&notification_ledger),
        Arc::clone(&directory),
        Arc::clone(&clock),
    );
    let coordinator = InvitationCoordinator::new(
        Arc::new(InMemoryInvitationLedger::new()),
        Arc::clone(&directory),
        dispatcher.clone(),
        Arc::new(mailer.clone()),
        Arc::clone(&config),
        Arc::clone(&clock),
    );
    let workflow = TaskWorkflowService::new(
        Arc::new(InMemoryTaskRepository::new()),
        Arc::new(InMemoryCommentRepository::new()),
        Arc::clone(&directory),
        dispatcher.clone(),
        Arc::new(mailer.clone()),
        config,
        clock,
    );

    Workspace {
        directory,
        dispatcher,
        coordinator,
        workflow,
        mailer,
        admin,
    }
}

/// Invites and redeems an employee account in one step.
///
/// # Errors
///
/// Returns an error when the invite or the redemption fails.
pub async fn onboard_employee(
    workspace: &Workspace,
    full_name: &str,
    email: &str,
) -> Result<Actor, eyre::Report> {
    let issued = workspace
        .coordinator
        .invite(&workspace.admin, email, ActorRole::Employee)
        .await?;
    let actor = workspace
        .coordinator
        .redeem(&issued.token, RedemptionProfile::new(full_name, email))
        .await?;
    Ok(actor)
}
