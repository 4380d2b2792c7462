//! Dispatcher tests: emit, login dedup, feeds, and acknowledgement.

use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use mockable::Clock;
use rstest::{fixture, rstest};

use super::FixedClock;
use crate::directory::adapters::InMemoryActorDirectory;
use crate::directory::domain::{Actor, ActorId, ActorRole, ActorStatus};
use crate::notification::adapters::InMemoryNotificationLedger;
use crate::notification::domain::{NewNotification, NotificationKind};
use crate::notification::services::{
    EmitOutcome, LOGIN_DEDUP_WINDOW_MINUTES, NotificationDispatcher,
};
use crate::task::domain::TaskId;

type TestDispatcher =
    NotificationDispatcher<InMemoryNotificationLedger, InMemoryActorDirectory, FixedClock>;

struct Harness {
    dispatcher: TestDispatcher,
    directory: Arc<InMemoryActorDirectory>,
    clock: Arc<FixedClock>,
}

#[fixture]
fn harness() -> Harness {
    let start = Utc
        .with_ymd_and_hms(2025, 6, 2, 10, 0, 0)
        .single()
        .expect("valid instant");
    let clock = Arc::new(FixedClock::new(start));
    let directory = Arc::new(InMemoryActorDirectory::new());
    let dispatcher = NotificationDispatcher::new(
        Arc::new(InMemoryNotificationLedger::new()),
        Arc::clone(&directory),
        Arc::clone(&clock),
    );
    Harness {
        dispatcher,
        directory,
        clock,
    }
}

fn active_admin(directory: &InMemoryActorDirectory, name: &str, email: &str) -> Actor {
    let actor = Actor::new(ActorId::new(), name, email, ActorRole::Admin, ActorStatus::Active);
    directory
        .register(actor.clone())
        .expect("registration should succeed");
    actor
}

fn active_employee(directory: &InMemoryActorDirectory, name: &str, email: &str) -> Actor {
    let actor = Actor::new(
        ActorId::new(),
        name,
        email,
        ActorRole::Employee,
        ActorStatus::Active,
    );
    directory
        .register(actor.clone())
        .expect("registration should succeed");
    actor
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn emit_writes_a_row_for_an_active_recipient(harness: Harness) {
    let admin = active_admin(&harness.directory, "Root Admin", "root@example.com");
    let employee = active_employee(&harness.directory, "Eve", "eve@example.com");

    let outcome = harness
        .dispatcher
        .emit(NewNotification::task_assigned(
            employee.id(),
            admin.id(),
            TaskId::new(),
            "Sweep the workshop",
        ))
        .await
        .expect("emit should succeed");

    assert!(matches!(outcome, EmitOutcome::Delivered(_)));
    let count = harness
        .dispatcher
        .unread_count(employee.id())
        .await
        .expect("count should succeed");
    assert_eq!(count, 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn emit_skips_unknown_recipient(harness: Harness) {
    let admin = active_admin(&harness.directory, "Root Admin", "root@example.com");

    let outcome = harness
        .dispatcher
        .emit(NewNotification::task_assigned(
            ActorId::new(),
            admin.id(),
            TaskId::new(),
            "Orphaned",
        ))
        .await
        .expect("emit should succeed");

    assert_eq!(outcome, EmitOutcome::RecipientUnavailable);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn emit_skips_inactive_recipient(harness: Harness) {
    let admin = active_admin(&harness.directory, "Root Admin", "root@example.com");
    let former = Actor::new(
        ActorId::new(),
        "Departed",
        "gone@example.com",
        ActorRole::Employee,
        ActorStatus::Inactive,
    );
    harness
        .directory
        .register(former.clone())
        .expect("registration should succeed");

    let outcome = harness
        .dispatcher
        .emit(NewNotification::task_assigned(
            former.id(),
            admin.id(),
            TaskId::new(),
            "Unreachable",
        ))
        .await
        .expect("emit should succeed");

    assert_eq!(outcome, EmitOutcome::RecipientUnavailable);
    let count = harness
        .dispatcher
        .unread_count(former.id())
        .await
        .expect("count should succeed");
    assert_eq!(count, 0);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn login_inside_window_is_deduplicated(harness: Harness) {
    let admin = active_admin(&harness.directory, "Root Admin", "root@example.com");
    let employee = active_employee(&harness.directory, "Eve", "eve@example.com");

    let first = harness
        .dispatcher
        .emit(NewNotification::user_login(
            admin.id(),
            employee.id(),
            employee.full_name(),
            employee.email(),
        ))
        .await
        .expect("first login should succeed");
    assert!(matches!(first, EmitOutcome::Delivered(_)));

    harness
        .clock
        .set(harness.clock.utc() + Duration::minutes(LOGIN_DEDUP_WINDOW_MINUTES - 1));
    let second = harness
        .dispatcher
        .emit(NewNotification::user_login(
            admin.id(),
            employee.id(),
            employee.full_name(),
            employee.email(),
        ))
        .await
        .expect("second login should succeed");
    assert_eq!(second, EmitOutcome::Deduplicated);

    let count = harness
        .dispatcher
        .unread_count(admin.id())
        .await
        .expect("count should succeed");
    assert_eq!(count, 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn login_outside_window_replaces_the_stale_row(harness: Harness) {
    let admin = active_admin(&harness.directory, "Root Admin", "root@example.com");
    let employee = active_employee(&harness.directory, "Eve", "eve@example.com");

    harness
        .dispatcher
        .emit(NewNotification::user_login(
            admin.id(),
            employee.id(),
            employee.full_name(),
            employee.email(),
        ))
        .await
        .expect("first login should succeed");

    harness
        .clock
        .set(harness.clock.utc() + Duration::minutes(LOGIN_DEDUP_WINDOW_MINUTES + 1));
    let outcome = harness
        .dispatcher
        .emit(NewNotification::user_login(
            admin.id(),
            employee.id(),
            employee.full_name(),
            employee.email(),
        ))
        .await
        .expect("second login should succeed");

    assert!(matches!(outcome, EmitOutcome::Delivered(_)));
    // The stale row is pruned, so the pair still holds exactly one row.
    let count = harness
        .dispatcher
        .unread_count(admin.id())
        .await
        .expect("count should succeed");
    assert_eq!(count, 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn logins_from_different_senders_are_not_deduplicated_together(harness: Harness) {
    let admin = active_admin(&harness.directory, "Root Admin", "root@example.com");
    let eve = active_employee(&harness.directory, "Eve", "eve@example.com");
    let mallory = active_employee(&harness.directory, "Mallory", "mallory@example.com");

    for user in [&eve, &mallory] {
        let outcome = harness
            .dispatcher
            .emit(NewNotification::user_login(
                admin.id(),
                user.id(),
                user.full_name(),
                user.email(),
            ))
            .await
            .expect("login should succeed");
        assert!(matches!(outcome, EmitOutcome::Delivered(_)));
    }

    let count = harness
        .dispatcher
        .unread_count(admin.id())
        .await
        .expect("count should succeed");
    assert_eq!(count, 2);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn non_login_kinds_are_never_deduplicated(harness: Harness) {
    let admin = active_admin(&harness.directory, "Root Admin", "root@example.com");
    let employee = active_employee(&harness.directory, "Eve", "eve@example.com");
    let task_id = TaskId::new();

    for _ in 0..3 {
        harness
            .dispatcher
            .emit(NewNotification::task_updated(
                employee.id(),
                admin.id(),
                task_id,
                "Fence",
                "priority to high",
            ))
            .await
            .expect("emit should succeed");
    }

    let count = harness
        .dispatcher
        .unread_count(employee.id())
        .await
        .expect("count should succeed");
    assert_eq!(count, 3);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn feed_is_newest_first_and_resolves_senders(harness: Harness) {
    let admin = active_admin(&harness.directory, "Root Admin", "root@example.com");
    let employee = active_employee(&harness.directory, "Eve", "eve@example.com");
    let task_id = TaskId::new();

    harness
        .dispatcher
        .emit(NewNotification::task_assigned(
            employee.id(),
            admin.id(),
            task_id,
            "First",
        ))
        .await
        .expect("emit should succeed");
    harness.clock.set(harness.clock.utc() + Duration::minutes(5));
    harness
        .dispatcher
        .emit(NewNotification::comment_added(
            employee.id(),
            admin.id(),
            task_id,
            "First",
            "ping",
        ))
        .await
        .expect("emit should succeed");

    let feed = harness
        .dispatcher
        .feed(employee.id(), 10)
        .await
        .expect("feed should succeed");

    assert_eq!(feed.len(), 2);
    assert_eq!(feed[0].notification.kind, NotificationKind::CommentAdded);
    assert_eq!(feed[1].notification.kind, NotificationKind::TaskAssigned);
    let sender = feed[0].sender.as_ref().expect("sender should resolve");
    assert_eq!(sender.full_name, "Root Admin");
    assert_eq!(sender.email, "root@example.com");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn feed_honours_the_limit(harness: Harness) {
    let admin = active_admin(&harness.directory, "Root Admin", "root@example.com");
    let employee = active_employee(&harness.directory, "Eve", "eve@example.com");

    for index in 0..5 {
        harness
            .dispatcher
            .emit(NewNotification::task_assigned(
                employee.id(),
                admin.id(),
                TaskId::new(),
                &format!("Task {index}"),
            ))
            .await
            .expect("emit should succeed");
    }

    let feed = harness
        .dispatcher
        .feed(employee.id(), 2)
        .await
        .expect("feed should succeed");
    assert_eq!(feed.len(), 2);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn acknowledge_removes_a_single_row_and_is_idempotent(harness: Harness) {
    let admin = active_admin(&harness.directory, "Root Admin", "root@example.com");
    let employee = active_employee(&harness.directory, "Eve", "eve@example.com");

    let outcome = harness
        .dispatcher
        .emit(NewNotification::task_assigned(
            employee.id(),
            admin.id(),
            TaskId::new(),
            "Fence",
        ))
        .await
        .expect("emit should succeed");
    let EmitOutcome::Delivered(notification) = outcome else {
        panic!("expected delivery");
    };

    harness
        .dispatcher
        .acknowledge(notification.id)
        .await
        .expect("acknowledge should succeed");
    harness
        .dispatcher
        .acknowledge(notification.id)
        .await
        .expect("repeat acknowledge should succeed");

    let count = harness
        .dispatcher
        .unread_count(employee.id())
        .await
        .expect("count should succeed");
    assert_eq!(count, 0);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn acknowledge_all_clears_only_the_recipient(harness: Harness) {
    let admin = active_admin(&harness.directory, "Root Admin", "root@example.com");
    let eve = active_employee(&harness.directory, "Eve", "eve@example.com");
    let mallory = active_employee(&harness.directory, "Mallory", "mallory@example.com");

    for recipient in [&eve, &mallory] {
        harness
            .dispatcher
            .emit(NewNotification::task_assigned(
                recipient.id(),
                admin.id(),
                TaskId::new(),
                "Shared",
            ))
            .await
            .expect("emit should succeed");
    }

    harness
        .dispatcher
        .acknowledge_all(eve.id())
        .await
        .expect("acknowledge_all should succeed");

    assert_eq!(
        harness
            .dispatcher
            .unread_count(eve.id())
            .await
            .expect("count should succeed"),
        0
    );
    assert_eq!(
        harness
            .dispatcher
            .unread_count(mallory.id())
            .await
            .expect("count should succeed"),
        1
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn broadcast_login_skips_the_actor_and_inactive_admins(harness: Harness) {
    let observer = active_admin(&harness.directory, "Observer", "observer@example.com");
    let acting_admin = active_admin(&harness.directory, "Actor", "actor@example.com");
    let retired = Actor::new(
        ActorId::new(),
        "Retired",
        "retired@example.com",
        ActorRole::Admin,
        ActorStatus::Inactive,
    );
    harness
        .directory
        .register(retired.clone())
        .expect("registration should succeed");

    let delivered = harness
        .dispatcher
        .broadcast_login(&acting_admin)
        .await
        .expect("broadcast should succeed");

    assert_eq!(delivered, 1);
    assert_eq!(
        harness
            .dispatcher
            .unread_count(observer.id())
            .await
            .expect("count should succeed"),
        1
    );
    assert_eq!(
        harness
            .dispatcher
            .unread_count(acting_admin.id())
            .await
            .expect("count should succeed"),
        0
    );
    assert_eq!(
        harness
            .dispatcher
            .unread_count(retired.id())
            .await
            .expect("count should succeed"),
        0
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn broadcast_signup_reaches_every_other_active_admin(harness: Harness) {
    let first = active_admin(&harness.directory, "First", "first@example.com");
    let second = active_admin(&harness.directory, "Second", "second@example.com");
    let newcomer = active_employee(&harness.directory, "Newcomer", "new@example.com");

    let delivered = harness
        .dispatcher
        .broadcast_signup(&newcomer)
        .await
        .expect("broadcast should succeed");

    assert_eq!(delivered, 2);
    for admin in [&first, &second] {
        let feed = harness
            .dispatcher
            .feed(admin.id(), 10)
            .await
            .expect("feed should succeed");
        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0].notification.kind, NotificationKind::UserSignup);
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn cloned_dispatcher_shares_the_ledger(harness: Harness) {
    // The handles must clone even though the clock itself is not Clone.
    let clone = harness.dispatcher.clone();
    let admin = active_admin(&harness.directory, "Root Admin", "root@example.com");
    let employee = active_employee(&harness.directory, "Eve", "eve@example.com");

    clone
        .emit(NewNotification::task_assigned(
            employee.id(),
            admin.id(),
            TaskId::new(),
            "Shared ledger",
        ))
        .await
        .expect("emit should succeed");

    let count = harness
        .dispatcher
        .unread_count(employee.id())
        .await
        .expect("count should succeed");
    assert_eq!(count, 1);
}
