//! Adapter implementations for notification persistence.

pub mod memory;
pub mod postgres;

pub use memory::InMemoryNotificationLedger;
pub use postgres::{NotificationPgPool, PostgresNotificationLedger};
