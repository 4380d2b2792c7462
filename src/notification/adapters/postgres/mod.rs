//! `PostgreSQL` adapters for notification persistence.

mod ledger;
mod models;
mod schema;

pub use ledger::{NotificationPgPool, PostgresNotificationLedger};
