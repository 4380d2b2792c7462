//! Port contracts for notification persistence.

pub mod ledger;

pub use ledger::{NotificationLedger, NotificationLedgerError, NotificationLedgerResult};
