//! Port contracts for invitation persistence.

pub mod ledger;

pub use ledger::{InvitationLedger, InvitationLedgerError, InvitationLedgerResult};
