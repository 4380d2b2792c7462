//! Adapter implementations of the invitation ledger port.

pub mod memory;
pub mod postgres;

pub use memory::InMemoryInvitationLedger;
pub use postgres::{InvitationPgPool, PostgresInvitationLedger};
