//! `PostgreSQL` adapters for invitation persistence.

mod ledger;
mod models;
mod schema;

pub use ledger::{InvitationPgPool, PostgresInvitationLedger};
