//! Notification ledger and dispatch for workspace events.
//!
//! A notification's existence is its unread state: acknowledging deletes the
//! row, and the unread count is the row count. The dispatcher owns the one
//! piece of rate shaping in the system, the 60-minute `user_login` dedup
//! window. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
