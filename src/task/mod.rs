//! Task workflow: the aggregate, its lifecycle, and the event fan-out.
//!
//! A task moves through not-picked, in-progress, and completed while being
//! reassigned, edited, and commented on. Every mutation is written first and
//! then fanned out to the notification ledger and, for assignments, the
//! email side-channel. The module follows hexagonal architecture:
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
