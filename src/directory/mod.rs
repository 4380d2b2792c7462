//! Actor directory consumed from the identity subsystem.
//!
//! The coordination core never owns authentication; it consumes the resolved
//! outcome of it — who is acting, with which role, and whether the account
//! is still active. Account provisioning and soft-deactivation are delegated
//! through the same port because the invitation lifecycle bridges to them.
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]

pub mod adapters;
pub mod domain;
pub mod ports;
