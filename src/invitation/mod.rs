//! Workspace invitations: issue, redeem, revoke.
//!
//! An invitation binds an email to a role behind a single-use token. Only
//! the token's digest is stored; re-inviting rotates the token, redemption
//! provisions the account through the directory, and revocation of an
//! accepted invitation deactivates that account. The module follows
//! hexagonal architecture:
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
