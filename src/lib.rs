//! Atelier: workflow coordination core for multi-tenant task assignment.
//!
//! This crate provides the coordination logic shared by the administrator
//! and employee surfaces of a task-assignment workspace: the task lifecycle
//! state machine, the notification fan-out and deduplication engine, and the
//! invitation-token lifecycle.
//!
//! # Architecture
//!
//! Atelier follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, test doubles)
//!
//! # Modules
//!
//! - [`directory`]: actor read model consumed from the identity subsystem
//! - [`task`]: task lifecycle transitions and change-diff notification
//! - [`notification`]: notification ledger, dispatch, and login dedup
//! - [`invitation`]: invitation token issue, redemption, and revocation
//! - [`email`]: transactional email contract and template rendering
//! - [`config`]: environment-backed runtime configuration

pub mod config;
pub mod directory;
pub mod email;
pub mod invitation;
pub mod notification;
pub mod task;
