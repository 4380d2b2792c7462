//! Email side-channel: transactional mail contract and template rendering.
//!
//! The core never owns transport. It composes an [`message::OutboundEmail`]
//! and hands it to a [`ports::TransactionalMailer`]; a send failure is an
//! operational event to log, never a failure of the domain operation that
//! triggered it.

pub mod adapters;
pub mod message;
pub mod ports;
pub mod templates;

pub use message::{Mailbox, OutboundEmail};
pub use templates::{EmailRenderError, invitation_email, task_assignment_email};
