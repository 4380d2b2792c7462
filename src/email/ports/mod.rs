//! Port contracts for the email side-channel.

pub mod mailer;

pub use mailer::{MailerError, MailerResult, TransactionalMailer};
