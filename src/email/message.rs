//! Outbound email value types.

use serde::{Deserialize, Serialize};

/// A named email address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mailbox {
    /// Address the message is delivered to or sent from.
    pub email: String,
    /// Optional display name.
    pub name: Option<String>,
}

impl Mailbox {
    /// Creates a mailbox with a display name.
    #[must_use]
    pub fn new(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: Some(name.into()),
        }
    }

    /// Creates a mailbox from a bare address.
    #[must_use]
    pub fn bare(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: None,
        }
    }
}

/// A fully composed transactional email, ready for transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundEmail {
    /// Sender mailbox.
    pub sender: Mailbox,
    /// Recipient mailbox.
    pub to: Mailbox,
    /// Subject line.
    pub subject: String,
    /// Rendered HTML body.
    pub html_body: String,
    /// Classification tags forwarded to the transport provider.
    pub tags: Vec<String>,
}
