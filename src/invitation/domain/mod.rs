//! Domain model for workspace invitations.

mod invitation;
mod token;

pub use invitation::{
    Invitation, InvitationId, InvitationStatus, ParseInvitationStatusError,
    PersistedInvitationData,
};
pub use token::{InvitationToken, TokenDigest};
