//! The invitation aggregate.

use super::token::TokenDigest;
use crate::directory::domain::{ActorId, ActorRole};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for an invitation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvitationId(Uuid);

impl InvitationId {
    /// Creates a new random invitation identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an invitation identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for InvitationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for InvitationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle state of an invitation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvitationStatus {
    /// Issued and awaiting redemption.
    Pending,
    /// Redeemed; an account exists for the email.
    Accepted,
}

impl InvitationStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
        }
    }
}

impl TryFrom<&str> for InvitationStatus {
    type Error = ParseInvitationStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            _ => Err(ParseInvitationStatusError(value.to_owned())),
        }
    }
}

/// Error returned while parsing invitation statuses from persistence.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
#[error("unknown invitation status: {0}")]
pub struct ParseInvitationStatusError(pub String);

/// An invitation binding an email address to a role, keyed by email.
///
/// At most one invitation exists per email; re-inviting rotates the token
/// and refreshes the role on the same row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invitation {
    id: InvitationId,
    email: String,
    role: ActorRole,
    invited_by: ActorId,
    status: InvitationStatus,
    token_digest: TokenDigest,
    created_at: DateTime<Utc>,
}

/// Raw field values used to rehydrate an invitation from persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedInvitationData {
    /// Invitation identifier.
    pub id: InvitationId,
    /// Invited email, stored lowercased.
    pub email: String,
    /// Role granted on redemption.
    pub role: ActorRole,
    /// Inviting actor.
    pub invited_by: ActorId,
    /// Lifecycle state.
    pub status: InvitationStatus,
    /// Digest of the currently valid token.
    pub token_digest: TokenDigest,
    /// Issue or rotation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Invitation {
    /// Creates a pending invitation.
    ///
    /// The email is trimmed and lowercased so redemption matching is exact
    /// on the stored form.
    #[must_use]
    pub fn new(
        email: &str,
        role: ActorRole,
        invited_by: ActorId,
        token_digest: TokenDigest,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: InvitationId::new(),
            email: email.trim().to_ascii_lowercase(),
            role,
            invited_by,
            status: InvitationStatus::Pending,
            token_digest,
            created_at: clock.utc(),
        }
    }

    /// Rehydrates an invitation from persisted field values.
    #[must_use]
    pub fn from_persisted(data: PersistedInvitationData) -> Self {
        Self {
            id: data.id,
            email: data.email,
            role: data.role,
            invited_by: data.invited_by,
            status: data.status,
            token_digest: data.token_digest,
            created_at: data.created_at,
        }
    }

    /// Returns the invitation identifier.
    #[must_use]
    pub const fn id(&self) -> InvitationId {
        self.id
    }

    /// Returns the invited email.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the role granted on redemption.
    #[must_use]
    pub const fn role(&self) -> ActorRole {
        self.role
    }

    /// Returns the inviting actor.
    #[must_use]
    pub const fn invited_by(&self) -> ActorId {
        self.invited_by
    }

    /// Returns the lifecycle state.
    #[must_use]
    pub const fn status(&self) -> InvitationStatus {
        self.status
    }

    /// Returns whether the invitation is still awaiting redemption.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.status == InvitationStatus::Pending
    }

    /// Returns the digest of the currently valid token.
    #[must_use]
    pub const fn token_digest(&self) -> &TokenDigest {
        &self.token_digest
    }

    /// Returns the issue or rotation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the replacement row a re-invite rotates onto this one.
    ///
    /// The identifier and email survive; role, inviter, token digest, and
    /// timestamp come from the fresh candidate, and the status returns to
    /// pending.
    #[must_use]
    pub fn rotated_from(&self, candidate: &Self) -> Self {
        Self {
            id: self.id,
            email: self.email.clone(),
            role: candidate.role,
            invited_by: candidate.invited_by,
            status: InvitationStatus::Pending,
            token_digest: candidate.token_digest.clone(),
            created_at: candidate.created_at,
        }
    }

    /// Returns a copy of this invitation marked accepted.
    #[must_use]
    pub fn accepted(&self) -> Self {
        Self {
            status: InvitationStatus::Accepted,
            ..self.clone()
        }
    }
}
