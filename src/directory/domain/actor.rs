//! Actor identity, role, and activity status.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Unique identifier for an actor account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActorId(Uuid);

impl ActorId {
    /// Creates a new random actor identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an actor identifier from an existing UUID.
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

impl Default for ActorId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Actor role within the workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorRole {
    /// Administrator: creates tasks, invites users, sees workspace-wide feeds.
    Admin,
    /// Employee: works assigned tasks.
    Employee,
}

impl ActorRole {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Employee => "employee",
        }
    }
}

impl TryFrom<&str> for ActorRole {
    type Error = ParseActorRoleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "employee" => Ok(Self::Employee),
            _ => Err(ParseActorRoleError(value.to_owned())),
        }
    }
}

impl fmt::Display for ActorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned while parsing actor roles from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown actor role: {0}")]
pub struct ParseActorRoleError(pub String);

/// Actor account status.
///
/// An inactive actor is treated as effectively nonexistent for new work:
/// not assignable and not selectable as a notification recipient. Rows
/// already addressed to them are left in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorStatus {
    /// Account is live.
    Active,
    /// Account has been soft-deactivated.
    Inactive,
}

/// Read model of an actor consumed by the coordination core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    id: ActorId,
    full_name: String,
    email: String,
    role: ActorRole,
    status: ActorStatus,
}

impl Actor {
    /// Creates an actor read model.
    #[must_use]
    pub fn new(
        id: ActorId,
        full_name: impl Into<String>,
        email: impl Into<String>,
        role: ActorRole,
        status: ActorStatus,
    ) -> Self {
        Self {
            id,
            full_name: full_name.into(),
            email: email.into(),
            role,
            status,
        }
    }

    /// Returns the actor identifier.
    #[must_use]
    pub const fn id(&self) -> ActorId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Returns the account email address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the workspace role.
    #[must_use]
    pub const fn role(&self) -> ActorRole {
        self.role
    }

    /// Returns the account status.
    #[must_use]
    pub const fn status(&self) -> ActorStatus {
        self.status
    }

    /// Returns whether the account is live.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == ActorStatus::Active
    }

    /// Returns whether the actor holds the admin role.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == ActorRole::Admin
    }

    /// Returns a copy of this actor with status flipped to inactive.
    #[must_use]
    pub fn deactivated(&self) -> Self {
        Self {
            status: ActorStatus::Inactive,
            ..self.clone()
        }
    }
}

/// Profile supplied when provisioning an account for a redeemed invitation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewActor {
    /// Display name for the new account.
    pub full_name: String,
    /// Email the account is bound to.
    pub email: String,
    /// Role carried over from the invitation.
    pub role: ActorRole,
}

impl NewActor {
    /// Creates a provisioning profile.
    #[must_use]
    pub fn new(full_name: impl Into<String>, email: impl Into<String>, role: ActorRole) -> Self {
        Self {
            full_name: full_name.into(),
            email: email.into(),
            role,
        }
    }
}
