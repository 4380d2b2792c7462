//! Diesel row models for invitation persistence.

use super::schema::invitations;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for invitation records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = invitations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct InvitationRow {
    /// Row identifier.
    pub id: uuid::Uuid,
    /// Invited email, stored lowercased.
    pub email: String,
    /// Role granted on redemption.
    pub role: String,
    /// Inviting actor.
    pub invited_by: uuid::Uuid,
    /// Lifecycle state.
    pub status: String,
    /// Digest of the currently valid token.
    pub token_digest: String,
    /// Issue or rotation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for invitation records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = invitations)]
pub struct NewInvitationRow {
    /// Row identifier.
    pub id: uuid::Uuid,
    /// Invited email, stored lowercased.
    pub email: String,
    /// Role granted on redemption.
    pub role: String,
    /// Inviting actor.
    pub invited_by: uuid::Uuid,
    /// Lifecycle state.
    pub status: String,
    /// Digest of the currently valid token.
    pub token_digest: String,
    /// Issue or rotation timestamp.
    pub created_at: DateTime<Utc>,
}
