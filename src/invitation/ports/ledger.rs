//! Ledger port for invitation persistence.

use crate::invitation::domain::{Invitation, InvitationId, TokenDigest};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for invitation ledger operations.
pub type InvitationLedgerResult<T> = Result<T, InvitationLedgerError>;

/// Invitation persistence contract.
///
/// Rows are keyed by email. The rotation and acceptance conditions are part
/// of the port so they hold atomically under concurrent callers.
#[async_trait]
pub trait InvitationLedger: Send + Sync {
    /// Inserts the candidate, or rotates an existing pending row for the
    /// same email onto it (preserving that row's identifier).
    ///
    /// Returns the stored invitation, which differs from the candidate when
    /// a rotation occurred.
    ///
    /// # Errors
    ///
    /// Returns [`InvitationLedgerError::AlreadyAccepted`] when the email
    /// already has an accepted invitation.
    async fn upsert_pending(&self, candidate: Invitation) -> InvitationLedgerResult<Invitation>;

    /// Finds an invitation by identifier.
    async fn find_by_id(&self, id: InvitationId) -> InvitationLedgerResult<Option<Invitation>>;

    /// Finds an invitation by token digest.
    async fn find_by_token_digest(
        &self,
        digest: &TokenDigest,
    ) -> InvitationLedgerResult<Option<Invitation>>;

    /// Flips a pending invitation to accepted and returns the updated row.
    ///
    /// The flip is conditional on the row still being pending, which makes
    /// the token single-use even when two redemptions race.
    ///
    /// # Errors
    ///
    /// Returns [`InvitationLedgerError::NotFound`] for an unknown id and
    /// [`InvitationLedgerError::AlreadyRedeemed`] when the row is no longer
    /// pending.
    async fn mark_accepted(&self, id: InvitationId) -> InvitationLedgerResult<Invitation>;

    /// Deletes an invitation.
    ///
    /// # Errors
    ///
    /// Returns [`InvitationLedgerError::NotFound`] for an unknown id.
    async fn delete(&self, id: InvitationId) -> InvitationLedgerResult<()>;

    /// Returns every invitation, newest first.
    async fn list_all(&self) -> InvitationLedgerResult<Vec<Invitation>>;
}

/// Errors returned by invitation ledger implementations.
#[derive(Debug, Clone, Error)]
pub enum InvitationLedgerError {
    /// The email already redeemed an invitation.
    #[error("invitation for {0} has already been accepted")]
    AlreadyAccepted(String),

    /// The invitation was redeemed by an earlier caller.
    #[error("invitation already redeemed: {0}")]
    AlreadyRedeemed(InvitationId),

    /// The invitation does not exist.
    #[error("invitation not found: {0}")]
    NotFound(InvitationId),

    /// The backing store failed.
    #[error("invitation persistence failure: {0}")]
    Persistence(#[source] Arc<dyn std::error::Error + Send + Sync>),
}

impl InvitationLedgerError {
    /// Wraps a backend failure in the persistence variant.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
