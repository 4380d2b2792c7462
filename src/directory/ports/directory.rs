//! Directory port bridging to the external identity subsystem.

use crate::directory::domain::{Actor, ActorId, NewActor};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for actor directory operations.
pub type ActorDirectoryResult<T> = Result<T, ActorDirectoryError>;

/// Read and provisioning contract over the identity subsystem.
#[async_trait]
pub trait ActorDirectory: Send + Sync {
    /// Finds an actor by identifier.
    ///
    /// Returns `None` when no account exists for the id.
    async fn find_by_id(&self, id: ActorId) -> ActorDirectoryResult<Option<Actor>>;

    /// Finds an actor by email address.
    async fn find_by_email(&self, email: &str) -> ActorDirectoryResult<Option<Actor>>;

    /// Returns all active administrators.
    ///
    /// Inactive admins are excluded so they are never selected as
    /// recipients for new events.
    async fn admins(&self) -> ActorDirectoryResult<Vec<Actor>>;

    /// Provisions a new active account.
    ///
    /// # Errors
    ///
    /// Returns [`ActorDirectoryError::DuplicateEmail`] when an account
    /// already exists for the email.
    async fn provision(&self, profile: NewActor) -> ActorDirectoryResult<Actor>;

    /// Soft-deactivates the account bound to the email, if one exists.
    ///
    /// Deactivating an unknown email is a no-op, mirroring the idempotent
    /// revocation flow.
    async fn deactivate_by_email(&self, email: &str) -> ActorDirectoryResult<()>;
}

/// Errors returned by actor directory implementations.
#[derive(Debug, Clone, Error)]
pub enum ActorDirectoryError {
    /// An account already exists for the email.
    #[error("account already exists for email: {0}")]
    DuplicateEmail(String),

    /// Identity-subsystem failure.
    #[error("directory error: {0}")]
    Backend(Arc<dyn std::error::Error + Send + Sync>),
}

impl ActorDirectoryError {
    /// Wraps a backend error.
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Backend(Arc::new(err))
    }
}
