//! Invitation orchestration: issue, redeem, revoke.

use std::sync::Arc;

use mockable::Clock;
use thiserror::Error;

use crate::config::CoreConfig;
use crate::directory::domain::{Actor, ActorRole, NewActor};
use crate::directory::ports::{ActorDirectory, ActorDirectoryError};
use crate::email::invitation_email;
use crate::email::ports::TransactionalMailer;
use crate::invitation::domain::{Invitation, InvitationId, InvitationToken};
use crate::invitation::ports::{InvitationLedger, InvitationLedgerError};
use crate::notification::ports::NotificationLedger;
use crate::notification::services::NotificationDispatcher;

/// Errors surfaced by invitation operations.
#[derive(Debug, Error)]
pub enum InvitationError {
    /// The email already belongs to an account or redeemed invitation.
    #[error("user already exists: {0}")]
    UserAlreadyExists(String),

    /// The token does not match any invitation.
    #[error("invalid invitation token")]
    InvalidToken,

    /// The redeeming email does not match the invited one.
    #[error("email does not match the invitation")]
    EmailMismatch,

    /// The invitation ledger failed.
    #[error(transparent)]
    Ledger(#[from] InvitationLedgerError),

    /// The actor directory failed.
    #[error(transparent)]
    Directory(#[from] ActorDirectoryError),
}

/// Result type for invitation operations.
pub type InvitationResult<T> = Result<T, InvitationError>;

/// A freshly issued invitation together with its raw token.
///
/// The token is not recoverable later; the ledger keeps only its digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedInvitation {
    /// The stored invitation row.
    pub invitation: Invitation,
    /// The raw single-use token carried by the signup link.
    pub token: InvitationToken,
}

/// Profile supplied by the redeeming user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedemptionProfile {
    /// Display name for the new account.
    pub full_name: String,
    /// Email the user signed up with.
    pub email: String,
}

impl RedemptionProfile {
    /// Creates a redemption profile.
    #[must_use]
    pub fn new(full_name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            email: email.into(),
        }
    }
}

/// Orchestrates the invitation lifecycle.
pub struct InvitationCoordinator<I, D, L, M, K>
where
    I: InvitationLedger,
    D: ActorDirectory,
    L: NotificationLedger,
    M: TransactionalMailer,
    K: Clock + Send + Sync,
{
    ledger: Arc<I>,
    directory: Arc<D>,
    dispatcher: NotificationDispatcher<L, D, K>,
    mailer: Arc<M>,
    config: Arc<CoreConfig>,
    clock: Arc<K>,
}

// Derived Clone would require the port types themselves to be Clone; only
// the Arc handles need cloning.
impl<I, D, L, M, K> Clone for InvitationCoordinator<I, D, L, M, K>
where
    I: InvitationLedger,
    D: ActorDirectory,
    L: NotificationLedger,
    M: TransactionalMailer,
    K: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            ledger: Arc::clone(&self.ledger),
            directory: Arc::clone(&self.directory),
            dispatcher: self.dispatcher.clone(),
            mailer: Arc::clone(&self.mailer),
            config: Arc::clone(&self.config),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<I, D, L, M, K> InvitationCoordinator<I, D, L, M, K>
where
    I: InvitationLedger,
    D: ActorDirectory,
    L: NotificationLedger,
    M: TransactionalMailer,
    K: Clock + Send + Sync,
{
    /// Creates a new coordinator.
    #[must_use]
    pub const fn new(
        ledger: Arc<I>,
        directory: Arc<D>,
        dispatcher: NotificationDispatcher<L, D, K>,
        mailer: Arc<M>,
        config: Arc<CoreConfig>,
        clock: Arc<K>,
    ) -> Self {
        Self {
            ledger,
            directory,
            dispatcher,
            mailer,
            config,
            clock,
        }
    }

    /// Issues an invitation for the email, rotating any pending one.
    ///
    /// A re-invite invalidates the earlier token: only the digest of the
    /// newest token is stored. The invitation email is best-effort; a send
    /// failure is logged and the issued invitation still returned.
    ///
    /// # Errors
    ///
    /// Returns [`InvitationError::UserAlreadyExists`] when the email has an
    /// active account or an accepted invitation, and [`InvitationError`]
    /// variants for directory or ledger failures.
    pub async fn invite(
        &self,
        inviter: &Actor,
        email: &str,
        role: ActorRole,
    ) -> InvitationResult<IssuedInvitation> {
        if let Some(existing) = self.directory.find_by_email(email).await?
            && existing.is_active()
        {
            return Err(InvitationError::UserAlreadyExists(existing.email().to_owned()));
        }

        let token = InvitationToken::generate();
        let candidate = Invitation::new(email, role, inviter.id(), token.digest(), &*self.clock);
        let invitation = self
            .ledger
            .upsert_pending(candidate)
            .await
            .map_err(|err| match err {
                InvitationLedgerError::AlreadyAccepted(accepted_email) => {
                    InvitationError::UserAlreadyExists(accepted_email)
                }
                other => InvitationError::Ledger(other),
            })?;
        tracing::info!(invitation = %invitation.id(), "invitation issued");

        self.email_invitation_soft(&invitation, inviter, &token).await;
        Ok(IssuedInvitation { invitation, token })
    }

    /// Redeems a token, provisioning an account bound to the invitation's
    /// role and email.
    ///
    /// Provisioning happens before the accept flip, so two racing
    /// redemptions cannot both create an account: the directory rejects the
    /// duplicate email. The signup fan-out to admins is best-effort.
    ///
    /// # Errors
    ///
    /// Returns [`InvitationError::InvalidToken`] for an unknown token,
    /// [`InvitationError::EmailMismatch`] when the supplied email differs
    /// from the invited one, and [`InvitationError::UserAlreadyExists`] when
    /// the invitation was already redeemed or the account exists.
    pub async fn redeem(
        &self,
        token: &InvitationToken,
        profile: RedemptionProfile,
    ) -> InvitationResult<Actor> {
        let invitation = self
            .ledger
            .find_by_token_digest(&token.digest())
            .await?
            .ok_or(InvitationError::InvalidToken)?;
        if !invitation.is_pending() {
            return Err(InvitationError::UserAlreadyExists(
                invitation.email().to_owned(),
            ));
        }
        if profile.email.trim().to_ascii_lowercase() != invitation.email() {
            return Err(InvitationError::EmailMismatch);
        }

        let actor = self
            .directory
            .provision(NewActor::new(
                profile.full_name,
                invitation.email(),
                invitation.role(),
            ))
            .await
            .map_err(|err| match err {
                ActorDirectoryError::DuplicateEmail(email) => {
                    InvitationError::UserAlreadyExists(email)
                }
                other => InvitationError::Directory(other),
            })?;
        self.ledger.mark_accepted(invitation.id()).await?;
        tracing::info!(invitation = %invitation.id(), actor = %actor.id(), "invitation redeemed");

        if let Err(error) = self.dispatcher.broadcast_signup(&actor).await {
            tracing::warn!(error = %error, "signup fan-out failed after redemption");
        }
        Ok(actor)
    }

    /// Revokes an invitation.
    ///
    /// Revoking an accepted invitation also deactivates the account that
    /// was created from it; the token, either way, stops resolving.
    ///
    /// # Errors
    ///
    /// Returns [`InvitationError::Ledger`] with
    /// [`InvitationLedgerError::NotFound`] for an unknown id.
    pub async fn revoke(&self, id: InvitationId) -> InvitationResult<()> {
        let invitation = self
            .ledger
            .find_by_id(id)
            .await?
            .ok_or(InvitationError::Ledger(InvitationLedgerError::NotFound(id)))?;
        self.ledger.delete(id).await?;
        if !invitation.is_pending() {
            self.directory
                .deactivate_by_email(invitation.email())
                .await?;
        }
        tracing::info!(invitation = %id, "invitation revoked");
        Ok(())
    }

    /// Returns every invitation, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`InvitationError::Ledger`] when the ledger fails.
    pub async fn list(&self) -> InvitationResult<Vec<Invitation>> {
        Ok(self.ledger.list_all().await?)
    }

    async fn email_invitation_soft(
        &self,
        invitation: &Invitation,
        inviter: &Actor,
        token: &InvitationToken,
    ) {
        let signup_url = self.config.signup_url(token.as_str());
        let email = match invitation_email(
            &self.config,
            invitation.email(),
            inviter.full_name(),
            invitation.role().as_str(),
            &signup_url,
        ) {
            Ok(email) => email,
            Err(error) => {
                tracing::warn!(error = %error, invitation = %invitation.id(), "invitation email render failed");
                return;
            }
        };
        if let Err(error) = self.mailer.send(&email).await {
            tracing::warn!(error = %error, invitation = %invitation.id(), "invitation email send failed");
        }
    }
}
