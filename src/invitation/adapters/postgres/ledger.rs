//! `PostgreSQL` invitation ledger implementation.

use super::{
    models::{InvitationRow, NewInvitationRow},
    schema::invitations,
};
use crate::directory::domain::{ActorId, ActorRole};
use crate::invitation::domain::{
    Invitation, InvitationId, InvitationStatus, PersistedInvitationData, TokenDigest,
};
use crate::invitation::ports::{
    InvitationLedger, InvitationLedgerError, InvitationLedgerResult,
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::Error as DieselError;

/// `PostgreSQL` connection pool type used by invitation adapters.
pub type InvitationPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed invitation ledger.
#[derive(Debug, Clone)]
pub struct PostgresInvitationLedger {
    pool: InvitationPgPool,
}

/// What the upsert transaction observed.
enum UpsertOutcome {
    Stored(InvitationRow),
    AlreadyAccepted(String),
}

impl PostgresInvitationLedger {
    /// Creates a new ledger from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: InvitationPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> InvitationLedgerResult<T>
    where
        F: FnOnce(&mut PgConnection) -> InvitationLedgerResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(InvitationLedgerError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(InvitationLedgerError::persistence)?
    }
}

#[async_trait]
impl InvitationLedger for PostgresInvitationLedger {
    async fn upsert_pending(&self, candidate: Invitation) -> InvitationLedgerResult<Invitation> {
        let new_row = to_new_row(&candidate);
        self.run_blocking(move |connection| {
            let outcome = connection
                .transaction::<UpsertOutcome, DieselError, _>(|conn| {
                    // Lock the email's row so a rotation cannot race with an
                    // accept on the same email.
                    let existing: Option<InvitationRow> = invitations::table
                        .filter(invitations::email.eq(&new_row.email))
                        .select(InvitationRow::as_select())
                        .for_update()
                        .first(conn)
                        .optional()?;
                    match existing {
                        Some(row) if row.status != InvitationStatus::Pending.as_str() => {
                            Ok(UpsertOutcome::AlreadyAccepted(row.email))
                        }
                        Some(row) => {
                            let stored = diesel::update(
                                invitations::table.filter(invitations::id.eq(row.id)),
                            )
                            .set((
                                invitations::role.eq(&new_row.role),
                                invitations::invited_by.eq(new_row.invited_by),
                                invitations::status
                                    .eq(InvitationStatus::Pending.as_str()),
                                invitations::token_digest.eq(&new_row.token_digest),
                                invitations::created_at.eq(new_row.created_at),
                            ))
                            .returning(InvitationRow::as_returning())
                            .get_result(conn)?;
                            Ok(UpsertOutcome::Stored(stored))
                        }
                        None => {
                            let stored = diesel::insert_into(invitations::table)
                                .values(&new_row)
                                .returning(InvitationRow::as_returning())
                                .get_result(conn)?;
                            Ok(UpsertOutcome::Stored(stored))
                        }
                    }
                })
                .map_err(InvitationLedgerError::persistence)?;
            match outcome {
                UpsertOutcome::Stored(row) => row_to_invitation(row),
                UpsertOutcome::AlreadyAccepted(email) => {
                    Err(InvitationLedgerError::AlreadyAccepted(email))
                }
            }
        })
        .await
    }

    async fn find_by_id(&self, id: InvitationId) -> InvitationLedgerResult<Option<Invitation>> {
        let row_id = id.into_inner();
        self.run_blocking(move |connection| {
            invitations::table
                .filter(invitations::id.eq(row_id))
                .select(InvitationRow::as_select())
                .first(connection)
                .optional()
                .map_err(InvitationLedgerError::persistence)?
                .map(row_to_invitation)
                .transpose()
        })
        .await
    }

    async fn find_by_token_digest(
        &self,
        digest: &TokenDigest,
    ) -> InvitationLedgerResult<Option<Invitation>> {
        let digest_text = digest.as_str().to_owned();
        self.run_blocking(move |connection| {
            invitations::table
                .filter(invitations::token_digest.eq(digest_text))
                .select(InvitationRow::as_select())
                .first(connection)
                .optional()
                .map_err(InvitationLedgerError::persistence)?
                .map(row_to_invitation)
                .transpose()
        })
        .await
    }

    async fn mark_accepted(&self, id: InvitationId) -> InvitationLedgerResult<Invitation> {
        let row_id = id.into_inner();
        self.run_blocking(move |connection| {
            // The status predicate makes the flip conditional, so only one
            // of two racing redemptions observes a pending row.
            let flipped: Option<InvitationRow> = diesel::update(
                invitations::table
                    .filter(invitations::id.eq(row_id))
                    .filter(invitations::status.eq(InvitationStatus::Pending.as_str())),
            )
            .set(invitations::status.eq(InvitationStatus::Accepted.as_str()))
            .returning(InvitationRow::as_returning())
            .get_result(connection)
            .optional()
            .map_err(InvitationLedgerError::persistence)?;
            match flipped {
                Some(row) => row_to_invitation(row),
                None => {
                    let exists: Option<uuid::Uuid> = invitations::table
                        .filter(invitations::id.eq(row_id))
                        .select(invitations::id)
                        .first(connection)
                        .optional()
                        .map_err(InvitationLedgerError::persistence)?;
                    match exists {
                        Some(_) => Err(InvitationLedgerError::AlreadyRedeemed(id)),
                        None => Err(InvitationLedgerError::NotFound(id)),
                    }
                }
            }
        })
        .await
    }

    async fn delete(&self, id: InvitationId) -> InvitationLedgerResult<()> {
        let row_id = id.into_inner();
        self.run_blocking(move |connection| {
            let deleted = diesel::delete(invitations::table.filter(invitations::id.eq(row_id)))
                .execute(connection)
                .map_err(InvitationLedgerError::persistence)?;
            if deleted == 0 {
                return Err(InvitationLedgerError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn list_all(&self) -> InvitationLedgerResult<Vec<Invitation>> {
        self.run_blocking(move |connection| {
            let rows = invitations::table
                .order(invitations::created_at.desc())
                .select(InvitationRow::as_select())
                .load::<InvitationRow>(connection)
                .map_err(InvitationLedgerError::persistence)?;
            rows.into_iter().map(row_to_invitation).collect()
        })
        .await
    }
}

fn to_new_row(invitation: &Invitation) -> NewInvitationRow {
    NewInvitationRow {
        id: invitation.id().into_inner(),
        email: invitation.email().to_owned(),
        role: invitation.role().as_str().to_owned(),
        invited_by: invitation.invited_by().into_inner(),
        status: invitation.status().as_str().to_owned(),
        token_digest: invitation.token_digest().as_str().to_owned(),
        created_at: invitation.created_at(),
    }
}

fn row_to_invitation(row: InvitationRow) -> InvitationLedgerResult<Invitation> {
    let role =
        ActorRole::try_from(row.role.as_str()).map_err(InvitationLedgerError::persistence)?;
    let status = InvitationStatus::try_from(row.status.as_str())
        .map_err(InvitationLedgerError::persistence)?;
    Ok(Invitation::from_persisted(PersistedInvitationData {
        id: InvitationId::from_uuid(row.id),
        email: row.email,
        role,
        invited_by: ActorId::from_uuid(row.invited_by),
        status,
        token_digest: TokenDigest::from_stored(row.token_digest),
        created_at: row.created_at,
    }))
}
