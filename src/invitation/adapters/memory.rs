//! In-memory invitation ledger for tests and composition.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::invitation::domain::{Invitation, InvitationId, TokenDigest};
use crate::invitation::ports::{
    InvitationLedger, InvitationLedgerError, InvitationLedgerResult,
};

/// Thread-safe in-memory invitation ledger, keyed by email.
#[derive(Debug, Clone, Default)]
pub struct InMemoryInvitationLedger {
    state: Arc<RwLock<HashMap<String, Invitation>>>,
}

impl InMemoryInvitationLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(err: impl std::fmt::Display) -> InvitationLedgerError {
    InvitationLedgerError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl InvitationLedger for InMemoryInvitationLedger {
    async fn upsert_pending(&self, candidate: Invitation) -> InvitationLedgerResult<Invitation> {
        // Check and replace run under one write lock, so a rotation cannot
        // race with an accept on the same email.
        let mut state = self.state.write().map_err(poisoned)?;
        let stored = match state.get(candidate.email()) {
            Some(existing) if !existing.is_pending() => {
                return Err(InvitationLedgerError::AlreadyAccepted(
                    existing.email().to_owned(),
                ));
            }
            Some(existing) => existing.rotated_from(&candidate),
            None => candidate,
        };
        state.insert(stored.email().to_owned(), stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: InvitationId) -> InvitationLedgerResult<Option<Invitation>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.values().find(|row| row.id() == id).cloned())
    }

    async fn find_by_token_digest(
        &self,
        digest: &TokenDigest,
    ) -> InvitationLedgerResult<Option<Invitation>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.values().find(|row| row.token_digest() == digest).cloned())
    }

    async fn mark_accepted(&self, id: InvitationId) -> InvitationLedgerResult<Invitation> {
        let mut state = self.state.write().map_err(poisoned)?;
        let row = state
            .values_mut()
            .find(|row| row.id() == id)
            .ok_or(InvitationLedgerError::NotFound(id))?;
        if !row.is_pending() {
            return Err(InvitationLedgerError::AlreadyRedeemed(id));
        }
        *row = row.accepted();
        Ok(row.clone())
    }

    async fn delete(&self, id: InvitationId) -> InvitationLedgerResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        let email = state
            .values()
            .find(|row| row.id() == id)
            .map(|row| row.email().to_owned())
            .ok_or(InvitationLedgerError::NotFound(id))?;
        state.remove(&email);
        Ok(())
    }

    async fn list_all(&self) -> InvitationLedgerResult<Vec<Invitation>> {
        let state = self.state.read().map_err(poisoned)?;
        let mut rows: Vec<Invitation> = state.values().cloned().collect();
        rows.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(rows)
    }
}
