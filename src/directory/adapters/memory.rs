//! In-memory actor directory for tests and local composition.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::directory::domain::{Actor, ActorId, ActorStatus, NewActor};
use crate::directory::ports::{ActorDirectory, ActorDirectoryError, ActorDirectoryResult};

/// Thread-safe in-memory actor directory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryActorDirectory {
    state: Arc<RwLock<HashMap<ActorId, Actor>>>,
}

impl InMemoryActorDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an actor, replacing any existing entry with the same id.
    ///
    /// # Errors
    ///
    /// Returns [`ActorDirectoryError::Backend`] when the directory lock is
    /// poisoned.
    pub fn register(&self, actor: Actor) -> ActorDirectoryResult<()> {
        let mut state = lock_write(&self.state)?;
        state.insert(actor.id(), actor);
        Ok(())
    }
}

fn lock_write(
    state: &Arc<RwLock<HashMap<ActorId, Actor>>>,
) -> ActorDirectoryResult<std::sync::RwLockWriteGuard<'_, HashMap<ActorId, Actor>>> {
    state
        .write()
        .map_err(|err| ActorDirectoryError::backend(std::io::Error::other(err.to_string())))
}

fn lock_read(
    state: &Arc<RwLock<HashMap<ActorId, Actor>>>,
) -> ActorDirectoryResult<std::sync::RwLockReadGuard<'_, HashMap<ActorId, Actor>>> {
    state
        .read()
        .map_err(|err| ActorDirectoryError::backend(std::io::Error::other(err.to_string())))
}

#[async_trait]
impl ActorDirectory for InMemoryActorDirectory {
    async fn find_by_id(&self, id: ActorId) -> ActorDirectoryResult<Option<Actor>> {
        let state = lock_read(&self.state)?;
        Ok(state.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> ActorDirectoryResult<Option<Actor>> {
        let state = lock_read(&self.state)?;
        Ok(state
            .values()
            .find(|actor| actor.email().eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn admins(&self) -> ActorDirectoryResult<Vec<Actor>> {
        let state = lock_read(&self.state)?;
        Ok(state
            .values()
            .filter(|actor| actor.is_admin() && actor.is_active())
            .cloned()
            .collect())
    }

    async fn provision(&self, profile: NewActor) -> ActorDirectoryResult<Actor> {
        let mut state = lock_write(&self.state)?;
        if state
            .values()
            .any(|actor| actor.email().eq_ignore_ascii_case(&profile.email))
        {
            return Err(ActorDirectoryError::DuplicateEmail(profile.email));
        }
        let actor = Actor::new(
            ActorId::new(),
            profile.full_name,
            profile.email,
            profile.role,
            ActorStatus::Active,
        );
        state.insert(actor.id(), actor.clone());
        Ok(actor)
    }

    async fn deactivate_by_email(&self, email: &str) -> ActorDirectoryResult<()> {
        let mut state = lock_write(&self.state)?;
        if let Some(actor) = state
            .values_mut()
            .find(|actor| actor.email().eq_ignore_ascii_case(email))
        {
            *actor = actor.deactivated();
        }
        Ok(())
    }
}
