//! Domain model for the actor read model.

mod actor;

pub use actor::{Actor, ActorId, ActorRole, ActorStatus, NewActor, ParseActorRoleError};
