//! Port contracts for the actor directory.

pub mod directory;

pub use directory::{ActorDirectory, ActorDirectoryError, ActorDirectoryResult};
