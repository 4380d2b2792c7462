//! Adapter implementations for the actor directory.

pub mod memory;

pub use memory::InMemoryActorDirectory;
