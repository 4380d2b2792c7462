//! Adapter implementations of the task persistence ports.
//!
//! Only the in-memory adapters live here: the task store schema is owned by
//! the host application, which supplies its own [`TaskRepository`] and
//! [`CommentRepository`] implementations.
//!
//! [`TaskRepository`]: crate::task::ports::TaskRepository
//! [`CommentRepository`]: crate::task::ports::CommentRepository

pub mod memory;

pub use memory::{InMemoryCommentRepository, InMemoryTaskRepository};
