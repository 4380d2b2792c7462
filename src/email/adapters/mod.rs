//! Adapter implementations for the email side-channel.

pub mod memory;

pub use memory::{NoopMailer, RecordingMailer};
