//! Application services for task workflow orchestration.

mod routing;
mod workflow;

pub use routing::route_update;
pub use workflow::{TaskWorkflowError, TaskWorkflowResult, TaskWorkflowService};
