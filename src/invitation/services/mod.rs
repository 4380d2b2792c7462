//! Application services for invitation orchestration.

mod coordinator;

pub use coordinator::{
    InvitationCoordinator, InvitationError, InvitationResult, IssuedInvitation,
    RedemptionProfile,
};
