//! Application services for notification dispatch.

mod dispatcher;

pub use dispatcher::{
    DispatchError, DispatchResult, EmitOutcome, NotificationDispatcher, NotificationFeedItem,
    SenderProfile, LOGIN_DEDUP_WINDOW_MINUTES,
};
