//! Domain model for recipient-facing notifications.

mod notification;

pub use notification::{
    NewNotification, Notification, NotificationId, NotificationKind, ParseNotificationKindError,
};
