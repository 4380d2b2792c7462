//! Diesel schema for notification persistence.
//!
//! A partial unique index on `(recipient_id, sender_id)` where
//! `kind = 'user_login'` backs the at-most-one-login-row-per-pair
//! invariant at the database level.

diesel::table! {
    /// Recipient-addressed notification rows; existence is the unread state.
    notifications (id) {
        /// Row identifier.
        id -> Uuid,
        /// Recipient actor.
        recipient_id -> Uuid,
        /// Originating actor, absent for system-originated events.
        sender_id -> Nullable<Uuid>,
        /// Event kind from the closed enumeration.
        #[max_length = 50]
        kind -> Varchar,
        /// Short heading shown in the feed.
        #[max_length = 255]
        title -> Varchar,
        /// Human-readable event description.
        message -> Text,
        /// Related task, when any.
        related_task_id -> Nullable<Uuid>,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}
