//! Diesel schema for invitation persistence.
//!
//! A unique index on `email` backs the one-invitation-per-email rule, and a
//! unique index on `token_digest` keeps token lookups unambiguous.

diesel::table! {
    /// Invitation rows, one per invited email.
    invitations (id) {
        /// Row identifier.
        id -> Uuid,
        /// Invited email, stored lowercased.
        #[max_length = 255]
        email -> Varchar,
        /// Role granted on redemption.
        #[max_length = 20]
        role -> Varchar,
        /// Inviting actor.
        invited_by -> Uuid,
        /// Lifecycle state.
        #[max_length = 20]
        status -> Varchar,
        /// SHA-256 digest of the currently valid token, hex-encoded.
        #[max_length = 64]
        token_digest -> Varchar,
        /// Issue or rotation timestamp.
        created_at -> Timestamptz,
    }
}
