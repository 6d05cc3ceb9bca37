//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are used
//! by Diesel for compile-time query validation and type-safe SQL generation.

diesel::table! {
    /// Registered accounts.
    ///
    /// `roblox_username` carries a unique constraint; registration relies on
    /// it rather than a check-then-insert.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Unique Roblox handle (max 20 characters).
        roblox_username -> Varchar,
        /// Discord handle.
        discord_username -> Varchar,
        /// Opaque PHC hash string.
        password_hash -> Text,
        /// Permission tier wire string.
        permission -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Submitted nominations.
    nominations (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Submitting user.
        nominator_id -> Uuid,
        /// Nominee handle; not a foreign key, nominees need no account.
        nominee_roblox_username -> Varchar,
        /// Recognition field wire strings, order preserved.
        fields -> Array<Text>,
        /// Submission rationale.
        description -> Text,
        /// Lifecycle status wire string.
        status -> Varchar,
        /// Submission timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Append-only committee review log.
    review_comments (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Owning nomination; rows cascade on nomination deletion.
        nomination_id -> Uuid,
        /// Authoring committee member.
        author_id -> Uuid,
        /// Author's Roblox handle cached at write time.
        author_username -> Varchar,
        /// Comment body.
        comment -> Text,
        /// Append timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Append-only honours ledger.
    honours (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Recipient Roblox handle.
        roblox_username -> Varchar,
        /// Recipient Discord handle.
        discord_username -> Varchar,
        /// Display title.
        title -> Varchar,
        /// Recognition field wire string.
        field -> Varchar,
        /// Optional citation text.
        description -> Nullable<Text>,
        /// Award timestamp.
        awarded_at -> Timestamptz,
    }
}

diesel::joinable!(nominations -> users (nominator_id));
diesel::joinable!(review_comments -> nominations (nomination_id));

diesel::allow_tables_to_appear_in_same_query!(users, nominations, review_comments, honours);
