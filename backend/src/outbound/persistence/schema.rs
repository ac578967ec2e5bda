//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered users.
    users (id) {
        /// Opaque identifier issued at registration.
        id -> Varchar,
        /// Unique login name.
        username -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Exercise log entries. Log order is `id` order.
    exercises (id) {
        id -> Int8,
        /// Owning user; rows are removed with their user.
        user_id -> Varchar,
        description -> Text,
        /// Minutes.
        duration -> Float8,
        /// Calendar day with no time component.
        date -> Date,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(exercises -> users (user_id));
diesel::allow_tables_to_appear_in_same_query!(users, exercises);
