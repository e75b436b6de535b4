//! Diesel table definitions for the PostgreSQL schema.
//!
//! Must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered users.
    users (id) {
        id -> Uuid,
        name -> Text,
        /// Lower-cased; unique.
        email -> Text,
        /// Opaque session token; unique when present.
        session_id -> Nullable<Text>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Meals recorded by users.
    meals (id) {
        id -> Uuid,
        name -> Text,
        description -> Text,
        is_on_diet -> Bool,
        /// Caller-supplied meal time in epoch milliseconds.
        datetime -> Int8,
        /// Server-side insertion time; orders streaks.
        criated_at -> Timestamptz,
        user_id -> Uuid,
    }
}

diesel::joinable!(meals -> users (user_id));
diesel::allow_tables_to_appear_in_same_query!(meals, users);
