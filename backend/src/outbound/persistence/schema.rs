//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` when a migration changes the tables.

diesel::table! {
    /// Accounts for students and administrators.
    ///
    /// `student_id` and `email` carry partial unique indexes, so NULLs never
    /// collide.
    users (id) {
        id -> Uuid,
        /// `student` or `admin`.
        role -> Text,
        name -> Text,
        student_id -> Nullable<Text>,
        /// Stored lower-cased.
        email -> Nullable<Text>,
        department -> Nullable<Text>,
        class_level -> Nullable<Text>,
        /// PHC-format Argon2id hash.
        password_hash -> Text,
        is_active -> Bool,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Complaints filed by students.
    ///
    /// `owner_id` is not a foreign key; complaints outlive deleted accounts.
    complaints (id) {
        id -> Uuid,
        owner_id -> Uuid,
        category -> Text,
        title -> Text,
        description -> Text,
        status -> Text,
        /// JSON array of `{status, date}` entries, oldest first.
        status_history -> Jsonb,
        admin_note -> Text,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(users, complaints);
