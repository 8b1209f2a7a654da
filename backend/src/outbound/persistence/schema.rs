//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Cross-table
//! references (`category_id`, `list_id`) are soft and carry no foreign keys.

diesel::table! {
    /// Categories; `lower(name)` carries a unique index.
    categories (id) {
        id -> Uuid,
        name -> Text,
        owner_uid -> Text,
        is_public -> Bool,
        /// Append-only, case-insensitively unique tags.
        sub_category_tags -> Array<Text>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    shared_lists (id) {
        id -> Uuid,
        title -> Text,
        category_id -> Uuid,
        owner_uid -> Text,
        is_public -> Bool,
        collaborators -> Array<Text>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    items (id) {
        id -> Uuid,
        list_id -> Uuid,
        text -> Text,
        sub_category -> Text,
        added_by -> Text,
        /// Uids that marked the item done.
        done_by -> Array<Text>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    user_preferences (uid) {
        uid -> Text,
        show_public -> Bool,
        updated_at -> Timestamptz,
    }
}
