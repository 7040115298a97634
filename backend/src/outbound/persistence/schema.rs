//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly.

diesel::table! {
    /// Registered accounts.
    accounts (id) {
        id -> Int8,
        /// Unique, case-sensitive display name.
        display_name -> Varchar,
        /// PHC-format Argon2id hash.
        password_hash -> Text,
        /// One of `admin`, `employee`, `customer`.
        role -> Varchar,
        /// Qualifying purchases; never negative.
        purchase_count -> Int4,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Registration access codes, one or more per role.
    access_codes (code) {
        code -> Varchar,
        role -> Varchar,
    }
}

diesel::table! {
    /// Menu items.
    menu_items (id) {
        id -> Int8,
        name -> Varchar,
        description -> Nullable<Text>,
        /// Price in minor units.
        price_minor -> Int8,
        available -> Bool,
        created_at -> Timestamptz,
    }
}
