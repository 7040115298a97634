//! Internal Diesel row structs.
//!
//! These types never leave the persistence layer; repositories convert them
//! into domain types.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::{accounts, menu_items};

/// Row read from `accounts`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = accounts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AccountRow {
    pub id: i64,
    pub display_name: String,
    pub password_hash: String,
    pub role: String,
    pub purchase_count: i32,
    pub created_at: DateTime<Utc>,
}

/// Insertable account; id, count and timestamp come from column defaults.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = accounts)]
pub(crate) struct NewAccountRow<'a> {
    pub display_name: &'a str,
    pub password_hash: &'a str,
    pub role: &'a str,
}

/// Row read from `menu_items`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = menu_items)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct MenuItemRow {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price_minor: i64,
    pub available: bool,
    pub created_at: DateTime<Utc>,
}

/// Insertable menu item; new items are available.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = menu_items)]
pub(crate) struct NewMenuItemRow<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub price_minor: i64,
    pub available: bool,
}
