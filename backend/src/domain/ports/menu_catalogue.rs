//! Driving port for the menu catalogue.

use async_trait::async_trait;

use crate::domain::{
    Administrator, MenuItem, MenuItemId, NewMenuItem, ServiceError, SessionIdentity,
};

/// Use-case port for browsing and curating the menu.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MenuCatalogue: Send + Sync {
    /// Items currently on offer.
    async fn available_items(&self) -> Result<Vec<MenuItem>, ServiceError>;

    /// Every item, including unavailable ones.
    async fn all_items(&self, admin: &Administrator) -> Result<Vec<MenuItem>, ServiceError>;

    /// Add an item to the menu.
    async fn add_item(
        &self,
        admin: &Administrator,
        item: NewMenuItem,
    ) -> Result<MenuItem, ServiceError>;

    /// Remove an item from the menu.
    async fn remove_item(&self, admin: &Administrator, id: MenuItemId)
    -> Result<(), ServiceError>;

    /// Plain-text rendering of the available menu for `identity`.
    async fn menu_text(&self, identity: &SessionIdentity) -> Result<String, ServiceError>;
}
