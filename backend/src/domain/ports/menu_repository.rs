//! Port abstraction for menu persistence adapters.

use async_trait::async_trait;

use crate::domain::{MenuItem, MenuItemId, NewMenuItem};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by menu repository adapters.
    pub enum MenuPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "menu repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "menu repository query failed: {message}",
    }
}

/// Storage for menu items.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MenuRepository: Send + Sync {
    /// List items ordered by name; only available ones when `available_only`.
    async fn list(&self, available_only: bool) -> Result<Vec<MenuItem>, MenuPersistenceError>;

    /// Insert an available item.
    async fn insert(&self, item: &NewMenuItem) -> Result<MenuItem, MenuPersistenceError>;

    /// Delete an item; returns the number of rows removed.
    async fn delete(&self, id: MenuItemId) -> Result<u64, MenuPersistenceError>;
}
