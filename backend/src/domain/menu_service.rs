//! Menu catalogue service and plain-text export.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{MenuCatalogue, MenuRepository};
use crate::domain::{
    Administrator, MenuItem, MenuItemId, NewMenuItem, ServiceError, SessionIdentity,
};

const RULE: &str = "================================";
const SEPARATOR: &str = "--------------------------------";

/// Menu service implementing [`MenuCatalogue`].
#[derive(Clone)]
pub struct MenuService<M> {
    menu: Arc<M>,
    clock: Arc<dyn Clock>,
}

impl<M> MenuService<M> {
    /// Create a new service; `clock` dates the text export.
    pub fn new(menu: Arc<M>, clock: Arc<dyn Clock>) -> Self {
        Self { menu, clock }
    }
}

/// Render the downloadable menu.
fn render_menu(items: &[MenuItem], requested_by: &str, date: &str) -> String {
    let mut text = format!("MENU\n\nDate: {date}\nRequested by: {requested_by}\n\n{RULE}\n\n");
    if items.is_empty() {
        text.push_str("No dishes are available right now.\n");
    }
    for item in items {
        text.push_str(&format!("{}\nPrice: ${}\n", item.name, item.price));
        if let Some(description) = &item.description {
            text.push_str(&format!("Description: {description}\n"));
        }
        text.push_str(&format!("\n{SEPARATOR}\n\n"));
    }
    text.push_str("Thank you for your visit!\n");
    text
}

#[async_trait]
impl<M> MenuCatalogue for MenuService<M>
where
    M: MenuRepository,
{
    async fn available_items(&self) -> Result<Vec<MenuItem>, ServiceError> {
        Ok(self.menu.list(true).await?)
    }

    async fn all_items(&self, _admin: &Administrator) -> Result<Vec<MenuItem>, ServiceError> {
        Ok(self.menu.list(false).await?)
    }

    async fn add_item(
        &self,
        admin: &Administrator,
        item: NewMenuItem,
    ) -> Result<MenuItem, ServiceError> {
        let created = self.menu.insert(&item).await?;
        info!(item_id = %created.id, admin = %admin.display_name(), "menu item added");
        Ok(created)
    }

    async fn remove_item(&self, admin: &Administrator, id: MenuItemId) -> Result<(), ServiceError> {
        if self.menu.delete(id).await? == 0 {
            return Err(ServiceError::not_found("menu item not found"));
        }
        info!(item_id = %id, admin = %admin.display_name(), "menu item removed");
        Ok(())
    }

    async fn menu_text(&self, identity: &SessionIdentity) -> Result<String, ServiceError> {
        let items = self.menu.list(true).await?;
        let date = self.clock.local().format("%Y-%m-%d").to_string();
        Ok(render_menu(&items, identity.display_name.as_ref(), &date))
    }
}
