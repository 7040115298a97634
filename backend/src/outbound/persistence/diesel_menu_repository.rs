//! PostgreSQL-backed `MenuRepository` implementation.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{MenuPersistenceError, MenuRepository};
use crate::domain::{MenuItem, MenuItemId, Money, NewMenuItem};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{MenuItemRow, NewMenuItemRow};
use super::pool::{DbPool, PoolError};
use super::schema::menu_items;

/// Diesel-backed implementation of the menu repository port.
#[derive(Clone)]
pub struct DieselMenuRepository {
    pool: DbPool,
}

impl DieselMenuRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> MenuPersistenceError {
    map_pool_error(error, MenuPersistenceError::connection)
}

fn map_diesel(error: diesel::result::Error) -> MenuPersistenceError {
    map_diesel_error(
        error,
        MenuPersistenceError::query,
        MenuPersistenceError::connection,
    )
}

fn row_to_item(row: MenuItemRow) -> Result<MenuItem, MenuPersistenceError> {
    let id = MenuItemId::new(row.id).map_err(|err| MenuPersistenceError::query(err.to_string()))?;
    let minor =
        u64::try_from(row.price_minor).map_err(|err| MenuPersistenceError::query(err.to_string()))?;

    Ok(MenuItem {
        id,
        name: row.name,
        description: row.description,
        price: Money::from_minor_units(minor),
        available: row.available,
        created_at: row.created_at,
    })
}

#[async_trait]
impl MenuRepository for DieselMenuRepository {
    async fn list(&self, available_only: bool) -> Result<Vec<MenuItem>, MenuPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let mut query = menu_items::table
            .order(menu_items::id.asc())
            .select(MenuItemRow::as_select())
            .into_boxed();
        if available_only {
            query = query.filter(menu_items::available.eq(true));
        }

        let rows = query
            .load::<MenuItemRow>(&mut conn)
            .await
            .map_err(map_diesel)?;

        rows.into_iter().map(row_to_item).collect()
    }

    async fn insert(&self, item: &NewMenuItem) -> Result<MenuItem, MenuPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let price_minor = i64::try_from(item.price().minor_units())
            .map_err(|err| MenuPersistenceError::query(err.to_string()))?;
        let new_row = NewMenuItemRow {
            name: item.name(),
            description: item.description(),
            price_minor,
            available: true,
        };

        let row = diesel::insert_into(menu_items::table)
            .values(&new_row)
            .returning(MenuItemRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel)?;

        row_to_item(row)
    }

    async fn delete(&self, id: MenuItemId) -> Result<u64, MenuPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let removed = diesel::delete(menu_items::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel)?;

        u64::try_from(removed).map_err(|err| MenuPersistenceError::query(err.to_string()))
    }
}
