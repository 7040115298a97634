//! Menu items held in memory.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use mockable::Clock;

use crate::domain::ports::{MenuPersistenceError, MenuRepository};
use crate::domain::{MenuItem, MenuItemId, NewMenuItem};

use super::POISONED;

#[derive(Debug, Default)]
struct Store {
    next_id: i64,
    items: BTreeMap<i64, MenuItem>,
}

/// `MenuRepository` backed by a `BTreeMap` keyed by id.
pub struct InMemoryMenuRepository {
    store: Mutex<Store>,
    clock: Arc<dyn Clock>,
}

impl InMemoryMenuRepository {
    /// Create an empty menu stamping items with `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            store: Mutex::new(Store {
                next_id: 1,
                items: BTreeMap::new(),
            }),
            clock,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Store>, MenuPersistenceError> {
        self.store
            .lock()
            .map_err(|_| MenuPersistenceError::query(POISONED))
    }
}

#[async_trait]
impl MenuRepository for InMemoryMenuRepository {
    async fn list(&self, available_only: bool) -> Result<Vec<MenuItem>, MenuPersistenceError> {
        let store = self.lock()?;
        Ok(store
            .items
            .values()
            .filter(|item| !available_only || item.available)
            .cloned()
            .collect())
    }

    async fn insert(&self, item: &NewMenuItem) -> Result<MenuItem, MenuPersistenceError> {
        let mut store = self.lock()?;
        let raw_id = store.next_id;
        let id =
            MenuItemId::new(raw_id).map_err(|err| MenuPersistenceError::query(err.to_string()))?;
        store.next_id += 1;

        let stored = MenuItem {
            id,
            name: item.name().to_owned(),
            description: item.description().map(str::to_owned),
            price: item.price(),
            available: true,
            created_at: self.clock.utc(),
        };
        store.items.insert(raw_id, stored.clone());
        Ok(stored)
    }

    async fn delete(&self, id: MenuItemId) -> Result<u64, MenuPersistenceError> {
        let mut store = self.lock()?;
        Ok(u64::from(store.items.remove(&id.get()).is_some()))
    }
}
