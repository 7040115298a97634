//! Account store held in memory.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use mockable::Clock;

use crate::domain::ports::{AccountPersistenceError, AccountRepository};
use crate::domain::{Account, AccountId, DisplayName, NewAccount, PurchaseCount, Role};

use super::POISONED;

#[derive(Debug, Default)]
struct Store {
    next_id: i64,
    accounts: BTreeMap<i64, Account>,
}

/// `AccountRepository` backed by a `BTreeMap` keyed by id.
pub struct InMemoryAccountRepository {
    store: Mutex<Store>,
    clock: Arc<dyn Clock>,
}

impl InMemoryAccountRepository {
    /// Create an empty store stamping records with `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            store: Mutex::new(Store {
                next_id: 1,
                accounts: BTreeMap::new(),
            }),
            clock,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Store>, AccountPersistenceError> {
        self.store
            .lock()
            .map_err(|_| AccountPersistenceError::query(POISONED))
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn find_by_name(
        &self,
        display_name: &DisplayName,
    ) -> Result<Option<Account>, AccountPersistenceError> {
        let store = self.lock()?;
        Ok(store
            .accounts
            .values()
            .find(|account| account.display_name == *display_name)
            .cloned())
    }

    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, AccountPersistenceError> {
        let store = self.lock()?;
        Ok(store.accounts.get(&id.get()).cloned())
    }

    async fn insert(&self, account: &NewAccount) -> Result<Account, AccountPersistenceError> {
        let mut store = self.lock()?;
        if store
            .accounts
            .values()
            .any(|existing| existing.display_name == account.display_name)
        {
            return Err(AccountPersistenceError::conflict(
                account.display_name.as_str(),
            ));
        }

        let raw_id = store.next_id;
        let id = AccountId::new(raw_id)
            .map_err(|err| AccountPersistenceError::query(err.to_string()))?;
        store.next_id += 1;

        let stored = Account {
            id,
            display_name: account.display_name.clone(),
            password_hash: account.password_hash.clone(),
            role: account.role,
            purchase_count: PurchaseCount::ZERO,
            created_at: self.clock.utc(),
        };
        store.accounts.insert(raw_id, stored.clone());
        Ok(stored)
    }

    async fn increment_purchase_count(
        &self,
        id: AccountId,
        role: Role,
    ) -> Result<Option<Account>, AccountPersistenceError> {
        let mut store = self.lock()?;
        let Some(account) = store
            .accounts
            .get_mut(&id.get())
            .filter(|account| account.role == role)
        else {
            return Ok(None);
        };

        let next = account
            .purchase_count
            .get()
            .checked_add(1)
            .ok_or_else(|| AccountPersistenceError::query("purchase count overflow"))?;
        account.purchase_count = PurchaseCount::new(next);
        Ok(Some(account.clone()))
    }

    async fn delete(&self, id: AccountId, role: Role) -> Result<u64, AccountPersistenceError> {
        let mut store = self.lock()?;
        let matches = store
            .accounts
            .get(&id.get())
            .is_some_and(|account| account.role == role);
        if !matches {
            return Ok(0);
        }
        store.accounts.remove(&id.get());
        Ok(1)
    }

    async fn list(&self, role: Option<Role>) -> Result<Vec<Account>, AccountPersistenceError> {
        let store = self.lock()?;
        Ok(store
            .accounts
            .values()
            .filter(|account| role.is_none_or(|wanted| account.role == wanted))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PasswordHash;
    use mockable::DefaultClock;
    use rstest::{fixture, rstest};

    #[fixture]
    fn repo() -> InMemoryAccountRepository {
        InMemoryAccountRepository::new(Arc::new(DefaultClock))
    }

    fn new_account(name: &str, role: Role) -> NewAccount {
        NewAccount {
            display_name: DisplayName::new(name).expect("valid name"),
            password_hash: PasswordHash::new(format!("hash-{name}")),
            role,
        }
    }

    #[rstest]
    #[tokio::test]
    async fn insert_assigns_sequential_ids_and_zero_count(repo: InMemoryAccountRepository) {
        let first = repo
            .insert(&new_account("Ana", Role::Customer))
            .await
            .expect("insert");
        let second = repo
            .insert(&new_account("Luis", Role::Employee))
            .await
            .expect("insert");

        assert_eq!(first.id.get(), 1);
        assert_eq!(second.id.get(), 2);
        assert_eq!(first.purchase_count, PurchaseCount::ZERO);
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_names_conflict(repo: InMemoryAccountRepository) {
        repo.insert(&new_account("Ana", Role::Customer))
            .await
            .expect("insert");

        let err = repo
            .insert(&new_account("Ana", Role::Employee))
            .await
            .expect_err("duplicate");

        assert_eq!(err, AccountPersistenceError::conflict("Ana"));
    }

    #[rstest]
    #[tokio::test]
    async fn names_are_case_sensitive(repo: InMemoryAccountRepository) {
        repo.insert(&new_account("Ana", Role::Customer))
            .await
            .expect("insert");

        let lower = DisplayName::new("ana").expect("valid name");
        assert!(repo.find_by_name(&lower).await.expect("lookup").is_none());
        repo.insert(&new_account("ana", Role::Customer))
            .await
            .expect("distinct name");
    }

    #[rstest]
    #[tokio::test]
    async fn increment_respects_role(repo: InMemoryAccountRepository) {
        let customer = repo
            .insert(&new_account("Ana", Role::Customer))
            .await
            .expect("insert");
        let employee = repo
            .insert(&new_account("Luis", Role::Employee))
            .await
            .expect("insert");

        let updated = repo
            .increment_purchase_count(customer.id, Role::Customer)
            .await
            .expect("increment")
            .expect("customer exists");
        let skipped = repo
            .increment_purchase_count(employee.id, Role::Customer)
            .await
            .expect("increment");

        assert_eq!(updated.purchase_count.get(), 1);
        assert!(skipped.is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn delete_only_matching_role(repo: InMemoryAccountRepository) {
        let employee = repo
            .insert(&new_account("Luis", Role::Employee))
            .await
            .expect("insert");

        assert_eq!(repo.delete(employee.id, Role::Customer).await.expect("delete"), 0);
        assert_eq!(repo.delete(employee.id, Role::Employee).await.expect("delete"), 1);
        assert!(repo.find_by_id(employee.id).await.expect("lookup").is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn list_filters_by_role(repo: InMemoryAccountRepository) {
        repo.insert(&new_account("Ana", Role::Customer))
            .await
            .expect("insert");
        repo.insert(&new_account("Luis", Role::Employee))
            .await
            .expect("insert");

        let customers = repo.list(Some(Role::Customer)).await.expect("list");
        let everyone = repo.list(None).await.expect("list");

        assert_eq!(customers.len(), 1);
        assert_eq!(everyone.len(), 2);
    }
}
