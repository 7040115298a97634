//! Port abstraction for account persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::{Account, AccountId, DisplayName, NewAccount, Role};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by account repository adapters.
    pub enum AccountPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "account repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "account repository query failed: {message}",
        /// The display name is already taken.
        Conflict { display_name: String } => "display name already registered: {display_name}",
    }
}

/// Credential store for accounts.
///
/// Adapters enforce display-name uniqueness themselves: `insert` reports a
/// taken name as [`AccountPersistenceError::Conflict`] instead of callers
/// checking first.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Fetch an account by its exact display name.
    async fn find_by_name(
        &self,
        display_name: &DisplayName,
    ) -> Result<Option<Account>, AccountPersistenceError>;

    /// Fetch an account by identifier.
    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, AccountPersistenceError>;

    /// Insert a new account with a zero purchase count.
    async fn insert(&self, account: &NewAccount) -> Result<Account, AccountPersistenceError>;

    /// Atomically add one to the purchase count of the account `id` when it
    /// holds `role`, returning the updated record. `None` when no such
    /// account exists.
    async fn increment_purchase_count(
        &self,
        id: AccountId,
        role: Role,
    ) -> Result<Option<Account>, AccountPersistenceError>;

    /// Delete the account `id` when it holds `role`; returns the number of
    /// rows removed.
    async fn delete(&self, id: AccountId, role: Role) -> Result<u64, AccountPersistenceError>;

    /// List accounts ordered by id, optionally restricted to one role.
    async fn list(&self, role: Option<Role>) -> Result<Vec<Account>, AccountPersistenceError>;
}
