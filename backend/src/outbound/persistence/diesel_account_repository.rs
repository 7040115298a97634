//! PostgreSQL-backed `AccountRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{AccountPersistenceError, AccountRepository};
use crate::domain::{
    Account, AccountId, DisplayName, NewAccount, PasswordHash, PurchaseCount, Role,
};

use super::diesel_error_mapping::{is_unique_violation, map_diesel_error, map_pool_error};
use super::models::{AccountRow, NewAccountRow};
use super::pool::{DbPool, PoolError};
use super::schema::accounts;

/// Diesel-backed implementation of the account repository port.
#[derive(Clone)]
pub struct DieselAccountRepository {
    pool: DbPool,
}

impl DieselAccountRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn connection_error(message: impl Into<String>) -> AccountPersistenceError {
    AccountPersistenceError::connection(message)
}

fn query_error(message: impl Into<String>) -> AccountPersistenceError {
    AccountPersistenceError::query(message)
}

fn map_pool(error: PoolError) -> AccountPersistenceError {
    map_pool_error(error, connection_error)
}

fn map_diesel(error: diesel::result::Error) -> AccountPersistenceError {
    map_diesel_error(error, query_error, connection_error)
}

/// Convert a database row into a domain account.
///
/// Rows violating domain invariants surface as query errors; the schema's
/// check constraints make this unreachable in practice.
fn row_to_account(row: AccountRow) -> Result<Account, AccountPersistenceError> {
    let AccountRow {
        id,
        display_name,
        password_hash,
        role,
        purchase_count,
        created_at,
    } = row;

    let id = AccountId::new(id).map_err(|err| query_error(err.to_string()))?;
    let display_name =
        DisplayName::new(display_name).map_err(|err| query_error(err.to_string()))?;
    let role = role
        .parse::<Role>()
        .map_err(|err| query_error(err.to_string()))?;
    let purchase_count =
        PurchaseCount::try_from(purchase_count).map_err(|err| query_error(err.to_string()))?;

    Ok(Account {
        id,
        display_name,
        password_hash: PasswordHash::new(password_hash),
        role,
        purchase_count,
        created_at,
    })
}

fn rows_to_accounts(rows: Vec<AccountRow>) -> Result<Vec<Account>, AccountPersistenceError> {
    rows.into_iter().map(row_to_account).collect()
}

#[async_trait]
impl AccountRepository for DieselAccountRepository {
    async fn find_by_name(
        &self,
        display_name: &DisplayName,
    ) -> Result<Option<Account>, AccountPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row = accounts::table
            .filter(accounts::display_name.eq(display_name.as_str()))
            .select(AccountRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;

        row.map(row_to_account).transpose()
    }

    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, AccountPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row = accounts::table
            .find(id.get())
            .select(AccountRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;

        row.map(row_to_account).transpose()
    }

    async fn insert(&self, account: &NewAccount) -> Result<Account, AccountPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let new_row = NewAccountRow {
            display_name: account.display_name.as_str(),
            password_hash: account.password_hash.as_str(),
            role: account.role.as_str(),
        };

        let row = diesel::insert_into(accounts::table)
            .values(&new_row)
            .returning(AccountRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| {
                if is_unique_violation(&err) {
                    AccountPersistenceError::conflict(account.display_name.as_str())
                } else {
                    map_diesel(err)
                }
            })?;

        row_to_account(row)
    }

    async fn increment_purchase_count(
        &self,
        id: AccountId,
        role: Role,
    ) -> Result<Option<Account>, AccountPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        // Single UPDATE so concurrent purchases never lose an increment.
        let row = diesel::update(
            accounts::table.filter(
                accounts::id
                    .eq(id.get())
                    .and(accounts::role.eq(role.as_str())),
            ),
        )
        .set(accounts::purchase_count.eq(accounts::purchase_count + 1))
        .returning(AccountRow::as_returning())
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(map_diesel)?;

        row.map(row_to_account).transpose()
    }

    async fn delete(&self, id: AccountId, role: Role) -> Result<u64, AccountPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let removed = diesel::delete(
            accounts::table.filter(
                accounts::id
                    .eq(id.get())
                    .and(accounts::role.eq(role.as_str())),
            ),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel)?;

        u64::try_from(removed).map_err(|err| query_error(err.to_string()))
    }

    async fn list(&self, role: Option<Role>) -> Result<Vec<Account>, AccountPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let rows = match role {
            Some(role) => accounts::table
                .filter(accounts::role.eq(role.as_str()))
                .order(accounts::id.asc())
                .select(AccountRow::as_select())
                .load::<AccountRow>(&mut conn)
                .await
                .map_err(map_diesel)?,
            None => accounts::table
                .order(accounts::id.asc())
                .select(AccountRow::as_select())
                .load::<AccountRow>(&mut conn)
                .await
                .map_err(map_diesel)?,
        };

        rows_to_accounts(rows)
    }
}
