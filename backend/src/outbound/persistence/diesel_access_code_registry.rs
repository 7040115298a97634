//! PostgreSQL-backed `AccessCodeRegistry` implementation.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{AccessCodeLookupError, AccessCodeRegistry};
use crate::domain::{AccessCode, Role};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::pool::DbPool;
use super::schema::access_codes;

/// Resolves registration codes against the `access_codes` table.
#[derive(Clone)]
pub struct DieselAccessCodeRegistry {
    pool: DbPool,
}

impl DieselAccessCodeRegistry {
    /// Create a new registry with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccessCodeRegistry for DieselAccessCodeRegistry {
    async fn resolve(&self, code: &AccessCode) -> Result<Option<Role>, AccessCodeLookupError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, AccessCodeLookupError::connection))?;

        let role = access_codes::table
            .find(code.as_str())
            .select(access_codes::role)
            .first::<String>(&mut conn)
            .await
            .optional()
            .map_err(|err| {
                map_diesel_error(
                    err,
                    AccessCodeLookupError::query,
                    AccessCodeLookupError::connection,
                )
            })?;

        match role.map(|raw| raw.parse::<Role>()) {
            None => Ok(None),
            Some(Ok(role)) => Ok(Some(role)),
            Some(Err(err)) => {
                warn!(error = %err, "access code row carries an unknown role");
                Err(AccessCodeLookupError::query(err.to_string()))
            }
        }
    }
}
