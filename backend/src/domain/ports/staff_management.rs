//! Driving port for administrator staff management.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{AccountId, AccountProfile, Administrator, ServiceError};

/// Confirmation returned after an employee is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RemovedEmployee {
    #[schema(value_type = i64, example = 5)]
    pub id: AccountId,
}

/// Use-case port for employee administration.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StaffManagement: Send + Sync {
    /// Employees, newest first.
    async fn list_employees(
        &self,
        admin: &Administrator,
    ) -> Result<Vec<AccountProfile>, ServiceError>;

    /// One employee's profile.
    async fn employee(
        &self,
        admin: &Administrator,
        target: AccountId,
    ) -> Result<AccountProfile, ServiceError>;

    /// Remove an employee account. Administrators can never remove
    /// themselves.
    async fn remove_employee(
        &self,
        admin: &Administrator,
        target: AccountId,
    ) -> Result<RemovedEmployee, ServiceError>;
}
