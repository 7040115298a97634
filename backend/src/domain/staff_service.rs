//! Administrator tooling for employee accounts.

use std::cmp::Reverse;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::ports::{AccountRepository, RemovedEmployee, StaffManagement};
use crate::domain::{AccountId, AccountProfile, Administrator, Role, ServiceError};

/// Staff management service.
#[derive(Clone)]
pub struct StaffService<R> {
    accounts: Arc<R>,
}

impl<R> StaffService<R> {
    /// Create a new service backed by `accounts`.
    pub const fn new(accounts: Arc<R>) -> Self {
        Self { accounts }
    }
}

fn employee_not_found() -> ServiceError {
    ServiceError::not_found("employee not found")
}

#[async_trait]
impl<R> StaffManagement for StaffService<R>
where
    R: AccountRepository,
{
    async fn list_employees(
        &self,
        _admin: &Administrator,
    ) -> Result<Vec<AccountProfile>, ServiceError> {
        let mut employees = self.accounts.list(Some(Role::Employee)).await?;
        employees.sort_by_key(|account| Reverse((account.created_at, account.id)));
        Ok(employees.iter().map(AccountProfile::from).collect())
    }

    async fn employee(
        &self,
        _admin: &Administrator,
        target: AccountId,
    ) -> Result<AccountProfile, ServiceError> {
        self.accounts
            .find_by_id(target)
            .await?
            .filter(|account| account.role == Role::Employee)
            .map(|account| AccountProfile::from(&account))
            .ok_or_else(employee_not_found)
    }

    async fn remove_employee(
        &self,
        admin: &Administrator,
        target: AccountId,
    ) -> Result<RemovedEmployee, ServiceError> {
        if admin.account_id() == target {
            warn!(admin = %admin.display_name(), "administrator attempted self-removal");
            return Err(ServiceError::self_removal());
        }

        let removed = self.accounts.delete(target, Role::Employee).await?;
        if removed == 0 {
            return Err(employee_not_found());
        }

        info!(
            admin = %admin.display_name(),
            employee_id = %target,
            "employee removed"
        );
        Ok(RemovedEmployee { id: target })
    }
}
