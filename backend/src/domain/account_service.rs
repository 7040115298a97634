//! Registration, login and account read models.
//!
//! The registration flow never checks for an existing name before inserting:
//! the store's uniqueness constraint decides, and a conflict surfaces as
//! [`ServiceError::DuplicateUser`]. Nothing is written until the code has
//! resolved and the password has been hashed, so a failed registration
//! leaves no partial account behind.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::ports::{
    AccessCodeRegistry, AccountRepository, AccountsQuery, LoginService, PasswordHasher,
    RegistrationService,
};
use crate::domain::{
    AccountProfile, AccountStatus, Administrator, DisplayName, LoginCredentials, NewAccount,
    RegistrationRequest, Role, ServiceError, SessionIdentity, StaffMember,
};

/// Account service implementing the registration, login and query ports.
#[derive(Clone)]
pub struct AccountService<R, C, H> {
    accounts: Arc<R>,
    codes: Arc<C>,
    hasher: Arc<H>,
}

impl<R, C, H> AccountService<R, C, H> {
    /// Create a new service with the given collaborators.
    pub const fn new(accounts: Arc<R>, codes: Arc<C>, hasher: Arc<H>) -> Self {
        Self {
            accounts,
            codes,
            hasher,
        }
    }
}

#[async_trait]
impl<R, C, H> RegistrationService for AccountService<R, C, H>
where
    R: AccountRepository,
    C: AccessCodeRegistry,
    H: PasswordHasher,
{
    async fn register(&self, request: RegistrationRequest) -> Result<AccountProfile, ServiceError> {
        let Some(role) = self.codes.resolve(request.access_code()).await? else {
            debug!(display_name = %request.display_name(), "registration rejected: unknown access code");
            return Err(ServiceError::invalid_code());
        };

        let password_hash = self.hasher.hash(request.password()).await?;
        let account = self
            .accounts
            .insert(&NewAccount {
                display_name: request.display_name().clone(),
                password_hash,
                role,
            })
            .await?;

        info!(
            account_id = %account.id,
            display_name = %account.display_name,
            role = %account.role,
            "account registered"
        );
        Ok(AccountProfile::from(&account))
    }
}

#[async_trait]
impl<R, C, H> LoginService for AccountService<R, C, H>
where
    R: AccountRepository,
    C: AccessCodeRegistry,
    H: PasswordHasher,
{
    async fn authenticate(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<SessionIdentity, ServiceError> {
        // A name no account could carry cannot match one either.
        let Ok(display_name) = DisplayName::new(credentials.display_name()) else {
            return Err(ServiceError::user_not_found());
        };
        let account = self
            .accounts
            .find_by_name(&display_name)
            .await?
            .ok_or_else(ServiceError::user_not_found)?;

        if !self
            .hasher
            .verify(credentials.password(), &account.password_hash)
            .await?
        {
            debug!(account_id = %account.id, "login rejected: password mismatch");
            return Err(ServiceError::invalid_credentials());
        }

        info!(account_id = %account.id, role = %account.role, "login succeeded");
        Ok(SessionIdentity::from(&account))
    }
}

#[async_trait]
impl<R, C, H> AccountsQuery for AccountService<R, C, H>
where
    R: AccountRepository,
    C: AccessCodeRegistry,
    H: PasswordHasher,
{
    async fn current_account(
        &self,
        identity: &SessionIdentity,
    ) -> Result<AccountStatus, ServiceError> {
        let account = self
            .accounts
            .find_by_id(identity.account_id)
            .await?
            .ok_or_else(ServiceError::user_not_found)?;
        Ok(AccountStatus::from(&account))
    }

    async fn list_customers(
        &self,
        staff: &StaffMember,
    ) -> Result<Vec<AccountStatus>, ServiceError> {
        let customers = self.accounts.list(Some(Role::Customer)).await?;
        debug!(requested_by = %staff.display_name(), count = customers.len(), "listed customers");
        Ok(customers.iter().map(AccountStatus::from).collect())
    }

    async fn list_accounts(
        &self,
        admin: &Administrator,
    ) -> Result<Vec<AccountProfile>, ServiceError> {
        let accounts = self.accounts.list(None).await?;
        debug!(requested_by = %admin.display_name(), count = accounts.len(), "listed accounts");
        Ok(accounts.iter().map(AccountProfile::from).collect())
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
