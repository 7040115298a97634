//! Driving ports for registration, login and account read models.
//!
//! Inbound adapters call these to run the account flows without knowing the
//! backing infrastructure, so handler tests can substitute doubles instead
//! of wiring persistence and hashing.

use async_trait::async_trait;

use crate::domain::{
    AccountProfile, AccountStatus, Administrator, LoginCredentials, RegistrationRequest,
    ServiceError, SessionIdentity, StaffMember,
};

/// Use-case port for creating accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationService: Send + Sync {
    /// Register a new account whose role is decided by the access code.
    async fn register(&self, request: RegistrationRequest) -> Result<AccountProfile, ServiceError>;
}

/// Use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the identity to store in the session.
    async fn authenticate(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<SessionIdentity, ServiceError>;
}

/// Use-case port for account read models.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountsQuery: Send + Sync {
    /// Fresh status of the signed-in account.
    async fn current_account(
        &self,
        identity: &SessionIdentity,
    ) -> Result<AccountStatus, ServiceError>;

    /// Customers with their loyalty progress.
    async fn list_customers(&self, staff: &StaffMember)
    -> Result<Vec<AccountStatus>, ServiceError>;

    /// Every account's public projection.
    async fn list_accounts(
        &self,
        admin: &Administrator,
    ) -> Result<Vec<AccountProfile>, ServiceError>;
}
