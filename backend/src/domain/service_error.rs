//! Failures surfaced by the account, loyalty, staff and menu services.
//!
//! Driven-port errors collapse into [`ServiceError::Storage`], except for a
//! display-name conflict which becomes [`ServiceError::DuplicateUser`].

use super::ports::{
    AccessCodeLookupError, AccountPersistenceError, MenuPersistenceError, PasswordHashError,
    define_port_error,
};
use super::{LoginValidationError, MenuValidationError, MoneyParseError, RegistrationValidationError};

define_port_error! {
    /// Service-level error taxonomy.
    pub enum ServiceError {
        /// A request field failed validation.
        Validation { field: String, message: String } => "{message}",
        /// The access code matches no role.
        InvalidCode => "access code not recognised; use the admin, employee or customer code you were given",
        /// The display name is already registered.
        DuplicateUser { display_name: String } => "display name {display_name} is already registered",
        /// No account carries the given display name.
        UserNotFound => "user not found",
        /// The password did not match.
        InvalidCredentials => "incorrect password",
        /// The purchase amount is below the qualifying minimum.
        BelowThreshold { amount: String } => "purchase amount {amount} is below the qualifying minimum of 100.00",
        /// An administrator tried to remove their own account.
        SelfRemoval => "you cannot remove your own account",
        /// The target resource does not exist or has the wrong role.
        NotFound { message: String } => "{message}",
        /// A collaborator failed.
        Storage { message: String } => "{message}",
    }
}

impl From<AccountPersistenceError> for ServiceError {
    fn from(error: AccountPersistenceError) -> Self {
        match error {
            AccountPersistenceError::Conflict { display_name } => Self::duplicate_user(display_name),
            other => Self::storage(other.to_string()),
        }
    }
}

impl From<AccessCodeLookupError> for ServiceError {
    fn from(error: AccessCodeLookupError) -> Self {
        Self::storage(error.to_string())
    }
}

impl From<PasswordHashError> for ServiceError {
    fn from(error: PasswordHashError) -> Self {
        Self::storage(error.to_string())
    }
}

impl From<MenuPersistenceError> for ServiceError {
    fn from(error: MenuPersistenceError) -> Self {
        Self::storage(error.to_string())
    }
}

impl From<RegistrationValidationError> for ServiceError {
    fn from(error: RegistrationValidationError) -> Self {
        Self::validation(error.field(), error.to_string())
    }
}

impl From<LoginValidationError> for ServiceError {
    fn from(error: LoginValidationError) -> Self {
        Self::validation(error.field(), error.to_string())
    }
}

impl From<MenuValidationError> for ServiceError {
    fn from(error: MenuValidationError) -> Self {
        Self::validation(error.field(), error.to_string())
    }
}

impl ServiceError {
    /// Validation failure for an amount field.
    pub fn invalid_amount(field: &str, error: &MoneyParseError) -> Self {
        Self::validation(field, error.to_string())
    }
}
