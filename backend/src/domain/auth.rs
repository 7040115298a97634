//! Authentication primitives: registration requests, login credentials and
//! the identity snapshot kept in the session.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use zeroize::Zeroizing;

use super::{Account, AccountId, AccountValidationError, DisplayName, PurchaseCount, Role};

/// Minimum password length, in characters.
pub const PASSWORD_MIN_LENGTH: usize = 4;

/// Domain error returned when registration payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationValidationError {
    /// The display name was missing or malformed.
    #[error("{0}")]
    DisplayName(AccountValidationError),
    /// The password was blank.
    #[error("password must not be empty")]
    EmptyPassword,
    /// The password was shorter than [`PASSWORD_MIN_LENGTH`].
    #[error("password must be at least {min} characters")]
    PasswordTooShort { min: usize },
    /// The access code was blank.
    #[error("access code must not be empty")]
    EmptyAccessCode,
}

impl RegistrationValidationError {
    /// Name of the offending request field.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::DisplayName(_) => "displayName",
            Self::EmptyPassword | Self::PasswordTooShort { .. } => "password",
            Self::EmptyAccessCode => "accessCode",
        }
    }
}

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginValidationError {
    /// Display name was missing or blank once trimmed.
    #[error("display name must not be empty")]
    EmptyDisplayName,
    /// Password was blank.
    #[error("password must not be empty")]
    EmptyPassword,
}

impl LoginValidationError {
    /// Name of the offending request field.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::EmptyDisplayName => "displayName",
            Self::EmptyPassword => "password",
        }
    }
}

/// Secret code that decides the role of a new account.
///
/// Trimmed on construction; redacted from `Debug` output.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct AccessCode(String);

impl AccessCode {
    /// Validate and construct an access code.
    pub fn new(code: impl AsRef<str>) -> Result<Self, RegistrationValidationError> {
        let trimmed = code.as_ref().trim();
        if trimmed.is_empty() {
            return Err(RegistrationValidationError::EmptyAccessCode);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Code text as presented by the user, without surrounding whitespace.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for AccessCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessCode(<redacted>)")
    }
}

/// Validated registration request.
///
/// ## Invariants
/// - `display_name` satisfies [`DisplayName`] validation.
/// - `password` has at least [`PASSWORD_MIN_LENGTH`] characters and keeps
///   caller-provided whitespace.
/// - `access_code` is trimmed and non-empty.
#[derive(Clone)]
pub struct RegistrationRequest {
    display_name: DisplayName,
    password: Zeroizing<String>,
    access_code: AccessCode,
}

impl RegistrationRequest {
    /// Construct a request from raw form inputs.
    ///
    /// # Examples
    /// ```
    /// use loyalty::domain::RegistrationRequest;
    ///
    /// let request = RegistrationRequest::try_from_parts("Ana", "tacos", " CLIENTE ")
    ///     .expect("valid registration");
    /// assert_eq!(request.display_name().as_ref(), "Ana");
    /// assert_eq!(request.access_code().as_str(), "CLIENTE");
    /// ```
    pub fn try_from_parts(
        display_name: &str,
        password: &str,
        access_code: &str,
    ) -> Result<Self, RegistrationValidationError> {
        let display_name =
            DisplayName::new(display_name).map_err(RegistrationValidationError::DisplayName)?;
        if password.is_empty() {
            return Err(RegistrationValidationError::EmptyPassword);
        }
        if password.chars().count() < PASSWORD_MIN_LENGTH {
            return Err(RegistrationValidationError::PasswordTooShort {
                min: PASSWORD_MIN_LENGTH,
            });
        }
        let access_code = AccessCode::new(access_code)?;

        Ok(Self {
            display_name,
            password: Zeroizing::new(password.to_owned()),
            access_code,
        })
    }

    /// Requested display name.
    #[must_use]
    pub const fn display_name(&self) -> &DisplayName {
        &self.display_name
    }

    /// Plaintext password to hash.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// Access code deciding the role.
    #[must_use]
    pub const fn access_code(&self) -> &AccessCode {
        &self.access_code
    }
}

/// Validated login credentials used by authentication services.
///
/// ## Invariants
/// - `display_name` is trimmed and must not be empty after trimming.
/// - `password` is required to be non-empty but retains caller-provided
///   whitespace to avoid surprising credential comparisons.
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    display_name: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw name/password inputs.
    pub fn try_from_parts(display_name: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = display_name.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyDisplayName);
        }

        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            display_name: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Display name suitable for account lookups.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.display_name.as_str()
    }

    /// Password string provided by the caller.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for RegistrationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationRequest")
            .field("display_name", &self.display_name)
            .field("password", &"<redacted>")
            .field("access_code", &self.access_code)
            .finish()
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("display_name", &self.display_name)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Identity snapshot stored in the session at login.
///
/// `purchase_count` reflects the moment of login; read models re-fetch the
/// account when they need the current value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionIdentity {
    #[schema(value_type = i64, example = 7)]
    pub account_id: AccountId,
    #[schema(value_type = String, example = "Ana")]
    pub display_name: DisplayName,
    pub role: Role,
    #[schema(value_type = u32, example = 3)]
    pub purchase_count: PurchaseCount,
}

impl From<&Account> for SessionIdentity {
    fn from(account: &Account) -> Self {
        Self {
            account_id: account.id,
            display_name: account.display_name.clone(),
            role: account.role,
            purchase_count: account.purchase_count,
        }
    }
}
