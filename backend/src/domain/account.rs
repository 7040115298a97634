//! Account data model.
//!
//! An account is created once by the registration flow and afterwards only
//! changes through the loyalty ledger, which bumps `purchase_count`. Display
//! names are unique per store and case-sensitive.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::Role;
use super::loyalty::{has_unclaimed_reward, purchases_until_reward};

/// Maximum allowed length for a display name, in characters.
pub const DISPLAY_NAME_MAX: usize = 64;

/// Validation errors returned by the account newtypes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccountValidationError {
    /// Identifiers are assigned by the store and always positive.
    #[error("account id must be positive")]
    NonPositiveId,
    /// The display name was blank.
    #[error("display name must not be empty")]
    EmptyDisplayName,
    /// The display name exceeded [`DISPLAY_NAME_MAX`].
    #[error("display name must be at most {max} characters")]
    DisplayNameTooLong { max: usize },
    /// A stored purchase count was negative.
    #[error("purchase count must not be negative")]
    NegativePurchaseCount,
}

/// Store-assigned account identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct AccountId(i64);

impl AccountId {
    /// Validate and wrap a raw identifier.
    pub const fn new(raw: i64) -> Result<Self, AccountValidationError> {
        if raw <= 0 {
            return Err(AccountValidationError::NonPositiveId);
        }
        Ok(Self(raw))
    }

    /// Raw identifier value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<AccountId> for i64 {
    fn from(value: AccountId) -> Self {
        value.0
    }
}

impl TryFrom<i64> for AccountId {
    type Error = AccountValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Human readable, unique account name.
///
/// Surrounding whitespace is removed; case is preserved.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DisplayName(String);

impl DisplayName {
    /// Validate and construct a [`DisplayName`].
    ///
    /// # Examples
    /// ```
    /// use loyalty::domain::DisplayName;
    ///
    /// let name = DisplayName::new("  Ana  ").expect("valid name");
    /// assert_eq!(name.as_ref(), "Ana");
    /// assert!(DisplayName::new("   ").is_err());
    /// ```
    pub fn new(display_name: impl AsRef<str>) -> Result<Self, AccountValidationError> {
        let trimmed = display_name.as_ref().trim();
        if trimmed.is_empty() {
            return Err(AccountValidationError::EmptyDisplayName);
        }
        if trimmed.chars().count() > DISPLAY_NAME_MAX {
            return Err(AccountValidationError::DisplayNameTooLong {
                max: DISPLAY_NAME_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for DisplayName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<DisplayName> for String {
    fn from(value: DisplayName) -> Self {
        value.0
    }
}

impl TryFrom<String> for DisplayName {
    type Error = AccountValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Number of qualifying purchases an account has accrued.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PurchaseCount(u32);

impl PurchaseCount {
    /// Count for a freshly registered account.
    pub const ZERO: Self = Self(0);

    /// Wrap a raw count.
    #[must_use]
    pub const fn new(count: u32) -> Self {
        Self(count)
    }

    /// Raw count value.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for PurchaseCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i32> for PurchaseCount {
    type Error = AccountValidationError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        u32::try_from(value)
            .map(Self)
            .map_err(|_| AccountValidationError::NegativePurchaseCount)
    }
}

/// Opaque PHC-format password hash.
///
/// Never serialised and redacted from `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap an encoded hash produced by a [`crate::domain::ports::PasswordHasher`].
    #[must_use]
    pub const fn new(encoded: String) -> Self {
        Self(encoded)
    }

    /// Encoded hash string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}

/// Stored account record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: AccountId,
    pub display_name: DisplayName,
    pub password_hash: PasswordHash,
    pub role: Role,
    pub purchase_count: PurchaseCount,
    pub created_at: DateTime<Utc>,
}

/// Account awaiting insertion; the store assigns id and timestamp and starts
/// the purchase count at zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub display_name: DisplayName,
    pub password_hash: PasswordHash,
    pub role: Role,
}

/// Public projection of an account. Never includes the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccountProfile {
    #[schema(value_type = i64, example = 7)]
    pub id: AccountId,
    #[schema(value_type = String, example = "Ana")]
    pub display_name: DisplayName,
    pub role: Role,
    #[schema(value_type = u32, example = 3)]
    pub purchase_count: PurchaseCount,
    #[schema(value_type = String, format = DateTime, example = "2026-01-15T18:30:00Z")]
    pub created_at: DateTime<Utc>,
}

impl From<&Account> for AccountProfile {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            display_name: account.display_name.clone(),
            role: account.role,
            purchase_count: account.purchase_count,
            created_at: account.created_at,
        }
    }
}

/// Account profile together with its loyalty progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccountStatus {
    #[schema(value_type = i64, example = 7)]
    pub id: AccountId,
    #[schema(value_type = String, example = "Ana")]
    pub display_name: DisplayName,
    pub role: Role,
    #[schema(value_type = u32, example = 3)]
    pub purchase_count: PurchaseCount,
    #[schema(example = 5)]
    pub purchases_until_reward: u32,
    pub has_unclaimed_reward: bool,
}

impl From<&Account> for AccountStatus {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            display_name: account.display_name.clone(),
            role: account.role,
            purchase_count: account.purchase_count,
            purchases_until_reward: purchases_until_reward(account.purchase_count),
            has_unclaimed_reward: has_unclaimed_reward(account.purchase_count),
        }
    }
}
