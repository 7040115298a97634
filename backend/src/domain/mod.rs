//! Domain primitives, rules and services.
//!
//! Purpose: keep loyalty rules, access policy and account flows free of
//! transport and storage concerns. Services depend on the traits in
//! [`ports`]; adapters live under `inbound` and `outbound`.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic error envelope.
//! - Account, AccountProfile, AccountStatus and their newtypes.
//! - Role, RoleSet, authorize, StaffMember, Administrator: access policy.
//! - Money and the loyalty rules (`purchases_until_reward` and friends).
//! - AccountService, LoyaltyLedgerService, StaffService, MenuService.

pub mod access;
pub mod account;
pub mod account_service;
pub mod auth;
pub mod error;
pub mod loyalty;
pub mod loyalty_service;
pub mod menu;
pub mod menu_service;
pub mod money;
pub mod ports;
pub mod role;
pub mod service_error;
pub mod staff_service;
#[cfg(test)]
pub(crate) mod test_fixtures;
pub mod trace_id;

pub use self::access::{AccessDenied, Administrator, RoleSet, StaffMember, authorize};
pub use self::account::{
    Account, AccountId, AccountProfile, AccountStatus, AccountValidationError, DISPLAY_NAME_MAX,
    DisplayName, NewAccount, PasswordHash, PurchaseCount,
};
pub use self::account_service::AccountService;
pub use self::auth::{
    AccessCode, LoginCredentials, LoginValidationError, PASSWORD_MIN_LENGTH,
    RegistrationRequest, RegistrationValidationError, SessionIdentity,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::loyalty::{
    PurchaseAmount, PurchaseReceipt, QUALIFYING_AMOUNT, REWARD_CYCLE, has_unclaimed_reward,
    purchases_until_reward, reward_earned,
};
pub use self::loyalty_service::LoyaltyLedgerService;
pub use self::menu::{MenuItem, MenuItemId, MenuValidationError, NewMenuItem};
pub use self::menu_service::MenuService;
pub use self::money::{Money, MoneyInput, MoneyParseError};
pub use self::role::{Role, UnknownRoleError};
pub use self::service_error::ServiceError;
pub use self::staff_service::StaffService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
