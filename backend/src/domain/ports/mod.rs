//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`, [`AccessCodeRegistry`], [`PasswordHasher`])
//! describe what the services need from infrastructure. Driving ports
//! describe the use-cases inbound adapters may call. Each driven port exposes
//! a strongly typed error so adapters map their failures into predictable
//! variants.

mod macros;
pub(crate) use macros::define_port_error;

mod access_code_registry;
mod account_flows;
mod account_repository;
mod loyalty_ledger;
mod menu_catalogue;
mod menu_repository;
mod password_hasher;
mod staff_management;

#[cfg(test)]
pub use access_code_registry::MockAccessCodeRegistry;
pub use access_code_registry::{AccessCodeLookupError, AccessCodeRegistry};
#[cfg(test)]
pub use account_flows::{MockAccountsQuery, MockLoginService, MockRegistrationService};
pub use account_flows::{AccountsQuery, LoginService, RegistrationService};
#[cfg(test)]
pub use account_repository::MockAccountRepository;
pub use account_repository::{AccountPersistenceError, AccountRepository};
#[cfg(test)]
pub use loyalty_ledger::MockLoyaltyLedger;
pub use loyalty_ledger::LoyaltyLedger;
#[cfg(test)]
pub use menu_catalogue::MockMenuCatalogue;
pub use menu_catalogue::MenuCatalogue;
#[cfg(test)]
pub use menu_repository::MockMenuRepository;
pub use menu_repository::{MenuPersistenceError, MenuRepository};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use staff_management::MockStaffManagement;
pub use staff_management::{RemovedEmployee, StaffManagement};
