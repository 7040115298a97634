//! Shared builders for domain unit tests.

use chrono::{TimeZone, Utc};

use super::{
    Account, AccountId, Administrator, DisplayName, PasswordHash, PurchaseCount, Role,
    SessionIdentity, StaffMember,
};

pub(crate) fn account_id(raw: i64) -> AccountId {
    AccountId::new(raw).expect("fixture ids are positive")
}

pub(crate) fn account(id: i64, name: &str, role: Role, purchases: u32) -> Account {
    Account {
        id: account_id(id),
        display_name: DisplayName::new(name).expect("fixture names are valid"),
        password_hash: PasswordHash::new(format!("hash-of-{name}")),
        role,
        purchase_count: PurchaseCount::new(purchases),
        created_at: Utc
            .with_ymd_and_hms(2025, 1, 1, 12, 0, 0)
            .single()
            .expect("valid fixture timestamp")
            + chrono::Duration::minutes(id),
    }
}

pub(crate) fn identity(id: i64, name: &str, role: Role) -> SessionIdentity {
    SessionIdentity::from(&account(id, name, role, 0))
}

pub(crate) fn admin(id: i64, name: &str) -> Administrator {
    Administrator::try_from(identity(id, name, Role::Admin)).expect("admin identity")
}

pub(crate) fn staff(id: i64, name: &str, role: Role) -> StaffMember {
    StaffMember::try_from(identity(id, name, role)).expect("staff identity")
}
