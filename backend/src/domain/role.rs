//! Account roles.
//!
//! Roles are fixed at registration by the access code the user presents and
//! never change afterwards. Matching on [`Role`] is exhaustive everywhere, so
//! adding a role forces every policy decision to be revisited.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Closed set of account roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Full access, including staff and menu management.
    Admin,
    /// Registers purchases on behalf of customers.
    Employee,
    /// Accrues purchases towards loyalty rewards.
    Customer,
}

impl Role {
    /// Every role, in privilege order.
    pub const ALL: [Self; 3] = [Self::Admin, Self::Employee, Self::Customer];

    /// Stable storage and wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Employee => "employee",
            Self::Customer => "customer",
        }
    }

    /// Whether the role may operate staff tooling.
    #[must_use]
    pub const fn is_staff(self) -> bool {
        match self {
            Self::Admin | Self::Employee => true,
            Self::Customer => false,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a stored or submitted role string is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRoleError(pub String);

impl FromStr for Role {
    type Err = UnknownRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| UnknownRoleError(s.to_owned()))
    }
}
