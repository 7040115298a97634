//! Role-based access policy.
//!
//! [`authorize`] is the single decision point used by the HTTP middleware and
//! the extractors. Authentication is always checked before the role, and the
//! check has no side effects. [`StaffMember`] and [`Administrator`] can only
//! be built from an identity that passed the matching check, so services that
//! take them as arguments receive proof of authorization.

use super::{AccountId, DisplayName, Role, SessionIdentity};

/// Set of roles admitted by a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleSet(&'static [Role]);

impl RoleSet {
    /// Any authenticated account.
    pub const ANY: Self = Self(&Role::ALL);
    /// Administrators and employees.
    pub const STAFF: Self = Self(&[Role::Admin, Role::Employee]);
    /// Administrators only.
    pub const ADMIN: Self = Self(&[Role::Admin]);

    /// Whether `role` is admitted.
    #[must_use]
    pub fn contains(&self, role: Role) -> bool {
        self.0.contains(&role)
    }
}

/// Reasons a request is refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AccessDenied {
    /// No identity is attached to the request.
    #[error("login required")]
    Unauthenticated,
    /// The identity's role is not admitted. The message never lists the
    /// accepted roles.
    #[error("you do not have permission to access this resource")]
    InsufficientRole,
}

/// Decide whether `identity` may use a route admitting `allowed`.
///
/// # Examples
/// ```
/// use loyalty::domain::{authorize, AccessDenied, RoleSet};
///
/// assert_eq!(authorize(None, &RoleSet::ANY), Err(AccessDenied::Unauthenticated));
/// ```
pub fn authorize<'a>(
    identity: Option<&'a SessionIdentity>,
    allowed: &RoleSet,
) -> Result<&'a SessionIdentity, AccessDenied> {
    let identity = identity.ok_or(AccessDenied::Unauthenticated)?;
    if allowed.contains(identity.role) {
        Ok(identity)
    } else {
        Err(AccessDenied::InsufficientRole)
    }
}

macro_rules! capability {
    ($(#[$meta:meta])* $name:ident => $roles:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name(SessionIdentity);

        impl $name {
            /// Account id of the acting user.
            #[must_use]
            pub const fn account_id(&self) -> AccountId {
                self.0.account_id
            }

            /// Display name of the acting user.
            #[must_use]
            pub const fn display_name(&self) -> &DisplayName {
                &self.0.display_name
            }

            /// Role of the acting user.
            #[must_use]
            pub const fn role(&self) -> Role {
                self.0.role
            }

            /// Underlying session identity.
            #[must_use]
            pub const fn identity(&self) -> &SessionIdentity {
                &self.0
            }
        }

        impl TryFrom<SessionIdentity> for $name {
            type Error = AccessDenied;

            fn try_from(identity: SessionIdentity) -> Result<Self, Self::Error> {
                authorize(Some(&identity), &$roles)?;
                Ok(Self(identity))
            }
        }
    };
}

capability!(
    /// Proof that the caller is an administrator or an employee.
    StaffMember => RoleSet::STAFF
);

capability!(
    /// Proof that the caller is an administrator.
    Administrator => RoleSet::ADMIN
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PurchaseCount;
    use rstest::{fixture, rstest};

    fn identity(role: Role) -> SessionIdentity {
        SessionIdentity {
            account_id: AccountId::new(1).expect("valid id"),
            display_name: DisplayName::new("Rosa").expect("valid name"),
            role,
            purchase_count: PurchaseCount::ZERO,
        }
    }

    #[fixture]
    fn employee() -> SessionIdentity {
        identity(Role::Employee)
    }

    #[rstest]
    #[case(RoleSet::ANY)]
    #[case(RoleSet::STAFF)]
    #[case(RoleSet::ADMIN)]
    fn missing_identity_is_unauthenticated(#[case] allowed: RoleSet) {
        assert_eq!(authorize(None, &allowed), Err(AccessDenied::Unauthenticated));
    }

    #[rstest]
    fn admin_only_route_denies_employee(employee: SessionIdentity) {
        assert_eq!(
            authorize(Some(&employee), &RoleSet::ADMIN),
            Err(AccessDenied::InsufficientRole)
        );
    }

    #[rstest]
    #[case(Role::Admin)]
    #[case(Role::Employee)]
    fn staff_route_admits_admin_and_employee(#[case] role: Role) {
        let caller = identity(role);
        assert_eq!(authorize(Some(&caller), &RoleSet::STAFF), Ok(&caller));
    }

    #[rstest]
    fn staff_route_denies_customer() {
        let caller = identity(Role::Customer);
        assert_eq!(
            authorize(Some(&caller), &RoleSet::STAFF),
            Err(AccessDenied::InsufficientRole)
        );
    }

    #[rstest]
    #[case(Role::Admin, true, true)]
    #[case(Role::Employee, true, false)]
    #[case(Role::Customer, false, false)]
    fn capabilities_follow_roles(#[case] role: Role, #[case] staff: bool, #[case] admin: bool) {
        assert_eq!(StaffMember::try_from(identity(role)).is_ok(), staff);
        assert_eq!(Administrator::try_from(identity(role)).is_ok(), admin);
    }

    #[rstest]
    fn denial_message_does_not_list_roles() {
        let message = AccessDenied::InsufficientRole.to_string();
        for role in Role::ALL {
            assert!(!message.contains(role.as_str()));
        }
    }
}
