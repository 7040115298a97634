//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! The authenticated [`SessionIdentity`] is stored as JSON inside the
//! encrypted session cookie. Role extractors ([`Authenticated`],
//! [`StaffMember`], [`Administrator`]) read it and run the shared access
//! policy, so handlers that take one of them as an argument are protected
//! even when mounted outside a guarded scope.

use actix_session::{Session, SessionExt};
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::{LocalBoxFuture, Ready, ready};

use crate::domain::{
    AccessDenied, Administrator, Error, RoleSet, SessionIdentity, StaffMember, authorize,
};

pub(crate) const IDENTITY_KEY: &str = "identity";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Store `identity` after a successful login.
    ///
    /// The session is renewed first so a pre-login cookie cannot be reused.
    pub fn persist_identity(&self, identity: &SessionIdentity) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(IDENTITY_KEY, identity)
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Current identity, if any. Unreadable values are logged and treated as
    /// anonymous.
    pub fn identity(&self) -> Option<SessionIdentity> {
        match self.0.get::<SessionIdentity>(IDENTITY_KEY) {
            Ok(identity) => identity,
            Err(error) => {
                tracing::warn!(%error, "invalid identity in session cookie");
                None
            }
        }
    }

    /// Require an authenticated identity or return `401 Unauthorized`.
    pub fn require_identity(&self) -> Result<SessionIdentity, Error> {
        self.identity()
            .ok_or_else(|| Error::from(AccessDenied::Unauthenticated))
    }

    /// Drop every value and expire the cookie.
    pub fn clear(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}

fn authorized_identity(req: &HttpRequest, allowed: &RoleSet) -> Result<SessionIdentity, Error> {
    let identity = SessionContext::new(req.get_session()).identity();
    authorize(identity.as_ref(), allowed)
        .cloned()
        .map_err(Error::from)
}

/// Any logged-in account.
#[derive(Debug, Clone)]
pub struct Authenticated(pub SessionIdentity);

impl FromRequest for Authenticated {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(authorized_identity(req, &RoleSet::ANY).map(Self))
    }
}

impl FromRequest for StaffMember {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(
            authorized_identity(req, &RoleSet::STAFF)
                .and_then(|identity| Self::try_from(identity).map_err(Error::from)),
        )
    }
}

impl FromRequest for Administrator {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(
            authorized_identity(req, &RoleSet::ADMIN)
                .and_then(|identity| Self::try_from(identity).map_err(Error::from)),
        )
    }
}
