//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;
use actix_web::{HttpResponse, get, web};

use crate::domain::ports::{
    MockAccountsQuery, MockLoginService, MockLoyaltyLedger, MockMenuCatalogue,
    MockRegistrationService, MockStaffManagement,
};
use crate::domain::{AccountId, DisplayName, PurchaseCount, Role, SessionIdentity};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// The `session` cookie set by `res`, if any.
pub fn session_cookie<B>(res: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
}

/// Mocked driving ports; set expectations, then call [`MockPorts::into_state`].
#[derive(Default)]
pub struct MockPorts {
    pub registration: MockRegistrationService,
    pub login: MockLoginService,
    pub accounts: MockAccountsQuery,
    pub ledger: MockLoyaltyLedger,
    pub staff: MockStaffManagement,
    pub menu: MockMenuCatalogue,
}

impl MockPorts {
    pub fn into_state(self) -> web::Data<HttpState> {
        web::Data::new(HttpState {
            registration: Arc::new(self.registration),
            login: Arc::new(self.login),
            accounts: Arc::new(self.accounts),
            ledger: Arc::new(self.ledger),
            staff: Arc::new(self.staff),
            menu: Arc::new(self.menu),
        })
    }
}

/// Identity used by [`test_login`] for account `id`.
pub fn test_identity(id: i64, role: Role) -> SessionIdentity {
    SessionIdentity {
        account_id: AccountId::new(id).expect("positive id"),
        display_name: DisplayName::new(format!("{role}-{id}")).expect("valid name"),
        role,
        purchase_count: PurchaseCount::ZERO,
    }
}

/// Test-only route that logs in as `/{id}/{role}` without credentials.
#[get("/__test/login/{id}/{role}")]
pub async fn test_login(
    session: SessionContext,
    path: web::Path<(i64, String)>,
) -> ApiResult<HttpResponse> {
    let (id, role) = path.into_inner();
    let role: Role = role.parse().expect("known role");
    session.persist_identity(&test_identity(id, role))?;
    Ok(HttpResponse::NoContent().finish())
}

/// Log in through [`test_login`] and return the session cookie.
macro_rules! login_as {
    ($app:expr, $id:expr, $role:expr) => {{
        let uri = format!("/__test/login/{}/{}", $id, $role);
        let res = actix_web::test::call_service(
            $app,
            actix_web::test::TestRequest::get().uri(&uri).to_request(),
        )
        .await;
        $crate::inbound::http::test_utils::session_cookie(&res).expect("session cookie")
    }};
}

pub(crate) use login_as;
