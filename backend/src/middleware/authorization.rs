//! Role guard for route scopes.
//!
//! [`RequireRoles`] reads the session identity, runs
//! [`crate::domain::authorize`] and short-circuits with the JSON error
//! envelope when access is denied. The wrapped service is never called for a
//! denied request.

use std::rc::Rc;

use actix_session::SessionExt;
use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::{Error, ResponseError};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::debug;

use crate::domain::{Error as ApiError, RoleSet, authorize};
use crate::inbound::http::session::SessionContext;

/// Middleware admitting only sessions whose role is in the configured set.
///
/// Must run inside the session middleware.
///
/// # Examples
/// ```
/// use actix_web::web;
/// use loyalty::RequireRoles;
/// use loyalty::domain::RoleSet;
///
/// let staff = web::scope("/staff").wrap(RequireRoles::new(RoleSet::STAFF));
/// ```
#[derive(Clone, Copy)]
pub struct RequireRoles {
    allowed: RoleSet,
}

impl RequireRoles {
    /// Guard admitting `allowed` roles.
    pub const fn new(allowed: RoleSet) -> Self {
        Self { allowed }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireRoles
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireRolesMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireRolesMiddleware {
            service: Rc::new(service),
            allowed: self.allowed,
        }))
    }
}

/// Service wrapper produced by [`RequireRoles`].
pub struct RequireRolesMiddleware<S> {
    service: Rc<S>,
    allowed: RoleSet,
}

impl<S, B> Service<ServiceRequest> for RequireRolesMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let identity = SessionContext::new(req.get_session()).identity();
        let decision = authorize(identity.as_ref(), &self.allowed).map(|_| ());
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            match decision {
                Ok(()) => service.call(req).await.map(ServiceResponse::map_into_left_body),
                Err(denied) => {
                    debug!(path = req.path(), reason = %denied, "request denied");
                    // Built here so the error picks up the request trace id.
                    let response = ApiError::from(denied).error_response();
                    Ok(req.into_response(response).map_into_right_body())
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test, web};
    use serde_json::Value;

    use crate::domain::{AccountId, DisplayName, PurchaseCount, Role, SessionIdentity};
    use crate::inbound::http::test_utils::{session_cookie, test_session_middleware};
    use crate::middleware::Trace;

    async fn login(session: SessionContext, role: web::Path<String>) -> HttpResponse {
        let role: Role = role.parse().expect("known role");
        let identity = SessionIdentity {
            account_id: AccountId::new(1).expect("valid id"),
            display_name: DisplayName::new("Rosa").expect("valid name"),
            role,
            purchase_count: PurchaseCount::ZERO,
        };
        session.persist_identity(&identity).expect("persist identity");
        HttpResponse::Ok().finish()
    }

    macro_rules! guarded_app {
        () => {
            App::new()
                .wrap(Trace)
                .wrap(test_session_middleware())
                .route("/login/{role}", web::get().to(login))
                .service(
                    web::scope("/admin")
                        .wrap(RequireRoles::new(RoleSet::ADMIN))
                        .route("", web::get().to(|| async { HttpResponse::Ok().body("admin") })),
                )
                .service(
                    web::scope("/staff")
                        .wrap(RequireRoles::new(RoleSet::STAFF))
                        .route("", web::get().to(|| async { HttpResponse::Ok().body("staff") })),
                )
        };
    }

    #[actix_web::test]
    async fn anonymous_request_gets_401_with_login_destination() {
        let app = test::init_service(guarded_app!()).await;

        let res = test::call_service(&app, test::TestRequest::get().uri("/staff").to_request()).await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let trace_header = res
            .headers()
            .get("trace-id")
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["code"], "unauthorized");
        assert_eq!(body["returnTo"], "/login");
        assert_eq!(body["traceId"].as_str().map(str::to_owned), trace_header);
    }

    #[rstest::rstest]
    #[case("admin", "/admin", StatusCode::OK)]
    #[case("employee", "/admin", StatusCode::FORBIDDEN)]
    #[case("customer", "/admin", StatusCode::FORBIDDEN)]
    #[case("admin", "/staff", StatusCode::OK)]
    #[case("employee", "/staff", StatusCode::OK)]
    #[case("customer", "/staff", StatusCode::FORBIDDEN)]
    #[actix_web::test]
    async fn role_sets_are_enforced(
        #[case] role: &str,
        #[case] path: &str,
        #[case] expected: StatusCode,
    ) {
        let app = test::init_service(guarded_app!()).await;
        let login = test::call_service(
            &app,
            test::TestRequest::get()
                .uri(&format!("/login/{role}"))
                .to_request(),
        )
        .await;
        let cookie = session_cookie(&login).expect("session cookie");

        let res = test::call_service(
            &app,
            test::TestRequest::get().uri(path).cookie(cookie).to_request(),
        )
        .await;

        assert_eq!(res.status(), expected);
        if expected == StatusCode::FORBIDDEN {
            let body: Value = test::read_body_json(res).await;
            assert_eq!(body["returnTo"], "/");
        }
    }
}
