//! Registration, login, logout and current-account handlers.
//!
//! ```text
//! POST /api/v1/register {"displayName":"Ana","password":"tacos","accessCode":"CLIENTE2024"}
//! POST /api/v1/login    {"displayName":"Ana","password":"tacos"}
//! POST /api/v1/logout
//! GET  /api/v1/users/me
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use crate::domain::{
    AccountProfile, AccountStatus, Error, LoginCredentials, RegistrationRequest, ServiceError,
    SessionIdentity,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::{flow_error, pages};
use crate::inbound::http::session::{Authenticated, SessionContext};
use crate::inbound::http::state::HttpState;

/// Body of `POST /api/v1/register`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[schema(example = "Ana")]
    pub display_name: String,
    #[schema(example = "tacos", min_length = 4)]
    pub password: String,
    #[schema(example = "CLIENTE2024")]
    pub access_code: String,
}

/// Body of `POST /api/v1/login`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[schema(example = "Ana")]
    pub display_name: String,
    #[schema(example = "tacos")]
    pub password: String,
}

/// Create an account whose role is decided by the access code.
#[utoipa::path(
    post,
    path = "/api/v1/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = AccountProfile),
        (status = 400, description = "Validation failed or unknown access code", body = Error),
        (status = 409, description = "Display name already registered", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "register",
    security([])
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let RegisterRequest {
        display_name,
        password,
        access_code,
    } = payload.into_inner();
    let request = RegistrationRequest::try_from_parts(&display_name, &password, &access_code)
        .map_err(|err| flow_error(ServiceError::from(err), pages::REGISTER))?;

    let profile = state
        .registration
        .register(request)
        .await
        .map_err(|err| flow_error(err, pages::REGISTER))?;
    Ok(HttpResponse::Created().json(profile))
}

/// Verify credentials and start a session.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = SessionIdentity,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Missing field", body = Error),
        (status = 401, description = "Unknown user or wrong password", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let credentials = LoginCredentials::try_from_parts(&payload.display_name, &payload.password)
        .map_err(|err| flow_error(ServiceError::from(err), pages::LOGIN))?;

    let identity = state
        .login
        .authenticate(&credentials)
        .await
        .map_err(|err| flow_error(err, pages::LOGIN))?;
    session
        .persist_identity(&identity)
        .map_err(|err| err.with_return_to(pages::LOGIN))?;
    info!(account_id = identity.account_id.get(), role = %identity.role, "session started");
    Ok(HttpResponse::Ok().json(identity))
}

/// End the session. Succeeds with or without one.
#[utoipa::path(
    post,
    path = "/api/v1/logout",
    responses((status = 204, description = "Session cleared")),
    tags = ["accounts"],
    operation_id = "logout",
    security([])
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.clear();
    HttpResponse::NoContent().finish()
}

/// Current account with fresh loyalty progress.
#[utoipa::path(
    get,
    path = "/api/v1/users/me",
    responses(
        (status = 200, description = "Current account", body = AccountStatus),
        (status = 401, description = "Not logged in or account removed", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "currentAccount"
)]
#[get("/users/me")]
pub async fn current_account(
    state: web::Data<HttpState>,
    session: SessionContext,
    Authenticated(identity): Authenticated,
) -> ApiResult<web::Json<AccountStatus>> {
    match state.accounts.current_account(&identity).await {
        Ok(status) => Ok(web::Json(status)),
        Err(err @ ServiceError::UserNotFound) => {
            // The account was removed after login.
            session.clear();
            Err(flow_error(err, pages::LOGIN))
        }
        Err(err) => Err(flow_error(err, pages::HOME)),
    }
}

#[cfg(test)]
#[path = "accounts_tests.rs"]
mod tests;
