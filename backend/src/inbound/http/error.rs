//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while allowing Actix
//! handlers to turn service failures and access denials into consistent JSON
//! responses, status codes and "go back" destinations.

use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode, web};
use serde_json::json;
use tracing::error;

use crate::domain::{AccessDenied, Error, ErrorCode, ServiceError, TRACE_ID_HEADER};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

/// Client-side destinations suggested in `returnTo`.
pub mod pages {
    pub const HOME: &str = "/";
    pub const LOGIN: &str = "/login";
    pub const REGISTER: &str = "/register";
    pub const PURCHASES: &str = "/staff/purchases";
    pub const EMPLOYEES: &str = "/admin/employees";
    pub const MENU_ADMIN: &str = "/admin/menu";
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn redact_if_internal(error: &Error) -> Error {
    if matches!(error.code(), ErrorCode::InternalError) {
        let mut redacted = Error::internal("Internal server error");
        if let Some(id) = error.trace_id() {
            redacted = redacted.with_trace_id(id.to_owned());
        }
        if let Some(destination) = error.return_to() {
            redacted = redacted.with_return_to(destination.to_owned());
        }
        redacted
    } else {
        error.clone()
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        if matches!(self.code(), ErrorCode::InternalError) {
            error!(
                trace_id = self.trace_id().unwrap_or_default(),
                message = self.message(),
                "request failed with internal error"
            );
        }

        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }

        builder.json(redact_if_internal(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        // Do not leak implementation details to clients.
        error!(error = %err, "actix error promoted to domain error");
        Error::internal("Internal server error")
    }
}

impl From<AccessDenied> for Error {
    fn from(denied: AccessDenied) -> Self {
        match denied {
            AccessDenied::Unauthenticated => {
                Error::unauthorized(denied.to_string()).with_return_to(pages::LOGIN)
            }
            AccessDenied::InsufficientRole => {
                Error::forbidden(denied.to_string()).with_return_to(pages::HOME)
            }
        }
    }
}

fn tagged(error: Error, tag: &str) -> Error {
    error.with_details(json!({ "code": tag }))
}

impl From<ServiceError> for Error {
    fn from(err: ServiceError) -> Self {
        let message = err.to_string();
        match err {
            ServiceError::Validation { field, .. } => Error::invalid_request(message)
                .with_details(json!({ "code": "validation_failed", "field": field })),
            ServiceError::InvalidCode => {
                tagged(Error::invalid_request(message), "invalid_access_code")
            }
            ServiceError::DuplicateUser { .. } => tagged(Error::conflict(message), "duplicate_user"),
            ServiceError::UserNotFound => tagged(Error::unauthorized(message), "user_not_found"),
            ServiceError::InvalidCredentials => {
                tagged(Error::unauthorized(message), "invalid_credentials")
            }
            ServiceError::BelowThreshold { .. } => {
                tagged(Error::invalid_request(message), "below_threshold")
            }
            ServiceError::SelfRemoval => tagged(Error::forbidden(message), "self_removal"),
            ServiceError::NotFound { .. } => tagged(Error::not_found(message), "not_found"),
            ServiceError::Storage { .. } => Error::internal(message),
        }
    }
}

/// Map a service failure to a response that sends the client back to `page`.
pub fn flow_error(err: ServiceError, page: &str) -> Error {
    Error::from(err).with_return_to(page)
}

/// JSON extractor settings that report malformed bodies in the error
/// envelope.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req: &HttpRequest| {
        Error::invalid_request(format!("malformed request body: {err}"))
            .with_details(json!({ "code": "malformed_body" }))
            .into()
    })
}

/// Path extractor settings that report malformed ids in the error envelope.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, _req: &HttpRequest| {
        Error::invalid_request(format!("malformed path: {err}"))
            .with_details(json!({ "code": "malformed_path" }))
            .into()
    })
}
