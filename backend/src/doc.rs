//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every REST endpoint from the inbound layer, the
//! domain schemas they exchange, and the session cookie security scheme.
//! The document backs Swagger UI in debug builds and is exported via
//! `cargo run --bin openapi-dump` for external tooling.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::ports::RemovedEmployee;
use crate::domain::{
    AccountProfile, AccountStatus, Error, ErrorCode, MenuItem, PurchaseReceipt, Role,
    SessionIdentity,
};
use crate::inbound::http::accounts::{LoginRequest, RegisterRequest};
use crate::inbound::http::menu::AddMenuItemRequest;
use crate::inbound::http::purchases::RecordPurchaseRequest;

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Loyalty backend API",
        description = "Registration by access code, staff purchase registration, employee administration and the restaurant menu."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::accounts::register,
        crate::inbound::http::accounts::login,
        crate::inbound::http::accounts::logout,
        crate::inbound::http::accounts::current_account,
        crate::inbound::http::purchases::list_customers,
        crate::inbound::http::purchases::record_purchase,
        crate::inbound::http::staff::list_accounts,
        crate::inbound::http::staff::list_employees,
        crate::inbound::http::staff::get_employee,
        crate::inbound::http::staff::remove_employee,
        crate::inbound::http::menu::list_menu,
        crate::inbound::http::menu::download_menu,
        crate::inbound::http::menu::list_all_items,
        crate::inbound::http::menu::add_item,
        crate::inbound::http::menu::remove_item,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        Role,
        SessionIdentity,
        AccountProfile,
        AccountStatus,
        PurchaseReceipt,
        RemovedEmployee,
        MenuItem,
        RegisterRequest,
        LoginRequest,
        RecordPurchaseRequest,
        AddMenuItemRequest,
    )),
    tags(
        (name = "accounts", description = "Registration, login and the current account"),
        (name = "staff", description = "Purchase registration for admins and employees"),
        (name = "admin", description = "Account, employee and menu administration"),
        (name = "menu", description = "Menu browsing and download"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
