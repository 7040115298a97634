//! Server construction and middleware wiring.

mod config;
mod settings;
mod state_builders;

pub use config::ServerConfig;
pub use settings::AppSettings;

use state_builders::build_http_state;

use actix_session::{
    SessionMiddleware,
    config::{CookieContentSecurity, PersistentSession},
    storage::CookieSessionStore,
};
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use loyalty::domain::RoleSet;
#[cfg(debug_assertions)]
use loyalty::doc::ApiDoc;
use loyalty::inbound::http::accounts::{current_account, login, logout, register};
use loyalty::inbound::http::error::{json_config, path_config};
use loyalty::inbound::http::health::{HealthState, live, ready};
use loyalty::inbound::http::menu::{
    add_item, download_menu, list_all_items, list_menu, remove_item,
};
use loyalty::inbound::http::purchases::{list_customers, record_purchase};
use loyalty::inbound::http::staff::{get_employee, list_accounts, list_employees, remove_employee};
use loyalty::inbound::http::state::HttpState;
use loyalty::{RequireRoles, Trace};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    key: Key,
    cookie_secure: bool,
    same_site: SameSite,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        key,
        cookie_secure,
        same_site,
    } = deps;

    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(same_site)
        .session_lifecycle(
            PersistentSession::default().session_ttl(actix_web::cookie::time::Duration::hours(2)),
        )
        .build();

    let staff = web::scope("/staff")
        .wrap(RequireRoles::new(RoleSet::STAFF))
        .service(list_customers)
        .service(record_purchase);

    let admin = web::scope("/admin")
        .wrap(RequireRoles::new(RoleSet::ADMIN))
        .service(list_accounts)
        .service(list_employees)
        .service(get_employee)
        .service(remove_employee)
        .service(list_all_items)
        .service(add_item)
        .service(remove_item);

    let api = web::scope("/api/v1")
        .wrap(session)
        .service(register)
        .service(login)
        .service(logout)
        .service(current_account)
        .service(list_menu)
        .service(download_menu)
        .service(staff)
        .service(admin);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(json_config())
        .app_data(path_config())
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Parameters
/// - `health_state`: shared readiness state updated once the server is initialised.
/// - `config`: pre-built [`ServerConfig`] containing session, binding and adapter settings.
///
/// # Returns
/// A spawned [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when the password hasher rejects its
/// parameters, or when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = build_http_state(&config)
        .map_err(|err| std::io::Error::other(format!("password hasher setup failed: {err}")))?;
    let ServerConfig {
        key,
        cookie_secure,
        same_site,
        bind_addr,
        ..
    } = config;

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            key: key.clone(),
            cookie_secure,
            same_site,
        })
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
