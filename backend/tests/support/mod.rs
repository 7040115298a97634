//! Shared wiring for integration tests: in-memory adapters and an app that
//! mirrors the production route layout.

use std::sync::Arc;

use loyalty::domain::Role;
use loyalty::inbound::http::state::{HttpState, StateAdapters};
use loyalty::outbound::memory::{
    InMemoryAccessCodeRegistry, InMemoryAccountRepository, InMemoryMenuRepository,
};
use loyalty::outbound::password::{Argon2PasswordHasher, Argon2Settings};
use mockable::{Clock, DefaultClock};

pub const ADMIN_CODE: &str = "ADMIN-TEST";
pub const EMPLOYEE_CODE: &str = "EMPLOYEE-TEST";
pub const CUSTOMER_CODE: &str = "CUSTOMER-TEST";

/// Argon2 with the cheapest accepted parameters.
pub fn fast_hasher() -> Arc<Argon2PasswordHasher> {
    Arc::new(
        Argon2PasswordHasher::new(Argon2Settings {
            memory_kib: 8,
            iterations: 1,
            parallelism: 1,
        })
        .expect("valid argon2 parameters"),
    )
}

/// Access codes for all three roles.
pub fn access_codes() -> InMemoryAccessCodeRegistry {
    InMemoryAccessCodeRegistry::new([
        (ADMIN_CODE, Role::Admin),
        (EMPLOYEE_CODE, Role::Employee),
        (CUSTOMER_CODE, Role::Customer),
    ])
}

/// Handler state backed entirely by in-memory adapters.
pub fn in_memory_state() -> HttpState {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    HttpState::from(StateAdapters {
        accounts: Arc::new(InMemoryAccountRepository::new(clock.clone())),
        codes: Arc::new(access_codes()),
        hasher: fast_hasher(),
        menu: Arc::new(InMemoryMenuRepository::new(clock.clone())),
        clock,
    })
}

/// Build the full application around `$state`.
macro_rules! loyalty_app {
    ($state:expr) => {{
        use actix_session::{SessionMiddleware, storage::CookieSessionStore};
        use actix_web::cookie::Key;
        use actix_web::{App, web};
        use loyalty::domain::RoleSet;
        use loyalty::inbound::http::{accounts, error, health, menu, purchases, staff};
        use loyalty::{RequireRoles, Trace};

        let session = SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
            .cookie_name("session".to_owned())
            .cookie_secure(false)
            .build();

        App::new()
            .app_data(web::Data::new($state))
            .app_data(web::Data::new(health::HealthState::new()))
            .app_data(error::json_config())
            .app_data(error::path_config())
            .wrap(Trace)
            .service(
                web::scope("/api/v1")
                    .wrap(session)
                    .service(accounts::register)
                    .service(accounts::login)
                    .service(accounts::logout)
                    .service(accounts::current_account)
                    .service(menu::list_menu)
                    .service(menu::download_menu)
                    .service(
                        web::scope("/staff")
                            .wrap(RequireRoles::new(RoleSet::STAFF))
                            .service(purchases::list_customers)
                            .service(purchases::record_purchase),
                    )
                    .service(
                        web::scope("/admin")
                            .wrap(RequireRoles::new(RoleSet::ADMIN))
                            .service(staff::list_accounts)
                            .service(staff::list_employees)
                            .service(staff::get_employee)
                            .service(staff::remove_employee)
                            .service(menu::list_all_items)
                            .service(menu::add_item)
                            .service(menu::remove_item),
                    ),
            )
            .service(health::ready)
            .service(health::live)
    }};
}
