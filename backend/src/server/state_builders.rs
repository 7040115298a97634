//! Builders for HTTP state from database-backed or in-memory adapters.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use tracing::{info, warn};

use loyalty::domain::ports::PasswordHashError;
use loyalty::inbound::http::state::{HttpState, StateAdapters};
use loyalty::outbound::memory::{
    InMemoryAccessCodeRegistry, InMemoryAccountRepository, InMemoryMenuRepository,
};
use loyalty::outbound::password::Argon2PasswordHasher;
use loyalty::outbound::persistence::{
    DieselAccessCodeRegistry, DieselAccountRepository, DieselMenuRepository,
};

use super::ServerConfig;

/// Assemble the handler state for `config`.
///
/// A configured pool selects the Diesel adapters; otherwise every store is
/// kept in process memory and lost on restart.
///
/// # Errors
/// Returns [`PasswordHashError`] when the Argon2 parameters are rejected.
pub(super) fn build_http_state(
    config: &ServerConfig,
) -> Result<web::Data<HttpState>, PasswordHashError> {
    let hasher = Arc::new(Argon2PasswordHasher::new(config.password)?);
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);

    let state = match &config.db_pool {
        Some(pool) => {
            info!("using PostgreSQL adapters");
            HttpState::from(StateAdapters {
                accounts: Arc::new(DieselAccountRepository::new(pool.clone())),
                codes: Arc::new(DieselAccessCodeRegistry::new(pool.clone())),
                hasher,
                menu: Arc::new(DieselMenuRepository::new(pool.clone())),
                clock,
            })
        }
        None => {
            warn!("no database configured; data will not survive a restart");
            HttpState::from(StateAdapters {
                accounts: Arc::new(InMemoryAccountRepository::new(clock.clone())),
                codes: Arc::new(InMemoryAccessCodeRegistry::new(
                    config.access_codes.iter().map(|(code, role)| (code, *role)),
                )),
                hasher,
                menu: Arc::new(InMemoryMenuRepository::new(clock.clone())),
                clock,
            })
        }
    };
    Ok(web::Data::new(state))
}
