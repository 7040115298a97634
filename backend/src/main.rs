//! Loyalty server entry-point: loads settings, prepares storage and serves
//! the REST API.

mod server;

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr, eyre};
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use loyalty::inbound::http::health::HealthState;
use loyalty::inbound::http::session_config::{BuildMode, session_settings_from_env};
use loyalty::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use server::{AppSettings, ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load_from_iter(std::env::args_os())
        .map_err(|err| eyre!("failed to load settings: {err}"))?;
    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .wrap_err("invalid session configuration")?;

    let mut config = ServerConfig::new(
        session.key,
        session.cookie_secure,
        session.same_site,
        settings.bind_addr(),
    )
    .with_password_settings(settings.password_settings());

    match settings.database_url.as_deref() {
        Some(url) => {
            run_pending_migrations(url)
                .await
                .wrap_err("database migration failed")?;
            let pool = DbPool::new(
                PoolConfig::new(url).with_max_size(settings.db_max_connections()),
            )
            .await
            .wrap_err("database pool setup failed")?;
            config = config.with_db_pool(pool);
        }
        None => {
            config = config.with_access_codes(settings.access_codes());
        }
    }

    let health_state = web::Data::new(HealthState::new());
    info!(addr = %settings.bind_addr(), "starting loyalty server");
    create_server(health_state, config)?
        .await
        .wrap_err("server terminated with an error")
}
