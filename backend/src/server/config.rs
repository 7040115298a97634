//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use actix_web::cookie::{Key, SameSite};
use loyalty::domain::Role;
use loyalty::outbound::password::Argon2Settings;
use loyalty::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) password: Argon2Settings,
    pub(crate) access_codes: Vec<(String, Role)>,
}

impl ServerConfig {
    /// Construct a server configuration using application preferences.
    #[must_use]
    pub fn new(key: Key, cookie_secure: bool, same_site: SameSite, bind_addr: SocketAddr) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            db_pool: None,
            password: Argon2Settings::default(),
            access_codes: Vec::new(),
        }
    }

    /// Attach a database connection pool for persistence adapters.
    ///
    /// Without a pool the server runs on in-memory adapters.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Override the Argon2 cost parameters.
    #[must_use]
    pub const fn with_password_settings(mut self, settings: Argon2Settings) -> Self {
        self.password = settings;
        self
    }

    /// Access codes used by the in-memory registry.
    #[must_use]
    pub fn with_access_codes(mut self, codes: Vec<(String, Role)>) -> Self {
        self.access_codes = codes;
        self
    }
}
