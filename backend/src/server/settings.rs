//! Application settings loaded via OrthoConfig.
//!
//! Every field may come from the command line, a configuration file or a
//! `LOYALTY_`-prefixed environment variable.

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use tracing::warn;

use loyalty::domain::Role;
use loyalty::outbound::password::Argon2Settings;

const DEFAULT_BIND_ADDR: ([u8; 4], u16) = ([0, 0, 0, 0], 8080);
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;
const DEV_ADMIN_CODE: &str = "ADMIN2024";
const DEV_EMPLOYEE_CODE: &str = "EMPLEADO2024";
const DEV_CUSTOMER_CODE: &str = "CLIENTE2024";

/// Runtime configuration for the loyalty server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "LOYALTY")]
pub struct AppSettings {
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<SocketAddr>,
    /// PostgreSQL URL. Without it the server keeps everything in memory.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
    /// Argon2 memory cost in KiB.
    pub password_memory_kib: Option<u32>,
    /// Argon2 iteration count.
    pub password_iterations: Option<u32>,
    /// Argon2 lane count.
    pub password_parallelism: Option<u32>,
    /// Administrator access code for in-memory mode.
    pub admin_code: Option<String>,
    /// Employee access code for in-memory mode.
    pub employee_code: Option<String>,
    /// Customer access code for in-memory mode.
    pub customer_code: Option<String>,
}

impl AppSettings {
    /// Configured bind address, defaulting to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
            .unwrap_or_else(|| SocketAddr::from(DEFAULT_BIND_ADDR))
    }

    /// Configured pool size, defaulting to ten connections.
    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections
            .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
    }

    /// Argon2 cost parameters with unset fields taken from the defaults.
    pub fn password_settings(&self) -> Argon2Settings {
        let defaults = Argon2Settings::default();
        Argon2Settings {
            memory_kib: self.password_memory_kib.unwrap_or(defaults.memory_kib),
            iterations: self.password_iterations.unwrap_or(defaults.iterations),
            parallelism: self.password_parallelism.unwrap_or(defaults.parallelism),
        }
    }

    /// Access codes for the in-memory registry.
    ///
    /// Unset codes fall back to development values and log a warning.
    pub fn access_codes(&self) -> Vec<(String, Role)> {
        [
            (&self.admin_code, DEV_ADMIN_CODE, Role::Admin),
            (&self.employee_code, DEV_EMPLOYEE_CODE, Role::Employee),
            (&self.customer_code, DEV_CUSTOMER_CODE, Role::Customer),
        ]
        .into_iter()
        .map(|(configured, fallback, role)| match configured {
            Some(code) => (code.clone(), role),
            None => {
                warn!(%role, "access code not configured; using development default");
                (fallback.to_owned(), role)
            }
        })
        .collect()
    }
}
