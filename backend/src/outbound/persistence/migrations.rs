//! Embedded schema migrations.

use diesel::{Connection, PgConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

use crate::domain::ports::define_port_error;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

define_port_error! {
    /// Failures raised while applying migrations.
    pub enum MigrationError {
        /// The database could not be reached.
        Connection { message: String } => "migration connection failed: {message}",
        /// A migration failed to apply.
        Apply { message: String } => "migration failed: {message}",
    }
}

/// Apply every pending migration to `database_url`.
///
/// Diesel's migration harness is synchronous, so the work runs on the
/// blocking thread pool.
///
/// # Errors
///
/// Returns [`MigrationError`] when the connection or a migration fails.
pub async fn run_pending_migrations(database_url: &str) -> Result<(), MigrationError> {
    let url = database_url.to_owned();
    tokio::task::spawn_blocking(move || apply(&url))
        .await
        .map_err(|err| MigrationError::apply(err.to_string()))?
}

fn apply(database_url: &str) -> Result<(), MigrationError> {
    let mut conn = PgConnection::establish(database_url)
        .map_err(|err| MigrationError::connection(err.to_string()))?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| MigrationError::apply(err.to_string()))?;
    info!(count = applied.len(), "database migrations applied");
    Ok(())
}
