//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the account, access-code and menu ports
//! backed by PostgreSQL through `diesel-async` and `bb8` pooling.
//!
//! # Architecture
//!
//! - **Thin adapters**: repositories only translate between Diesel rows and
//!   domain types. No loyalty rules live here.
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never leave this module.
//! - **Atomic counters**: purchase increments are a single `UPDATE ...
//!   RETURNING` statement.
//!
//! # Example
//!
//! ```ignore
//! use loyalty::outbound::persistence::{DbPool, DieselAccountRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/loyalty")).await?;
//! let accounts = DieselAccountRepository::new(pool);
//! ```

mod diesel_access_code_registry;
mod diesel_account_repository;
mod diesel_error_mapping;
mod diesel_menu_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_access_code_registry::DieselAccessCodeRegistry;
pub use diesel_account_repository::DieselAccountRepository;
pub use diesel_menu_repository::DieselMenuRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
