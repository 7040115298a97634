//! In-process adapters for the driven ports.
//!
//! Used when no database URL is configured and by the HTTP integration
//! tests. State lives behind a `std::sync::Mutex`; no lock is held across an
//! await point.

mod access_codes;
mod accounts;
mod menu;

pub use access_codes::InMemoryAccessCodeRegistry;
pub use accounts::InMemoryAccountRepository;
pub use menu::InMemoryMenuRepository;

/// Message reported when a previous holder panicked with the lock held.
const POISONED: &str = "in-memory store lock poisoned";
