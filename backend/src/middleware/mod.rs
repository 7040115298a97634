//! Request middleware.
//!
//! Tracing for every request and role guards for protected scopes.

pub mod authorization;
pub mod trace;

pub use authorization::RequireRoles;
pub use trace::Trace;
