//! Port for resolving registration access codes to roles.

use async_trait::async_trait;

use crate::domain::{AccessCode, Role};

use super::define_port_error;

define_port_error! {
    /// Errors raised by access code registry adapters.
    pub enum AccessCodeLookupError {
        /// Registry connection could not be established.
        Connection { message: String } => "access code registry connection failed: {message}",
        /// Lookup failed during execution.
        Query { message: String } => "access code lookup failed: {message}",
    }
}

/// Read-only mapping from access code to role.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccessCodeRegistry: Send + Sync {
    /// Role granted by `code`, or `None` when the code is unknown.
    async fn resolve(&self, code: &AccessCode) -> Result<Option<Role>, AccessCodeLookupError>;
}
