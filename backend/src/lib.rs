//! Restaurant loyalty backend library.
//!
//! The binary in `main.rs` wires these modules into an Actix server; the
//! integration tests under `tests/` assemble the same pieces around
//! in-memory adapters.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::{RequireRoles, Trace};
