//! HTTP inbound adapter exposing REST endpoints.

pub mod accounts;
pub mod error;
pub mod health;
pub mod menu;
pub mod purchases;
pub mod session;
pub mod session_config;
pub mod staff;
pub mod state;
#[cfg(test)]
pub mod test_utils;

pub use error::ApiResult;
