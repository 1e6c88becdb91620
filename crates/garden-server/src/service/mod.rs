//! Application services, configuration and state.

mod auth;
mod config;
mod state;

pub use crate::service::auth::{AuthHasher, AuthToken, TokenIssuer, TokenKeys};
pub use crate::service::config::{ServiceConfig, ServiceConfigBuilder};
pub use crate::service::state::ServiceState;
// Re-export error types from crate root for convenience
pub use crate::{Error as ServiceError, Result};
