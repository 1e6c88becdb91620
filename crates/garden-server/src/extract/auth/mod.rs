//! Session token authentication.
//!
//! # Key Types
//!
//! - [`AuthClaims`] - typed claim record carried inside tokens
//! - [`RoleSet`] - set-capable `role` claim with single-string wire compat
//! - [`TokenAuthenticator`] - structural parse + signature/expiry validation
//! - [`Principal`] - authenticated caller, rebuilt per request
//! - [`AuthSession`] - axum extractor wiring the above into handlers

mod claims;
mod session;
mod token;

pub use self::claims::{AuthClaims, ROLE_ADMIN, ROLE_USER, RoleSet};
pub use self::session::AuthSession;
pub use self::token::{AuthError, ParsedToken, Principal, TokenAuthenticator};
