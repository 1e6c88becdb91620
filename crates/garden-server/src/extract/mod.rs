//! HTTP request extractors.

pub mod auth;

pub use crate::extract::auth::{
    AuthClaims, AuthError, AuthSession, Principal, ROLE_ADMIN, ROLE_USER, RoleSet,
    TokenAuthenticator,
};
