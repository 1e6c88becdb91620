//! Bearer-token session extractor.

use axum::RequestPartsExt;
use axum::extract::{FromRef, FromRequestParts, OptionalFromRequestParts};
use axum::http::request::Parts;
use axum_extra::TypedHeader;
use axum_extra::headers::Authorization;
use axum_extra::headers::authorization::Bearer;
use derive_more::Deref;

use crate::extract::auth::token::{Principal, TokenAuthenticator};
use crate::handler::{Error, ErrorKind};

/// Tracing target for session extraction.
const TRACING_TARGET: &str = "garden_server::extract::auth::session";

/// Authenticated session extracted from the `Authorization: Bearer` header.
///
/// Validation is fully stateless: the token signature and expiry are checked
/// in-process against the shared signing key, with no database lookup. The
/// resulting [`Principal`] is cached in the request extensions so repeated
/// extraction within one request validates only once.
///
/// Every validation failure produces the same generic 401 response. Which
/// check failed (structure, signature, expiry) is recorded in tracing only.
#[derive(Debug, Clone, Deref)]
pub struct AuthSession(pub Principal);

impl AuthSession {
    /// Returns the subject the session token was issued for.
    #[must_use]
    pub fn subject(&self) -> &str {
        &self.0.subject
    }
}

impl<S> FromRequestParts<S> for AuthSession
where
    S: Send + Sync,
    TokenAuthenticator: FromRef<S>,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(session) = parts.extensions.get::<AuthSession>() {
            return Ok(session.clone());
        }

        let TypedHeader(authorization) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|_| {
                ErrorKind::MissingAuthToken
                    .with_resource("authentication")
                    .into_static()
            })?;

        let authenticator = TokenAuthenticator::from_ref(state);
        let principal = authenticator
            .authenticate(authorization.token())
            .map_err(|reason| {
                // Sub-kind is tracing-only; the response stays uniform.
                tracing::debug!(
                    target: TRACING_TARGET,
                    reason = %reason,
                    "session token rejected"
                );
                ErrorKind::Unauthorized
                    .with_resource("authentication")
                    .into_static()
            })?;

        let session = AuthSession(principal);
        parts.extensions.insert(session.clone());
        Ok(session)
    }
}

impl<S> OptionalFromRequestParts<S> for AuthSession
where
    S: Send + Sync,
    TokenAuthenticator: FromRef<S>,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        // Absent header means anonymous; a present but invalid token is
        // still rejected rather than silently downgraded.
        if !parts.headers.contains_key(axum::http::header::AUTHORIZATION) {
            return Ok(None);
        }

        <Self as FromRequestParts<S>>::from_request_parts(parts, state)
            .await
            .map(Some)
    }
}

impl aide::OperationInput for AuthSession {}
