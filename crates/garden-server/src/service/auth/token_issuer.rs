//! Session token issuance.

use jiff::Timestamp;
use jsonwebtoken::{Algorithm, Header, encode};

use crate::extract::{AuthClaims, RoleSet};
use crate::handler::{ErrorKind, Result};
use crate::service::TokenKeys;
use crate::{Error as ServiceError, Result as ServiceResult};

/// Tracing target for token issuance.
const TRACING_TARGET: &str = "garden_server::service::auth::token_issuer";

/// A freshly issued session token.
#[derive(Debug, Clone)]
pub struct AuthToken {
    /// Compact `header.claims.signature` representation.
    pub compact: String,
    /// Claims the token was signed over.
    pub claims: AuthClaims,
}

/// Issues HMAC-SHA256 signed session tokens.
///
/// Holds the shared [`TokenKeys`] plus the configured default time-to-live.
/// Cheap to clone and safe to share across tasks.
#[derive(Debug, Clone)]
pub struct TokenIssuer {
    keys: TokenKeys,
    default_ttl_ms: i64,
}

impl TokenIssuer {
    /// Creates a new issuer with the given default time-to-live.
    ///
    /// # Errors
    ///
    /// A non-positive TTL is a startup configuration error; it is rejected
    /// here rather than surfacing later on a per-request basis.
    pub fn new(keys: TokenKeys, default_ttl_ms: i64) -> ServiceResult<Self> {
        if default_ttl_ms <= 0 {
            return Err(ServiceError::config(format!(
                "token time-to-live must be positive, got {default_ttl_ms} ms"
            )));
        }

        Ok(Self {
            keys,
            default_ttl_ms,
        })
    }

    /// Returns the configured default time-to-live in milliseconds.
    #[must_use]
    pub fn default_ttl_ms(&self) -> i64 {
        self.default_ttl_ms
    }

    /// Issues a token for the given subject with the given roles and TTL.
    pub fn issue(&self, subject: &str, roles: RoleSet, ttl_ms: i64) -> Result<AuthToken> {
        let now_ms = Timestamp::now().as_millisecond();
        let claims = AuthClaims::new(subject, roles, now_ms + ttl_ms);

        let header = Header::new(Algorithm::HS256);
        let compact = encode(&header, &claims, self.keys.encoding_key()).map_err(|e| {
            tracing::error!(
                target: TRACING_TARGET,
                error = %e,
                subject = %claims.subject,
                "Failed to encode session token"
            );

            ErrorKind::InternalServerError
                .with_message("Session token generation failed")
                .with_resource("authentication")
        })?;

        tracing::debug!(
            target: TRACING_TARGET,
            subject = %claims.subject,
            expires_at_ms = claims.expires_at_ms,
            "Issued session token"
        );

        Ok(AuthToken { compact, claims })
    }

    /// Issues a standard member token: the default role and the default TTL.
    pub fn issue_user_token(&self, subject: &str) -> Result<AuthToken> {
        self.issue(subject, RoleSet::default(), self.default_ttl_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys() -> TokenKeys {
        TokenKeys::from_secret("an-adequately-long-test-secret-value").unwrap()
    }

    #[test]
    fn rejects_non_positive_ttl() {
        assert!(TokenIssuer::new(keys(), 0).is_err());
        assert!(TokenIssuer::new(keys(), -1).is_err());
    }

    #[test]
    fn issued_token_has_three_segments() {
        let issuer = TokenIssuer::new(keys(), 3_600_000).unwrap();
        let token = issuer.issue_user_token("42").unwrap();

        assert_eq!(token.compact.split('.').count(), 3);
        assert_eq!(token.claims.subject, "42");
        assert!(token.claims.roles.contains(crate::extract::ROLE_USER));
    }

    #[test]
    fn expiry_reflects_requested_ttl() {
        let issuer = TokenIssuer::new(keys(), 3_600_000).unwrap();
        let before_ms = Timestamp::now().as_millisecond();
        let token = issuer.issue("42", RoleSet::default(), 1_000).unwrap();
        let after_ms = Timestamp::now().as_millisecond();

        assert!(token.claims.expires_at_ms >= before_ms + 1_000);
        assert!(token.claims.expires_at_ms <= after_ms + 1_000);
    }
}
