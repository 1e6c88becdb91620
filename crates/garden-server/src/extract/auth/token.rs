//! Session token parsing and validation.
//!
//! Validation is pure CPU plus a clock read: no I/O, no locking, no retry.
//! Parsing is strictly structural; cryptographic and temporal checks live in
//! [`TokenAuthenticator::validate_at`] so tests can pin the validation
//! instant.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use jiff::Timestamp;

use crate::extract::auth::claims::AuthClaims;
use crate::service::TokenKeys;

/// Tracing target for token validation.
const TRACING_TARGET: &str = "garden_server::extract::auth::token";

/// Why a token was rejected.
///
/// The distinction exists for tracing only. At the HTTP boundary every
/// variant collapses into the same generic 401 so a caller probing the
/// endpoint learns nothing about which check failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// The token is not structurally a `header.claims.signature` JWT.
    #[error("malformed token")]
    MalformedToken,
    /// The signature does not match the signed content.
    #[error("invalid signature")]
    InvalidSignature,
    /// The token expiry instant has been reached.
    #[error("token expired")]
    TokenExpired,
}

/// An authenticated caller, rebuilt fresh for every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    /// Subject the token was issued for.
    pub subject: String,
    /// Authorities granted to the subject.
    pub authorities: Vec<String>,
}

/// A structurally valid token awaiting cryptographic validation.
///
/// Produced by [`TokenAuthenticator::parse`]; carries the decoded claims
/// together with the exact bytes the signature was computed over.
#[derive(Debug, Clone)]
pub struct ParsedToken {
    /// The `header.claims` portion the signature covers.
    message: String,
    /// Decoded signature bytes.
    signature: Vec<u8>,
    /// Decoded claims.
    claims: AuthClaims,
}

impl ParsedToken {
    /// Returns the decoded claims.
    #[must_use]
    pub fn claims(&self) -> &AuthClaims {
        &self.claims
    }
}

/// Validates session tokens against the shared signing key.
///
/// Cheap to clone; all clones share the same [`TokenKeys`].
#[derive(Debug, Clone)]
pub struct TokenAuthenticator {
    keys: TokenKeys,
}

impl TokenAuthenticator {
    /// Creates a new authenticator over the given keys.
    #[must_use]
    pub fn new(keys: TokenKeys) -> Self {
        Self { keys }
    }

    /// Structurally decodes a compact token.
    ///
    /// Checks only the shape: three dot-separated segments, base64url (no
    /// padding) encoding, JSON claims. Signature and expiry are not examined
    /// here.
    pub fn parse(&self, raw: &str) -> Result<ParsedToken, AuthError> {
        let mut segments = raw.split('.');
        let (Some(header), Some(claims), Some(signature), None) = (
            segments.next(),
            segments.next(),
            segments.next(),
            segments.next(),
        ) else {
            return Err(AuthError::MalformedToken);
        };

        if header.is_empty() || claims.is_empty() || signature.is_empty() {
            return Err(AuthError::MalformedToken);
        }

        // The header must at least decode; its contents are irrelevant since
        // the signature is always recomputed with our own key.
        let header_bytes = URL_SAFE_NO_PAD
            .decode(header)
            .map_err(|_| AuthError::MalformedToken)?;
        serde_json::from_slice::<serde_json::Value>(&header_bytes)
            .map_err(|_| AuthError::MalformedToken)?;

        let claims_bytes = URL_SAFE_NO_PAD
            .decode(claims)
            .map_err(|_| AuthError::MalformedToken)?;
        let decoded_claims: AuthClaims =
            serde_json::from_slice(&claims_bytes).map_err(|_| AuthError::MalformedToken)?;

        let signature = URL_SAFE_NO_PAD
            .decode(signature)
            .map_err(|_| AuthError::MalformedToken)?;

        Ok(ParsedToken {
            message: format!("{header}.{claims}"),
            signature,
            claims: decoded_claims,
        })
    }

    /// Validates a parsed token at the current instant.
    pub fn validate(&self, parsed: &ParsedToken) -> Result<(), AuthError> {
        self.validate_at(parsed, Timestamp::now().as_millisecond())
    }

    /// Validates a parsed token at the given instant (epoch milliseconds).
    ///
    /// The signature is recomputed over `header.claims` and compared in
    /// constant time. Expiry uses strictly-before semantics: a token is
    /// valid while `now < exp` and rejected at the boundary instant.
    pub fn validate_at(&self, parsed: &ParsedToken, now_ms: i64) -> Result<(), AuthError> {
        if !self
            .keys
            .verify_signature(parsed.message.as_bytes(), &parsed.signature)
        {
            tracing::debug!(target: TRACING_TARGET, "token signature mismatch");
            return Err(AuthError::InvalidSignature);
        }

        if parsed.claims.is_expired_at(now_ms) {
            tracing::debug!(
                target: TRACING_TARGET,
                expires_at_ms = parsed.claims.expires_at_ms,
                "token expired"
            );
            return Err(AuthError::TokenExpired);
        }

        Ok(())
    }

    /// Parses and validates a raw token, producing the caller's principal.
    pub fn authenticate(&self, raw: &str) -> Result<Principal, AuthError> {
        self.authenticate_at(raw, Timestamp::now().as_millisecond())
    }

    /// Like [`Self::authenticate`] with an explicit validation instant.
    pub fn authenticate_at(&self, raw: &str, now_ms: i64) -> Result<Principal, AuthError> {
        let parsed = self.parse(raw)?;
        self.validate_at(&parsed, now_ms)?;

        let claims = parsed.claims;
        Ok(Principal {
            subject: claims.subject,
            authorities: claims.roles.into_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::{ROLE_ADMIN, ROLE_USER, RoleSet};
    use crate::service::TokenIssuer;

    const SECRET: &str = "an-adequately-long-test-secret-value";

    fn keys(secret: &str) -> TokenKeys {
        TokenKeys::from_secret(secret).unwrap()
    }

    fn issuer(secret: &str, ttl_ms: i64) -> TokenIssuer {
        TokenIssuer::new(keys(secret), ttl_ms).unwrap()
    }

    #[test]
    fn round_trip_preserves_subject_and_roles() {
        let token = issuer(SECRET, 3_600_000).issue_user_token("42").unwrap();
        let authenticator = TokenAuthenticator::new(keys(SECRET));

        let principal = authenticator.authenticate(&token.compact).unwrap();
        assert_eq!(principal.subject, "42");
        assert_eq!(principal.authorities, [ROLE_USER]);
    }

    #[test]
    fn round_trip_with_multiple_roles() {
        let roles = RoleSet::new([ROLE_USER, ROLE_ADMIN]);
        let token = issuer(SECRET, 3_600_000)
            .issue("7", roles, 3_600_000)
            .unwrap();

        let authenticator = TokenAuthenticator::new(keys(SECRET));
        let principal = authenticator.authenticate(&token.compact).unwrap();
        assert_eq!(principal.authorities, [ROLE_USER, ROLE_ADMIN]);
    }

    #[test]
    fn valid_just_before_expiry_rejected_at_it() {
        let token = issuer(SECRET, 3_600_000).issue_user_token("42").unwrap();
        let authenticator = TokenAuthenticator::new(keys(SECRET));
        let parsed = authenticator.parse(&token.compact).unwrap();
        let exp = parsed.claims().expires_at_ms;

        assert_eq!(authenticator.validate_at(&parsed, exp - 1), Ok(()));
        assert_eq!(
            authenticator.validate_at(&parsed, exp),
            Err(AuthError::TokenExpired)
        );
        assert_eq!(
            authenticator.validate_at(&parsed, exp + 1),
            Err(AuthError::TokenExpired)
        );
    }

    #[test]
    fn tampered_claims_fail_signature_check() {
        let token = issuer(SECRET, 3_600_000).issue_user_token("42").unwrap();
        let authenticator = TokenAuthenticator::new(keys(SECRET));

        // Swap the subject inside the claims segment without re-signing.
        let parts: Vec<&str> = token.compact.split('.').collect();
        let claims_json = URL_SAFE_NO_PAD.decode(parts[1]).unwrap();
        let mut claims: serde_json::Value = serde_json::from_slice(&claims_json).unwrap();
        claims["sub"] = serde_json::json!("1337");
        let forged_claims = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&claims).unwrap());
        let forged = format!("{}.{}.{}", parts[0], forged_claims, parts[2]);

        let parsed = authenticator.parse(&forged).unwrap();
        assert_eq!(
            authenticator.validate(&parsed),
            Err(AuthError::InvalidSignature)
        );
    }

    #[test]
    fn key_mismatch_fails_signature_check() {
        let token = issuer(SECRET, 3_600_000).issue_user_token("42").unwrap();
        let authenticator =
            TokenAuthenticator::new(keys("a-completely-different-signing-secret!!"));

        let parsed = authenticator.parse(&token.compact).unwrap();
        assert_eq!(
            authenticator.validate(&parsed),
            Err(AuthError::InvalidSignature)
        );
    }

    #[test]
    fn malformed_inputs_fail_structurally() {
        let authenticator = TokenAuthenticator::new(keys(SECRET));

        for raw in [
            "",
            "garbage",
            "only.two",
            "a.b.c.d",
            "..",
            "not base64!.eyJzdWIiOiI0MiJ9.c2ln",
            "eyJhbGciOiJIUzI1NiJ9.not base64!.c2ln",
        ] {
            assert_eq!(
                authenticator.parse(raw).unwrap_err(),
                AuthError::MalformedToken,
                "expected malformed: {raw:?}"
            );
        }
    }

    #[test]
    fn expired_token_rejected_end_to_end() {
        let token = issuer(SECRET, 3_600_000).issue_user_token("42").unwrap();
        let authenticator = TokenAuthenticator::new(keys(SECRET));

        let exp = token.claims.expires_at_ms;
        assert_eq!(
            authenticator.authenticate_at(&token.compact, exp).unwrap_err(),
            AuthError::TokenExpired
        );
        assert!(
            authenticator
                .authenticate_at(&token.compact, exp - 1)
                .is_ok()
        );
    }
}
