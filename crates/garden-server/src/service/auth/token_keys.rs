//! HMAC-SHA256 key material for session tokens.
//!
//! The signing key is derived once at startup from the configured secret and
//! injected wherever tokens are issued or verified. There is no process-wide
//! static; everything flows through [`TokenKeys`] handles.

use std::fmt;
use std::sync::Arc;

use hmac::{Hmac, Mac};
use jsonwebtoken::EncodingKey;
use sha2::Sha256;

use crate::{Error, Result};

/// Tracing target for token key operations.
const TRACING_TARGET: &str = "garden_server::service::auth::token_keys";

/// Minimum accepted secret length in bytes.
///
/// HMAC-SHA256 keys shorter than the hash output weaken the construction,
/// so anything below 32 bytes is rejected at startup.
const MIN_SECRET_LEN: usize = 32;

type HmacSha256 = Hmac<Sha256>;

/// Shared HMAC-SHA256 signing key for session tokens.
///
/// Cheap to clone; all clones share the same key material behind an `Arc`.
/// The key is read-only after construction and safe to share across tasks.
#[derive(Clone)]
pub struct TokenKeys {
    inner: Arc<TokenKeysInner>,
}

struct TokenKeysInner {
    /// Key handle for `jsonwebtoken` encoding.
    encoding_key: EncodingKey,
    /// Raw secret bytes for manual signature verification.
    secret: Vec<u8>,
}

impl TokenKeys {
    /// Builds signing keys from the configured secret string.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the secret is shorter than 32 bytes.
    pub fn from_secret(secret: &str) -> Result<Self> {
        let secret = secret.as_bytes();
        if secret.len() < MIN_SECRET_LEN {
            return Err(Error::config(format!(
                "token secret must be at least {MIN_SECRET_LEN} bytes, got {}",
                secret.len()
            )));
        }

        tracing::debug!(
            target: TRACING_TARGET,
            secret_len = secret.len(),
            "Session token keys initialized"
        );

        let inner = TokenKeysInner {
            encoding_key: EncodingKey::from_secret(secret),
            secret: secret.to_vec(),
        };

        Ok(Self {
            inner: Arc::new(inner),
        })
    }

    /// Returns the key handle used for token encoding.
    #[must_use]
    pub fn encoding_key(&self) -> &EncodingKey {
        &self.inner.encoding_key
    }

    /// Verifies an HMAC-SHA256 signature over the given message.
    ///
    /// Uses a constant-time comparison; returns `false` for any mismatch.
    #[must_use]
    pub fn verify_signature(&self, message: &[u8], signature: &[u8]) -> bool {
        let Ok(mut mac) = HmacSha256::new_from_slice(&self.inner.secret) else {
            return false;
        };
        mac.update(message);
        mac.verify_slice(signature).is_ok()
    }
}

impl fmt::Debug for TokenKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenKeys")
            .field("secret", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_short_secret() {
        let result = TokenKeys::from_secret("too-short");
        assert!(result.is_err());
    }

    #[test]
    fn verifies_own_signature() {
        let keys = TokenKeys::from_secret("an-adequately-long-test-secret-value").unwrap();

        let mut mac = HmacSha256::new_from_slice(b"an-adequately-long-test-secret-value").unwrap();
        mac.update(b"message");
        let signature = mac.finalize().into_bytes();

        assert!(keys.verify_signature(b"message", &signature));
        assert!(!keys.verify_signature(b"other message", &signature));
    }

    #[test]
    fn debug_redacts_secret() {
        let keys = TokenKeys::from_secret("an-adequately-long-test-secret-value").unwrap();
        let debug = format!("{keys:?}");
        assert!(!debug.contains("adequately"));
    }
}
