//! Password hashing and verification using Argon2id.

use argon2::password_hash::{Error as ArgonError, SaltString};
use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher as _, PasswordVerifier, Version,
};
use rand::rngs::OsRng;

use crate::handler::{ErrorKind, Result};
use crate::service::{Result as ServiceResult, ServiceError};

/// Tracing target for password hashing operations.
const TRACING_TARGET: &str = "garden_server::service::auth::hasher";

/// Password hashing and verification service using Argon2id.
///
/// Uses OWASP recommended parameters and a fresh random salt per hash.
/// Verification is timing-safe and never leaks why it failed.
#[derive(Debug, Clone)]
pub struct AuthHasher {
    argon2: Argon2<'static>,
}

impl AuthHasher {
    /// Creates a new password hashing service.
    ///
    /// Parameters follow the OWASP recommendation: 19 MiB memory cost,
    /// 2 iterations, 1 thread.
    ///
    /// # Errors
    ///
    /// Returns a service error if Argon2 initialization fails.
    pub fn new() -> ServiceResult<Self> {
        let params = Params::new(19456, 2, 1, None).map_err(|e| {
            tracing::error!(
                target: TRACING_TARGET,
                error = %e,
                "Failed to create Argon2 parameters"
            );

            ServiceError::config("Invalid password hashing configuration")
        })?;

        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
        Ok(Self { argon2 })
    }

    /// Hashes a password with a fresh cryptographically secure salt.
    ///
    /// Returns a PHC string containing the algorithm, parameters, salt and
    /// hash, suitable for direct database storage.
    pub fn hash_password(&self, password: &str) -> Result<String> {
        let salt = SaltString::try_from_rng(&mut OsRng).map_err(|e| {
            tracing::error!(
                target: TRACING_TARGET,
                error = %e,
                "Failed to generate salt"
            );
            ErrorKind::InternalServerError.with_message("Password processing failed")
        })?;

        let password_hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %e,
                    "Password hashing operation failed"
                );

                ErrorKind::InternalServerError.with_message("Password processing failed")
            })?;

        Ok(password_hash.to_string())
    }

    /// Verifies a password against a stored PHC hash.
    ///
    /// # Errors
    ///
    /// Returns `ErrorKind::Unauthorized` for incorrect passwords and
    /// `ErrorKind::InternalServerError` for malformed stored hashes.
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> Result<()> {
        let parsed_hash = PasswordHash::new(stored_hash).map_err(|e| {
            tracing::warn!(
                target: TRACING_TARGET,
                error = %e,
                "Invalid password hash format in storage"
            );
            ErrorKind::InternalServerError.with_message("Password verification failed")
        })?;

        match self
            .argon2
            .verify_password(password.as_bytes(), &parsed_hash)
        {
            Ok(()) => Ok(()),
            Err(ArgonError::Password) => Err(ErrorKind::Unauthorized
                .with_resource("authentication")
                .into_static()),
            Err(e) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %e,
                    "Password verification system error"
                );
                Err(ErrorKind::InternalServerError
                    .with_message("Password verification failed")
                    .into_static())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_round_trip() {
        let hasher = AuthHasher::new().unwrap();
        let hash = hasher.hash_password("correct horse battery staple").unwrap();

        assert!(hash.starts_with("$argon2id$"));
        hasher
            .verify_password("correct horse battery staple", &hash)
            .unwrap();
    }

    #[test]
    fn wrong_password_is_unauthorized() {
        let hasher = AuthHasher::new().unwrap();
        let hash = hasher.hash_password("original").unwrap();

        let error = hasher.verify_password("different", &hash).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Unauthorized);
    }

    #[test]
    fn hashes_are_salted() {
        let hasher = AuthHasher::new().unwrap();
        let first = hasher.hash_password("same password").unwrap();
        let second = hasher.hash_password("same password").unwrap();
        assert_ne!(first, second);
    }
}
