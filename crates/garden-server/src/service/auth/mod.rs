//! Authentication services: signing keys, token issuance, password hashing.

mod password_hasher;
mod token_issuer;
mod token_keys;

pub use self::password_hasher::AuthHasher;
pub use self::token_issuer::{AuthToken, TokenIssuer};
pub use self::token_keys::TokenKeys;
