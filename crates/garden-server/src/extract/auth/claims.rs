//! Typed claim record carried inside session tokens.

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// Default authority granted to every registered member.
pub const ROLE_USER: &str = "ROLE_USER";

/// Authority granted to administrator accounts.
pub const ROLE_ADMIN: &str = "ROLE_ADMIN";

/// Claims carried by a session token.
///
/// A deliberately small, typed record instead of a free-form claim map:
/// the subject, the granted roles, and the expiry instant. The expiry is an
/// epoch timestamp in milliseconds, matching the wire format the mobile
/// clients already consume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthClaims {
    /// Subject the token was issued for (member id).
    #[serde(rename = "sub")]
    pub subject: String,
    /// Roles granted to the subject.
    #[serde(rename = "role", default)]
    pub roles: RoleSet,
    /// Expiry instant as epoch milliseconds.
    #[serde(rename = "exp")]
    pub expires_at_ms: i64,
}

impl AuthClaims {
    /// Creates a new claim record.
    pub fn new(subject: impl Into<String>, roles: RoleSet, expires_at_ms: i64) -> Self {
        Self {
            subject: subject.into(),
            roles,
            expires_at_ms,
        }
    }

    /// Returns `true` if the token is expired at the given instant.
    ///
    /// The boundary instant itself counts as expired: a token is valid
    /// strictly before its expiry, never at it.
    #[inline]
    #[must_use]
    pub fn is_expired_at(&self, now_ms: i64) -> bool {
        now_ms >= self.expires_at_ms
    }
}

/// Set of role names granted to a token subject.
///
/// The `role` claim historically held a single bare string. This type keeps
/// that wire shape for single-role tokens while accepting and producing an
/// array when more than one role is granted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleSet(Vec<String>);

impl RoleSet {
    /// Creates a role set from the given role names, deduplicated in order.
    #[must_use]
    pub fn new(roles: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let mut inner: Vec<String> = Vec::new();
        for role in roles {
            let role = role.into();
            if !inner.contains(&role) {
                inner.push(role);
            }
        }
        Self(inner)
    }

    /// Creates a role set holding a single role.
    #[must_use]
    pub fn single(role: impl Into<String>) -> Self {
        Self(vec![role.into()])
    }

    /// Returns `true` if the set contains the given role.
    #[must_use]
    pub fn contains(&self, role: &str) -> bool {
        self.0.iter().any(|r| r == role)
    }

    /// Iterates over the role names.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Returns the number of roles in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consumes the set and returns the role names.
    #[must_use]
    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl Default for RoleSet {
    fn default() -> Self {
        Self::single(ROLE_USER)
    }
}

impl Serialize for RoleSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // A single role serializes as a bare string for wire compatibility.
        match self.0.as_slice() {
            [role] => serializer.serialize_str(role),
            roles => roles.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for RoleSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Wire {
            One(String),
            Many(Vec<String>),
        }

        match Wire::deserialize(deserializer)? {
            Wire::One(role) => Ok(Self::single(role)),
            Wire::Many(roles) => {
                if roles.is_empty() {
                    return Err(de::Error::custom("role claim must not be an empty array"));
                }
                Ok(Self::new(roles))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_role_serializes_as_bare_string() {
        let claims = AuthClaims::new("42", RoleSet::single(ROLE_USER), 1_000);
        let json = serde_json::to_value(&claims).unwrap();
        assert_eq!(json["role"], serde_json::json!("ROLE_USER"));
    }

    #[test]
    fn multiple_roles_serialize_as_array() {
        let roles = RoleSet::new([ROLE_USER, ROLE_ADMIN]);
        let json = serde_json::to_value(&roles).unwrap();
        assert_eq!(json, serde_json::json!(["ROLE_USER", "ROLE_ADMIN"]));
    }

    #[test]
    fn deserializes_both_wire_shapes() {
        let bare: RoleSet = serde_json::from_str(r#""ROLE_USER""#).unwrap();
        let array: RoleSet = serde_json::from_str(r#"["ROLE_USER"]"#).unwrap();
        assert_eq!(bare, array);
    }

    #[test]
    fn rejects_empty_role_array() {
        let result: Result<RoleSet, _> = serde_json::from_str("[]");
        assert!(result.is_err());
    }

    #[test]
    fn missing_role_claim_defaults_to_user() {
        let claims: AuthClaims = serde_json::from_str(r#"{"sub":"42","exp":1000}"#).unwrap();
        assert!(claims.roles.contains(ROLE_USER));
        assert_eq!(claims.roles.len(), 1);
    }

    #[test]
    fn deduplicates_roles_preserving_order() {
        let roles = RoleSet::new([ROLE_ADMIN, ROLE_USER, ROLE_ADMIN]);
        assert_eq!(roles.iter().collect::<Vec<_>>(), [ROLE_ADMIN, ROLE_USER]);
    }

    #[test]
    fn expiry_boundary_is_expired() {
        let claims = AuthClaims::new("42", RoleSet::default(), 5_000);
        assert!(!claims.is_expired_at(4_999));
        assert!(claims.is_expired_at(5_000));
        assert!(claims.is_expired_at(5_001));
    }
}
