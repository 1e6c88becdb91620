//! Member account model.

use diesel::prelude::*;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::schema::members;
use crate::types::MemberRole;

/// A registered member account.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = members)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Member {
    /// Unique member identifier
    pub id: Uuid,
    /// Normalized (lowercased) email address
    pub email_address: String,
    /// Argon2id password hash in PHC string format
    pub password_hash: String,
    /// Display name shown on listings
    pub display_name: String,
    /// Authorization level of the account
    pub role: MemberRole,
    /// Timestamp when the account was created
    pub created_at: OffsetDateTime,
    /// Timestamp when the account was last updated
    pub updated_at: OffsetDateTime,
    /// Timestamp when the account was soft-deleted
    pub deleted_at: Option<OffsetDateTime>,
}

impl Member {
    /// Returns `true` if the account has administrator privileges.
    #[inline]
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == MemberRole::Admin
    }
}

/// Data for creating a new member.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = members)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewMember {
    /// Email address (stored lowercased)
    pub email_address: String,
    /// Argon2id password hash
    pub password_hash: String,
    /// Display name
    pub display_name: String,
    /// Authorization level
    pub role: MemberRole,
}
