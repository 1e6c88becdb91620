//! Member repository for managing member account database operations.

use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use uuid::Uuid;

use crate::models::{Member, NewMember};
use crate::{PgError, PgResult, schema};

/// Repository for member-related database operations.
#[derive(Debug, Default, Clone, Copy)]
pub struct MemberRepository;

impl MemberRepository {
    /// Creates a new member account.
    pub async fn create_member(
        conn: &mut AsyncPgConnection,
        new_member: NewMember,
    ) -> PgResult<Member> {
        use schema::members;

        diesel::insert_into(members::table)
            .values(&new_member)
            .returning(Member::as_returning())
            .get_result(conn)
            .await
            .map_err(PgError::from)
    }

    /// Finds a member by their ID.
    pub async fn find_member_by_id(
        conn: &mut AsyncPgConnection,
        member_id: Uuid,
    ) -> PgResult<Option<Member>> {
        use schema::members::{self, dsl};

        members::table
            .filter(dsl::id.eq(member_id))
            .filter(dsl::deleted_at.is_null())
            .select(Member::as_select())
            .first(conn)
            .await
            .optional()
            .map_err(PgError::from)
    }

    /// Finds a member by email address.
    pub async fn find_member_by_email(
        conn: &mut AsyncPgConnection,
        email: &str,
    ) -> PgResult<Option<Member>> {
        use schema::members::{self, dsl};

        members::table
            .filter(dsl::email_address.eq(email.to_lowercase()))
            .filter(dsl::deleted_at.is_null())
            .select(Member::as_select())
            .first(conn)
            .await
            .optional()
            .map_err(PgError::from)
    }
}
