//! Repository for per-member recently-viewed garden tracking.

use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::models::{Garden, GardenView, NewGardenView};
use crate::types::OffsetPagination;
use crate::{PgError, PgResult, schema};

/// Repository for garden view history database operations.
#[derive(Debug, Default, Clone, Copy)]
pub struct GardenViewRepository;

impl GardenViewRepository {
    /// Records that a member viewed a garden.
    ///
    /// Upserts on `(member_id, garden_id)` so a repeat view refreshes the
    /// `viewed_at` timestamp instead of inserting a duplicate row.
    pub async fn record_view(
        conn: &mut AsyncPgConnection,
        new_view: NewGardenView,
    ) -> PgResult<GardenView> {
        use schema::garden_views::{self, dsl};

        diesel::insert_into(garden_views::table)
            .values(&new_view)
            .on_conflict((dsl::member_id, dsl::garden_id))
            .do_update()
            .set(dsl::viewed_at.eq(OffsetDateTime::now_utc()))
            .returning(GardenView::as_returning())
            .get_result(conn)
            .await
            .map_err(PgError::from)
    }

    /// Lists the gardens a member viewed most recently, newest first.
    ///
    /// Soft-deleted listings are filtered out even when a view row remains.
    pub async fn list_recent_gardens(
        conn: &mut AsyncPgConnection,
        member_id: Uuid,
        pagination: OffsetPagination,
    ) -> PgResult<Vec<(GardenView, Garden)>> {
        use schema::{garden_views, gardens};

        garden_views::table
            .inner_join(gardens::table)
            .filter(garden_views::dsl::member_id.eq(member_id))
            .filter(gardens::dsl::deleted_at.is_null())
            .order(garden_views::dsl::viewed_at.desc())
            .limit(pagination.limit)
            .offset(pagination.offset)
            .select((GardenView::as_select(), Garden::as_select()))
            .load(conn)
            .await
            .map_err(PgError::from)
    }

    /// Removes a garden from a member's view history.
    pub async fn delete_view(
        conn: &mut AsyncPgConnection,
        member_id: Uuid,
        garden_id: Uuid,
    ) -> PgResult<bool> {
        use schema::garden_views::{self, dsl};

        let affected = diesel::delete(
            garden_views::table
                .filter(dsl::member_id.eq(member_id))
                .filter(dsl::garden_id.eq(garden_id)),
        )
        .execute(conn)
        .await
        .map_err(PgError::from)?;

        Ok(affected > 0)
    }
}
