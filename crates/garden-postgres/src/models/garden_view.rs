//! Recently-viewed garden tracking model.

use diesel::prelude::*;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::schema::garden_views;

/// A record of a member viewing a garden listing.
///
/// One row per `(member, garden)` pair; repeated views refresh `viewed_at`.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = garden_views)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct GardenView {
    /// Unique view identifier
    pub id: Uuid,
    /// Member who viewed the garden
    pub member_id: Uuid,
    /// Garden that was viewed
    pub garden_id: Uuid,
    /// Timestamp of the most recent view
    pub viewed_at: OffsetDateTime,
}

/// Data for recording a garden view.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = garden_views)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewGardenView {
    /// Member who viewed the garden
    pub member_id: Uuid,
    /// Garden that was viewed
    pub garden_id: Uuid,
}
