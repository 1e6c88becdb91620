//! Garden repository for managing garden listing database operations.

use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::models::{Garden, GardenImage, NewGarden, NewGardenImage};
use crate::types::GardenVisibility;
use crate::{PgError, PgResult, schema};

/// Inclusive coordinate range for bounding-box searches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateSpan {
    pub start: f64,
    pub end: f64,
}

impl CoordinateSpan {
    /// Creates a span, normalizing reversed bounds.
    #[must_use]
    pub fn new(start: f64, end: f64) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }
}

/// Repository for garden-related database operations.
#[derive(Debug, Default, Clone, Copy)]
pub struct GardenRepository;

impl GardenRepository {
    /// Creates a new garden listing.
    pub async fn create_garden(
        conn: &mut AsyncPgConnection,
        new_garden: NewGarden,
    ) -> PgResult<Garden> {
        use schema::gardens;

        diesel::insert_into(gardens::table)
            .values(&new_garden)
            .returning(Garden::as_returning())
            .get_result(conn)
            .await
            .map_err(PgError::from)
    }

    /// Finds a garden by its ID.
    pub async fn find_garden_by_id(
        conn: &mut AsyncPgConnection,
        garden_id: Uuid,
    ) -> PgResult<Option<Garden>> {
        use schema::gardens::{self, dsl};

        gardens::table
            .filter(dsl::id.eq(garden_id))
            .filter(dsl::deleted_at.is_null())
            .select(Garden::as_select())
            .first(conn)
            .await
            .optional()
            .map_err(PgError::from)
    }

    /// Finds gardens whose address or name contains the given region text.
    ///
    /// `visibility = None` searches across public and private listings.
    pub async fn find_by_region(
        conn: &mut AsyncPgConnection,
        visibility: Option<GardenVisibility>,
        region: &str,
    ) -> PgResult<Vec<Garden>> {
        use schema::gardens::{self, dsl};

        let pattern = format!("%{region}%");
        let mut query = gardens::table
            .filter(dsl::deleted_at.is_null())
            .filter(dsl::address.ilike(pattern.clone()).or(dsl::name.ilike(pattern)))
            .into_boxed();

        if let Some(visibility) = visibility {
            query = query.filter(dsl::visibility.eq(visibility));
        }

        query
            .order(dsl::created_at.desc())
            .select(Garden::as_select())
            .load(conn)
            .await
            .map_err(PgError::from)
    }

    /// Finds gardens inside a geographic bounding box.
    ///
    /// Both latitude and longitude bounds are inclusive (`BETWEEN` semantics).
    pub async fn find_by_coordinate(
        conn: &mut AsyncPgConnection,
        visibility: Option<GardenVisibility>,
        lat: CoordinateSpan,
        lng: CoordinateSpan,
    ) -> PgResult<Vec<Garden>> {
        use schema::gardens::{self, dsl};

        let mut query = gardens::table
            .filter(dsl::deleted_at.is_null())
            .filter(dsl::latitude.between(lat.start, lat.end))
            .filter(dsl::longitude.between(lng.start, lng.end))
            .into_boxed();

        if let Some(visibility) = visibility {
            query = query.filter(dsl::visibility.eq(visibility));
        }

        query
            .order(dsl::created_at.desc())
            .select(Garden::as_select())
            .load(conn)
            .await
            .map_err(PgError::from)
    }

    /// Lists the gardens created by the given member, newest first.
    pub async fn find_by_creator(
        conn: &mut AsyncPgConnection,
        member_id: Uuid,
    ) -> PgResult<Vec<Garden>> {
        use schema::gardens::{self, dsl};

        gardens::table
            .filter(dsl::created_by.eq(member_id))
            .filter(dsl::deleted_at.is_null())
            .order(dsl::created_at.desc())
            .select(Garden::as_select())
            .load(conn)
            .await
            .map_err(PgError::from)
    }

    /// Soft deletes a garden owned by the given member.
    ///
    /// Returns `false` when no matching listing exists, which covers both an
    /// unknown garden and a garden owned by somebody else.
    pub async fn delete_garden(
        conn: &mut AsyncPgConnection,
        garden_id: Uuid,
        member_id: Uuid,
    ) -> PgResult<bool> {
        use schema::gardens::{self, dsl};

        let affected = diesel::update(
            gardens::table
                .filter(dsl::id.eq(garden_id))
                .filter(dsl::created_by.eq(member_id))
                .filter(dsl::deleted_at.is_null()),
        )
        .set(dsl::deleted_at.eq(Some(OffsetDateTime::now_utc())))
        .execute(conn)
        .await
        .map_err(PgError::from)?;

        Ok(affected > 0)
    }

    /// Attaches an uploaded image to a garden.
    pub async fn attach_image(
        conn: &mut AsyncPgConnection,
        new_image: NewGardenImage,
    ) -> PgResult<GardenImage> {
        use schema::garden_images;

        diesel::insert_into(garden_images::table)
            .values(&new_image)
            .returning(GardenImage::as_returning())
            .get_result(conn)
            .await
            .map_err(PgError::from)
    }

    /// Lists images of a garden in display order.
    pub async fn list_images(
        conn: &mut AsyncPgConnection,
        garden_id: Uuid,
    ) -> PgResult<Vec<GardenImage>> {
        use schema::garden_images::{self, dsl};

        garden_images::table
            .filter(dsl::garden_id.eq(garden_id))
            .order(dsl::position.asc())
            .select(GardenImage::as_select())
            .load(conn)
            .await
            .map_err(PgError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinate_span_normalizes_reversed_bounds() {
        let span = CoordinateSpan::new(37.7, 37.2);
        assert_eq!(span.start, 37.2);
        assert_eq!(span.end, 37.7);
    }
}
