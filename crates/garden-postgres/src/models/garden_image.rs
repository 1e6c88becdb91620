//! Garden image model.

use diesel::prelude::*;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::schema::garden_images;

/// An uploaded image attached to a garden listing.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = garden_images)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct GardenImage {
    /// Unique image identifier
    pub id: Uuid,
    /// Garden this image belongs to
    pub garden_id: Uuid,
    /// Public URL of the stored object
    pub image_url: String,
    /// Display ordering within the listing
    pub position: i32,
    /// Timestamp when the image was uploaded
    pub created_at: OffsetDateTime,
}

/// Data for attaching a new image to a garden.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = garden_images)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewGardenImage {
    /// Garden this image belongs to
    pub garden_id: Uuid,
    /// Public URL of the stored object
    pub image_url: String,
    /// Display ordering within the listing
    pub position: i32,
}
