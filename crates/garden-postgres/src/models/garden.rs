//! Garden listing model.

use bigdecimal::BigDecimal;
use diesel::prelude::*;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::schema::gardens;
use crate::types::GardenVisibility;

/// A garden listing offered through the platform.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = gardens)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Garden {
    /// Unique garden identifier
    pub id: Uuid,
    /// Human-readable listing name
    pub name: String,
    /// Street address of the plot
    pub address: String,
    /// Free-form description of the plot
    pub description: String,
    /// Optional contact information for the offerer
    pub contact: Option<String>,
    /// Public or private plot
    pub visibility: GardenVisibility,
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// Optional monthly price
    pub price: Option<BigDecimal>,
    /// Optional plot size in square meters
    pub plot_size: Option<BigDecimal>,
    /// Member that created the listing
    pub created_by: Uuid,
    /// Timestamp when the listing was created
    pub created_at: OffsetDateTime,
    /// Timestamp when the listing was last updated
    pub updated_at: OffsetDateTime,
    /// Timestamp when the listing was soft-deleted
    pub deleted_at: Option<OffsetDateTime>,
}

impl Garden {
    /// Returns `true` if the given member owns this listing.
    #[inline]
    #[must_use]
    pub fn is_owned_by(&self, member_id: Uuid) -> bool {
        self.created_by == member_id
    }
}

/// Data for creating a new garden listing.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = gardens)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewGarden {
    /// Listing name
    pub name: String,
    /// Street address
    pub address: String,
    /// Description
    pub description: String,
    /// Contact information
    pub contact: Option<String>,
    /// Public or private plot
    pub visibility: GardenVisibility,
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// Monthly price
    pub price: Option<BigDecimal>,
    /// Plot size in square meters
    pub plot_size: Option<BigDecimal>,
    /// Creating member
    pub created_by: Uuid,
}
