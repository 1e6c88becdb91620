//! Shared Postgres enum and pagination types.

use diesel_derive_enum::DbEnum;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Maximum number of items per page.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Offset-based pagination parameters for database queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct OffsetPagination {
    /// Maximum number of records to return.
    pub limit: i64,
    /// Number of records to skip.
    pub offset: i64,
}

impl OffsetPagination {
    /// Creates a new pagination instance, clamping out-of-range values.
    pub fn new(limit: i64, offset: i64) -> Self {
        Self {
            limit: limit.clamp(1, MAX_PAGE_SIZE),
            offset: offset.max(0),
        }
    }

    /// Creates pagination from a 1-based page number and page size.
    pub fn from_page(page: i64, page_size: i64) -> Self {
        let page = page.max(1);
        let page_size = page_size.clamp(1, MAX_PAGE_SIZE);
        Self {
            limit: page_size,
            offset: (page - 1) * page_size,
        }
    }
}

impl Default for OffsetPagination {
    fn default() -> Self {
        Self {
            limit: 10,
            offset: 0,
        }
    }
}

/// Visibility of a garden listing.
///
/// Corresponds to the `garden_visibility` PostgreSQL enum. Public plots are
/// municipally operated allotments, private plots are member-offered land.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Hash)]
#[derive(Serialize, Deserialize, DbEnum, Display, EnumIter, EnumString)]
#[ExistingTypePath = "crate::schema::sql_types::GardenVisibility"]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub enum GardenVisibility {
    /// Publicly operated garden plot.
    #[db_rename = "public"]
    #[serde(rename = "public")]
    #[strum(serialize = "public")]
    #[default]
    Public,

    /// Privately offered garden plot.
    #[db_rename = "private"]
    #[serde(rename = "private")]
    #[strum(serialize = "private")]
    Private,
}

/// Authorization level of a member account.
///
/// Corresponds to the `member_role` PostgreSQL enum.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Hash)]
#[derive(Serialize, Deserialize, DbEnum, Display, EnumIter, EnumString)]
#[ExistingTypePath = "crate::schema::sql_types::MemberRole"]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub enum MemberRole {
    /// Standard member.
    #[db_rename = "user"]
    #[serde(rename = "user")]
    #[strum(serialize = "user")]
    #[default]
    User,

    /// Administrator.
    #[db_rename = "admin"]
    #[serde(rename = "admin")]
    #[strum(serialize = "admin")]
    Admin,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn visibility_round_trips_through_strings() {
        assert_eq!(GardenVisibility::Public.to_string(), "public");
        assert_eq!(
            GardenVisibility::from_str("private").unwrap(),
            GardenVisibility::Private
        );
        assert!(GardenVisibility::from_str("PUBLICC").is_err());
    }

    #[test]
    fn role_defaults_to_user() {
        assert_eq!(MemberRole::default(), MemberRole::User);
    }

    #[test]
    fn pagination_from_page_is_one_based() {
        assert_eq!(OffsetPagination::from_page(1, 10).offset, 0);
        assert_eq!(OffsetPagination::from_page(3, 10).offset, 20);
        assert_eq!(OffsetPagination::from_page(3, 10).limit, 10);
    }

    #[test]
    fn pagination_clamps_out_of_range_values() {
        let pagination = OffsetPagination::from_page(0, 0);
        assert_eq!(pagination.offset, 0);
        assert_eq!(pagination.limit, 1);

        assert_eq!(
            OffsetPagination::new(10_000, -5),
            OffsetPagination::new(MAX_PAGE_SIZE, 0)
        );
    }
}
