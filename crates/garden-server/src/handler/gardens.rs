//! Garden listing handlers: search, detail, create, delete, images.

use aide::axum::ApiRouter;
use axum::Json;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use bigdecimal::{BigDecimal, FromPrimitive, ToPrimitive};
use garden_postgres::PgClient;
use garden_postgres::models::{Garden, GardenImage, NewGarden, NewGardenImage, NewGardenView};
use garden_postgres::queries::{CoordinateSpan, GardenRepository, GardenViewRepository};
use garden_postgres::types::GardenVisibility;
use garden_storage::StorageBackend;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;
use validator::Validate;

use crate::extract::AuthSession;
use crate::handler::{ErrorKind, Result};
use crate::service::ServiceState;

/// Tracing target for garden handlers.
const TRACING_TARGET: &str = "garden_server::handler::gardens";

/// Maximum accepted image upload size: 10 MB.
const MAX_IMAGE_SIZE: usize = 10 * 1024 * 1024;

/// Visibility scope selected through the URL path.
///
/// `all` searches across public and private listings; the other two narrow
/// the search to one visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumString)]
#[strum(serialize_all = "lowercase")]
enum GardenScope {
    Public,
    Private,
    All,
}

impl GardenScope {
    /// Parses the path segment, rejecting unknown scopes with a 400.
    fn parse(raw: &str) -> Result<Self> {
        raw.parse().map_err(|_| {
            ErrorKind::BadRequest
                .with_message("Unknown visibility scope")
                .with_context(format!("expected public, private or all, got '{raw}'"))
                .into_static()
        })
    }

    /// Visibility filter this scope translates to.
    fn visibility(self) -> Option<GardenVisibility> {
        match self {
            Self::Public => Some(GardenVisibility::Public),
            Self::Private => Some(GardenVisibility::Private),
            Self::All => None,
        }
    }
}

/// Query parameters for region search.
#[derive(Debug, Deserialize, Validate, JsonSchema)]
struct ByRegionQuery {
    /// Region text matched against listing address and name.
    #[validate(length(min = 1, max = 120))]
    region: String,
}

/// Query parameters for bounding-box search.
#[derive(Debug, Deserialize, Validate, JsonSchema)]
#[serde(rename_all = "camelCase")]
struct ByCoordinateQuery {
    /// Latitude range start in decimal degrees.
    #[validate(range(min = -90.0, max = 90.0))]
    lat_start: f64,
    /// Latitude range end in decimal degrees.
    #[validate(range(min = -90.0, max = 90.0))]
    lat_end: f64,
    /// Longitude range start in decimal degrees.
    #[validate(range(min = -180.0, max = 180.0))]
    lng_start: f64,
    /// Longitude range end in decimal degrees.
    #[validate(range(min = -180.0, max = 180.0))]
    lng_end: f64,
}

/// Request payload for creating a listing.
#[must_use]
#[derive(Debug, Deserialize, Validate, JsonSchema)]
#[serde(rename_all = "camelCase")]
struct CreateGardenRequest {
    /// Listing name.
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    /// Street address of the plot.
    #[validate(length(min = 1, max = 255))]
    pub address: String,
    /// Free-form description.
    #[validate(length(max = 4000))]
    pub description: String,
    /// Optional contact information.
    #[validate(length(max = 255))]
    pub contact: Option<String>,
    /// Public or private plot.
    pub visibility: GardenVisibility,
    /// Latitude in decimal degrees.
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    /// Longitude in decimal degrees.
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
    /// Optional monthly price.
    #[validate(range(min = 0.0))]
    pub price: Option<f64>,
    /// Optional plot size in square meters.
    #[validate(range(min = 0.0))]
    pub plot_size: Option<f64>,
}

/// A garden listing as returned by the API.
#[must_use]
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GardenResponse {
    /// ID of the listing.
    pub id: Uuid,
    /// Listing name.
    pub name: String,
    /// Street address of the plot.
    pub address: String,
    /// Free-form description.
    pub description: String,
    /// Contact information, if provided.
    pub contact: Option<String>,
    /// Public or private plot.
    pub visibility: GardenVisibility,
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
    /// Monthly price, if provided.
    pub price: Option<f64>,
    /// Plot size in square meters, if provided.
    pub plot_size: Option<f64>,
    /// Member that created the listing.
    pub created_by: Uuid,
    /// Creation timestamp.
    #[serde(with = "time::serde::rfc3339")]
    #[schemars(with = "String")]
    pub created_at: OffsetDateTime,
}

impl From<Garden> for GardenResponse {
    fn from(garden: Garden) -> Self {
        Self {
            id: garden.id,
            name: garden.name,
            address: garden.address,
            description: garden.description,
            contact: garden.contact,
            visibility: garden.visibility,
            latitude: garden.latitude,
            longitude: garden.longitude,
            price: garden.price.as_ref().and_then(BigDecimal::to_f64),
            plot_size: garden.plot_size.as_ref().and_then(BigDecimal::to_f64),
            created_by: garden.created_by,
            created_at: garden.created_at,
        }
    }
}

/// A garden listing together with its images.
#[must_use]
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GardenDetailResponse {
    /// The listing itself.
    #[serde(flatten)]
    pub garden: GardenResponse,
    /// Public URLs of uploaded images, in display order.
    pub images: Vec<ImageResponse>,
}

/// An uploaded image as returned by the API.
#[must_use]
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImageResponse {
    /// ID of the image record.
    pub id: Uuid,
    /// Public URL of the stored object.
    pub image_url: String,
    /// Display ordering within the listing.
    pub position: i32,
}

impl From<GardenImage> for ImageResponse {
    fn from(image: GardenImage) -> Self {
        Self {
            id: image.id,
            image_url: image.image_url,
            position: image.position,
        }
    }
}

/// Resolves the caller's member id from their session subject.
pub(crate) fn session_member_id(session: &AuthSession) -> Result<Uuid> {
    Uuid::parse_str(session.subject()).map_err(|_| {
        tracing::warn!(
            target: TRACING_TARGET,
            subject = %session.subject(),
            "session subject is not a member id"
        );
        ErrorKind::Unauthorized
            .with_resource("authentication")
            .into_static()
    })
}

/// Searches listings by region text within a visibility scope.
#[tracing::instrument(skip(pg_client))]
async fn search_by_region(
    State(pg_client): State<PgClient>,
    Path(scope): Path<String>,
    Query(query): Query<ByRegionQuery>,
) -> Result<Json<Vec<GardenResponse>>> {
    let scope = GardenScope::parse(&scope)?;
    query
        .validate()
        .map_err(|e| ErrorKind::BadRequest.with_context(e.to_string()).into_static())?;

    let mut conn = pg_client.get_connection().await?;
    let gardens =
        GardenRepository::find_by_region(&mut conn, scope.visibility(), &query.region).await?;

    tracing::debug!(
        target: TRACING_TARGET,
        region = %query.region,
        results = gardens.len(),
        "region search"
    );

    Ok(Json(gardens.into_iter().map(Into::into).collect()))
}

/// Searches listings inside a geographic bounding box.
#[tracing::instrument(skip(pg_client))]
async fn search_by_coordinate(
    State(pg_client): State<PgClient>,
    Path(scope): Path<String>,
    Query(query): Query<ByCoordinateQuery>,
) -> Result<Json<Vec<GardenResponse>>> {
    let scope = GardenScope::parse(&scope)?;
    query
        .validate()
        .map_err(|e| ErrorKind::BadRequest.with_context(e.to_string()).into_static())?;

    let lat = CoordinateSpan::new(query.lat_start, query.lat_end);
    let lng = CoordinateSpan::new(query.lng_start, query.lng_end);

    let mut conn = pg_client.get_connection().await?;
    let gardens =
        GardenRepository::find_by_coordinate(&mut conn, scope.visibility(), lat, lng).await?;

    Ok(Json(gardens.into_iter().map(Into::into).collect()))
}

/// Lists the caller's own listings, newest first.
#[tracing::instrument(skip_all)]
async fn list_my_gardens(
    State(pg_client): State<PgClient>,
    session: AuthSession,
) -> Result<Json<Vec<GardenResponse>>> {
    let member_id = session_member_id(&session)?;

    let mut conn = pg_client.get_connection().await?;
    let gardens = GardenRepository::find_by_creator(&mut conn, member_id).await?;

    tracing::debug!(
        target: TRACING_TARGET,
        member_id = %member_id,
        results = gardens.len(),
        "listed own gardens"
    );

    Ok(Json(gardens.into_iter().map(Into::into).collect()))
}

/// Fetches a single listing with its images.
///
/// When the caller is authenticated the lookup is recorded in their
/// recently-viewed history.
#[tracing::instrument(skip(pg_client, session))]
async fn get_garden(
    State(pg_client): State<PgClient>,
    Path(garden_id): Path<Uuid>,
    session: Option<AuthSession>,
) -> Result<Json<GardenDetailResponse>> {
    let mut conn = pg_client.get_connection().await?;

    let Some(garden) = GardenRepository::find_garden_by_id(&mut conn, garden_id).await? else {
        return Err(ErrorKind::NotFound.with_resource("gardens").into_static());
    };

    if let Some(session) = &session {
        let member_id = session_member_id(session)?;
        let view = NewGardenView {
            member_id,
            garden_id: garden.id,
        };
        GardenViewRepository::record_view(&mut conn, view).await?;

        tracing::debug!(
            target: TRACING_TARGET,
            member_id = %member_id,
            garden_id = %garden.id,
            "recorded garden view"
        );
    }

    let images = GardenRepository::list_images(&mut conn, garden.id).await?;

    Ok(Json(GardenDetailResponse {
        garden: garden.into(),
        images: images.into_iter().map(Into::into).collect(),
    }))
}

/// Creates a new listing owned by the caller.
#[tracing::instrument(skip_all)]
async fn create_garden(
    State(pg_client): State<PgClient>,
    session: AuthSession,
    Json(request): Json<CreateGardenRequest>,
) -> Result<(StatusCode, Json<GardenResponse>)> {
    request
        .validate()
        .map_err(|e| ErrorKind::BadRequest.with_context(e.to_string()).into_static())?;

    let member_id = session_member_id(&session)?;

    let price = request
        .price
        .map(|p| {
            BigDecimal::from_f64(p).ok_or_else(|| {
                ErrorKind::BadRequest
                    .with_context("price is not a valid number")
                    .into_static()
            })
        })
        .transpose()?;
    let plot_size = request
        .plot_size
        .map(|s| {
            BigDecimal::from_f64(s).ok_or_else(|| {
                ErrorKind::BadRequest
                    .with_context("plot size is not a valid number")
                    .into_static()
            })
        })
        .transpose()?;

    let new_garden = NewGarden {
        name: request.name,
        address: request.address,
        description: request.description,
        contact: request.contact,
        visibility: request.visibility,
        latitude: request.latitude,
        longitude: request.longitude,
        price,
        plot_size,
        created_by: member_id,
    };

    let mut conn = pg_client.get_connection().await?;
    let garden = GardenRepository::create_garden(&mut conn, new_garden).await?;

    tracing::info!(
        target: TRACING_TARGET,
        garden_id = %garden.id,
        member_id = %member_id,
        "garden created"
    );

    Ok((StatusCode::CREATED, Json(garden.into())))
}

/// Soft-deletes a listing owned by the caller.
///
/// A listing owned by somebody else is indistinguishable from a missing one.
#[tracing::instrument(skip(pg_client, session))]
async fn delete_garden(
    State(pg_client): State<PgClient>,
    Path(garden_id): Path<Uuid>,
    session: AuthSession,
) -> Result<StatusCode> {
    let member_id = session_member_id(&session)?;

    let mut conn = pg_client.get_connection().await?;
    let deleted = GardenRepository::delete_garden(&mut conn, garden_id, member_id).await?;

    if !deleted {
        return Err(ErrorKind::NotFound.with_resource("gardens").into_static());
    }

    tracing::info!(
        target: TRACING_TARGET,
        garden_id = %garden_id,
        member_id = %member_id,
        "garden deleted"
    );

    Ok(StatusCode::NO_CONTENT)
}

/// Uploads images for a listing owned by the caller.
///
/// Multipart form data; every field that carries a filename is stored.
#[tracing::instrument(skip(pg_client, storage_backend, session, multipart))]
async fn upload_images(
    State(pg_client): State<PgClient>,
    State(storage_backend): State<StorageBackend>,
    Path(garden_id): Path<Uuid>,
    session: AuthSession,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<Vec<ImageResponse>>)> {
    let member_id = session_member_id(&session)?;

    let mut conn = pg_client.get_connection().await?;
    let Some(garden) = GardenRepository::find_garden_by_id(&mut conn, garden_id).await? else {
        return Err(ErrorKind::NotFound.with_resource("gardens").into_static());
    };

    if !garden.is_owned_by(member_id) {
        return Err(ErrorKind::Forbidden.with_resource("gardens").into_static());
    }

    let mut position = GardenRepository::list_images(&mut conn, garden.id).await?.len() as i32;
    let mut stored = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(|err| {
        ErrorKind::BadRequest
            .with_message("Invalid multipart data")
            .with_context(err.to_string())
            .into_static()
    })? {
        let Some(file_name) = field.file_name().map(str::to_owned) else {
            continue;
        };

        let data = field.bytes().await.map_err(|err| {
            ErrorKind::BadRequest
                .with_message("Failed to read file data")
                .with_context(err.to_string())
                .into_static()
        })?;

        if data.len() > MAX_IMAGE_SIZE {
            return Err(ErrorKind::PayloadTooLarge
                .with_context(format!(
                    "'{file_name}' exceeds the {} MB limit",
                    MAX_IMAGE_SIZE / (1024 * 1024)
                ))
                .into_static());
        }

        let url = storage_backend
            .store(garden.id, &file_name, data.to_vec())
            .await?;

        let new_image = NewGardenImage {
            garden_id: garden.id,
            image_url: url.to_string(),
            position,
        };
        let image = GardenRepository::attach_image(&mut conn, new_image).await?;
        position += 1;

        tracing::info!(
            target: TRACING_TARGET,
            garden_id = %garden.id,
            image_id = %image.id,
            "image uploaded"
        );

        stored.push(image.into());
    }

    if stored.is_empty() {
        return Err(ErrorKind::BadRequest
            .with_message("No file field found in upload")
            .into_static());
    }

    Ok((StatusCode::CREATED, Json(stored)))
}

/// Returns a [`Router`] with all related routes.
///
/// [`Router`]: axum::routing::Router
pub fn routes() -> ApiRouter<ServiceState> {
    use aide::axum::routing::*;

    // The router allows only one capture name per path position, so the
    // search routes share the `{garden_id}` capture and read it as a scope.
    // Static segments (`mine`, `views`) take priority over the capture.
    ApiRouter::new()
        .api_route("/gardens/mine", get(list_my_gardens))
        .api_route("/gardens/{garden_id}/by-region", get(search_by_region))
        .api_route(
            "/gardens/{garden_id}/by-coordinate",
            get(search_by_coordinate),
        )
        .api_route("/gardens/{garden_id}", get(get_garden).delete(delete_garden))
        .api_route("/gardens", post(create_garden))
        .api_route("/gardens/{garden_id}/images", post(upload_images))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scope_parses_known_values() {
        assert_eq!(
            GardenScope::parse("public").unwrap().visibility(),
            Some(GardenVisibility::Public)
        );
        assert_eq!(
            GardenScope::parse("private").unwrap().visibility(),
            Some(GardenVisibility::Private)
        );
        assert_eq!(GardenScope::parse("all").unwrap().visibility(), None);
    }

    #[test]
    fn unknown_scope_is_bad_request() {
        let error = GardenScope::parse("friends-only").unwrap_err();
        assert_eq!(error.kind(), ErrorKind::BadRequest);
    }
}
