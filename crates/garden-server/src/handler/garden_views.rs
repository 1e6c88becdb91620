//! Recently-viewed garden handlers.

use aide::axum::ApiRouter;
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use garden_postgres::PgClient;
use garden_postgres::queries::GardenViewRepository;
use garden_postgres::types::OffsetPagination;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::extract::AuthSession;
use crate::handler::gardens::{GardenResponse, session_member_id};
use crate::handler::{ErrorKind, Result};
use crate::service::ServiceState;

/// Tracing target for garden view handlers.
const TRACING_TARGET: &str = "garden_server::handler::garden_views";

/// Query parameters for paging through the view history.
#[derive(Debug, Default, Deserialize, JsonSchema)]
struct RecentViewsQuery {
    /// 1-based page number; defaults to the first page.
    page: Option<i64>,
    /// Page size; defaults to 10.
    size: Option<i64>,
}

impl RecentViewsQuery {
    /// Default page size when `size` is absent.
    const DEFAULT_PAGE_SIZE: i64 = 10;

    /// Translates the page parameters into a query offset and limit.
    fn pagination(&self) -> OffsetPagination {
        OffsetPagination::from_page(
            self.page.unwrap_or(1),
            self.size.unwrap_or(Self::DEFAULT_PAGE_SIZE),
        )
    }
}

/// A recently viewed garden.
#[must_use]
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
struct RecentViewResponse {
    /// The viewed listing.
    pub garden: GardenResponse,
    /// When the caller last viewed it.
    #[serde(with = "time::serde::rfc3339")]
    #[schemars(with = "String")]
    pub viewed_at: OffsetDateTime,
}

/// Lists the caller's recently viewed gardens, newest first.
#[tracing::instrument(skip_all)]
async fn recent_views(
    State(pg_client): State<PgClient>,
    Query(query): Query<RecentViewsQuery>,
    session: AuthSession,
) -> Result<Json<Vec<RecentViewResponse>>> {
    let member_id = session_member_id(&session)?;

    let mut conn = pg_client.get_connection().await?;
    let views =
        GardenViewRepository::list_recent_gardens(&mut conn, member_id, query.pagination()).await?;

    tracing::debug!(
        target: TRACING_TARGET,
        member_id = %member_id,
        results = views.len(),
        "listed recent views"
    );

    let response = views
        .into_iter()
        .map(|(view, garden)| RecentViewResponse {
            garden: garden.into(),
            viewed_at: view.viewed_at,
        })
        .collect();

    Ok(Json(response))
}

/// Removes a garden from the caller's view history.
#[tracing::instrument(skip(pg_client, session))]
async fn delete_view(
    State(pg_client): State<PgClient>,
    Path(garden_id): Path<Uuid>,
    session: AuthSession,
) -> Result<StatusCode> {
    let member_id = session_member_id(&session)?;

    let mut conn = pg_client.get_connection().await?;
    let deleted = GardenViewRepository::delete_view(&mut conn, member_id, garden_id).await?;

    if !deleted {
        return Err(ErrorKind::NotFound
            .with_resource("garden_views")
            .into_static());
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Returns a [`Router`] with all related routes.
///
/// [`Router`]: axum::routing::Router
pub fn routes() -> ApiRouter<ServiceState> {
    use aide::axum::routing::*;

    ApiRouter::new()
        .api_route("/gardens/views/recent", get(recent_views))
        .api_route("/gardens/views/{garden_id}", delete(delete_view))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paging_defaults_to_first_page_of_ten() {
        let pagination = RecentViewsQuery::default().pagination();
        assert_eq!(pagination.limit, 10);
        assert_eq!(pagination.offset, 0);
    }

    #[test]
    fn paging_translates_page_and_size() {
        let query = RecentViewsQuery {
            page: Some(3),
            size: Some(5),
        };

        let pagination = query.pagination();
        assert_eq!(pagination.limit, 5);
        assert_eq!(pagination.offset, 10);
    }
}
