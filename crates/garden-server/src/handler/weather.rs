//! Village weather forecast proxy handlers.

use aide::axum::ApiRouter;
use axum::Json;
use axum::extract::{Query, State};
use garden_weather::{ForecastItem, VillageForecastRequest, WeatherClient};
use schemars::JsonSchema;
use serde::Deserialize;
use validator::Validate;

use crate::handler::{ErrorKind, Result};
use crate::service::ServiceState;

/// Tracing target for weather handlers.
const TRACING_TARGET: &str = "garden_server::handler::weather";

/// Query parameters for a village forecast lookup.
#[must_use]
#[derive(Debug, Deserialize, Validate, JsonSchema)]
#[serde(rename_all = "camelCase")]
struct ForecastQuery {
    /// Forecast issue date (`YYYYMMDD`).
    #[validate(length(equal = 8))]
    pub base_date: String,
    /// Forecast issue time (`HHMM`).
    #[validate(length(equal = 4))]
    pub base_time: String,
    /// Grid x coordinate of the lookup point.
    pub nx: i32,
    /// Grid y coordinate of the lookup point.
    pub ny: i32,
}

/// Proxies a short-term forecast lookup to the public weather provider.
#[tracing::instrument(skip(weather_client))]
async fn village_forecast(
    State(weather_client): State<WeatherClient>,
    Query(query): Query<ForecastQuery>,
) -> Result<Json<Vec<ForecastItem>>> {
    query
        .validate()
        .map_err(|e| ErrorKind::BadRequest.with_context(e.to_string()).into_static())?;

    let request = VillageForecastRequest {
        base_date: query.base_date,
        base_time: query.base_time,
        nx: query.nx,
        ny: query.ny,
    };

    let items = weather_client.fetch_forecast(&request).await?;
    tracing::debug!(
        target: TRACING_TARGET,
        nx = request.nx,
        ny = request.ny,
        items = items.len(),
        "fetched village forecast"
    );

    Ok(Json(items))
}

/// Returns a [`Router`] with all related routes.
///
/// [`Router`]: axum::routing::Router
pub fn routes() -> ApiRouter<ServiceState> {
    use aide::axum::routing::*;

    ApiRouter::new().api_route("/weather/forecast", get(village_forecast))
}
