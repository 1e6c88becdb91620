//! System health monitoring handlers.

use aide::axum::ApiRouter;
use axum::Json;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::handler::Result;
use crate::service::ServiceState;

/// Tracing target for monitor handlers.
const TRACING_TARGET: &str = "garden_server::handler::monitors";

/// Current health status of the server.
#[must_use]
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
struct MonitorStatusResponse {
    /// Whether the server considers itself healthy.
    pub is_healthy: bool,
    /// Version of the running server.
    pub version: String,
    /// When the status was sampled.
    #[serde(with = "time::serde::rfc3339")]
    #[schemars(with = "String")]
    pub updated_at: OffsetDateTime,
}

/// Reports the server's own health and version.
#[tracing::instrument(skip_all)]
async fn health_status() -> Result<Json<MonitorStatusResponse>> {
    let response = MonitorStatusResponse {
        is_healthy: true,
        version: env!("CARGO_PKG_VERSION").to_owned(),
        updated_at: OffsetDateTime::now_utc(),
    };

    tracing::debug!(target: TRACING_TARGET, "health status requested");
    Ok(Json(response))
}

/// Returns a [`Router`] with all related routes.
///
/// [`Router`]: axum::routing::Router
pub fn routes() -> ApiRouter<ServiceState> {
    use aide::axum::routing::*;

    ApiRouter::new().api_route("/monitors/health", get(health_status))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::test::create_test_server_with_router;

    #[tokio::test]
    async fn health_status_reports_healthy() -> anyhow::Result<()> {
        let server = create_test_server_with_router(routes).await?;

        let response = server.get("/monitors/health").await;
        response.assert_status_success();

        let status = response.json::<MonitorStatusResponse>();
        assert!(status.is_healthy);
        assert_eq!(status.version, env!("CARGO_PKG_VERSION"));

        let age = OffsetDateTime::now_utc() - status.updated_at;
        assert!(age.whole_seconds() < 60);

        Ok(())
    }
}
