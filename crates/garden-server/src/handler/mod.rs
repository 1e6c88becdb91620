//! All `axum::`[`Router`]s with related `axum::`[`Handler`]s.
//!
//! [`Router`]: axum::routing::Router
//! [`Handler`]: axum::handler::Handler

mod authentication;
mod error;
mod garden_views;
mod gardens;
mod monitors;
mod weather;

use aide::axum::ApiRouter;
use axum::response::{IntoResponse, Response};

pub use crate::handler::error::{Error, ErrorKind, ErrorResponse, Result};
use crate::service::ServiceState;

#[inline]
async fn handler() -> Response {
    ErrorKind::NotFound.into_response()
}

/// Returns an [`ApiRouter`] with all routes.
pub fn routes() -> ApiRouter<ServiceState> {
    ApiRouter::new()
        .merge(authentication::routes())
        .merge(gardens::routes())
        .merge(garden_views::routes())
        .merge(weather::routes())
        .merge(monitors::routes())
        .fallback(handler)
}

#[cfg(test)]
mod test {
    use aide::axum::ApiRouter;
    use aide::openapi::OpenApi;
    use axum_test::TestServer;

    use crate::handler::routes;
    use crate::service::ServiceState;

    /// Returns a new [`TestServer`] with the given router.
    pub async fn create_test_server_with_router(
        router: impl Fn() -> ApiRouter<ServiceState>,
    ) -> anyhow::Result<TestServer> {
        let state = ServiceState::for_tests();
        let mut api = OpenApi::default();
        let app = router().finish_api(&mut api).with_state(state);
        let server = TestServer::new(app)?;
        Ok(server)
    }

    /// Returns a new [`TestServer`] with the default router.
    pub async fn create_test_server() -> anyhow::Result<TestServer> {
        create_test_server_with_router(routes).await
    }

    #[tokio::test]
    async fn handlers() -> anyhow::Result<()> {
        let server = create_test_server().await?;
        assert!(server.is_running());
        Ok(())
    }

    #[tokio::test]
    async fn unknown_path_is_not_found() -> anyhow::Result<()> {
        let server = create_test_server().await?;
        let response = server.get("/no-such-path").await;
        response.assert_status_not_found();
        Ok(())
    }

    #[tokio::test]
    async fn my_gardens_require_a_token() -> anyhow::Result<()> {
        let server = create_test_server().await?;

        // A 401 (not a 400 from the `{garden_id}` capture failing to parse
        // as a UUID) proves the static `mine` segment takes priority.
        let response = server.get("/gardens/mine").await;
        response.assert_status_unauthorized();
        Ok(())
    }

    #[tokio::test]
    async fn recent_views_require_a_token() -> anyhow::Result<()> {
        let server = create_test_server().await?;
        let response = server.get("/gardens/views/recent").await;
        response.assert_status_unauthorized();
        Ok(())
    }

    #[tokio::test]
    async fn unknown_search_scope_is_rejected() -> anyhow::Result<()> {
        let server = create_test_server().await?;
        let response = server
            .get("/gardens/everything/by-region")
            .add_query_param("region", "Palermo")
            .await;
        response.assert_status_bad_request();
        Ok(())
    }
}
