#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod config;
mod server;

use std::process;
use std::sync::Arc;

use aide::openapi::{Info, OpenApi};
use anyhow::Context;
use axum::{Extension, Json, Router};
use clap::Parser;
use garden_server::handler;
use garden_server::middleware::RouterExt;
use garden_server::service::ServiceState;

use crate::config::{Cli, ServerConfig};

/// Tracing target for server startup events.
pub const TRACING_TARGET_SERVER_STARTUP: &str = "garden_cli::server::startup";
/// Tracing target for server shutdown events.
pub const TRACING_TARGET_SERVER_SHUTDOWN: &str = "garden_cli::server::shutdown";
/// Tracing target for configuration handling.
pub const TRACING_TARGET_CONFIG: &str = "garden_cli::config";

#[tokio::main]
async fn main() {
    let Err(error) = run().await else {
        tracing::info!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            "application terminated successfully"
        );
        process::exit(0);
    };

    if tracing::enabled!(tracing::Level::ERROR) {
        tracing::error!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            error = %error,
            "application terminated with error"
        );
    } else {
        eprintln!("Error: {error:#}");
    }

    process::exit(1);
}

/// Main application entry point.
async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    Cli::init_tracing();
    tracing::info!(
        target: TRACING_TARGET_SERVER_STARTUP,
        version = env!("CARGO_PKG_VERSION"),
        "starting garden server"
    );

    cli.server
        .validate()
        .context("invalid server configuration")?;
    cli.log();

    let service_config = cli.service.service_config()?;
    let state = ServiceState::from_config(&service_config)
        .await
        .context("failed to create service state")?;

    let router = create_router(state, &cli.server);
    server::serve(router, cli.server).await?;

    Ok(())
}

/// Serves the generated OpenAPI document.
async fn serve_openapi(Extension(api): Extension<Arc<OpenApi>>) -> Json<serde_json::Value> {
    Json(serde_json::to_value(&*api).unwrap_or_default())
}

/// Creates the router with all middleware layers applied.
///
/// Middleware is applied in reverse order (last added = outermost):
/// 1. Error handling (outermost) catches panics and enforces timeouts.
/// 2. Observability adds request IDs and tracing spans.
/// 3. Security adds CORS, compression and the body size limit.
/// 4. Routes (innermost) handle the requests.
fn create_router(state: ServiceState, config: &ServerConfig) -> Router {
    let mut api = OpenApi {
        info: Info {
            title: "everyone-garden API".to_owned(),
            version: env!("CARGO_PKG_VERSION").to_owned(),
            ..Info::default()
        },
        ..OpenApi::default()
    };

    handler::routes()
        .finish_api(&mut api)
        .route("/openapi.json", axum::routing::get(serve_openapi))
        .layer(Extension(Arc::new(api)))
        .with_state(state)
        .with_security_layer(config.max_body_bytes())
        .with_observability_layer()
        .with_error_handling_layer(config.request_timeout())
}
