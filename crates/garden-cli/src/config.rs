//! CLI configuration management.
//!
//! All configuration can be provided via CLI arguments or environment
//! variables. Use `--help` to see all available options.
//!
//! ```bash
//! # Configure database and server
//! garden-cli --postgres-endpoint "postgresql://..." --port 8080
//!
//! # Or via environment variables
//! POSTGRES_ENDPOINT="postgresql://..." PORT=8080 garden-cli
//! ```

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{Args, Parser};
use garden_server::service::ServiceConfig;
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::TRACING_TARGET_CONFIG;

/// Complete CLI configuration.
#[derive(Debug, Clone, Parser)]
#[command(name = "garden")]
#[command(about = "Community gardening platform server")]
#[command(version)]
pub struct Cli {
    /// Server network and lifecycle configuration.
    #[clap(flatten)]
    pub server: ServerConfig,

    /// External service configuration.
    #[clap(flatten)]
    pub service: ServiceArgs,
}

impl Cli {
    /// Initializes tracing with environment-based filtering.
    pub fn init_tracing() {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    /// Logs configuration at startup (no sensitive information).
    pub fn log(&self) {
        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            host = %self.server.host,
            port = self.server.port,
            request_timeout_secs = self.server.request_timeout,
            postgres_max_connections = self.service.postgres_max_connections,
            storage_root = ?self.service.storage_root,
            "configuration loaded"
        );
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Args, Serialize, Deserialize)]
#[must_use = "config does nothing unless you use it"]
pub struct ServerConfig {
    /// Host address to bind the server to.
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    #[serde(default = "default_host")]
    pub host: IpAddr,

    /// TCP port number for the server to listen on.
    #[arg(short = 'p', long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// Request processing timeout in seconds.
    #[arg(long, env = "REQUEST_TIMEOUT", default_value_t = 30)]
    pub request_timeout: u64,

    /// Maximum request body size in megabytes.
    #[arg(long, env = "MAX_BODY_SIZE_MB", default_value_t = 16)]
    pub max_body_size_mb: usize,
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::LOCALHOST)
}

impl ServerConfig {
    /// Returns the socket address the server binds to.
    pub fn server_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the server listens on all interfaces.
    pub fn binds_to_all_interfaces(&self) -> bool {
        self.host.is_unspecified()
    }

    /// Returns the request timeout as a [`Duration`].
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    /// Returns the request body size limit in bytes.
    pub fn max_body_bytes(&self) -> usize {
        self.max_body_size_mb * 1024 * 1024
    }

    /// Validates the server configuration.
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(self.port >= 1024, "port must be at least 1024");
        anyhow::ensure!(self.request_timeout > 0, "request timeout must be positive");
        anyhow::ensure!(self.max_body_size_mb > 0, "body size limit must be positive");
        Ok(())
    }
}

/// External service configuration mapped onto [`ServiceConfig`].
#[derive(Debug, Clone, Args)]
pub struct ServiceArgs {
    /// Postgres database connection string.
    #[arg(long, env = "POSTGRES_ENDPOINT")]
    pub postgres_endpoint: Option<String>,

    /// Maximum number of connections in the Postgres connection pool.
    #[arg(long, env = "POSTGRES_MAX_CONNECTIONS", default_value_t = 10)]
    pub postgres_max_connections: u32,

    /// Root directory for the filesystem image store.
    #[arg(long, env = "STORAGE_ROOT")]
    pub storage_root: Option<PathBuf>,

    /// Public base URL under which stored images are reachable.
    #[arg(long, env = "PUBLIC_BASE_URL")]
    pub public_base_url: Option<String>,

    /// Endpoint of the village forecast provider.
    #[arg(long, env = "WEATHER_ENDPOINT")]
    pub weather_endpoint: Option<String>,

    /// Service key issued by the forecast provider.
    #[arg(long, env = "WEATHER_SERVICE_KEY")]
    pub weather_service_key: String,

    /// Secret used to sign session tokens (min 32 bytes).
    #[arg(long, env = "AUTH_TOKEN_SECRET", hide_env_values = true)]
    pub auth_token_secret: String,

    /// Session token time-to-live in milliseconds.
    #[arg(long, env = "AUTH_TOKEN_TTL_MS")]
    pub auth_token_ttl_ms: Option<i64>,
}

impl ServiceArgs {
    /// Builds the [`ServiceConfig`] from the parsed arguments.
    pub fn service_config(&self) -> anyhow::Result<ServiceConfig> {
        let mut builder = ServiceConfig::builder()
            .with_postgres_max_connections(self.postgres_max_connections)
            .with_weather_service_key(self.weather_service_key.clone())
            .with_auth_token_secret(self.auth_token_secret.clone());

        if let Some(endpoint) = &self.postgres_endpoint {
            builder = builder.with_postgres_endpoint(endpoint.clone());
        }

        if let Some(root) = &self.storage_root {
            builder = builder.with_storage_root(root.clone());
        }

        if let Some(base_url) = &self.public_base_url {
            builder = builder.with_public_base_url(base_url.clone());
        }

        if let Some(endpoint) = &self.weather_endpoint {
            builder = builder.with_weather_endpoint(endpoint.clone());
        }

        if let Some(ttl_ms) = self.auth_token_ttl_ms {
            builder = builder.with_auth_token_ttl_ms(ttl_ms);
        }

        builder.build().context("invalid service configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        let base = [
            "garden",
            "--weather-service-key",
            "test-key",
            "--auth-token-secret",
            "an-adequately-long-test-secret-value",
        ];
        Cli::parse_from(base.iter().copied().chain(args.iter().copied()))
    }

    #[test]
    fn parses_with_defaults() {
        let cli = cli(&[]);
        assert_eq!(cli.server.port, 8080);
        assert!(cli.server.validate().is_ok());

        let config = cli.service.service_config().unwrap();
        assert_eq!(config.postgres_max_connections, 10);
    }

    #[test]
    fn rejects_privileged_port() {
        let cli = cli(&["--port", "80"]);
        assert!(cli.server.validate().is_err());
    }

    #[test]
    fn overrides_token_ttl() {
        let cli = cli(&["--auth-token-ttl-ms", "60000"]);
        let config = cli.service.service_config().unwrap();
        assert_eq!(config.auth_token_ttl_ms, 60_000);
    }
}
