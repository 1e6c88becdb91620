#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

/// Embeds all migrations into the final binary.
pub(crate) const MIGRATIONS: diesel_migrations::EmbeddedMigrations =
    diesel_migrations::embed_migrations!();

/// Tracing target for client-related operations.
pub const TRACING_TARGET_CLIENT: &str = "garden_postgres::client";

/// Tracing target for database query operations.
pub const TRACING_TARGET_QUERY: &str = "garden_postgres::queries";

/// Tracing target for database migration operations.
pub const TRACING_TARGET_MIGRATION: &str = "garden_postgres::migrations";

mod client;
mod error;
pub mod models;
pub mod queries;
mod schema;
pub mod types;

pub use diesel_async::AsyncPgConnection as PgConnection;

pub use crate::client::{ConnectionPool, PgClient, PgConfig, PooledConnection};
pub use crate::error::{BoxError, PgError, PgResult};
