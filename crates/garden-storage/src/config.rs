//! Storage configuration types.

use serde::{Deserialize, Serialize};
use url::Url;

/// Selects which OpenDAL service backs the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
#[non_exhaustive]
pub enum BackendType {
    /// Local filesystem storage.
    #[cfg(feature = "fs")]
    Fs {
        /// Directory that holds all stored objects.
        root: String,
    },
    /// In-memory storage, primarily for tests.
    #[cfg(feature = "memory")]
    Memory,
    /// Amazon S3 compatible storage.
    #[cfg(feature = "s3")]
    S3 {
        /// Bucket name.
        bucket: String,
        /// Bucket region.
        region: String,
        /// Optional custom endpoint for S3-compatible providers.
        endpoint: Option<String>,
    },
}

impl BackendType {
    /// Returns the backend name as a static string.
    pub fn backend_name(&self) -> &'static str {
        match self {
            #[cfg(feature = "fs")]
            Self::Fs { .. } => "fs",
            #[cfg(feature = "memory")]
            Self::Memory => "memory",
            #[cfg(feature = "s3")]
            Self::S3 { .. } => "s3",
        }
    }
}

/// Storage backend configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Which service backs the store.
    pub backend: BackendType,
    /// Base URL under which stored objects are publicly reachable.
    ///
    /// The object path is appended to this URL to form the value persisted
    /// alongside a listing.
    pub public_base_url: Url,
}

impl StorageConfig {
    /// Creates a new storage configuration.
    pub fn new(backend: BackendType, public_base_url: Url) -> Self {
        Self {
            backend,
            public_base_url,
        }
    }
}
