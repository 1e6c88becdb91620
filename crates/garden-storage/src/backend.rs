//! Storage backend implementation.

use opendal::{Operator, services};
use url::Url;
use uuid::Uuid;

use crate::TRACING_TARGET;
use crate::config::{BackendType, StorageConfig};
use crate::error::{StorageError, StorageResult};

/// Unified storage backend that wraps an OpenDAL operator.
#[derive(Clone)]
pub struct StorageBackend {
    operator: Operator,
    config: StorageConfig,
}

impl StorageBackend {
    /// Creates a new storage backend from configuration.
    pub fn new(config: StorageConfig) -> StorageResult<Self> {
        let operator = Self::create_operator(&config)?;

        tracing::info!(
            target: TRACING_TARGET,
            backend = config.backend.backend_name(),
            public_base_url = %config.public_base_url,
            "Storage backend initialized"
        );

        Ok(Self { operator, config })
    }

    /// Returns the configuration for this backend.
    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    /// Stores an object and returns its public URL.
    ///
    /// The object lands under `gardens/{garden_id}/` with a fresh UUID prefix
    /// so uploads with the same filename never collide.
    pub async fn store(
        &self,
        garden_id: Uuid,
        file_name: &str,
        data: Vec<u8>,
    ) -> StorageResult<Url> {
        let file_name = sanitize_file_name(file_name)?;
        let path = format!("gardens/{garden_id}/{}-{file_name}", Uuid::new_v4());

        tracing::debug!(
            target: TRACING_TARGET,
            path = %path,
            size = data.len(),
            "Storing object"
        );

        self.operator.write(&path, data).await?;

        let url = self
            .config
            .public_base_url
            .join(&path)
            .map_err(|e| StorageError::invalid_path(e.to_string()))?;

        tracing::debug!(
            target: TRACING_TARGET,
            path = %path,
            url = %url,
            "Object stored"
        );

        Ok(url)
    }

    /// Reads an object from storage.
    pub async fn read(&self, path: &str) -> StorageResult<Vec<u8>> {
        let data = self.operator.read(path).await?.to_vec();

        tracing::debug!(
            target: TRACING_TARGET,
            path = %path,
            size = data.len(),
            "Object read complete"
        );

        Ok(data)
    }

    /// Deletes an object from storage.
    pub async fn delete(&self, path: &str) -> StorageResult<()> {
        self.operator.delete(path).await?;

        tracing::debug!(
            target: TRACING_TARGET,
            path = %path,
            "Object deleted"
        );

        Ok(())
    }

    /// Checks if an object exists.
    pub async fn exists(&self, path: &str) -> StorageResult<bool> {
        Ok(self.operator.exists(path).await?)
    }

    /// Creates the OpenDAL operator for the configured backend.
    fn create_operator(config: &StorageConfig) -> StorageResult<Operator> {
        let operator = match &config.backend {
            #[cfg(feature = "fs")]
            BackendType::Fs { root } => {
                let builder = services::Fs::default().root(root);
                Operator::new(builder)
                    .map_err(|e| StorageError::init(e.to_string()))?
                    .finish()
            }
            #[cfg(feature = "memory")]
            BackendType::Memory => {
                let builder = services::Memory::default();
                Operator::new(builder)
                    .map_err(|e| StorageError::init(e.to_string()))?
                    .finish()
            }
            #[cfg(feature = "s3")]
            BackendType::S3 {
                bucket,
                region,
                endpoint,
            } => {
                let mut builder = services::S3::default().bucket(bucket).region(region);
                if let Some(endpoint) = endpoint {
                    builder = builder.endpoint(endpoint);
                }
                Operator::new(builder)
                    .map_err(|e| StorageError::init(e.to_string()))?
                    .finish()
            }
        };

        Ok(operator)
    }
}

impl std::fmt::Debug for StorageBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageBackend")
            .field("backend", &self.config.backend.backend_name())
            .finish_non_exhaustive()
    }
}

/// Rejects names with path traversal or separator characters.
fn sanitize_file_name(name: &str) -> StorageResult<&str> {
    if name.is_empty() || name.len() > 255 {
        return Err(StorageError::invalid_path(name));
    }

    if name.contains(['/', '\\']) || name.contains("..") {
        return Err(StorageError::invalid_path(name));
    }

    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fs_backend(root: &std::path::Path) -> StorageBackend {
        let config = StorageConfig::new(
            BackendType::Fs {
                root: root.display().to_string(),
            },
            Url::parse("https://images.everyonegarden.dev/").unwrap(),
        );
        StorageBackend::new(config).unwrap()
    }

    #[tokio::test]
    async fn store_returns_public_url_and_persists_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let backend = fs_backend(dir.path());
        let garden_id = Uuid::new_v4();

        let url = backend
            .store(garden_id, "plot.jpg", b"jpeg bytes".to_vec())
            .await
            .unwrap();

        assert!(url.as_str().starts_with("https://images.everyonegarden.dev/gardens/"));
        assert!(url.as_str().ends_with("-plot.jpg"));

        let path = url.path().trim_start_matches('/').to_string();
        let data = backend.read(&path).await.unwrap();
        assert_eq!(data, b"jpeg bytes");
    }

    #[tokio::test]
    async fn store_rejects_traversal_names() {
        let dir = tempfile::tempdir().unwrap();
        let backend = fs_backend(dir.path());

        let result = backend
            .store(Uuid::new_v4(), "../escape.jpg", vec![1, 2, 3])
            .await;
        assert!(matches!(result, Err(StorageError::InvalidPath(_))));

        let result = backend.store(Uuid::new_v4(), "", vec![]).await;
        assert!(matches!(result, Err(StorageError::InvalidPath(_))));
    }

    #[tokio::test]
    async fn delete_then_exists_reports_absence() {
        let dir = tempfile::tempdir().unwrap();
        let backend = fs_backend(dir.path());

        let url = backend
            .store(Uuid::new_v4(), "shed.png", vec![0u8; 16])
            .await
            .unwrap();
        let path = url.path().trim_start_matches('/').to_string();

        assert!(backend.exists(&path).await.unwrap());
        backend.delete(&path).await.unwrap();
        assert!(!backend.exists(&path).await.unwrap());
    }
}
