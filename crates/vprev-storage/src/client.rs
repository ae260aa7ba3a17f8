//! S3 client implementation.

use std::path::Path;

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_credential_types::Credentials;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use crate::error::{StorageError, StorageResult};
use crate::store::ObjectStore;

/// Configuration for the S3 store.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Deployment region
    pub region: String,
    /// Optional S3-compatible endpoint override (MinIO, R2)
    pub endpoint_url: Option<String>,
    /// Optional static access key; default credential chain otherwise
    pub access_key_id: Option<String>,
    /// Optional static secret key
    pub secret_access_key: Option<String>,
}

impl StorageConfig {
    /// Create config from environment variables.
    pub fn from_env() -> StorageResult<Self> {
        let region = std::env::var("AWS_REGION")
            .or_else(|_| std::env::var("AWS_DEFAULT_REGION"))
            .map_err(|_| StorageError::config_error("AWS_REGION not set"))?;

        Ok(Self {
            region,
            endpoint_url: std::env::var("S3_ENDPOINT_URL").ok(),
            access_key_id: std::env::var("S3_ACCESS_KEY_ID").ok(),
            secret_access_key: std::env::var("S3_SECRET_ACCESS_KEY").ok(),
        })
    }
}

/// S3 object store client.
#[derive(Clone)]
pub struct S3Store {
    client: Client,
}

impl S3Store {
    /// Create a new store from configuration.
    pub async fn new(config: StorageConfig) -> StorageResult<Self> {
        let base = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .load()
            .await;

        let mut builder = aws_sdk_s3::config::Builder::from(&base);

        if let Some(endpoint) = &config.endpoint_url {
            // Path-style addressing for S3-compatible endpoints
            builder = builder.endpoint_url(endpoint).force_path_style(true);
        }

        if let (Some(key_id), Some(secret)) = (&config.access_key_id, &config.secret_access_key) {
            builder =
                builder.credentials_provider(Credentials::new(key_id, secret, None, None, "static"));
        }

        Ok(Self {
            client: Client::from_conf(builder.build()),
        })
    }

    /// Create from environment variables.
    pub async fn from_env() -> StorageResult<Self> {
        let config = StorageConfig::from_env()?;
        Self::new(config).await
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn fetch(&self, bucket: &str, key: &str, local_path: &Path) -> StorageResult<()> {
        debug!("Fetching s3://{}/{} to {}", bucket, key, local_path.display());

        let mut response = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| StorageError::fetch_failed(e.to_string()))?;

        if let Some(parent) = local_path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                StorageError::fetch_failed(format!("Failed to create directory: {}", e))
            })?;
        }

        let mut file = tokio::fs::File::create(local_path)
            .await
            .map_err(|e| StorageError::fetch_failed(format!("Failed to create file: {}", e)))?;

        while let Some(chunk) = response
            .body
            .try_next()
            .await
            .map_err(|e| StorageError::fetch_failed(e.to_string()))?
        {
            file.write_all(&chunk)
                .await
                .map_err(|e| StorageError::fetch_failed(format!("Failed to write file: {}", e)))?;
        }

        file.flush()
            .await
            .map_err(|e| StorageError::fetch_failed(format!("Failed to write file: {}", e)))?;

        info!("Fetched s3://{}/{} to {}", bucket, key, local_path.display());
        Ok(())
    }

    async fn publish(&self, local_path: &Path, bucket: &str, key: &str) -> StorageResult<()> {
        debug!("Publishing {} to s3://{}/{}", local_path.display(), bucket, key);

        let body = ByteStream::from_path(local_path)
            .await
            .map_err(|e| StorageError::publish_failed(e.to_string()))?;

        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(body)
            .content_type(content_type_for_key(key))
            .send()
            .await
            .map_err(|e| StorageError::publish_failed(e.to_string()))?;

        info!("Published {} to s3://{}/{}", local_path.display(), bucket, key);
        Ok(())
    }
}

/// Content type from the key's extension.
pub fn content_type_for_key(key: &str) -> &'static str {
    let ext = Path::new(key)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();

    match ext.as_str() {
        "gif" => "image/gif",
        "mp4" => "video/mp4",
        "mov" => "video/quicktime",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_for_key() {
        assert_eq!(content_type_for_key("videos/demo.gif"), "image/gif");
        assert_eq!(content_type_for_key("clip01.mp4"), "video/mp4");
        assert_eq!(content_type_for_key("clip01.MOV"), "video/quicktime");
        assert_eq!(content_type_for_key("data.bin"), "application/octet-stream");
        assert_eq!(content_type_for_key("no-extension"), "application/octet-stream");
    }
}
