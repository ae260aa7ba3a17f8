//! Object store trait.

use std::path::Path;

use async_trait::async_trait;

use crate::error::StorageResult;

/// Remote content store, addressed by (bucket, key).
///
/// Operations are single-shot and non-retrying; there are no
/// partial-object semantics. Implementations convert every transport or
/// permission error into a typed [`StorageError`](crate::StorageError)
/// carrying the underlying diagnostic.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Fetch an object into a local file, creating parent directories.
    async fn fetch(&self, bucket: &str, key: &str, local_path: &Path) -> StorageResult<()>;

    /// Publish a local file as an object.
    async fn publish(&self, local_path: &Path, bucket: &str, key: &str) -> StorageResult<()>;
}
