//! S3 object store client.
//!
//! This crate provides:
//! - The [`ObjectStore`] trait, the pipeline's storage seam
//! - [`S3Store`], the AWS SDK implementation (fetch to file, publish from file)
//!
//! Operations are single-shot with no retries; partial failures surface as
//! typed [`StorageError`]s.

pub mod client;
pub mod error;
pub mod store;

pub use client::{S3Store, StorageConfig};
pub use error::{StorageError, StorageResult};
pub use store::ObjectStore;
