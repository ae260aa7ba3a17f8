//! Storage trigger event models.
//!
//! These types mirror the notification JSON emitted by the object store
//! when a new source video lands (`Records[].s3.bucket.name` /
//! `Records[].s3.object.key`). Unknown fields are ignored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while extracting the source object from a trigger event.
///
/// These are trigger-configuration defects, not retryable conditions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EventError {
    #[error("event contains no storage records")]
    NoRecords,

    #[error("event record has an empty bucket name")]
    EmptyBucket,

    #[error("event record has an empty object key")]
    EmptyKey,
}

/// A storage notification event. One event starts one pipeline invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageEvent {
    /// Notification records; the pipeline consumes the first one.
    #[serde(rename = "Records", default)]
    pub records: Vec<EventRecord>,
}

impl StorageEvent {
    /// Extract the source object named by the first record.
    pub fn source_object(&self) -> Result<SourceObject, EventError> {
        let record = self.records.first().ok_or(EventError::NoRecords)?;
        let bucket = record.s3.bucket.name.trim();
        let key = record.s3.object.key.trim();

        if bucket.is_empty() {
            return Err(EventError::EmptyBucket);
        }
        if key.is_empty() {
            return Err(EventError::EmptyKey);
        }

        Ok(SourceObject {
            bucket: bucket.to_string(),
            key: key.to_string(),
        })
    }
}

/// A single storage notification record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRecord {
    /// When the object landed, if the store reported it.
    #[serde(rename = "eventTime", default, skip_serializing_if = "Option::is_none")]
    pub event_time: Option<DateTime<Utc>>,

    /// Store-specific event name (e.g. `ObjectCreated:Put`).
    #[serde(rename = "eventName", default, skip_serializing_if = "Option::is_none")]
    pub event_name: Option<String>,

    /// The bucket/object pair the record describes.
    pub s3: S3Entity,
}

/// Bucket and object details of a record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct S3Entity {
    pub bucket: BucketEntity,
    pub object: ObjectEntity,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BucketEntity {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectEntity {
    pub key: String,

    /// Object size in bytes, if the store reported it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
}

/// The source video object an invocation operates on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceObject {
    pub bucket: String,
    pub key: String,
}

impl SourceObject {
    /// Full store location of the object, e.g. `s3://incoming/clip01.mp4`.
    ///
    /// This is the string injected into the transcode job settings.
    pub fn uri(&self) -> String {
        format!("s3://{}/{}", self.bucket, self.key)
    }
}
