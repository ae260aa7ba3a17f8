//! Shared data models for the VidPrev preview pipeline.
//!
//! This crate provides Serde-serializable types for:
//! - Storage trigger events and the source object they describe
//! - Per-invocation asset identifiers and derived working paths
//! - The preview encoding policy
//! - The pipeline result returned to the invoking environment

pub mod asset;
pub mod encoding;
pub mod event;
pub mod paths;
pub mod response;

// Re-export common types
pub use asset::AssetId;
pub use event::{EventError, EventRecord, SourceObject, StorageEvent};
pub use paths::WorkingPaths;
pub use response::PipelineResult;
