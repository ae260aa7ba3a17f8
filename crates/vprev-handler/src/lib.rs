//! Event-triggered preview pipeline orchestrator.

pub mod config;
pub mod pipeline;

pub use config::{ConfigError, HandlerConfig};
pub use pipeline::PreviewPipeline;
