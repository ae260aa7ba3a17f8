//! Handler configuration.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading the process configuration.
///
/// These surface at startup, before any event is consumed.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} not set")]
    Missing(&'static str),
}

/// Process configuration for the preview pipeline.
#[derive(Debug, Clone)]
pub struct HandlerConfig {
    /// Bucket the rendered previews are published to
    pub destination_bucket: String,
    /// Execution role passed to the transcode service
    pub transcode_role: String,
    /// Deployment region
    pub region: String,
    /// Shared scratch area root
    pub scratch_dir: PathBuf,
    /// Static transcode job template
    pub job_template_path: PathBuf,
}

impl HandlerConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            destination_bucket: require("DESTINATION_BUCKET")?,
            transcode_role: require("TRANSCODE_ROLE")?,
            region: std::env::var("AWS_REGION")
                .or_else(|_| std::env::var("AWS_DEFAULT_REGION"))
                .map_err(|_| ConfigError::Missing("AWS_REGION"))?,
            scratch_dir: std::env::var("SCRATCH_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("/tmp/vprev")),
            job_template_path: std::env::var("JOB_TEMPLATE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("job_settings.json")),
        })
    }
}

fn require(name: &'static str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::Missing(name))
}
