//! Dispatch error types.

use thiserror::Error;

/// Result type for dispatch operations.
pub type DispatchResult<T> = Result<T, DispatchError>;

/// Errors that can occur while submitting a transcode job.
///
/// Failures are reported once and never retried by this crate.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Invalid job template: {0}")]
    Template(String),

    #[error("Endpoint resolution failed: {0}")]
    EndpointResolution(String),

    #[error("Transcode service returned no endpoints")]
    NoEndpoints,

    #[error("Job submission failed with status {status}: {body}")]
    SubmitFailed { status: u16, body: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DispatchError {
    pub fn template(msg: impl Into<String>) -> Self {
        Self::Template(msg.into())
    }
}
