//! Transcode job dispatcher.
//!
//! This crate provides:
//! - [`JobSettings`], the static job template with per-invocation input
//!   injection
//! - [`TranscodeDispatcher`] and [`TranscodeClient`]: dynamic endpoint
//!   resolution followed by a correlation-tagged job submission

pub mod client;
pub mod error;
pub mod settings;

pub use client::{DispatchConfig, JobHandle, TranscodeClient, TranscodeDispatcher};
pub use error::{DispatchError, DispatchResult};
pub use settings::JobSettings;
