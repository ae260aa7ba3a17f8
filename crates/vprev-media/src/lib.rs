//! FFmpeg preview rendering and scratch-file lifecycle.
//!
//! This crate provides:
//! - [`FfmpegCommand`] / [`FfmpegRunner`] for child-process invocation
//! - [`PreviewTransformer`] and the fixed-policy [`GifTransformer`]
//! - The [`scratch`] module owning the per-invocation working files

pub mod command;
pub mod error;
pub mod preview;
pub mod scratch;

pub use command::{FfmpegCommand, FfmpegRunner};
pub use error::{MediaError, MediaResult};
pub use preview::{GifTransformer, PreviewTransformer};
pub use scratch::{cleanup_files, ScratchGuard};
