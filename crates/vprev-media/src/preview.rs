//! Animated preview rendering.

use std::path::Path;

use async_trait::async_trait;
use tracing::{error, info};

use vprev_models::encoding::{PREVIEW_DURATION_SECS, PREVIEW_FPS, PREVIEW_SCALE_WIDTH};

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::{MediaError, MediaResult};

/// Renders a short animated preview from a source video file.
#[async_trait]
pub trait PreviewTransformer: Send + Sync {
    async fn transform(&self, source_path: &Path, dest_path: &Path) -> MediaResult<()>;
}

/// GIF preview renderer with a fixed policy: 2.5 s capped duration,
/// 5 fps, 200 px wide with aspect-preserving height.
#[derive(Debug, Default)]
pub struct GifTransformer;

impl GifTransformer {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PreviewTransformer for GifTransformer {
    async fn transform(&self, source_path: &Path, dest_path: &Path) -> MediaResult<()> {
        let filter = format!("fps={},scale={}:-1", PREVIEW_FPS, PREVIEW_SCALE_WIDTH);

        let cmd = FfmpegCommand::new(source_path, dest_path)
            .duration(PREVIEW_DURATION_SECS)
            .video_filter(&filter)
            .log_level("error");

        match FfmpegRunner::new().run(&cmd).await {
            Ok(()) => {
                info!("Rendered preview {}", dest_path.display());
                Ok(())
            }
            Err(MediaError::FfmpegFailed {
                message,
                stderr,
                exit_code,
            }) => {
                error!(
                    "Preview render failed for {} (exit code {:?}): {}",
                    source_path.display(),
                    exit_code,
                    stderr.as_deref().unwrap_or(&message)
                );
                Err(MediaError::FfmpegFailed {
                    message,
                    stderr,
                    exit_code,
                })
            }
            Err(e) => {
                error!("Preview render failed for {}: {}", source_path.display(), e);
                Err(e)
            }
        }
    }
}
