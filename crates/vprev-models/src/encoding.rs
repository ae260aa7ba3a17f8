//! Preview encoding policy.

/// Maximum duration of a rendered preview, in seconds from the start of
/// the source.
pub const PREVIEW_DURATION_SECS: f64 = 2.5;

/// Frame rate of a rendered preview.
pub const PREVIEW_FPS: u32 = 5;

/// Output width of a rendered preview; height follows the source aspect
/// ratio.
pub const PREVIEW_SCALE_WIDTH: u32 = 200;

/// File extension of a rendered preview.
pub const PREVIEW_EXTENSION: &str = "gif";

/// Content type of a rendered preview.
pub const PREVIEW_CONTENT_TYPE: &str = "image/gif";
