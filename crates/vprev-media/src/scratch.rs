//! Scratch-file lifecycle.
//!
//! Working files live in a per-invocation directory under the shared
//! scratch area. [`ScratchGuard`] guarantees their removal on every exit
//! path: eagerly via [`ScratchGuard::release`] on the success path (before
//! job dispatch begins), or from `Drop` when a stage fails early.

use std::path::PathBuf;

use tokio::fs;
use tracing::{debug, warn};

/// Best-effort deletion of each path independently.
///
/// A failing deletion is logged and never prevents attempts on the
/// remaining paths; missing files are fine.
pub async fn cleanup_files(paths: &[PathBuf]) {
    for path in paths {
        match fs::remove_file(path).await {
            Ok(()) => debug!("Deleted scratch file {}", path.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!("Failed to delete scratch file {}: {}", path.display(), e),
        }
    }
}

/// Scoped ownership of one invocation's scratch directory and files.
pub struct ScratchGuard {
    dir: PathBuf,
    paths: Vec<PathBuf>,
    released: bool,
}

impl ScratchGuard {
    pub fn new(dir: PathBuf, paths: Vec<PathBuf>) -> Self {
        Self {
            dir,
            paths,
            released: false,
        }
    }

    /// Remove the scratch files and the per-invocation directory now.
    ///
    /// Deletion failures are logged and swallowed; they never change the
    /// invocation's outcome.
    pub async fn release(mut self) {
        self.released = true;
        cleanup_files(&self.paths).await;

        if let Err(e) = fs::remove_dir_all(&self.dir).await {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!("Failed to remove scratch directory {}: {}", self.dir.display(), e);
            }
        }
    }
}

impl Drop for ScratchGuard {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        // Early-exit path; Drop cannot await, so remove synchronously
        if let Err(e) = std::fs::remove_dir_all(&self.dir) {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!("Failed to remove scratch directory {}: {}", self.dir.display(), e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_cleanup_files_removes_existing() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.mp4");
        let b = dir.path().join("b.gif");
        fs::write(&a, b"a").await.unwrap();
        fs::write(&b, b"b").await.unwrap();

        cleanup_files(&[a.clone(), b.clone()]).await;

        assert!(!a.exists());
        assert!(!b.exists());
    }

    #[tokio::test]
    async fn test_cleanup_files_tolerates_missing() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("never-created.mp4");
        let present = dir.path().join("present.gif");
        fs::write(&present, b"x").await.unwrap();

        // The missing path must not stop removal of the present one
        cleanup_files(&[missing, present.clone()]).await;
        assert!(!present.exists());
    }

    #[tokio::test]
    async fn test_release_removes_files_and_dir() {
        let root = tempfile::tempdir().unwrap();
        let work = root.path().join("asset-1");
        fs::create_dir_all(&work).await.unwrap();
        let file = work.join("clip.mp4");
        fs::write(&file, b"x").await.unwrap();

        let guard = ScratchGuard::new(work.clone(), vec![file]);
        guard.release().await;

        assert!(!work.exists());
    }

    #[tokio::test]
    async fn test_drop_removes_dir_on_early_exit() {
        let root = tempfile::tempdir().unwrap();
        let work = root.path().join("asset-2");
        fs::create_dir_all(&work).await.unwrap();
        let file = work.join("clip.mp4");
        fs::write(&file, b"x").await.unwrap();

        {
            let _guard = ScratchGuard::new(work.clone(), vec![file]);
            // Simulates a failed stage returning before release()
        }

        assert!(!work.exists());
    }
}
