//! Temporary image files.
//!
//! A [`StagedImage`] owns one downloaded file for the duration of a single
//! invocation. The file is removed by [`StagedImage::release`], or by `Drop`
//! if the guard goes away on any other path.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use uuid::Uuid;

use crate::content::ImageSource;
use crate::error::{NoticeError, NoticeResult};
use notice_core::ImageFetcher;

/// A downloaded image in the staging directory.
#[derive(Debug)]
pub struct StagedImage {
    path: PathBuf,
    released: bool,
}

impl StagedImage {
    /// Downloads `source` into `dir` under a unique name.
    ///
    /// The directory is created if missing. On failure nothing is left
    /// behind in `dir`.
    pub async fn stage(
        fetcher: &dyn ImageFetcher,
        source: &ImageSource,
        dir: &Path,
    ) -> NoticeResult<Self> {
        let staging_error = |reason: String| NoticeError::ImageStaging {
            url: source.url.clone(),
            reason,
        };

        let bytes = fetcher
            .fetch(&source.url)
            .await
            .map_err(|e| staging_error(e.to_string()))?;

        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| staging_error(format!("create {}: {e}", dir.display())))?;
        let dir = std::path::absolute(dir).map_err(|e| staging_error(e.to_string()))?;

        // Guard first, so a partial write is cleaned up on drop.
        let staged = Self {
            path: dir.join(format!("{}-{}", Uuid::new_v4(), source.file_name)),
            released: false,
        };
        tokio::fs::write(&staged.path, &bytes)
            .await
            .map_err(|e| staging_error(format!("write {}: {e}", staged.path.display())))?;

        debug!(path = %staged.path.display(), size = bytes.len(), "Image staged");
        Ok(staged)
    }

    /// Absolute path of the staged file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Deletes the file.
    pub async fn release(mut self) {
        self.released = true;
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => debug!(path = %self.path.display(), "Staged image removed"),
            Err(e) => warn!(path = %self.path.display(), error = %e, "Failed to remove staged image"),
        }
    }
}

impl Drop for StagedImage {
    fn drop(&mut self) {
        if !self.released {
            let _ = std::fs::remove_file(&self.path);
        }
    }
}
