//! Picture storage service
//!
//! Writes uploaded picture bytes into a configured directory under a
//! uuid-prefixed name and reads them back for serving. The upload directory
//! is injected at construction, never read from ambient environment.

use crate::error::AppError;
use std::path::{Path, PathBuf};
use tokio::fs;
use uuid::Uuid;

/// Filesystem-backed store for uploaded pictures
#[derive(Debug, Clone)]
pub struct PictureStore {
    upload_dir: PathBuf,
}

impl PictureStore {
    /// Create a store rooted at `upload_dir`, creating the directory if needed.
    pub fn new(upload_dir: impl Into<PathBuf>) -> Result<Self, AppError> {
        let upload_dir = upload_dir.into();
        std::fs::create_dir_all(&upload_dir)?;
        Ok(Self { upload_dir })
    }

    /// Write `bytes` under a freshly generated unique name and return that name.
    ///
    /// The stored name is `<uuid-v4>_<original_name>`, so two concurrent
    /// uploads of the same file never collide. I/O failures propagate, no retry.
    pub async fn store(&self, original_name: &str, bytes: &[u8]) -> Result<String, AppError> {
        let stored_name = format!("{}_{}", Uuid::new_v4(), original_name);
        fs::write(self.upload_dir.join(&stored_name), bytes).await?;
        Ok(stored_name)
    }

    /// Read back the full contents of a stored picture.
    ///
    /// A missing or unreadable file is reported as `PictureNotFound` so the
    /// API layer can answer 400 instead of crashing the request.
    pub async fn load(&self, stored_name: &str) -> Result<Vec<u8>, AppError> {
        // Stored names never contain separators; reject anything that would
        // escape the upload directory.
        if stored_name.contains('/') || stored_name.contains('\\') {
            return Err(AppError::PictureNotFound(stored_name.to_string()));
        }

        fs::read(self.upload_dir.join(stored_name))
            .await
            .map_err(|_| AppError::PictureNotFound(stored_name.to_string()))
    }

    /// Derive a content type from the file extension.
    ///
    /// Matches jpg/gif/png ignoring ASCII case; anything else gets `None`
    /// and the caller falls back to a generic default.
    pub fn media_type_for(file_name: &str) -> Option<&'static str> {
        let extension = Path::new(file_name).extension()?.to_str()?;

        match extension.to_ascii_lowercase().as_str() {
            "jpg" => Some("image/jpeg"),
            "gif" => Some("image/gif"),
            "png" => Some("image/png"),
            _ => None,
        }
    }
}
