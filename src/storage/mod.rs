//! Local-disk upload store.
//!
//! Uploaded files land in a single directory under a timestamp-prefixed
//! filename and are referenced everywhere else by their relative path. The
//! same directory is served statically under `/uploads`.

use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::errors::AppError;

/// Per-file upload limit.
pub const MAX_FILE_BYTES: usize = 50 * 1024 * 1024;

/// A stored upload: the relative path it is addressed by, and the MIME type
/// supplied by the client.
#[derive(Debug, Clone)]
pub struct StoredFile {
    pub path: String,
    pub mime_type: String,
}

/// Handle to the uploads directory.
pub struct UploadStore {
    root: PathBuf,
}

impl UploadStore {
    /// Open the store, creating the uploads directory if needed.
    pub async fn open(root: &Path) -> Result<Self, AppError> {
        tokio::fs::create_dir_all(root).await?;
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    /// Persist an uploaded file and return its stable relative path.
    ///
    /// The stored path always uses forward slashes, regardless of platform.
    pub async fn store(
        &self,
        original_name: &str,
        mime_type: &str,
        data: &[u8],
    ) -> Result<StoredFile, AppError> {
        if data.len() > MAX_FILE_BYTES {
            return Err(AppError::Validation(
                "File exceeds the 50 MB upload limit".to_string(),
            ));
        }

        let filename = format!(
            "{}-{}",
            Utc::now().timestamp_millis(),
            sanitize_filename(original_name)
        );
        tokio::fs::write(self.root.join(&filename), data).await?;

        Ok(StoredFile {
            path: format!("uploads/{}", filename),
            mime_type: mime_type.to_string(),
        })
    }

    /// Best-effort deletion by stored path. A file that is already absent is
    /// not an error.
    pub async fn remove(&self, stored_path: &str) -> Result<(), AppError> {
        let Some(filename) = Path::new(stored_path).file_name() else {
            return Ok(());
        };

        match tokio::fs::remove_file(self.root.join(filename)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Whether a stored path currently resolves to a file on disk.
    pub fn exists(&self, stored_path: &str) -> bool {
        Path::new(stored_path)
            .file_name()
            .map(|name| self.root.join(name).exists())
            .unwrap_or(false)
    }
}

/// Strip path separators from a client-supplied filename.
fn sanitize_filename(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
        .collect();
    if cleaned.is_empty() {
        "file".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_store_and_remove() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::open(dir.path()).await.unwrap();

        let stored = store.store("logo.png", "image/png", b"png-bytes").await.unwrap();
        assert!(stored.path.starts_with("uploads/"));
        assert!(stored.path.ends_with("-logo.png"));
        assert!(!stored.path.contains('\\'));
        assert_eq!(stored.mime_type, "image/png");
        assert!(store.exists(&stored.path));

        store.remove(&stored.path).await.unwrap();
        assert!(!store.exists(&stored.path));
    }

    #[tokio::test]
    async fn test_remove_missing_file_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::open(dir.path()).await.unwrap();

        store.remove("uploads/never-existed.png").await.unwrap();
    }

    #[tokio::test]
    async fn test_store_rejects_oversized_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::open(dir.path()).await.unwrap();

        let data = vec![0u8; MAX_FILE_BYTES + 1];
        let err = store.store("big.bin", "video/mp4", &data).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_sanitize_filename_strips_separators() {
        assert_eq!(sanitize_filename("a/b\\c.png"), "a_b_c.png");
        assert_eq!(sanitize_filename(""), "file");
    }
}
