use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tracing::info;
use uuid::Uuid;

use crate::config::UploadConfig;
use crate::constants::uploads::PUBLIC_PREFIX;

/// A file part pulled out of a multipart body.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("File exceeds the {limit} byte limit")]
    TooLarge { limit: usize },

    #[error("Failed to store upload: {0}")]
    Io(#[from] std::io::Error),
}

/// Writes uploads to a local directory served under `/uploads`.
pub struct UploadService {
    directory: PathBuf,
    max_file_size: usize,
}

impl UploadService {
    #[must_use]
    pub fn new(config: &UploadConfig) -> Self {
        Self {
            directory: PathBuf::from(&config.directory),
            max_file_size: config.max_file_size_bytes,
        }
    }

    #[must_use]
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    #[must_use]
    pub const fn max_file_size(&self) -> usize {
        self.max_file_size
    }

    pub fn check_size(&self, file: &UploadedFile) -> Result<(), UploadError> {
        if file.data.len() > self.max_file_size {
            return Err(UploadError::TooLarge {
                limit: self.max_file_size,
            });
        }
        Ok(())
    }

    /// Stores the file under a fresh random name and returns its public URL.
    pub async fn save(&self, file: UploadedFile) -> Result<String, UploadError> {
        self.check_size(&file)?;

        fs::create_dir_all(&self.directory).await?;

        let filename = match extension_for(&file) {
            Some(ext) => format!("{}.{ext}", Uuid::new_v4().simple()),
            None => Uuid::new_v4().simple().to_string(),
        };
        let path = self.directory.join(&filename);

        fs::write(&path, &file.data).await?;
        info!(
            path = %path.display(),
            bytes = file.data.len(),
            original = file.file_name.as_deref().unwrap_or("-"),
            "Stored upload"
        );

        Ok(format!("{PUBLIC_PREFIX}/{filename}"))
    }

    /// Deletes a file previously returned by [`Self::save`]. URLs outside
    /// the upload directory are ignored.
    pub async fn remove(&self, public_url: &str) -> Result<(), UploadError> {
        let Some(filename) = public_url
            .strip_prefix(PUBLIC_PREFIX)
            .and_then(|rest| rest.strip_prefix('/'))
            .filter(|name| !name.is_empty() && !name.contains(['/', '\\']) && *name != "..")
        else {
            return Ok(());
        };

        fs::remove_file(self.directory.join(filename)).await?;
        info!(file = %filename, "Removed upload");
        Ok(())
    }
}

/// Extension from the client filename, falling back to the content type.
/// Only short alphanumeric extensions are kept.
fn extension_for(file: &UploadedFile) -> Option<String> {
    let from_name = file
        .file_name
        .as_deref()
        .and_then(|name| Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    let from_mime = || {
        file.content_type
            .as_deref()
            .and_then(mime_guess::get_mime_extensions_str)
            .and_then(|exts| exts.first())
            .map(|ext| (*ext).to_string())
    };

    from_name
        .or_else(from_mime)
        .filter(|ext| ext.len() <= 8 && ext.chars().all(|c| c.is_ascii_alphanumeric()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: Option<&str>, content_type: Option<&str>, data: &[u8]) -> UploadedFile {
        UploadedFile {
            file_name: name.map(String::from),
            content_type: content_type.map(String::from),
            data: data.to_vec(),
        }
    }

    fn service(limit: usize) -> (UploadService, PathBuf) {
        let dir = std::env::temp_dir().join(format!("cinedex-uploads-{}", Uuid::new_v4()));
        let service = UploadService::new(&UploadConfig {
            directory: dir.display().to_string(),
            max_file_size_bytes: limit,
        });
        (service, dir)
    }

    #[test]
    fn test_extension_for() {
        assert_eq!(
            extension_for(&file(Some("Poster.JPG"), None, b"")).as_deref(),
            Some("jpg")
        );
        assert_eq!(
            extension_for(&file(Some("cover"), Some("image/png"), b"")).as_deref(),
            Some("png")
        );
        assert_eq!(extension_for(&file(Some("../../evil.p/hp"), None, b"")), None);
        assert_eq!(extension_for(&file(None, None, b"")), None);
    }

    #[tokio::test]
    async fn test_save_writes_file_and_returns_public_url() {
        let (service, dir) = service(1024);
        let url = service
            .save(file(Some("cover.png"), Some("image/png"), b"\x89PNG"))
            .await
            .unwrap();

        assert!(url.starts_with("/uploads/"));
        assert!(url.ends_with(".png"));

        let name = url.trim_start_matches("/uploads/");
        let stored = std::fs::read(dir.join(name)).unwrap();
        assert_eq!(stored, b"\x89PNG");

        let _ = std::fs::remove_dir_all(dir);
    }

    #[tokio::test]
    async fn test_remove_deletes_only_stored_uploads() {
        let (service, dir) = service(1024);
        let url = service
            .save(file(Some("cover.png"), Some("image/png"), b"\x89PNG"))
            .await
            .unwrap();
        let path = dir.join(url.trim_start_matches("/uploads/"));
        assert!(path.exists());

        service.remove(&url).await.unwrap();
        assert!(!path.exists());

        service.remove("https://cdn.example/cover.png").await.unwrap();
        service.remove("/uploads/../config.toml").await.unwrap();

        let _ = std::fs::remove_dir_all(dir);
    }

    #[tokio::test]
    async fn test_oversized_file_is_rejected_before_write() {
        let (service, dir) = service(4);
        let err = service
            .save(file(Some("big.bin"), None, b"12345"))
            .await
            .unwrap_err();

        assert!(matches!(err, UploadError::TooLarge { limit: 4 }));
        assert!(!dir.exists());
    }
}
