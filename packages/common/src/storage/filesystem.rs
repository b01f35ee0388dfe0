use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use super::error::StorageError;
use super::filename::sanitize_original_name;
use super::traits::{ImageStore, StoredImage};
use crate::config::StorageConfig;

/// Filesystem-backed image store.
///
/// Files are written flat into `upload_dir` as `{uuid}_{original filename}` and
/// addressed publicly as `{public_prefix}/{uuid}_{original filename}`.
pub struct FilesystemImageStore {
    upload_dir: PathBuf,
    public_prefix: String,
    max_size: u64,
}

impl FilesystemImageStore {
    /// Create a new store, creating the upload directory if it is missing.
    pub async fn new(config: &StorageConfig) -> Result<Self, StorageError> {
        fs::create_dir_all(&config.upload_dir).await?;
        Ok(Self {
            upload_dir: config.upload_dir.clone(),
            public_prefix: config.normalized_prefix(),
            max_size: config.max_upload_size,
        })
    }

    /// Directory the files are written to.
    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    fn public_path(&self, file_name: &str) -> String {
        format!("{}/{}", self.public_prefix, file_name)
    }

    /// Map a public path back to a file inside the upload directory.
    fn resolve(&self, public_path: &str) -> Result<PathBuf, StorageError> {
        let file_name = public_path
            .strip_prefix(&self.public_prefix)
            .and_then(|rest| rest.strip_prefix('/'))
            .filter(|name| !name.is_empty() && !name.contains(['/', '\\']) && *name != "..")
            .ok_or_else(|| StorageError::ForeignPath(public_path.to_string()))?;
        Ok(self.upload_dir.join(file_name))
    }
}

#[async_trait]
impl ImageStore for FilesystemImageStore {
    async fn store(&self, data: &[u8], original_name: &str) -> Result<StoredImage, StorageError> {
        if data.is_empty() {
            return Err(StorageError::EmptyPayload);
        }
        if data.len() as u64 > self.max_size {
            return Err(StorageError::SizeLimitExceeded {
                actual: data.len() as u64,
                limit: self.max_size,
            });
        }

        let original = sanitize_original_name(original_name)?;
        let token = Uuid::new_v4();
        let file_name = format!("{token}_{original}");

        // The directory may have been removed since startup.
        fs::create_dir_all(&self.upload_dir).await?;

        let final_path = self.upload_dir.join(&file_name);
        let temp_path = self.upload_dir.join(format!(".{token}.part"));

        let written = async {
            let mut file = fs::File::create(&temp_path).await?;
            file.write_all(data).await?;
            file.flush().await?;
            drop(file);
            fs::rename(&temp_path, &final_path).await
        }
        .await;

        if let Err(e) = written {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        tracing::debug!(file = %file_name, size = data.len(), "Stored image");

        Ok(StoredImage {
            public_path: self.public_path(&file_name),
            file_name,
        })
    }

    async fn remove(&self, public_path: &str) -> Result<bool, StorageError> {
        let path = self.resolve(public_path)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn public_prefix(&self) -> &str {
        &self.public_prefix
    }
}
