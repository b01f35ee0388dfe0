use async_trait::async_trait;

use super::error::StorageError;

/// Location of an image written by an [`ImageStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    /// Generated name, `<token>_<original filename>`.
    pub file_name: String,
    /// Public path the file is served under, `<public prefix>/<file_name>`.
    pub public_path: String,
}

/// Write-once storage for uploaded photographs.
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Store bytes under a freshly generated unique name derived from `original_name`.
    async fn store(&self, data: &[u8], original_name: &str) -> Result<StoredImage, StorageError>;

    /// Delete a previously stored image by the public path returned from [`ImageStore::store`].
    ///
    /// Returns `true` if the file was deleted, `false` if it did not exist.
    async fn remove(&self, public_path: &str) -> Result<bool, StorageError>;

    /// The prefix every returned public path starts with.
    fn public_prefix(&self) -> &str;
}
