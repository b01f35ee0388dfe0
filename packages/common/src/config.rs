use std::path::PathBuf;

use serde::Deserialize;

/// Where uploaded images are written and how they are addressed publicly.
#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Directory receiving uploaded files. Created on demand. Default: "./uploads".
    #[serde(default = "default_upload_dir")]
    pub upload_dir: PathBuf,
    /// URL path segment the upload directory is served under. Default: "/uploads".
    #[serde(default = "default_public_prefix")]
    pub public_prefix: String,
    /// Largest accepted upload in bytes. Default: 20 MiB.
    #[serde(default = "default_max_upload_size")]
    pub max_upload_size: u64,
}

fn default_upload_dir() -> PathBuf {
    PathBuf::from("./uploads")
}
fn default_public_prefix() -> String {
    "/uploads".into()
}
fn default_max_upload_size() -> u64 {
    20 * 1024 * 1024
}

impl StorageConfig {
    /// The public prefix with exactly one leading slash and no trailing slash.
    pub fn normalized_prefix(&self) -> String {
        let trimmed = self.public_prefix.trim().trim_matches('/');
        if trimmed.is_empty() {
            String::new()
        } else {
            format!("/{trimmed}")
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            upload_dir: default_upload_dir(),
            public_prefix: default_public_prefix(),
            max_upload_size: default_max_upload_size(),
        }
    }
}
