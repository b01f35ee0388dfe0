use thiserror::Error;

/// Errors that can occur while storing an uploaded image.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The upload carried no bytes.
    #[error("file is empty")]
    EmptyPayload,

    /// The original filename cannot be used as part of a stored name.
    #[error("invalid filename: {0}")]
    InvalidFilename(&'static str),

    /// The upload exceeds the configured size limit.
    #[error("file exceeds size limit ({actual} > {limit} bytes)")]
    SizeLimitExceeded { actual: u64, limit: u64 },

    /// A public path that does not belong to this store.
    #[error("path is not managed by this store: {0}")]
    ForeignPath(String),

    #[error("storage IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl StorageError {
    /// Whether the error was caused by the caller's input rather than the store.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::Io(_))
    }
}
