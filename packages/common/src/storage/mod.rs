mod error;
mod filename;
mod traits;

pub mod filesystem;

pub use error::StorageError;
pub use filename::sanitize_original_name;
pub use filesystem::FilesystemImageStore;
pub use traits::{ImageStore, StoredImage};
