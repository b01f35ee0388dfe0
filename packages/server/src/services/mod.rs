//! Entity services: CRUD plus linking uploaded images to records.
//!
//! Handlers stay thin; everything that touches the database or the image
//! store goes through here.

pub mod inspection;
pub mod transformer;

use chrono::{DateTime, Utc};
use common::storage::ImageStore;

use crate::error::AppError;

pub use inspection::{InspectionRecord, InspectionService};
pub use transformer::TransformerService;

/// Image metadata written to a record by an upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkedImage {
    pub public_path: String,
    pub uploaded_at: DateTime<Utc>,
    pub weather: String,
}

/// Trimmed weather for an upload. Blank values are rejected.
fn required_weather(weather: &str) -> Result<String, AppError> {
    let weather = weather.trim();
    if weather.is_empty() {
        return Err(AppError::Validation("Weather is required".into()));
    }
    Ok(weather.to_string())
}

/// Remove a stored image whose record could not be updated.
async fn discard_image(images: &dyn ImageStore, public_path: &str) {
    match images.remove(public_path).await {
        Ok(_) => tracing::info!(path = public_path, "Removed unlinked image"),
        Err(e) => tracing::warn!(path = public_path, error = %e, "Failed to remove unlinked image"),
    }
}
