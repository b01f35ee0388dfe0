use chrono::{DateTime, Utc};
use serde::Serialize;

/// Returned after an image has been stored and linked to its record.
#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    #[schema(example = "Image uploaded successfully")]
    pub message: String,
    /// Public path the image is served under.
    #[schema(example = "/uploads/3f2b8c1e-0a4d-4d47-9c8e-2d8f5b6a7c90_photo.jpg")]
    pub image_path: String,
    pub uploaded_at: DateTime<Utc>,
    #[schema(example = "Sunny")]
    pub weather: String,
}

impl UploadResponse {
    pub fn new(image_path: String, uploaded_at: DateTime<Utc>, weather: String) -> Self {
        Self {
            message: "Image uploaded successfully".into(),
            image_path,
            uploaded_at,
            weather,
        }
    }
}
