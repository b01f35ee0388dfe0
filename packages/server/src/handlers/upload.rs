use axum::extract::{DefaultBodyLimit, Multipart};

use crate::error::AppError;

/// Slack on top of the file size limit for multipart framing and the other fields.
const MULTIPART_OVERHEAD: u64 = 64 * 1024;

pub fn image_upload_body_limit(max_upload_size: u64) -> DefaultBodyLimit {
    let limit = max_upload_size.saturating_add(MULTIPART_OVERHEAD);
    DefaultBodyLimit::max(usize::try_from(limit).unwrap_or(usize::MAX))
}

/// The fields of an image upload form: `file` and `weather`.
pub struct ImageUpload {
    pub file_name: String,
    pub data: Vec<u8>,
    pub weather: String,
}

/// Read an image upload form, buffering the file up to `max_size` bytes.
pub async fn read_image_upload(
    mut multipart: Multipart,
    max_size: u64,
) -> Result<ImageUpload, AppError> {
    let mut file: Option<(String, Vec<u8>)> = None;
    let mut weather: Option<String> = None;

    while let Some(mut field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Multipart error: {e}")))?
    {
        match field.name() {
            Some("file") => {
                let file_name = field
                    .file_name()
                    .map(|s| s.to_string())
                    .ok_or_else(|| AppError::Validation("File field must have a filename".into()))?;

                let mut data = Vec::new();
                while let Some(chunk) = field
                    .chunk()
                    .await
                    .map_err(|e| AppError::Validation(format!("Upload read error: {e}")))?
                {
                    if (data.len() + chunk.len()) as u64 > max_size {
                        return Err(AppError::Validation(format!(
                            "File exceeds maximum size of {max_size} bytes"
                        )));
                    }
                    data.extend_from_slice(&chunk);
                }
                file = Some((file_name, data));
            }
            Some("weather") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read weather: {e}")))?;
                weather = Some(text);
            }
            _ => {} // Ignore unknown fields.
        }
    }

    let (file_name, data) =
        file.ok_or_else(|| AppError::Validation("Missing 'file' field".into()))?;
    let weather = weather.ok_or_else(|| AppError::Validation("Missing 'weather' field".into()))?;

    Ok(ImageUpload {
        file_name,
        data,
        weather,
    })
}
