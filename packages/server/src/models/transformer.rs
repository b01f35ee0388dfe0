use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::transformer;
use crate::error::AppError;

use super::shared::{normalize_optional, validate_required};

/// Body for creating a transformer and for replacing its descriptive fields.
#[derive(Deserialize, Clone, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransformerRequest {
    #[schema(example = "TX-100")]
    pub number: String,
    #[schema(example = "P1")]
    pub pole: String,
    #[schema(example = "north")]
    pub region: String,
    #[serde(rename = "type", default)]
    #[schema(example = "Bulk")]
    pub kind: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    #[schema(example = "Sunny")]
    pub weather: Option<String>,
}

/// A [`TransformerRequest`] after trimming and validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformerFields {
    pub number: String,
    pub pole: String,
    pub region: String,
    pub kind: Option<String>,
    pub location: Option<String>,
    pub weather: Option<String>,
}

impl TransformerRequest {
    pub fn validate(self) -> Result<TransformerFields, AppError> {
        Ok(TransformerFields {
            number: validate_required(&self.number, "number")?,
            pole: validate_required(&self.pole, "pole")?,
            region: validate_required(&self.region, "region")?,
            kind: normalize_optional(self.kind),
            location: normalize_optional(self.location),
            weather: normalize_optional(self.weather),
        })
    }
}

#[derive(Serialize, Debug, Clone, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransformerResponse {
    #[schema(example = 1)]
    pub id: i32,
    pub number: String,
    pub pole: String,
    pub region: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub location: Option<String>,
    pub weather: Option<String>,
    /// Public path of the baseline photograph, if one was uploaded.
    #[schema(example = "/uploads/3f2b8c1e-0a4d-4d47-9c8e-2d8f5b6a7c90_photo.jpg")]
    pub baseline_image_path: Option<String>,
    pub baseline_upload_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<transformer::Model> for TransformerResponse {
    fn from(m: transformer::Model) -> Self {
        Self {
            id: m.id,
            number: m.number,
            pole: m.pole,
            region: m.region,
            kind: m.kind,
            location: m.location,
            weather: m.weather,
            baseline_image_path: m.baseline_image_path,
            baseline_upload_date: m.baseline_upload_date,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}
