use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::services::inspection::InspectionRecord;

use super::shared::{flexible_datetime, normalize_optional};
use super::transformer::TransformerResponse;

/// Status given to inspections created without one.
pub const DEFAULT_PROGRESS_STATUS: &str = "Pending";

/// Reference to an existing transformer, as sent by clients: `{"id": 7}`.
#[derive(Deserialize, Clone, Copy, utoipa::ToSchema)]
pub struct TransformerRef {
    pub id: i32,
}

/// Body for creating an inspection. The transformer may be given either as
/// `transformer: {id}` or as `transformerId`.
#[derive(Deserialize, Clone, Default, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateInspectionRequest {
    #[serde(default)]
    pub transformer: Option<TransformerRef>,
    #[serde(default)]
    pub transformer_id: Option<i32>,
    #[serde(default, deserialize_with = "flexible_datetime")]
    #[schema(value_type = Option<String>, example = "2024-05-01T09:30:00Z")]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub inspector: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    #[schema(example = "Pending")]
    pub progress_status: Option<String>,
}

impl CreateInspectionRequest {
    /// The referenced transformer id, preferring the nested form.
    pub fn transformer_id(&self) -> Result<i32, AppError> {
        self.transformer
            .map(|t| t.id)
            .or(self.transformer_id)
            .ok_or_else(|| AppError::Validation("Transformer id is required".into()))
    }

    pub fn fields(self) -> InspectionFields {
        InspectionFields {
            date: self.date,
            inspector: normalize_optional(self.inspector),
            notes: normalize_optional(self.notes),
            progress_status: normalize_optional(self.progress_status)
                .or_else(|| Some(DEFAULT_PROGRESS_STATUS.to_string())),
        }
    }
}

/// Body for replacing an inspection's descriptive fields. Any transformer
/// reference or image fields in the body are ignored.
#[derive(Deserialize, Clone, Default, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInspectionRequest {
    #[serde(default, deserialize_with = "flexible_datetime")]
    #[schema(value_type = Option<String>, example = "2024-05-01T09:30:00Z")]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub inspector: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    #[schema(example = "Completed")]
    pub progress_status: Option<String>,
}

impl UpdateInspectionRequest {
    pub fn fields(self) -> InspectionFields {
        InspectionFields {
            date: self.date,
            inspector: normalize_optional(self.inspector),
            notes: normalize_optional(self.notes),
            progress_status: normalize_optional(self.progress_status),
        }
    }
}

/// The replaceable subset of an inspection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InspectionFields {
    pub date: Option<DateTime<Utc>>,
    pub inspector: Option<String>,
    pub notes: Option<String>,
    pub progress_status: Option<String>,
}

#[derive(Serialize, Debug, Clone, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InspectionResponse {
    #[schema(example = 1)]
    pub id: i32,
    pub transformer_id: i32,
    /// The referenced transformer as it was when this response was built.
    pub transformer: TransformerResponse,
    pub date: Option<DateTime<Utc>>,
    pub inspector: Option<String>,
    pub notes: Option<String>,
    pub progress_status: Option<String>,
    pub maintenance_image_path: Option<String>,
    pub maintenance_upload_date: Option<DateTime<Utc>>,
    pub maintenance_weather: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<InspectionRecord> for InspectionResponse {
    fn from(record: InspectionRecord) -> Self {
        let m = record.inspection;
        Self {
            id: m.id,
            transformer_id: m.transformer_id,
            transformer: record.transformer.into(),
            date: m.date,
            inspector: m.inspector,
            notes: m.notes,
            progress_status: m.progress_status,
            maintenance_image_path: m.maintenance_image_path,
            maintenance_upload_date: m.maintenance_upload_date,
            maintenance_weather: m.maintenance_weather,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}
