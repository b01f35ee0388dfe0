use chrono::Utc;
use common::storage::ImageStore;
use sea_orm::sea_query::NullOrdering;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, Order, QueryFilter,
    QueryOrder, Set,
};
use tracing::info;

use super::transformer::find_transformer;
use super::{LinkedImage, discard_image, required_weather};
use crate::entity::{inspection, transformer};
use crate::error::AppError;
use crate::models::inspection::InspectionFields;

/// An inspection together with a snapshot of the transformer it belongs to.
#[derive(Debug, Clone)]
pub struct InspectionRecord {
    pub inspection: inspection::Model,
    pub transformer: transformer::Model,
}

impl InspectionRecord {
    fn from_row(
        (inspection, transformer): (inspection::Model, Option<transformer::Model>),
    ) -> Result<Self, AppError> {
        let transformer = transformer.ok_or_else(|| {
            AppError::Internal(format!(
                "Inspection {} references missing transformer {}",
                inspection.id, inspection.transformer_id
            ))
        })?;
        Ok(Self {
            inspection,
            transformer,
        })
    }
}

pub struct InspectionService<'a> {
    db: &'a DatabaseConnection,
    images: &'a dyn ImageStore,
}

impl<'a> InspectionService<'a> {
    pub fn new(db: &'a DatabaseConnection, images: &'a dyn ImageStore) -> Self {
        Self { db, images }
    }

    pub async fn list(&self) -> Result<Vec<InspectionRecord>, AppError> {
        inspection::Entity::find()
            .find_also_related(transformer::Entity)
            .order_by_asc(inspection::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(InspectionRecord::from_row)
            .collect()
    }

    /// All inspections of one transformer. An unknown transformer simply has none.
    pub async fn list_by_transformer(
        &self,
        transformer_id: i32,
    ) -> Result<Vec<InspectionRecord>, AppError> {
        inspection::Entity::find()
            .filter(inspection::Column::TransformerId.eq(transformer_id))
            .find_also_related(transformer::Entity)
            .order_by_asc(inspection::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(InspectionRecord::from_row)
            .collect()
    }

    /// The most recent inspection by date; undated inspections come last, ties go to the newest id.
    pub async fn latest_for_transformer(
        &self,
        transformer_id: i32,
    ) -> Result<InspectionRecord, AppError> {
        let row = inspection::Entity::find()
            .filter(inspection::Column::TransformerId.eq(transformer_id))
            .find_also_related(transformer::Entity)
            .order_by_with_nulls(inspection::Column::Date, Order::Desc, NullOrdering::Last)
            .order_by_desc(inspection::Column::Id)
            .one(self.db)
            .await?
            .ok_or_else(|| AppError::NotFound("No inspections for this transformer".into()))?;

        InspectionRecord::from_row(row)
    }

    pub async fn get(&self, id: i32) -> Result<InspectionRecord, AppError> {
        let row = inspection::Entity::find_by_id(id)
            .find_also_related(transformer::Entity)
            .one(self.db)
            .await?
            .ok_or_else(not_found)?;

        InspectionRecord::from_row(row)
    }

    /// Create an inspection for an existing transformer. An unknown
    /// transformer is a validation error.
    pub async fn create(
        &self,
        transformer_id: i32,
        fields: InspectionFields,
    ) -> Result<InspectionRecord, AppError> {
        let transformer = transformer::Entity::find_by_id(transformer_id)
            .one(self.db)
            .await?
            .ok_or_else(|| {
                AppError::Validation(format!("Transformer {transformer_id} does not exist"))
            })?;

        let now = Utc::now();
        let new_inspection = inspection::ActiveModel {
            transformer_id: Set(transformer.id),
            date: Set(fields.date),
            inspector: Set(fields.inspector),
            notes: Set(fields.notes),
            progress_status: Set(fields.progress_status),
            maintenance_image_path: Set(None),
            maintenance_upload_date: Set(None),
            maintenance_weather: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let model = new_inspection.insert(self.db).await?;
        info!(id = model.id, transformer_id, "Created inspection");

        Ok(InspectionRecord {
            inspection: model,
            transformer,
        })
    }

    /// Replace date, inspector, notes and progress status. The transformer
    /// reference and maintenance image fields are left as they are.
    pub async fn update(
        &self,
        id: i32,
        fields: InspectionFields,
    ) -> Result<InspectionRecord, AppError> {
        let existing = find_inspection(self.db, id).await?;
        let mut active: inspection::ActiveModel = existing.into();

        active.date = Set(fields.date);
        active.inspector = Set(fields.inspector);
        active.notes = Set(fields.notes);
        active.progress_status = Set(fields.progress_status);
        active.updated_at = Set(Utc::now());

        let model = update_or_not_found(active, self.db).await?;
        let transformer = find_transformer(self.db, model.transformer_id).await?;

        Ok(InspectionRecord {
            inspection: model,
            transformer,
        })
    }

    /// Delete a single inspection. Its transformer is not affected.
    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        let result = inspection::Entity::delete_by_id(id).exec(self.db).await?;
        if result.rows_affected == 0 {
            return Err(not_found());
        }

        info!(id, "Deleted inspection");
        Ok(())
    }

    /// Store a maintenance photograph and record its path, upload time and weather.
    pub async fn upload_maintenance(
        &self,
        id: i32,
        data: &[u8],
        original_name: &str,
        weather: &str,
    ) -> Result<LinkedImage, AppError> {
        if data.is_empty() {
            return Err(AppError::Validation("File is empty".into()));
        }
        let weather = required_weather(weather)?;

        let existing = find_inspection(self.db, id).await?;
        let stored = self.images.store(data, original_name).await?;

        let uploaded_at = Utc::now();
        let mut active: inspection::ActiveModel = existing.into();
        active.maintenance_image_path = Set(Some(stored.public_path.clone()));
        active.maintenance_upload_date = Set(Some(uploaded_at));
        active.maintenance_weather = Set(Some(weather.clone()));
        active.updated_at = Set(uploaded_at);

        if let Err(e) = update_or_not_found(active, self.db).await {
            discard_image(self.images, &stored.public_path).await;
            return Err(e);
        }

        info!(id, path = %stored.public_path, size = data.len(), "Linked maintenance image");
        Ok(LinkedImage {
            public_path: stored.public_path,
            uploaded_at,
            weather,
        })
    }
}

fn not_found() -> AppError {
    AppError::NotFound("Inspection not found".into())
}

async fn find_inspection(db: &DatabaseConnection, id: i32) -> Result<inspection::Model, AppError> {
    inspection::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(not_found)
}

async fn update_or_not_found(
    active: inspection::ActiveModel,
    db: &DatabaseConnection,
) -> Result<inspection::Model, AppError> {
    match active.update(db).await {
        Ok(model) => Ok(model),
        Err(DbErr::RecordNotUpdated) => Err(not_found()),
        Err(e) => Err(e.into()),
    }
}
