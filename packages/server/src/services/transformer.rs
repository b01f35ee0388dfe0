use chrono::Utc;
use common::storage::ImageStore;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use tracing::info;

use super::{LinkedImage, discard_image, required_weather};
use crate::entity::{inspection, transformer};
use crate::error::AppError;
use crate::models::transformer::TransformerFields;

pub struct TransformerService<'a> {
    db: &'a DatabaseConnection,
    images: &'a dyn ImageStore,
}

impl<'a> TransformerService<'a> {
    pub fn new(db: &'a DatabaseConnection, images: &'a dyn ImageStore) -> Self {
        Self { db, images }
    }

    pub async fn list(&self) -> Result<Vec<transformer::Model>, AppError> {
        Ok(transformer::Entity::find()
            .order_by_asc(transformer::Column::Id)
            .all(self.db)
            .await?)
    }

    pub async fn get(&self, id: i32) -> Result<transformer::Model, AppError> {
        find_transformer(self.db, id).await
    }

    pub async fn create(&self, fields: TransformerFields) -> Result<transformer::Model, AppError> {
        let now = Utc::now();
        let new_transformer = transformer::ActiveModel {
            number: Set(fields.number),
            pole: Set(fields.pole),
            region: Set(fields.region),
            kind: Set(fields.kind),
            location: Set(fields.location),
            weather: Set(fields.weather),
            baseline_image_path: Set(None),
            baseline_upload_date: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let model = new_transformer.insert(self.db).await?;
        info!(id = model.id, number = %model.number, "Created transformer");
        Ok(model)
    }

    /// Replace the descriptive fields. The id and baseline image fields are left as they are.
    pub async fn update(
        &self,
        id: i32,
        fields: TransformerFields,
    ) -> Result<transformer::Model, AppError> {
        let existing = find_transformer(self.db, id).await?;
        let mut active: transformer::ActiveModel = existing.into();

        active.number = Set(fields.number);
        active.pole = Set(fields.pole);
        active.region = Set(fields.region);
        active.kind = Set(fields.kind);
        active.location = Set(fields.location);
        active.weather = Set(fields.weather);
        active.updated_at = Set(Utc::now());

        update_or_not_found(active, self.db).await
    }

    /// Delete a transformer together with all of its inspections.
    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        let txn = self.db.begin().await?;

        find_transformer(&txn, id).await?;

        let removed = inspection::Entity::delete_many()
            .filter(inspection::Column::TransformerId.eq(id))
            .exec(&txn)
            .await?;
        transformer::Entity::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;
        info!(id, inspections = removed.rows_affected, "Deleted transformer");
        Ok(())
    }

    /// Store a baseline photograph and record its path, upload time and weather.
    pub async fn upload_baseline(
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

        let existing = find_transformer(self.db, id).await?;
        let stored = self.images.store(data, original_name).await?;

        let uploaded_at = Utc::now();
        let mut active: transformer::ActiveModel = existing.into();
        active.baseline_image_path = Set(Some(stored.public_path.clone()));
        active.baseline_upload_date = Set(Some(uploaded_at));
        active.weather = Set(Some(weather.clone()));
        active.updated_at = Set(uploaded_at);

        if let Err(e) = update_or_not_found(active, self.db).await {
            discard_image(self.images, &stored.public_path).await;
            return Err(e);
        }

        info!(id, path = %stored.public_path, size = data.len(), "Linked baseline image");
        Ok(LinkedImage {
            public_path: stored.public_path,
            uploaded_at,
            weather,
        })
    }
}

pub(crate) async fn find_transformer<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<transformer::Model, AppError> {
    transformer::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Transformer not found".into()))
}

/// The row can disappear between the lookup and the update.
async fn update_or_not_found<C: ConnectionTrait>(
    active: transformer::ActiveModel,
    db: &C,
) -> Result<transformer::Model, AppError> {
    match active.update(db).await {
        Ok(model) => Ok(model),
        Err(DbErr::RecordNotUpdated) => Err(AppError::NotFound("Transformer not found".into())),
        Err(e) => Err(e.into()),
    }
}
