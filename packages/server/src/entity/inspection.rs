use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "inspection")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Never changed after creation.
    #[sea_orm(indexed)]
    pub transformer_id: i32,
    #[sea_orm(belongs_to, from = "transformer_id", to = "id")]
    pub transformer: HasOne<super::transformer::Entity>,

    pub date: Option<DateTimeUtc>,
    pub inspector: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,
    pub progress_status: Option<String>,

    pub maintenance_image_path: Option<String>,
    pub maintenance_upload_date: Option<DateTimeUtc>,
    pub maintenance_weather: Option<String>,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
