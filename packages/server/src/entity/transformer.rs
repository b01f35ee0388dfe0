use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A pole-mounted distribution transformer.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "transformer")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(indexed)]
    pub number: String,
    pub pole: String,
    pub region: String,
    #[sea_orm(column_name = "type")]
    pub kind: Option<String>,
    pub location: Option<String>,

    /// Ambient condition when the baseline photograph was taken.
    pub weather: Option<String>,

    /// Public path of the baseline photograph. Written together with `baseline_upload_date`.
    pub baseline_image_path: Option<String>,
    pub baseline_upload_date: Option<DateTimeUtc>,

    #[sea_orm(has_many)]
    pub inspections: HasMany<super::inspection::Entity>,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
