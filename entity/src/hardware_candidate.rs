use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "hardware_candidate")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub price: Option<f64>,
    pub currency: String,
    pub availability: Option<String>,
    /// JSON object of string key/value spec entries.
    #[sea_orm(column_type = "Text", nullable)]
    pub specs: Option<String>,
    /// JSON object of string key/value constraint entries.
    #[sea_orm(column_type = "Text", nullable)]
    pub constraints: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub field_notes: Option<String>,
    pub score: Option<i32>,
    pub recommendation: Option<String>,
    pub status: String,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
