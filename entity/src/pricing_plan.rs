use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "pricing_plan")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub hardware_model: Option<String>,
    pub setup_fee: Option<f64>,
    pub monthly_fee: Option<f64>,
    pub transaction_fee: Option<f64>,
    pub fee_type: String,
    pub currency: String,
    /// JSON array of inclusion strings.
    #[sea_orm(column_type = "Text", nullable)]
    pub inclusions: Option<String>,
    pub sla_level: Option<String>,
    pub support_hours: Option<String>,
    pub is_active: bool,
    pub display_order: i32,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
