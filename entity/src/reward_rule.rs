use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "reward_rule")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub rule_type: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub formula: Option<String>,
    pub min_threshold: Option<f64>,
    pub max_threshold: Option<f64>,
    pub cap_per_day: Option<f64>,
    pub cap_per_month: Option<f64>,
    #[sea_orm(column_type = "Text", nullable)]
    pub conditions: Option<String>,
    pub is_active: bool,
    pub test_period: Option<String>,
    pub test_location: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
