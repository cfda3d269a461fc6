use sea_orm::entity::prelude::*;

/// Directed edge: `milestone_id` depends on `depends_on_id`.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "milestone_dependency")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub milestone_id: i32,
    pub depends_on_id: i32,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::milestone::Entity",
        from = "Column::MilestoneId",
        to = "super::milestone::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Milestone,
    #[sea_orm(
        belongs_to = "super::milestone::Entity",
        from = "Column::DependsOnId",
        to = "super::milestone::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    DependsOn,
}

impl ActiveModelBehavior for ActiveModel {}
