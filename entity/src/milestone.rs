use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "milestone")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub target_date: DateTime,
    pub owner_id: Option<i32>,
    pub workstream_id: Option<i32>,
    pub project_id: i32,
    /// Ordering index among the project's milestones.
    pub milestone_order: i32,
    pub completed_at: Option<DateTime>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::project::Entity",
        from = "Column::ProjectId",
        to = "super::project::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Project,
    #[sea_orm(
        belongs_to = "super::workstream::Entity",
        from = "Column::WorkstreamId",
        to = "super::workstream::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    Workstream,
    #[sea_orm(
        belongs_to = "super::launchpad_user::Entity",
        from = "Column::OwnerId",
        to = "super::launchpad_user::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    Owner,
    #[sea_orm(has_many = "super::milestone_checklist_item::Entity")]
    ChecklistItem,
}

impl Related<super::project::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Project.def()
    }
}

impl Related<super::workstream::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Workstream.def()
    }
}

impl Related<super::launchpad_user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Owner.def()
    }
}

impl Related<super::milestone_checklist_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ChecklistItem.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
