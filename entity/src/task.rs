use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "task")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub status: String,
    pub priority: String,
    pub due_date: Option<DateTime>,
    /// JSON array of string tags.
    #[sea_orm(column_type = "Text", nullable)]
    pub tags: Option<String>,
    pub assignee_id: Option<i32>,
    pub workstream_id: Option<i32>,
    pub project_id: i32,
    pub creator_id: i32,
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
        from = "Column::AssigneeId",
        to = "super::launchpad_user::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    Assignee,
    #[sea_orm(
        belongs_to = "super::launchpad_user::Entity",
        from = "Column::CreatorId",
        to = "super::launchpad_user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Creator,
    #[sea_orm(has_many = "super::task_checklist_item::Entity")]
    ChecklistItem,
    #[sea_orm(has_many = "super::task_comment::Entity")]
    Comment,
    #[sea_orm(has_many = "super::task_attachment::Entity")]
    Attachment,
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

// Assignee is the canonical user relation; the creator is resolved explicitly.
impl Related<super::launchpad_user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assignee.def()
    }
}

impl Related<super::task_checklist_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ChecklistItem.def()
    }
}

impl Related<super::task_comment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comment.def()
    }
}

impl Related<super::task_attachment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Attachment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
