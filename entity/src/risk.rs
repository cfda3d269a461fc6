use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "risk")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub probability: i32,
    pub impact: i32,
    #[sea_orm(column_type = "Text", nullable)]
    pub mitigation: Option<String>,
    pub status: String,
    pub owner_id: Option<i32>,
    pub workstream_id: Option<i32>,
    pub project_id: i32,
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

impl ActiveModelBehavior for ActiveModel {}
