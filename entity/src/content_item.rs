use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "content_item")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub content_type: String,
    #[sea_orm(column_type = "Text")]
    pub raw_html: String,
    /// JSON document extracted from the raw markup.
    #[sea_orm(column_type = "Text")]
    pub extracted_json: String,
    #[sea_orm(column_type = "Text")]
    pub markdown_proposal: String,
    /// JSON array of string tags.
    #[sea_orm(column_type = "Text", nullable)]
    pub tags: Option<String>,
    pub status: String,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
