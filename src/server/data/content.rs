use chrono::NaiveDateTime;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, DeleteResult, EntityTrait,
    QueryFilter, QueryOrder,
};

use crate::model::{content::ContentType, status::WorkflowStatus};

pub struct NewContentItem {
    pub title: String,
    pub content_type: ContentType,
    pub raw_html: String,
    pub extracted_json: String,
    pub markdown_proposal: String,
    pub tags: Option<String>,
    pub status: WorkflowStatus,
}

#[derive(Default)]
pub struct ContentItemListFilter {
    pub content_type: Option<ContentType>,
    pub status: Option<WorkflowStatus>,
}

pub struct ContentItemRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ContentItemRepository<'a, C> {
    /// Creates a new instance of [`ContentItemRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        new: NewContentItem,
        now: NaiveDateTime,
    ) -> Result<entity::content_item::Model, DbErr> {
        let item = entity::content_item::ActiveModel {
            title: ActiveValue::Set(new.title),
            content_type: ActiveValue::Set(new.content_type.as_str().to_string()),
            raw_html: ActiveValue::Set(new.raw_html),
            extracted_json: ActiveValue::Set(new.extracted_json),
            markdown_proposal: ActiveValue::Set(new.markdown_proposal),
            tags: ActiveValue::Set(new.tags),
            status: ActiveValue::Set(new.status.as_str().to_string()),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        item.insert(self.db).await
    }

    pub async fn get(&self, item_id: i32) -> Result<Option<entity::content_item::Model>, DbErr> {
        entity::prelude::ContentItem::find_by_id(item_id)
            .one(self.db)
            .await
    }

    /// Content items newest first.
    pub async fn list(
        &self,
        filter: ContentItemListFilter,
    ) -> Result<Vec<entity::content_item::Model>, DbErr> {
        let mut query = entity::prelude::ContentItem::find()
            .order_by_desc(entity::content_item::Column::CreatedAt);

        if let Some(content_type) = filter.content_type {
            query = query
                .filter(entity::content_item::Column::ContentType.eq(content_type.as_str()));
        }
        if let Some(status) = filter.status {
            query = query.filter(entity::content_item::Column::Status.eq(status.as_str()));
        }

        query.all(self.db).await
    }

    pub async fn delete(&self, item_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::ContentItem::delete_by_id(item_id)
            .exec(self.db)
            .await
    }
}
