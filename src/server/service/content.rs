//! Marketing content items.
//!
//! Extraction happens client-side; the server stores the raw markup, the
//! extracted JSON summary, and the generated proposal markdown as delivered.

use sea_orm::DatabaseConnection;

use crate::{
    model::{
        content::{ContentItemDto, ContentItemFilter, ContentType, CreateContentItemDto},
        status::WorkflowStatus,
    },
    server::{
        data::content::{ContentItemListFilter, ContentItemRepository, NewContentItem},
        error::{validation::ValidationError, Error},
        model::{context::RequestContext, permission::Resource},
        service::validate,
        util::{payload, time},
    },
};

pub struct ContentItemService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ContentItemService<'a> {
    /// Creates a new instance of [`ContentItemService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        ctx: &RequestContext,
        dto: CreateContentItemDto,
    ) -> Result<ContentItemDto, Error> {
        ctx.require(Resource::Content)?;

        validate::require_non_empty("title", &dto.title)?;
        validate::require_non_empty("rawHtml", &dto.raw_html)?;
        let content_type =
            ContentType::parse(&dto.content_type).ok_or_else(|| ValidationError::InvalidValue {
                field: "type",
                value: dto.content_type.clone(),
            })?;

        let extracted_json = serde_json::to_string(&dto.extracted)
            .map_err(|e| Error::InternalError(format!("extracted encode: {e}")))?;
        let tags = match &dto.tags {
            None => None,
            Some(tags) => Some(payload::encode_tags(tags)?),
        };

        let repo = ContentItemRepository::new(self.db);
        let item = repo
            .create(
                NewContentItem {
                    title: dto.title,
                    content_type,
                    raw_html: dto.raw_html,
                    extracted_json,
                    markdown_proposal: dto.markdown_proposal,
                    tags,
                    status: WorkflowStatus::Done,
                },
                time::now(),
            )
            .await?;

        Self::to_dto(item)
    }

    pub async fn get(&self, item_id: i32) -> Result<ContentItemDto, Error> {
        let repo = ContentItemRepository::new(self.db);
        let item = repo.get(item_id).await?.ok_or(Error::NotFound {
            entity: "content item",
            id: item_id,
        })?;

        Self::to_dto(item)
    }

    /// Content items newest first.
    pub async fn list(&self, filter: ContentItemFilter) -> Result<Vec<ContentItemDto>, Error> {
        let content_type = match filter.content_type.as_deref() {
            None => None,
            Some(raw) => Some(ContentType::parse(raw).ok_or_else(|| {
                ValidationError::InvalidValue {
                    field: "type",
                    value: raw.to_string(),
                }
            })?),
        };
        let status = match filter.status.as_deref() {
            None => None,
            Some(raw) => Some(
                WorkflowStatus::parse(raw).ok_or_else(|| ValidationError::InvalidValue {
                    field: "status",
                    value: raw.to_string(),
                })?,
            ),
        };

        let repo = ContentItemRepository::new(self.db);
        let items = repo
            .list(ContentItemListFilter {
                content_type,
                status,
            })
            .await?;

        items.into_iter().map(Self::to_dto).collect()
    }

    pub async fn delete(&self, ctx: &RequestContext, item_id: i32) -> Result<(), Error> {
        ctx.require(Resource::Content)?;

        let repo = ContentItemRepository::new(self.db);
        let result = repo.delete(item_id).await?;

        if result.rows_affected == 0 {
            return Err(Error::NotFound {
                entity: "content item",
                id: item_id,
            });
        }

        Ok(())
    }

    fn to_dto(item: entity::content_item::Model) -> Result<ContentItemDto, Error> {
        let content_type = ContentType::parse(&item.content_type)
            .ok_or_else(|| Error::ParseError(format!("content type '{}'", item.content_type)))?;
        let status = WorkflowStatus::parse(&item.status)
            .ok_or_else(|| Error::ParseError(format!("content status '{}'", item.status)))?;

        // Stored extraction payloads fall back to null rather than failing reads
        let extracted =
            serde_json::from_str(&item.extracted_json).unwrap_or(serde_json::Value::Null);

        Ok(ContentItemDto {
            id: item.id,
            title: item.title,
            content_type,
            raw_html: item.raw_html,
            extracted,
            markdown_proposal: item.markdown_proposal,
            tags: payload::decode_tags(item.tags.as_deref()),
            status,
            created_at: item.created_at,
            updated_at: item.updated_at,
        })
    }
}
