use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ContentItem::Table)
                    .if_not_exists()
                    .col(pk_auto(ContentItem::Id))
                    .col(string(ContentItem::Title))
                    .col(string(ContentItem::ContentType))
                    .col(text(ContentItem::RawHtml))
                    .col(text(ContentItem::ExtractedJson))
                    .col(text(ContentItem::MarkdownProposal))
                    .col(text_null(ContentItem::Tags))
                    .col(string(ContentItem::Status))
                    .col(timestamp(ContentItem::CreatedAt))
                    .col(timestamp(ContentItem::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ContentItem::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum ContentItem {
    Table,
    Id,
    Title,
    ContentType,
    RawHtml,
    ExtractedJson,
    MarkdownProposal,
    Tags,
    Status,
    CreatedAt,
    UpdatedAt,
}
