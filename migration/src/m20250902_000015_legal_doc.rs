use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(LegalDoc::Table)
                    .if_not_exists()
                    .col(pk_auto(LegalDoc::Id))
                    .col(string(LegalDoc::Title))
                    .col(string(LegalDoc::DocType))
                    .col(string(LegalDoc::Status))
                    .col(string(LegalDoc::Version))
                    .col(text_null(LegalDoc::Content))
                    .col(string_null(LegalDoc::FileUrl))
                    .col(text_null(LegalDoc::Notes))
                    .col(timestamp(LegalDoc::CreatedAt))
                    .col(timestamp(LegalDoc::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(LegalDoc::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum LegalDoc {
    Table,
    Id,
    Title,
    DocType,
    Status,
    Version,
    Content,
    FileUrl,
    Notes,
    CreatedAt,
    UpdatedAt,
}
