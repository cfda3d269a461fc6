use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Runbook::Table)
                    .if_not_exists()
                    .col(pk_auto(Runbook::Id))
                    .col(string(Runbook::Title))
                    .col(string(Runbook::Kind))
                    .col(text(Runbook::Content))
                    .col(text_null(Runbook::Checklist))
                    .col(string(Runbook::Version))
                    .col(boolean(Runbook::IsActive))
                    .col(timestamp(Runbook::CreatedAt))
                    .col(timestamp(Runbook::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Runbook::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Runbook {
    Table,
    Id,
    Title,
    Kind,
    Content,
    Checklist,
    Version,
    IsActive,
    CreatedAt,
    UpdatedAt,
}
