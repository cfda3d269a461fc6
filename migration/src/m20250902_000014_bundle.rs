use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Bundle::Table)
                    .if_not_exists()
                    .col(pk_auto(Bundle::Id))
                    .col(string(Bundle::Name))
                    .col(text_null(Bundle::Description))
                    .col(double_null(Bundle::TotalCost))
                    .col(string(Bundle::Currency))
                    .col(boolean(Bundle::IsStandard))
                    .col(string(Bundle::Status))
                    .col(timestamp(Bundle::CreatedAt))
                    .col(timestamp(Bundle::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Bundle::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Bundle {
    Table,
    Id,
    Name,
    Description,
    TotalCost,
    Currency,
    IsStandard,
    Status,
    CreatedAt,
    UpdatedAt,
}
