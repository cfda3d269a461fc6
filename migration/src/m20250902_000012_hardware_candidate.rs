use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(HardwareCandidate::Table)
                    .if_not_exists()
                    .col(pk_auto(HardwareCandidate::Id))
                    .col(string(HardwareCandidate::Name))
                    .col(string_null(HardwareCandidate::Brand))
                    .col(string_null(HardwareCandidate::Model))
                    .col(double_null(HardwareCandidate::Price))
                    .col(string(HardwareCandidate::Currency))
                    .col(string_null(HardwareCandidate::Availability))
                    .col(text_null(HardwareCandidate::Specs))
                    .col(text_null(HardwareCandidate::Constraints))
                    .col(text_null(HardwareCandidate::FieldNotes))
                    .col(integer_null(HardwareCandidate::Score))
                    .col(string_null(HardwareCandidate::Recommendation))
                    .col(string(HardwareCandidate::Status))
                    .col(timestamp(HardwareCandidate::CreatedAt))
                    .col(timestamp(HardwareCandidate::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(HardwareCandidate::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum HardwareCandidate {
    Table,
    Id,
    Name,
    Brand,
    Model,
    Price,
    Currency,
    Availability,
    Specs,
    Constraints,
    FieldNotes,
    Score,
    Recommendation,
    Status,
    CreatedAt,
    UpdatedAt,
}
