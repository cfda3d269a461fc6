use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(LaunchpadUser::Table)
                    .if_not_exists()
                    .col(pk_auto(LaunchpadUser::Id))
                    .col(string_uniq(LaunchpadUser::Email))
                    .col(string(LaunchpadUser::Name))
                    .col(string(LaunchpadUser::PasswordHash))
                    .col(string(LaunchpadUser::Role))
                    .col(timestamp(LaunchpadUser::CreatedAt))
                    .col(timestamp(LaunchpadUser::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(LaunchpadUser::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum LaunchpadUser {
    Table,
    Id,
    Email,
    Name,
    PasswordHash,
    Role,
    CreatedAt,
    UpdatedAt,
}
