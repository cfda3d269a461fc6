use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RewardRule::Table)
                    .if_not_exists()
                    .col(pk_auto(RewardRule::Id))
                    .col(string(RewardRule::Name))
                    .col(string(RewardRule::RuleType))
                    .col(text_null(RewardRule::Description))
                    .col(text_null(RewardRule::Formula))
                    .col(double_null(RewardRule::MinThreshold))
                    .col(double_null(RewardRule::MaxThreshold))
                    .col(double_null(RewardRule::CapPerDay))
                    .col(double_null(RewardRule::CapPerMonth))
                    .col(text_null(RewardRule::Conditions))
                    .col(boolean(RewardRule::IsActive))
                    .col(string_null(RewardRule::TestPeriod))
                    .col(string_null(RewardRule::TestLocation))
                    .col(timestamp(RewardRule::CreatedAt))
                    .col(timestamp(RewardRule::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RewardRule::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum RewardRule {
    Table,
    Id,
    Name,
    RuleType,
    Description,
    Formula,
    MinThreshold,
    MaxThreshold,
    CapPerDay,
    CapPerMonth,
    Conditions,
    IsActive,
    TestPeriod,
    TestLocation,
    CreatedAt,
    UpdatedAt,
}
