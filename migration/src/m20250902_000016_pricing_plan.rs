use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PricingPlan::Table)
                    .if_not_exists()
                    .col(pk_auto(PricingPlan::Id))
                    .col(string(PricingPlan::Name))
                    .col(text_null(PricingPlan::Description))
                    .col(string_null(PricingPlan::HardwareModel))
                    .col(double_null(PricingPlan::SetupFee))
                    .col(double_null(PricingPlan::MonthlyFee))
                    .col(double_null(PricingPlan::TransactionFee))
                    .col(string(PricingPlan::FeeType))
                    .col(string(PricingPlan::Currency))
                    .col(text_null(PricingPlan::Inclusions))
                    .col(string_null(PricingPlan::SlaLevel))
                    .col(string_null(PricingPlan::SupportHours))
                    .col(boolean(PricingPlan::IsActive))
                    .col(integer(PricingPlan::DisplayOrder))
                    .col(timestamp(PricingPlan::CreatedAt))
                    .col(timestamp(PricingPlan::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PricingPlan::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum PricingPlan {
    Table,
    Id,
    Name,
    Description,
    HardwareModel,
    SetupFee,
    MonthlyFee,
    TransactionFee,
    FeeType,
    Currency,
    Inclusions,
    SlaLevel,
    SupportHours,
    IsActive,
    DisplayOrder,
    CreatedAt,
    UpdatedAt,
}
