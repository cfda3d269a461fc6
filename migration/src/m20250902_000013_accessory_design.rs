use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AccessoryDesign::Table)
                    .if_not_exists()
                    .col(pk_auto(AccessoryDesign::Id))
                    .col(string(AccessoryDesign::Name))
                    .col(string(AccessoryDesign::Kind))
                    .col(text_null(AccessoryDesign::Description))
                    .col(string_null(AccessoryDesign::Materials))
                    .col(string_null(AccessoryDesign::Dimensions))
                    .col(string_null(AccessoryDesign::Branding))
                    .col(string_null(AccessoryDesign::Supplier))
                    .col(double_null(AccessoryDesign::UnitCost))
                    .col(string(AccessoryDesign::Currency))
                    .col(string_null(AccessoryDesign::LeadTime))
                    .col(string(AccessoryDesign::Status))
                    .col(timestamp(AccessoryDesign::CreatedAt))
                    .col(timestamp(AccessoryDesign::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AccessoryDesign::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum AccessoryDesign {
    Table,
    Id,
    Name,
    Kind,
    Description,
    Materials,
    Dimensions,
    Branding,
    Supplier,
    UnitCost,
    Currency,
    LeadTime,
    Status,
    CreatedAt,
    UpdatedAt,
}
