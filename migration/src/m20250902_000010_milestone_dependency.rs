use sea_orm_migration::{prelude::*, schema::*};

use super::m20250902_000008_milestone::Milestone;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MilestoneDependency::Table)
                    .if_not_exists()
                    .col(pk_auto(MilestoneDependency::Id))
                    .col(integer(MilestoneDependency::MilestoneId))
                    .col(integer(MilestoneDependency::DependsOnId))
                    .col(timestamp(MilestoneDependency::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_milestone_dependency_milestone")
                            .from(MilestoneDependency::Table, MilestoneDependency::MilestoneId)
                            .to(Milestone::Table, Milestone::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_milestone_dependency_depends_on")
                            .from(MilestoneDependency::Table, MilestoneDependency::DependsOnId)
                            .to(Milestone::Table, Milestone::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .index(
                        Index::create()
                            .name("idx_milestone_dependency_edge")
                            .col(MilestoneDependency::MilestoneId)
                            .col(MilestoneDependency::DependsOnId)
                            .unique(),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MilestoneDependency::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum MilestoneDependency {
    Table,
    Id,
    MilestoneId,
    DependsOnId,
    CreatedAt,
}
