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
                    .table(MilestoneChecklistItem::Table)
                    .if_not_exists()
                    .col(pk_auto(MilestoneChecklistItem::Id))
                    .col(integer(MilestoneChecklistItem::MilestoneId))
                    .col(string(MilestoneChecklistItem::Title))
                    .col(boolean(MilestoneChecklistItem::Done))
                    .col(integer(MilestoneChecklistItem::ItemOrder))
                    .col(timestamp(MilestoneChecklistItem::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_milestone_checklist_item_milestone")
                            .from(
                                MilestoneChecklistItem::Table,
                                MilestoneChecklistItem::MilestoneId,
                            )
                            .to(Milestone::Table, Milestone::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(MilestoneChecklistItem::Table)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum MilestoneChecklistItem {
    Table,
    Id,
    MilestoneId,
    Title,
    Done,
    ItemOrder,
    CreatedAt,
}
