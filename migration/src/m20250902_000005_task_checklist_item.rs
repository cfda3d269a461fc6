use sea_orm_migration::{prelude::*, schema::*};

use super::m20250902_000004_task::Task;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TaskChecklistItem::Table)
                    .if_not_exists()
                    .col(pk_auto(TaskChecklistItem::Id))
                    .col(integer(TaskChecklistItem::TaskId))
                    .col(string(TaskChecklistItem::Title))
                    .col(boolean(TaskChecklistItem::Done))
                    .col(integer(TaskChecklistItem::ItemOrder))
                    .col(timestamp(TaskChecklistItem::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_task_checklist_item_task")
                            .from(TaskChecklistItem::Table, TaskChecklistItem::TaskId)
                            .to(Task::Table, Task::Id)
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
            .drop_table(Table::drop().table(TaskChecklistItem::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum TaskChecklistItem {
    Table,
    Id,
    TaskId,
    Title,
    Done,
    ItemOrder,
    CreatedAt,
}
