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
                    .table(TaskAttachment::Table)
                    .if_not_exists()
                    .col(pk_auto(TaskAttachment::Id))
                    .col(integer(TaskAttachment::TaskId))
                    .col(string(TaskAttachment::FileName))
                    .col(string(TaskAttachment::Url))
                    .col(timestamp(TaskAttachment::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_task_attachment_task")
                            .from(TaskAttachment::Table, TaskAttachment::TaskId)
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
            .drop_table(Table::drop().table(TaskAttachment::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum TaskAttachment {
    Table,
    Id,
    TaskId,
    FileName,
    Url,
    CreatedAt,
}
