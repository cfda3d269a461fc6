use sea_orm_migration::{prelude::*, schema::*};

use super::{m20250902_000001_launchpad_user::LaunchpadUser, m20250902_000004_task::Task};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TaskComment::Table)
                    .if_not_exists()
                    .col(pk_auto(TaskComment::Id))
                    .col(integer(TaskComment::TaskId))
                    .col(integer(TaskComment::AuthorId))
                    .col(text(TaskComment::Body))
                    .col(timestamp(TaskComment::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_task_comment_task")
                            .from(TaskComment::Table, TaskComment::TaskId)
                            .to(Task::Table, Task::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_task_comment_author")
                            .from(TaskComment::Table, TaskComment::AuthorId)
                            .to(LaunchpadUser::Table, LaunchpadUser::Id)
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
            .drop_table(Table::drop().table(TaskComment::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum TaskComment {
    Table,
    Id,
    TaskId,
    AuthorId,
    Body,
    CreatedAt,
}
