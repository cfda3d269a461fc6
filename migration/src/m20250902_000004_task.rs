use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20250902_000001_launchpad_user::LaunchpadUser, m20250902_000002_project::Project,
    m20250902_000003_workstream::Workstream,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Task::Table)
                    .if_not_exists()
                    .col(pk_auto(Task::Id))
                    .col(string(Task::Title))
                    .col(text_null(Task::Description))
                    .col(string(Task::Status))
                    .col(string(Task::Priority))
                    .col(timestamp_null(Task::DueDate))
                    .col(text_null(Task::Tags))
                    .col(integer_null(Task::AssigneeId))
                    .col(integer_null(Task::WorkstreamId))
                    .col(integer(Task::ProjectId))
                    .col(integer(Task::CreatorId))
                    .col(timestamp_null(Task::CompletedAt))
                    .col(timestamp(Task::CreatedAt))
                    .col(timestamp(Task::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_task_project")
                            .from(Task::Table, Task::ProjectId)
                            .to(Project::Table, Project::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_task_workstream")
                            .from(Task::Table, Task::WorkstreamId)
                            .to(Workstream::Table, Workstream::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_task_assignee")
                            .from(Task::Table, Task::AssigneeId)
                            .to(LaunchpadUser::Table, LaunchpadUser::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_task_creator")
                            .from(Task::Table, Task::CreatorId)
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
            .drop_table(Table::drop().table(Task::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Task {
    Table,
    Id,
    Title,
    Description,
    Status,
    Priority,
    DueDate,
    Tags,
    AssigneeId,
    WorkstreamId,
    ProjectId,
    CreatorId,
    CompletedAt,
    CreatedAt,
    UpdatedAt,
}
