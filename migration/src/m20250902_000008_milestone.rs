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
                    .table(Milestone::Table)
                    .if_not_exists()
                    .col(pk_auto(Milestone::Id))
                    .col(string(Milestone::Title))
                    .col(text_null(Milestone::Description))
                    .col(timestamp(Milestone::TargetDate))
                    .col(integer_null(Milestone::OwnerId))
                    .col(integer_null(Milestone::WorkstreamId))
                    .col(integer(Milestone::ProjectId))
                    .col(integer(Milestone::MilestoneOrder))
                    .col(timestamp_null(Milestone::CompletedAt))
                    .col(timestamp(Milestone::CreatedAt))
                    .col(timestamp(Milestone::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_milestone_project")
                            .from(Milestone::Table, Milestone::ProjectId)
                            .to(Project::Table, Project::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_milestone_workstream")
                            .from(Milestone::Table, Milestone::WorkstreamId)
                            .to(Workstream::Table, Workstream::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_milestone_owner")
                            .from(Milestone::Table, Milestone::OwnerId)
                            .to(LaunchpadUser::Table, LaunchpadUser::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Milestone::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Milestone {
    Table,
    Id,
    Title,
    Description,
    TargetDate,
    OwnerId,
    WorkstreamId,
    ProjectId,
    MilestoneOrder,
    CompletedAt,
    CreatedAt,
    UpdatedAt,
}
