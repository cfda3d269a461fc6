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
                    .table(Risk::Table)
                    .if_not_exists()
                    .col(pk_auto(Risk::Id))
                    .col(string(Risk::Title))
                    .col(text_null(Risk::Description))
                    .col(integer(Risk::Probability))
                    .col(integer(Risk::Impact))
                    .col(text_null(Risk::Mitigation))
                    .col(string(Risk::Status))
                    .col(integer_null(Risk::OwnerId))
                    .col(integer_null(Risk::WorkstreamId))
                    .col(integer(Risk::ProjectId))
                    .col(timestamp(Risk::CreatedAt))
                    .col(timestamp(Risk::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_risk_project")
                            .from(Risk::Table, Risk::ProjectId)
                            .to(Project::Table, Project::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_risk_workstream")
                            .from(Risk::Table, Risk::WorkstreamId)
                            .to(Workstream::Table, Workstream::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_risk_owner")
                            .from(Risk::Table, Risk::OwnerId)
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
            .drop_table(Table::drop().table(Risk::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Risk {
    Table,
    Id,
    Title,
    Description,
    Probability,
    Impact,
    Mitigation,
    Status,
    OwnerId,
    WorkstreamId,
    ProjectId,
    CreatedAt,
    UpdatedAt,
}
