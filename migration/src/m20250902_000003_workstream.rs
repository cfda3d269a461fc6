use sea_orm_migration::{prelude::*, schema::*};

use super::m20250902_000002_project::Project;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Workstream::Table)
                    .if_not_exists()
                    .col(pk_auto(Workstream::Id))
                    .col(string(Workstream::Name))
                    .col(text_null(Workstream::Description))
                    .col(text_null(Workstream::Objectives))
                    .col(integer(Workstream::ProjectId))
                    .col(timestamp(Workstream::CreatedAt))
                    .col(timestamp(Workstream::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_workstream_project")
                            .from(Workstream::Table, Workstream::ProjectId)
                            .to(Project::Table, Project::Id)
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
            .drop_table(Table::drop().table(Workstream::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Workstream {
    Table,
    Id,
    Name,
    Description,
    Objectives,
    ProjectId,
    CreatedAt,
    UpdatedAt,
}
