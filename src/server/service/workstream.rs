//! Workstream CRUD.
//!
//! Deleting a workstream keeps its tasks, milestones, and risks; their
//! workstream references are nulled by ON DELETE SET NULL foreign keys.

use sea_orm::DatabaseConnection;

use crate::{
    model::workstream::{CreateWorkstreamDto, UpdateWorkstreamDto, WorkstreamDto},
    server::{
        data::{
            milestone::{MilestoneListFilter, MilestoneRepository},
            project::ProjectRepository,
            risk::{RiskListFilter, RiskRepository},
            task::{TaskListFilter, TaskRepository},
            workstream::{NewWorkstream, WorkstreamChanges, WorkstreamRepository},
        },
        error::Error,
        model::{context::RequestContext, permission::Resource},
        service::{relations::RelationResolver, validate},
        util::time,
    },
};

pub struct WorkstreamService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> WorkstreamService<'a> {
    /// Creates a new instance of [`WorkstreamService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        ctx: &RequestContext,
        dto: CreateWorkstreamDto,
    ) -> Result<WorkstreamDto, Error> {
        ctx.require(Resource::Projects)?;

        validate::require_non_empty("name", &dto.name)?;

        let project_repo = ProjectRepository::new(self.db);
        if project_repo.get(dto.project_id).await?.is_none() {
            return Err(Error::NotFound {
                entity: "project",
                id: dto.project_id,
            });
        }

        let repo = WorkstreamRepository::new(self.db);
        let workstream = repo
            .create(
                NewWorkstream {
                    name: dto.name,
                    description: dto.description,
                    objectives: dto.objectives,
                    project_id: dto.project_id,
                },
                time::now(),
            )
            .await?;

        self.to_dto(workstream).await
    }

    pub async fn get(&self, workstream_id: i32) -> Result<WorkstreamDto, Error> {
        let repo = WorkstreamRepository::new(self.db);
        let workstream = repo.get(workstream_id).await?.ok_or(Error::NotFound {
            entity: "workstream",
            id: workstream_id,
        })?;

        self.to_dto(workstream).await
    }

    pub async fn list(&self, project_id: Option<i32>) -> Result<Vec<WorkstreamDto>, Error> {
        let repo = WorkstreamRepository::new(self.db);
        let workstreams = repo.list(project_id).await?;

        let mut resolver = RelationResolver::new(self.db);
        let mut dtos = Vec::with_capacity(workstreams.len());
        for workstream in workstreams {
            dtos.push(self.assemble(workstream, &mut resolver).await?);
        }

        Ok(dtos)
    }

    pub async fn update(
        &self,
        ctx: &RequestContext,
        workstream_id: i32,
        dto: UpdateWorkstreamDto,
    ) -> Result<WorkstreamDto, Error> {
        ctx.require(Resource::Projects)?;

        if let Some(name) = &dto.name {
            validate::require_non_empty("name", name)?;
        }

        let repo = WorkstreamRepository::new(self.db);
        let workstream = repo
            .update(
                workstream_id,
                WorkstreamChanges {
                    name: dto.name,
                    description: dto.description,
                    objectives: dto.objectives,
                },
                time::now(),
            )
            .await?
            .ok_or(Error::NotFound {
                entity: "workstream",
                id: workstream_id,
            })?;

        self.to_dto(workstream).await
    }

    pub async fn delete(&self, ctx: &RequestContext, workstream_id: i32) -> Result<(), Error> {
        ctx.require(Resource::Projects)?;

        let repo = WorkstreamRepository::new(self.db);
        let result = repo.delete(workstream_id).await?;

        if result.rows_affected == 0 {
            return Err(Error::NotFound {
                entity: "workstream",
                id: workstream_id,
            });
        }

        Ok(())
    }

    async fn to_dto(&self, workstream: entity::workstream::Model) -> Result<WorkstreamDto, Error> {
        let mut resolver = RelationResolver::new(self.db);
        self.assemble(workstream, &mut resolver).await
    }

    async fn assemble(
        &self,
        workstream: entity::workstream::Model,
        resolver: &mut RelationResolver<'_, DatabaseConnection>,
    ) -> Result<WorkstreamDto, Error> {
        let task_count = TaskRepository::new(self.db)
            .list(TaskListFilter {
                workstream_id: Some(workstream.id),
                ..Default::default()
            })
            .await?
            .len() as u64;
        let milestone_count = MilestoneRepository::new(self.db)
            .list(MilestoneListFilter {
                workstream_id: Some(workstream.id),
                ..Default::default()
            })
            .await?
            .len() as u64;
        let risk_count = RiskRepository::new(self.db)
            .list(RiskListFilter {
                workstream_id: Some(workstream.id),
                ..Default::default()
            })
            .await?
            .len() as u64;

        Ok(WorkstreamDto {
            id: workstream.id,
            name: workstream.name,
            description: workstream.description,
            objectives: workstream.objectives,
            project: resolver.project(workstream.project_id).await?,
            task_count,
            milestone_count,
            risk_count,
            created_at: workstream.created_at,
            updated_at: workstream.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {

    mod delete {
        use launchpad_test_utils::prelude::*;
        use sea_orm::EntityTrait;

        use crate::{
            model::user::Role,
            server::{model::context::RequestContext, service::workstream::WorkstreamService},
        };

        /// Expect deleting a workstream to keep children with a nulled
        /// workstream reference
        #[tokio::test]
        async fn nulls_child_references() -> Result<(), TestError> {
            let mut test = test_setup_with_core_tables!()?;
            let project = test.projects().insert_project("Market Launch").await?;
            let workstream = test
                .projects()
                .insert_workstream(project.id, "Hardware")
                .await?;
            let pm = test.users().insert_user("pm@example.com", Role::Pm).await?;
            let task = test
                .projects()
                .insert_task(project.id, Some(workstream.id), pm.id, "Order devices")
                .await?;
            let risk = test
                .projects()
                .insert_risk(project.id, Some(workstream.id), "Customs delay", 3, 4)
                .await?;

            let service = WorkstreamService::new(&test.state.db);
            let ctx = RequestContext::new(pm.id, Role::Pm);
            service.delete(&ctx, workstream.id).await.unwrap();

            let task = entity::prelude::Task::find_by_id(task.id)
                .one(&test.state.db)
                .await?
                .unwrap();
            let risk = entity::prelude::Risk::find_by_id(risk.id)
                .one(&test.state.db)
                .await?
                .unwrap();

            assert!(task.workstream_id.is_none());
            assert!(risk.workstream_id.is_none());

            Ok(())
        }
    }
}
