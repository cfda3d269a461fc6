//! Project CRUD and the project detail aggregates.
//!
//! Deleting a project removes its workstreams, tasks, milestones, and risks
//! through ON DELETE CASCADE foreign keys, so the cascade commits atomically
//! with the project row itself.

use sea_orm::DatabaseConnection;

use crate::{
    model::{
        project::{
            CreateProjectDto, MilestoneRollupDto, ProjectDetailDto, ProjectDto, ProjectSummaryDto,
            TaskStatusRollupDto, UpdateProjectDto,
        },
        status::WorkflowStatus,
        workstream::WorkstreamDto,
    },
    server::{
        data::{
            milestone::{MilestoneListFilter, MilestoneRepository},
            project::{NewProject, ProjectChanges, ProjectRepository},
            risk::{RiskListFilter, RiskRepository},
            task::{TaskListFilter, TaskRepository},
            workstream::WorkstreamRepository,
        },
        error::Error,
        model::{context::RequestContext, permission::Resource},
        service::validate,
        util::time,
    },
};

pub struct ProjectService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ProjectService<'a> {
    /// Creates a new instance of [`ProjectService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        ctx: &RequestContext,
        dto: CreateProjectDto,
    ) -> Result<ProjectDto, Error> {
        ctx.require(Resource::Projects)?;

        validate::require_non_empty("name", &dto.name)?;
        let status = validate::parse_status("status", dto.status.as_deref(), WorkflowStatus::Todo)?;
        let target_date = match dto.target_date.as_deref() {
            None => None,
            Some(raw) => Some(time::parse_datetime("targetDate", raw)?),
        };

        let repo = ProjectRepository::new(self.db);
        let project = repo
            .create(
                NewProject {
                    name: dto.name,
                    description: dto.description,
                    target_date,
                    status,
                },
                time::now(),
            )
            .await?;

        Self::to_dto(project)
    }

    pub async fn list(&self) -> Result<Vec<ProjectDto>, Error> {
        let repo = ProjectRepository::new(self.db);
        let projects = repo.list().await?;

        projects.into_iter().map(Self::to_dto).collect()
    }

    /// Project with workstream summaries and task/milestone rollups.
    pub async fn get(&self, project_id: i32) -> Result<ProjectDetailDto, Error> {
        let repo = ProjectRepository::new(self.db);
        let project = repo.get(project_id).await?.ok_or(Error::NotFound {
            entity: "project",
            id: project_id,
        })?;

        let workstream_repo = WorkstreamRepository::new(self.db);
        let task_repo = TaskRepository::new(self.db);
        let milestone_repo = MilestoneRepository::new(self.db);
        let risk_repo = RiskRepository::new(self.db);

        let workstreams = workstream_repo.list(Some(project_id)).await?;
        let mut workstream_dtos = Vec::with_capacity(workstreams.len());
        for workstream in workstreams {
            let task_count = task_repo
                .list(TaskListFilter {
                    workstream_id: Some(workstream.id),
                    ..Default::default()
                })
                .await?
                .len() as u64;
            let milestone_count = milestone_repo
                .list(MilestoneListFilter {
                    workstream_id: Some(workstream.id),
                    ..Default::default()
                })
                .await?
                .len() as u64;
            let risk_count = risk_repo
                .list(RiskListFilter {
                    workstream_id: Some(workstream.id),
                    ..Default::default()
                })
                .await?
                .len() as u64;

            workstream_dtos.push(WorkstreamDto {
                id: workstream.id,
                name: workstream.name,
                description: workstream.description,
                objectives: workstream.objectives,
                project: ProjectSummaryDto {
                    id: project.id,
                    name: project.name.clone(),
                },
                task_count,
                milestone_count,
                risk_count,
                created_at: workstream.created_at,
                updated_at: workstream.updated_at,
            });
        }

        let tasks = task_repo
            .list(TaskListFilter {
                project_id: Some(project_id),
                ..Default::default()
            })
            .await?;
        let mut rollup = TaskStatusRollupDto {
            total: tasks.len() as u64,
            backlog: 0,
            todo: 0,
            in_progress: 0,
            blocked: 0,
            done: 0,
        };
        for task in &tasks {
            match WorkflowStatus::parse(&task.status) {
                Some(WorkflowStatus::Backlog) => rollup.backlog += 1,
                Some(WorkflowStatus::Todo) => rollup.todo += 1,
                Some(WorkflowStatus::InProgress) => rollup.in_progress += 1,
                Some(WorkflowStatus::Blocked) => rollup.blocked += 1,
                Some(WorkflowStatus::Done) => rollup.done += 1,
                None => {}
            }
        }

        let milestones = milestone_repo
            .list(MilestoneListFilter {
                project_id: Some(project_id),
                ..Default::default()
            })
            .await?;
        let milestone_rollup = MilestoneRollupDto {
            total: milestones.len() as u64,
            completed: milestones.iter().filter(|m| m.completed_at.is_some()).count() as u64,
        };

        Ok(ProjectDetailDto {
            project: Self::to_dto(project)?,
            workstreams: workstream_dtos,
            tasks: rollup,
            milestones: milestone_rollup,
        })
    }

    pub async fn update(
        &self,
        ctx: &RequestContext,
        project_id: i32,
        dto: UpdateProjectDto,
    ) -> Result<ProjectDto, Error> {
        ctx.require(Resource::Projects)?;

        if let Some(name) = &dto.name {
            validate::require_non_empty("name", name)?;
        }
        let status = match dto.status.as_deref() {
            None => None,
            Some(raw) => Some(validate::parse_status(
                "status",
                Some(raw),
                WorkflowStatus::Todo,
            )?),
        };
        let target_date = match dto.target_date {
            None => None,
            Some(None) => Some(None),
            Some(Some(raw)) => Some(Some(time::parse_datetime("targetDate", &raw)?)),
        };

        let repo = ProjectRepository::new(self.db);
        let project = repo
            .update(
                project_id,
                ProjectChanges {
                    name: dto.name,
                    description: dto.description,
                    target_date,
                    status,
                },
                time::now(),
            )
            .await?
            .ok_or(Error::NotFound {
                entity: "project",
                id: project_id,
            })?;

        Self::to_dto(project)
    }

    pub async fn delete(&self, ctx: &RequestContext, project_id: i32) -> Result<(), Error> {
        ctx.require(Resource::Projects)?;

        let repo = ProjectRepository::new(self.db);
        let result = repo.delete(project_id).await?;

        if result.rows_affected == 0 {
            return Err(Error::NotFound {
                entity: "project",
                id: project_id,
            });
        }

        Ok(())
    }

    fn to_dto(project: entity::project::Model) -> Result<ProjectDto, Error> {
        let status = WorkflowStatus::parse(&project.status)
            .ok_or_else(|| Error::ParseError(format!("project status '{}'", project.status)))?;

        Ok(ProjectDto {
            id: project.id,
            name: project.name,
            description: project.description,
            target_date: project.target_date,
            status,
            created_at: project.created_at,
            updated_at: project.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {

    mod get {
        use launchpad_test_utils::prelude::*;

        use crate::{model::user::Role, server::service::project::ProjectService};

        /// Expect detail rollups to count tasks by status and milestones by
        /// completion
        #[tokio::test]
        async fn aggregates_rollups() -> Result<(), TestError> {
            let mut test = test_setup_with_core_tables!()?;
            let project = test.projects().insert_project("Market Launch").await?;
            let workstream = test
                .projects()
                .insert_workstream(project.id, "Hardware")
                .await?;
            let pm = test.users().insert_user("pm@example.com", Role::Pm).await?;
            test.projects()
                .insert_task(project.id, Some(workstream.id), pm.id, "Order devices")
                .await?;
            test.projects()
                .insert_task(project.id, None, pm.id, "Draft pricing")
                .await?;
            test.projects()
                .insert_milestone(project.id, None, "Pilot venue live")
                .await?;

            let service = ProjectService::new(&test.state.db);
            let detail = service.get(project.id).await.unwrap();

            assert_eq!(detail.workstreams.len(), 1);
            assert_eq!(detail.workstreams[0].task_count, 1);
            assert_eq!(detail.tasks.total, 2);
            assert_eq!(detail.tasks.backlog, 2);
            assert_eq!(detail.milestones.total, 1);
            assert_eq!(detail.milestones.completed, 0);

            Ok(())
        }
    }

    mod delete {
        use launchpad_test_utils::prelude::*;
        use sea_orm::EntityTrait;

        use crate::{
            model::user::Role,
            server::{model::context::RequestContext, service::project::ProjectService},
        };

        /// Expect the end-to-end cascade: project delete removes the
        /// workstream and risk created under it
        #[tokio::test]
        async fn removes_owned_graph() -> Result<(), TestError> {
            let mut test = test_setup_with_core_tables!()?;
            let project = test.projects().insert_project("Launch").await?;
            let workstream = test
                .projects()
                .insert_workstream(project.id, "Hardware")
                .await?;
            let risk = test
                .projects()
                .insert_risk(project.id, Some(workstream.id), "Customs delay", 3, 5)
                .await?;
            let pm = test.users().insert_user("pm@example.com", Role::Pm).await?;

            let service = ProjectService::new(&test.state.db);
            let ctx = RequestContext::new(pm.id, Role::Pm);
            service.delete(&ctx, project.id).await.unwrap();

            assert!(entity::prelude::Workstream::find_by_id(workstream.id)
                .one(&test.state.db)
                .await?
                .is_none());
            assert!(entity::prelude::Risk::find_by_id(risk.id)
                .one(&test.state.db)
                .await?
                .is_none());

            Ok(())
        }
    }
}
