//! Milestone CRUD, completion toggling, and the dependency graph.
//!
//! Completion is a flag, not a status enum: the toggle flips the completion
//! timestamp between null and now. Dependency edges form a directed graph;
//! self-dependencies and edges that would close a cycle are rejected.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDateTime;
use sea_orm::DatabaseConnection;

use crate::{
    model::{
        milestone::{
            CreateDependencyDto, CreateMilestoneDto, MilestoneDetailDto, MilestoneDto,
            MilestoneFilter, MilestoneRefDto, MilestoneTiming, UpdateMilestoneDto,
        },
        task::{ChecklistItemDto, CreateChecklistItemDto},
    },
    server::{
        data::{
            milestone::{MilestoneChanges, MilestoneListFilter, MilestoneRepository, NewMilestone},
            project::ProjectRepository,
            workstream::WorkstreamRepository,
        },
        error::{validation::ValidationError, Error},
        model::{context::RequestContext, permission::Resource},
        service::{relations::RelationResolver, validate},
        util::time,
    },
};

/// Display classification from target date and completion flag.
pub fn timing(
    target_date: NaiveDateTime,
    completed_at: Option<NaiveDateTime>,
    now: NaiveDateTime,
) -> MilestoneTiming {
    if completed_at.is_some() {
        MilestoneTiming::Completed
    } else if target_date < now {
        MilestoneTiming::Overdue
    } else {
        MilestoneTiming::Upcoming
    }
}

pub struct MilestoneService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> MilestoneService<'a> {
    /// Creates a new instance of [`MilestoneService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        ctx: &RequestContext,
        dto: CreateMilestoneDto,
    ) -> Result<MilestoneDto, Error> {
        ctx.require(Resource::Milestones)?;

        validate::require_non_empty("title", &dto.title)?;
        let target_date = time::parse_datetime("targetDate", &dto.target_date)?;

        let project_repo = ProjectRepository::new(self.db);
        if project_repo.get(dto.project_id).await?.is_none() {
            return Err(Error::NotFound {
                entity: "project",
                id: dto.project_id,
            });
        }

        if let Some(workstream_id) = dto.workstream_id {
            self.check_workstream_project(workstream_id, dto.project_id)
                .await?;
        }

        let repo = MilestoneRepository::new(self.db);
        let milestone_order = match dto.order {
            Some(order) => order,
            // Append to the project's milestone sequence
            None => repo.count_by_project(dto.project_id).await? as i32 + 1,
        };

        let milestone = repo
            .create(
                NewMilestone {
                    title: dto.title,
                    description: dto.description,
                    target_date,
                    owner_id: dto.owner_id,
                    workstream_id: dto.workstream_id,
                    project_id: dto.project_id,
                    milestone_order,
                },
                time::now(),
            )
            .await?;

        self.to_dto(milestone).await
    }

    pub async fn get(&self, milestone_id: i32) -> Result<MilestoneDetailDto, Error> {
        let repo = MilestoneRepository::new(self.db);
        let milestone = repo.get(milestone_id).await?.ok_or(Error::NotFound {
            entity: "milestone",
            id: milestone_id,
        })?;

        let dependencies = self
            .edge_refs(repo.dependencies_of(milestone_id).await?, |e| e.depends_on_id)
            .await?;
        let dependents = self
            .edge_refs(repo.dependents_of(milestone_id).await?, |e| e.milestone_id)
            .await?;

        let milestone = self.to_dto(milestone).await?;

        Ok(MilestoneDetailDto {
            milestone,
            dependencies,
            dependents,
        })
    }

    pub async fn list(&self, filter: MilestoneFilter) -> Result<Vec<MilestoneDto>, Error> {
        let repo = MilestoneRepository::new(self.db);
        let milestones = repo
            .list(MilestoneListFilter {
                project_id: filter.project_id,
                workstream_id: filter.workstream_id,
                completed: filter.completed,
            })
            .await?;

        let mut resolver = RelationResolver::new(self.db);
        let mut dtos = Vec::with_capacity(milestones.len());
        for milestone in milestones {
            dtos.push(self.assemble(milestone, &mut resolver).await?);
        }

        Ok(dtos)
    }

    pub async fn update(
        &self,
        ctx: &RequestContext,
        milestone_id: i32,
        dto: UpdateMilestoneDto,
    ) -> Result<MilestoneDto, Error> {
        ctx.require(Resource::Milestones)?;

        if let Some(title) = &dto.title {
            validate::require_non_empty("title", title)?;
        }
        let target_date = match dto.target_date.as_deref() {
            None => None,
            Some(raw) => Some(time::parse_datetime("targetDate", raw)?),
        };

        let repo = MilestoneRepository::new(self.db);
        let existing = repo.get(milestone_id).await?.ok_or(Error::NotFound {
            entity: "milestone",
            id: milestone_id,
        })?;

        if let Some(Some(workstream_id)) = dto.workstream_id {
            self.check_workstream_project(workstream_id, existing.project_id)
                .await?;
        }

        let milestone = repo
            .update(
                milestone_id,
                MilestoneChanges {
                    title: dto.title,
                    description: dto.description,
                    target_date,
                    owner_id: dto.owner_id,
                    workstream_id: dto.workstream_id,
                    milestone_order: dto.order,
                },
                time::now(),
            )
            .await?
            .ok_or(Error::NotFound {
                entity: "milestone",
                id: milestone_id,
            })?;

        self.to_dto(milestone).await
    }

    /// Flips the completion flag: null becomes now, a set timestamp becomes
    /// null.
    pub async fn toggle_complete(
        &self,
        ctx: &RequestContext,
        milestone_id: i32,
    ) -> Result<MilestoneDto, Error> {
        ctx.require(Resource::Milestones)?;

        let now = time::now();
        let repo = MilestoneRepository::new(self.db);
        let existing = repo.get(milestone_id).await?.ok_or(Error::NotFound {
            entity: "milestone",
            id: milestone_id,
        })?;

        let completed_at = match existing.completed_at {
            Some(_) => None,
            None => Some(now),
        };

        let milestone = repo
            .set_completed_at(milestone_id, completed_at, now)
            .await?
            .ok_or(Error::NotFound {
                entity: "milestone",
                id: milestone_id,
            })?;

        self.to_dto(milestone).await
    }

    pub async fn delete(&self, ctx: &RequestContext, milestone_id: i32) -> Result<(), Error> {
        ctx.require(Resource::Milestones)?;

        let repo = MilestoneRepository::new(self.db);
        let result = repo.delete(milestone_id).await?;

        if result.rows_affected == 0 {
            return Err(Error::NotFound {
                entity: "milestone",
                id: milestone_id,
            });
        }

        Ok(())
    }

    /// Adds a dependency edge. Rejects self-dependencies and edges that
    /// would close a cycle in the graph.
    pub async fn add_dependency(
        &self,
        ctx: &RequestContext,
        milestone_id: i32,
        dto: CreateDependencyDto,
    ) -> Result<MilestoneDetailDto, Error> {
        ctx.require(Resource::Milestones)?;

        if dto.depends_on_id == milestone_id {
            return Err(ValidationError::InvalidValue {
                field: "dependsOnId",
                value: "a milestone cannot depend on itself".to_string(),
            }
            .into());
        }

        let repo = MilestoneRepository::new(self.db);
        for id in [milestone_id, dto.depends_on_id] {
            if repo.get(id).await?.is_none() {
                return Err(Error::NotFound {
                    entity: "milestone",
                    id,
                });
            }
        }

        let edges = repo.all_dependency_edges().await?;
        if Self::would_create_cycle(&edges, milestone_id, dto.depends_on_id) {
            return Err(ValidationError::InvalidValue {
                field: "dependsOnId",
                value: "dependency would create a cycle".to_string(),
            }
            .into());
        }

        repo.add_dependency(milestone_id, dto.depends_on_id, time::now())
            .await?;

        self.get(milestone_id).await
    }

    pub async fn remove_dependency(
        &self,
        ctx: &RequestContext,
        milestone_id: i32,
        depends_on_id: i32,
    ) -> Result<MilestoneDetailDto, Error> {
        ctx.require(Resource::Milestones)?;

        let repo = MilestoneRepository::new(self.db);
        let result = repo.delete_dependency(milestone_id, depends_on_id).await?;

        if result.rows_affected == 0 {
            return Err(Error::NotFound {
                entity: "milestone dependency",
                id: depends_on_id,
            });
        }

        self.get(milestone_id).await
    }

    pub async fn add_checklist_item(
        &self,
        ctx: &RequestContext,
        milestone_id: i32,
        dto: CreateChecklistItemDto,
    ) -> Result<ChecklistItemDto, Error> {
        ctx.require(Resource::Milestones)?;

        validate::require_non_empty("title", &dto.title)?;

        let repo = MilestoneRepository::new(self.db);
        if repo.get(milestone_id).await?.is_none() {
            return Err(Error::NotFound {
                entity: "milestone",
                id: milestone_id,
            });
        }

        let item_order = repo.count_checklist_items(milestone_id).await? as i32 + 1;
        let item = repo
            .add_checklist_item(milestone_id, dto.title, item_order, time::now())
            .await?;

        Ok(ChecklistItemDto {
            id: item.id,
            title: item.title,
            done: item.done,
            order: item.item_order,
        })
    }

    pub async fn set_checklist_item_done(
        &self,
        ctx: &RequestContext,
        item_id: i32,
        done: bool,
    ) -> Result<ChecklistItemDto, Error> {
        ctx.require(Resource::Milestones)?;

        let repo = MilestoneRepository::new(self.db);
        let item = repo
            .set_checklist_item_done(item_id, done)
            .await?
            .ok_or(Error::NotFound {
                entity: "checklist item",
                id: item_id,
            })?;

        Ok(ChecklistItemDto {
            id: item.id,
            title: item.title,
            done: item.done,
            order: item.item_order,
        })
    }

    pub async fn delete_checklist_item(
        &self,
        ctx: &RequestContext,
        item_id: i32,
    ) -> Result<(), Error> {
        ctx.require(Resource::Milestones)?;

        let repo = MilestoneRepository::new(self.db);
        let result = repo.delete_checklist_item(item_id).await?;

        if result.rows_affected == 0 {
            return Err(Error::NotFound {
                entity: "checklist item",
                id: item_id,
            });
        }

        Ok(())
    }

    /// Whether adding `milestone_id -> depends_on_id` closes a cycle, i.e.
    /// whether `milestone_id` is already reachable from `depends_on_id`
    /// along existing depends-on edges.
    fn would_create_cycle(
        edges: &[entity::milestone_dependency::Model],
        milestone_id: i32,
        depends_on_id: i32,
    ) -> bool {
        let mut adjacency: HashMap<i32, Vec<i32>> = HashMap::new();
        for edge in edges {
            adjacency
                .entry(edge.milestone_id)
                .or_default()
                .push(edge.depends_on_id);
        }

        let mut visited = HashSet::new();
        let mut stack = vec![depends_on_id];
        while let Some(current) = stack.pop() {
            if current == milestone_id {
                return true;
            }
            if !visited.insert(current) {
                continue;
            }
            if let Some(next) = adjacency.get(&current) {
                stack.extend(next);
            }
        }

        false
    }

    async fn edge_refs(
        &self,
        edges: Vec<entity::milestone_dependency::Model>,
        other_end: impl Fn(&entity::milestone_dependency::Model) -> i32,
    ) -> Result<Vec<MilestoneRefDto>, Error> {
        let repo = MilestoneRepository::new(self.db);

        let mut refs = Vec::with_capacity(edges.len());
        for edge in &edges {
            let id = other_end(edge);
            if let Some(milestone) = repo.get(id).await? {
                refs.push(MilestoneRefDto {
                    id: milestone.id,
                    title: milestone.title,
                });
            }
        }

        Ok(refs)
    }

    async fn check_workstream_project(
        &self,
        workstream_id: i32,
        project_id: i32,
    ) -> Result<(), Error> {
        let workstream_repo = WorkstreamRepository::new(self.db);
        let workstream = workstream_repo
            .get(workstream_id)
            .await?
            .ok_or(Error::NotFound {
                entity: "workstream",
                id: workstream_id,
            })?;

        if workstream.project_id != project_id {
            return Err(Error::Conflict(format!(
                "Workstream ID {} belongs to a different project",
                workstream_id
            )));
        }

        Ok(())
    }

    async fn to_dto(&self, milestone: entity::milestone::Model) -> Result<MilestoneDto, Error> {
        let mut resolver = RelationResolver::new(self.db);
        self.assemble(milestone, &mut resolver).await
    }

    async fn assemble(
        &self,
        milestone: entity::milestone::Model,
        resolver: &mut RelationResolver<'_, DatabaseConnection>,
    ) -> Result<MilestoneDto, Error> {
        let repo = MilestoneRepository::new(self.db);

        let checklist = repo
            .list_checklist_items(milestone.id)
            .await?
            .into_iter()
            .map(|item| ChecklistItemDto {
                id: item.id,
                title: item.title,
                done: item.done,
                order: item.item_order,
            })
            .collect();

        let dependency_count = repo.dependencies_of(milestone.id).await?.len() as u64;
        let dependent_count = repo.dependents_of(milestone.id).await?.len() as u64;

        Ok(MilestoneDto {
            id: milestone.id,
            title: milestone.title,
            description: milestone.description,
            target_date: milestone.target_date,
            timing: timing(milestone.target_date, milestone.completed_at, time::now()),
            project: resolver.project(milestone.project_id).await?,
            workstream: resolver.workstream(milestone.workstream_id).await?,
            owner: resolver.user(milestone.owner_id).await?,
            order: milestone.milestone_order,
            checklist,
            dependency_count,
            dependent_count,
            completed_at: milestone.completed_at,
            created_at: milestone.created_at,
            updated_at: milestone.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {

    mod timing {
        use chrono::Duration;

        use crate::{
            model::milestone::MilestoneTiming,
            server::{service::milestone::timing, util::time},
        };

        /// Expect completion to win over the target date
        #[test]
        fn completed_wins() {
            let now = time::now();

            assert_eq!(
                timing(now - Duration::days(1), Some(now), now),
                MilestoneTiming::Completed
            );
            assert_eq!(
                timing(now - Duration::days(1), None, now),
                MilestoneTiming::Overdue
            );
            assert_eq!(
                timing(now + Duration::days(1), None, now),
                MilestoneTiming::Upcoming
            );
        }
    }

    mod toggle {
        use launchpad_test_utils::prelude::*;

        use crate::{
            model::user::Role,
            server::{model::context::RequestContext, service::milestone::MilestoneService},
        };

        /// Expect the toggle to flip completedAt between null and set
        #[tokio::test]
        async fn flips_completed_at() -> Result<(), TestError> {
            let mut test = test_setup_with_core_tables!()?;
            let project = test.projects().insert_project("Market Launch").await?;
            let milestone = test
                .projects()
                .insert_milestone(project.id, None, "Pilot venue live")
                .await?;
            let pm = test.users().insert_user("pm@example.com", Role::Pm).await?;

            let service = MilestoneService::new(&test.state.db);
            let ctx = RequestContext::new(pm.id, Role::Pm);

            let completed = service.toggle_complete(&ctx, milestone.id).await.unwrap();
            assert!(completed.completed_at.is_some());

            let reopened = service.toggle_complete(&ctx, milestone.id).await.unwrap();
            assert!(reopened.completed_at.is_none());

            Ok(())
        }
    }

    mod create {
        use launchpad_test_utils::prelude::*;

        use crate::{
            model::{milestone::CreateMilestoneDto, user::Role},
            server::{model::context::RequestContext, service::milestone::MilestoneService},
        };

        /// Expect order to be assigned count + 1 when not supplied
        #[tokio::test]
        async fn assigns_next_order() -> Result<(), TestError> {
            let mut test = test_setup_with_core_tables!()?;
            let project = test.projects().insert_project("Market Launch").await?;
            test.projects()
                .insert_milestone(project.id, None, "Hardware selected")
                .await?;
            let pm = test.users().insert_user("pm@example.com", Role::Pm).await?;

            let service = MilestoneService::new(&test.state.db);
            let ctx = RequestContext::new(pm.id, Role::Pm);
            let milestone = service
                .create(
                    &ctx,
                    CreateMilestoneDto {
                        title: "Pilot venue live".to_string(),
                        description: None,
                        target_date: "2025-12-01".to_string(),
                        owner_id: None,
                        workstream_id: None,
                        project_id: project.id,
                        order: None,
                    },
                )
                .await
                .unwrap();

            assert_eq!(milestone.order, 2);

            Ok(())
        }
    }

    mod dependencies {
        use launchpad_test_utils::prelude::*;

        use crate::{
            model::{milestone::CreateDependencyDto, user::Role},
            server::{
                error::Error, model::context::RequestContext,
                service::milestone::MilestoneService,
            },
        };

        /// Expect a self-dependency to be rejected as validation failure
        #[tokio::test]
        async fn rejects_self_dependency() -> Result<(), TestError> {
            let mut test = test_setup_with_core_tables!()?;
            let project = test.projects().insert_project("Market Launch").await?;
            let milestone = test
                .projects()
                .insert_milestone(project.id, None, "Pilot venue live")
                .await?;
            let pm = test.users().insert_user("pm@example.com", Role::Pm).await?;

            let service = MilestoneService::new(&test.state.db);
            let ctx = RequestContext::new(pm.id, Role::Pm);
            let result = service
                .add_dependency(
                    &ctx,
                    milestone.id,
                    CreateDependencyDto {
                        depends_on_id: milestone.id,
                    },
                )
                .await;

            assert!(matches!(result, Err(Error::ValidationError(_))));

            Ok(())
        }

        /// Expect an edge that closes a cycle to be rejected
        #[tokio::test]
        async fn rejects_cycle() -> Result<(), TestError> {
            let mut test = test_setup_with_core_tables!()?;
            let project = test.projects().insert_project("Market Launch").await?;
            let first = test
                .projects()
                .insert_milestone(project.id, None, "Hardware selected")
                .await?;
            let second = test
                .projects()
                .insert_milestone(project.id, None, "Pilot venue live")
                .await?;
            let third = test
                .projects()
                .insert_milestone(project.id, None, "Full rollout")
                .await?;
            let pm = test.users().insert_user("pm@example.com", Role::Pm).await?;

            let service = MilestoneService::new(&test.state.db);
            let ctx = RequestContext::new(pm.id, Role::Pm);

            service
                .add_dependency(&ctx, second.id, CreateDependencyDto { depends_on_id: first.id })
                .await
                .unwrap();
            service
                .add_dependency(&ctx, third.id, CreateDependencyDto { depends_on_id: second.id })
                .await
                .unwrap();

            // first -> third would close first <- second <- third
            let result = service
                .add_dependency(&ctx, first.id, CreateDependencyDto { depends_on_id: third.id })
                .await;

            assert!(matches!(result, Err(Error::ValidationError(_))));

            Ok(())
        }
    }
}
