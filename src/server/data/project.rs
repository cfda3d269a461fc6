use chrono::NaiveDateTime;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ConnectionTrait, DbErr, DeleteResult, EntityTrait,
    IntoActiveModel, QueryOrder,
};

use crate::model::status::WorkflowStatus;

pub struct NewProject {
    pub name: String,
    pub description: Option<String>,
    pub target_date: Option<NaiveDateTime>,
    pub status: WorkflowStatus,
}

/// Partial update; `None` leaves the field untouched, inner `None` clears it.
#[derive(Default)]
pub struct ProjectChanges {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub target_date: Option<Option<NaiveDateTime>>,
    pub status: Option<WorkflowStatus>,
}

pub struct ProjectRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ProjectRepository<'a, C> {
    /// Creates a new instance of [`ProjectRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        new: NewProject,
        now: NaiveDateTime,
    ) -> Result<entity::project::Model, DbErr> {
        let project = entity::project::ActiveModel {
            name: ActiveValue::Set(new.name),
            description: ActiveValue::Set(new.description),
            target_date: ActiveValue::Set(new.target_date),
            status: ActiveValue::Set(new.status.as_str().to_string()),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        project.insert(self.db).await
    }

    pub async fn get(&self, project_id: i32) -> Result<Option<entity::project::Model>, DbErr> {
        entity::prelude::Project::find_by_id(project_id)
            .one(self.db)
            .await
    }

    pub async fn list(&self) -> Result<Vec<entity::project::Model>, DbErr> {
        entity::prelude::Project::find()
            .order_by_desc(entity::project::Column::CreatedAt)
            .all(self.db)
            .await
    }

    pub async fn update(
        &self,
        project_id: i32,
        changes: ProjectChanges,
        now: NaiveDateTime,
    ) -> Result<Option<entity::project::Model>, DbErr> {
        let project = match entity::prelude::Project::find_by_id(project_id)
            .one(self.db)
            .await?
        {
            Some(project) => project,
            None => return Ok(None),
        };

        let mut project_am = project.into_active_model();
        if let Some(name) = changes.name {
            project_am.name = ActiveValue::Set(name);
        }
        if let Some(description) = changes.description {
            project_am.description = ActiveValue::Set(description);
        }
        if let Some(target_date) = changes.target_date {
            project_am.target_date = ActiveValue::Set(target_date);
        }
        if let Some(status) = changes.status {
            project_am.status = ActiveValue::Set(status.as_str().to_string());
        }
        project_am.updated_at = ActiveValue::Set(now);

        let project = project_am.update(self.db).await?;

        Ok(Some(project))
    }

    /// Deletes a project; owned workstreams, tasks, milestones, and risks
    /// are removed by the cascading foreign keys.
    pub async fn delete(&self, project_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::Project::delete_by_id(project_id)
            .exec(self.db)
            .await
    }
}

#[cfg(test)]
mod tests {

    mod create {
        use launchpad_test_utils::prelude::*;

        use crate::{
            model::status::WorkflowStatus,
            server::data::project::{NewProject, ProjectRepository},
            server::util::time,
        };

        /// Expect success when creating a project with minimal fields
        #[tokio::test]
        async fn creates_project() -> Result<(), TestError> {
            let test = test_setup_with_tables!(entity::prelude::Project)?;

            let repo = ProjectRepository::new(&test.state.db);
            let result = repo
                .create(
                    NewProject {
                        name: "Market Launch".to_string(),
                        description: None,
                        target_date: None,
                        status: WorkflowStatus::Todo,
                    },
                    time::now(),
                )
                .await;

            assert!(result.is_ok());
            assert_eq!(result.unwrap().status, "TODO");

            Ok(())
        }
    }

    mod update {
        use launchpad_test_utils::prelude::*;

        use crate::{
            model::status::WorkflowStatus,
            server::data::project::{ProjectChanges, ProjectRepository},
            server::util::time,
        };

        /// Expect partial update to leave absent fields untouched
        #[tokio::test]
        async fn applies_partial_changes() -> Result<(), TestError> {
            let mut test = test_setup_with_tables!(entity::prelude::Project)?;
            let project = test.projects().insert_project("Market Launch").await?;

            let repo = ProjectRepository::new(&test.state.db);
            let updated = repo
                .update(
                    project.id,
                    ProjectChanges {
                        status: Some(WorkflowStatus::InProgress),
                        ..Default::default()
                    },
                    time::now(),
                )
                .await?
                .unwrap();

            assert_eq!(updated.status, "IN_PROGRESS");
            assert_eq!(updated.name, project.name);

            Ok(())
        }

        /// Expect explicit clear of description to null the column
        #[tokio::test]
        async fn clears_description() -> Result<(), TestError> {
            let mut test = test_setup_with_tables!(entity::prelude::Project)?;
            let project = test.projects().insert_project("Market Launch").await?;

            let repo = ProjectRepository::new(&test.state.db);
            let updated = repo
                .update(
                    project.id,
                    ProjectChanges {
                        description: Some(None),
                        ..Default::default()
                    },
                    time::now(),
                )
                .await?
                .unwrap();

            assert!(updated.description.is_none());

            Ok(())
        }
    }

    mod delete {
        use launchpad_test_utils::prelude::*;
        use sea_orm::EntityTrait;

        use crate::server::data::project::ProjectRepository;

        /// Expect deleting a project to cascade to owned rows
        #[tokio::test]
        async fn cascades_to_owned_entities() -> Result<(), TestError> {
            let mut test = test_setup_with_core_tables!()?;
            let project = test.projects().insert_project("Market Launch").await?;
            let workstream = test
                .projects()
                .insert_workstream(project.id, "Hardware")
                .await?;
            let user = test
                .users()
                .insert_user("pm@example.com", crate::model::user::Role::Pm)
                .await?;
            let task = test
                .projects()
                .insert_task(project.id, Some(workstream.id), user.id, "Order devices")
                .await?;
            let risk = test
                .projects()
                .insert_risk(project.id, Some(workstream.id), "Customs delay", 3, 4)
                .await?;
            let milestone = test
                .projects()
                .insert_milestone(project.id, Some(workstream.id), "Pilot venue live")
                .await?;

            let repo = ProjectRepository::new(&test.state.db);
            let result = repo.delete(project.id).await?;
            assert_eq!(result.rows_affected, 1);

            // No orphaned rows may reference the deleted project
            assert!(entity::prelude::Workstream::find_by_id(workstream.id)
                .one(&test.state.db)
                .await?
                .is_none());
            assert!(entity::prelude::Task::find_by_id(task.id)
                .one(&test.state.db)
                .await?
                .is_none());
            assert!(entity::prelude::Risk::find_by_id(risk.id)
                .one(&test.state.db)
                .await?
                .is_none());
            assert!(entity::prelude::Milestone::find_by_id(milestone.id)
                .one(&test.state.db)
                .await?
                .is_none());

            Ok(())
        }
    }
}
