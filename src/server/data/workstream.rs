use chrono::NaiveDateTime;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, DeleteResult, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder,
};

pub struct NewWorkstream {
    pub name: String,
    pub description: Option<String>,
    pub objectives: Option<String>,
    pub project_id: i32,
}

#[derive(Default)]
pub struct WorkstreamChanges {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub objectives: Option<Option<String>>,
}

pub struct WorkstreamRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> WorkstreamRepository<'a, C> {
    /// Creates a new instance of [`WorkstreamRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        new: NewWorkstream,
        now: NaiveDateTime,
    ) -> Result<entity::workstream::Model, DbErr> {
        let workstream = entity::workstream::ActiveModel {
            name: ActiveValue::Set(new.name),
            description: ActiveValue::Set(new.description),
            objectives: ActiveValue::Set(new.objectives),
            project_id: ActiveValue::Set(new.project_id),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        workstream.insert(self.db).await
    }

    pub async fn get(
        &self,
        workstream_id: i32,
    ) -> Result<Option<entity::workstream::Model>, DbErr> {
        entity::prelude::Workstream::find_by_id(workstream_id)
            .one(self.db)
            .await
    }

    pub async fn list(
        &self,
        project_id: Option<i32>,
    ) -> Result<Vec<entity::workstream::Model>, DbErr> {
        let mut query = entity::prelude::Workstream::find()
            .order_by_asc(entity::workstream::Column::Name);

        if let Some(project_id) = project_id {
            query = query.filter(entity::workstream::Column::ProjectId.eq(project_id));
        }

        query.all(self.db).await
    }

    pub async fn update(
        &self,
        workstream_id: i32,
        changes: WorkstreamChanges,
        now: NaiveDateTime,
    ) -> Result<Option<entity::workstream::Model>, DbErr> {
        let workstream = match entity::prelude::Workstream::find_by_id(workstream_id)
            .one(self.db)
            .await?
        {
            Some(workstream) => workstream,
            None => return Ok(None),
        };

        let mut workstream_am = workstream.into_active_model();
        if let Some(name) = changes.name {
            workstream_am.name = ActiveValue::Set(name);
        }
        if let Some(description) = changes.description {
            workstream_am.description = ActiveValue::Set(description);
        }
        if let Some(objectives) = changes.objectives {
            workstream_am.objectives = ActiveValue::Set(objectives);
        }
        workstream_am.updated_at = ActiveValue::Set(now);

        let workstream = workstream_am.update(self.db).await?;

        Ok(Some(workstream))
    }

    /// Deletes a workstream; child tasks, milestones, and risks keep their
    /// rows and have their workstream reference nulled by the foreign keys.
    pub async fn delete(&self, workstream_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::Workstream::delete_by_id(workstream_id)
            .exec(self.db)
            .await
    }
}

#[cfg(test)]
mod tests {

    mod list {
        use launchpad_test_utils::prelude::*;

        use crate::server::data::workstream::WorkstreamRepository;

        /// Expect list to filter by project and sort by name
        #[tokio::test]
        async fn filters_by_project_sorted_by_name() -> Result<(), TestError> {
            let mut test = test_setup_with_core_tables!()?;
            let project_a = test.projects().insert_project("Launch A").await?;
            let project_b = test.projects().insert_project("Launch B").await?;
            test.projects().insert_workstream(project_a.id, "Legal").await?;
            test.projects()
                .insert_workstream(project_a.id, "Hardware")
                .await?;
            test.projects().insert_workstream(project_b.id, "Pricing").await?;

            let repo = WorkstreamRepository::new(&test.state.db);
            let listed = repo.list(Some(project_a.id)).await?;

            let names: Vec<&str> = listed.iter().map(|w| w.name.as_str()).collect();
            assert_eq!(names, vec!["Hardware", "Legal"]);

            Ok(())
        }
    }

    mod delete {
        use launchpad_test_utils::prelude::*;
        use sea_orm::EntityTrait;

        use crate::{model::user::Role, server::data::workstream::WorkstreamRepository};

        /// Expect child tasks to survive with a nulled workstream reference
        #[tokio::test]
        async fn nulls_out_child_references() -> Result<(), TestError> {
            let mut test = test_setup_with_core_tables!()?;
            let project = test.projects().insert_project("Market Launch").await?;
            let workstream = test
                .projects()
                .insert_workstream(project.id, "Hardware")
                .await?;
            let user = test.users().insert_user("pm@example.com", Role::Pm).await?;
            let task = test
                .projects()
                .insert_task(project.id, Some(workstream.id), user.id, "Order devices")
                .await?;
            let risk = test
                .projects()
                .insert_risk(project.id, Some(workstream.id), "Customs delay", 3, 4)
                .await?;

            let repo = WorkstreamRepository::new(&test.state.db);
            let result = repo.delete(workstream.id).await?;
            assert_eq!(result.rows_affected, 1);

            let task = entity::prelude::Task::find_by_id(task.id)
                .one(&test.state.db)
                .await?
                .unwrap();
            assert!(task.workstream_id.is_none());

            let risk = entity::prelude::Risk::find_by_id(risk.id)
                .one(&test.state.db)
                .await?
                .unwrap();
            assert!(risk.workstream_id.is_none());

            Ok(())
        }
    }
}
