use chrono::{Duration, Utc};
use sea_orm::{ActiveValue, DatabaseConnection, EntityTrait};

use crate::error::TestError;

pub struct ProjectFixtures<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ProjectFixtures<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn insert_project(
        &self,
        name: &str,
    ) -> Result<entity::project::Model, TestError> {
        let now = Utc::now().naive_utc();

        Ok(entity::prelude::Project::insert(entity::project::ActiveModel {
            name: ActiveValue::Set(name.to_string()),
            description: ActiveValue::Set(None),
            target_date: ActiveValue::Set(None),
            status: ActiveValue::Set("TODO".to_string()),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        })
        .exec_with_returning(self.db)
        .await?)
    }

    pub async fn insert_workstream(
        &self,
        project_id: i32,
        name: &str,
    ) -> Result<entity::workstream::Model, TestError> {
        let now = Utc::now().naive_utc();

        Ok(
            entity::prelude::Workstream::insert(entity::workstream::ActiveModel {
                name: ActiveValue::Set(name.to_string()),
                description: ActiveValue::Set(None),
                objectives: ActiveValue::Set(None),
                project_id: ActiveValue::Set(project_id),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
                ..Default::default()
            })
            .exec_with_returning(self.db)
            .await?,
        )
    }

    pub async fn insert_task(
        &self,
        project_id: i32,
        workstream_id: Option<i32>,
        creator_id: i32,
        title: &str,
    ) -> Result<entity::task::Model, TestError> {
        self.insert_task_assigned(project_id, workstream_id, creator_id, None, title)
            .await
    }

    pub async fn insert_task_assigned(
        &self,
        project_id: i32,
        workstream_id: Option<i32>,
        creator_id: i32,
        assignee_id: Option<i32>,
        title: &str,
    ) -> Result<entity::task::Model, TestError> {
        let now = Utc::now().naive_utc();

        Ok(entity::prelude::Task::insert(entity::task::ActiveModel {
            title: ActiveValue::Set(title.to_string()),
            description: ActiveValue::Set(None),
            status: ActiveValue::Set("BACKLOG".to_string()),
            priority: ActiveValue::Set("MEDIUM".to_string()),
            due_date: ActiveValue::Set(None),
            tags: ActiveValue::Set(None),
            assignee_id: ActiveValue::Set(assignee_id),
            workstream_id: ActiveValue::Set(workstream_id),
            project_id: ActiveValue::Set(project_id),
            creator_id: ActiveValue::Set(creator_id),
            completed_at: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        })
        .exec_with_returning(self.db)
        .await?)
    }

    /// Inserts a milestone with a target date thirty days out.
    pub async fn insert_milestone(
        &self,
        project_id: i32,
        workstream_id: Option<i32>,
        title: &str,
    ) -> Result<entity::milestone::Model, TestError> {
        let now = Utc::now().naive_utc();

        Ok(entity::prelude::Milestone::insert(entity::milestone::ActiveModel {
            title: ActiveValue::Set(title.to_string()),
            description: ActiveValue::Set(None),
            target_date: ActiveValue::Set(now + Duration::days(30)),
            owner_id: ActiveValue::Set(None),
            workstream_id: ActiveValue::Set(workstream_id),
            project_id: ActiveValue::Set(project_id),
            milestone_order: ActiveValue::Set(1),
            completed_at: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        })
        .exec_with_returning(self.db)
        .await?)
    }

    pub async fn insert_risk(
        &self,
        project_id: i32,
        workstream_id: Option<i32>,
        title: &str,
        probability: i32,
        impact: i32,
    ) -> Result<entity::risk::Model, TestError> {
        let now = Utc::now().naive_utc();

        Ok(entity::prelude::Risk::insert(entity::risk::ActiveModel {
            title: ActiveValue::Set(title.to_string()),
            description: ActiveValue::Set(None),
            probability: ActiveValue::Set(probability),
            impact: ActiveValue::Set(impact),
            mitigation: ActiveValue::Set(None),
            status: ActiveValue::Set("TODO".to_string()),
            owner_id: ActiveValue::Set(None),
            workstream_id: ActiveValue::Set(workstream_id),
            project_id: ActiveValue::Set(project_id),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        })
        .exec_with_returning(self.db)
        .await?)
    }
}
