use chrono::NaiveDateTime;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, DeleteResult, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder,
};

use crate::model::status::{TaskPriority, WorkflowStatus};

pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub status: WorkflowStatus,
    pub priority: TaskPriority,
    pub due_date: Option<NaiveDateTime>,
    pub tags: Option<String>,
    pub assignee_id: Option<i32>,
    pub workstream_id: Option<i32>,
    pub project_id: i32,
    pub creator_id: i32,
    pub completed_at: Option<NaiveDateTime>,
}

/// Partial update; `None` leaves the field untouched, inner `None` clears it.
/// `completed_at` is always written when `status` is, so the two commit
/// together.
#[derive(Default)]
pub struct TaskChanges {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub status: Option<(WorkflowStatus, Option<NaiveDateTime>)>,
    pub priority: Option<TaskPriority>,
    pub due_date: Option<Option<NaiveDateTime>>,
    pub tags: Option<Option<String>>,
    pub assignee_id: Option<Option<i32>>,
    pub workstream_id: Option<Option<i32>>,
}

#[derive(Default)]
pub struct TaskListFilter {
    pub project_id: Option<i32>,
    pub workstream_id: Option<i32>,
    pub assignee_id: Option<i32>,
    pub status: Option<WorkflowStatus>,
    pub priority: Option<TaskPriority>,
}

pub struct TaskRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> TaskRepository<'a, C> {
    /// Creates a new instance of [`TaskRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        new: NewTask,
        now: NaiveDateTime,
    ) -> Result<entity::task::Model, DbErr> {
        let task = entity::task::ActiveModel {
            title: ActiveValue::Set(new.title),
            description: ActiveValue::Set(new.description),
            status: ActiveValue::Set(new.status.as_str().to_string()),
            priority: ActiveValue::Set(new.priority.as_str().to_string()),
            due_date: ActiveValue::Set(new.due_date),
            tags: ActiveValue::Set(new.tags),
            assignee_id: ActiveValue::Set(new.assignee_id),
            workstream_id: ActiveValue::Set(new.workstream_id),
            project_id: ActiveValue::Set(new.project_id),
            creator_id: ActiveValue::Set(new.creator_id),
            completed_at: ActiveValue::Set(new.completed_at),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        task.insert(self.db).await
    }

    pub async fn get(&self, task_id: i32) -> Result<Option<entity::task::Model>, DbErr> {
        entity::prelude::Task::find_by_id(task_id).one(self.db).await
    }

    pub async fn list(&self, filter: TaskListFilter) -> Result<Vec<entity::task::Model>, DbErr> {
        let mut query = entity::prelude::Task::find();

        if let Some(project_id) = filter.project_id {
            query = query.filter(entity::task::Column::ProjectId.eq(project_id));
        }
        if let Some(workstream_id) = filter.workstream_id {
            query = query.filter(entity::task::Column::WorkstreamId.eq(workstream_id));
        }
        if let Some(assignee_id) = filter.assignee_id {
            query = query.filter(entity::task::Column::AssigneeId.eq(assignee_id));
        }
        if let Some(status) = filter.status {
            query = query.filter(entity::task::Column::Status.eq(status.as_str()));
        }
        if let Some(priority) = filter.priority {
            query = query.filter(entity::task::Column::Priority.eq(priority.as_str()));
        }

        query
            .order_by_desc(entity::task::Column::CreatedAt)
            .all(self.db)
            .await
    }

    pub async fn update(
        &self,
        task_id: i32,
        changes: TaskChanges,
        now: NaiveDateTime,
    ) -> Result<Option<entity::task::Model>, DbErr> {
        let task = match entity::prelude::Task::find_by_id(task_id).one(self.db).await? {
            Some(task) => task,
            None => return Ok(None),
        };

        let mut task_am = task.into_active_model();
        if let Some(title) = changes.title {
            task_am.title = ActiveValue::Set(title);
        }
        if let Some(description) = changes.description {
            task_am.description = ActiveValue::Set(description);
        }
        if let Some((status, completed_at)) = changes.status {
            task_am.status = ActiveValue::Set(status.as_str().to_string());
            task_am.completed_at = ActiveValue::Set(completed_at);
        }
        if let Some(priority) = changes.priority {
            task_am.priority = ActiveValue::Set(priority.as_str().to_string());
        }
        if let Some(due_date) = changes.due_date {
            task_am.due_date = ActiveValue::Set(due_date);
        }
        if let Some(tags) = changes.tags {
            task_am.tags = ActiveValue::Set(tags);
        }
        if let Some(assignee_id) = changes.assignee_id {
            task_am.assignee_id = ActiveValue::Set(assignee_id);
        }
        if let Some(workstream_id) = changes.workstream_id {
            task_am.workstream_id = ActiveValue::Set(workstream_id);
        }
        task_am.updated_at = ActiveValue::Set(now);

        let task = task_am.update(self.db).await?;

        Ok(Some(task))
    }

    pub async fn delete(&self, task_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::Task::delete_by_id(task_id)
            .exec(self.db)
            .await
    }

    pub async fn add_checklist_item(
        &self,
        task_id: i32,
        title: String,
        item_order: i32,
        now: NaiveDateTime,
    ) -> Result<entity::task_checklist_item::Model, DbErr> {
        let item = entity::task_checklist_item::ActiveModel {
            task_id: ActiveValue::Set(task_id),
            title: ActiveValue::Set(title),
            done: ActiveValue::Set(false),
            item_order: ActiveValue::Set(item_order),
            created_at: ActiveValue::Set(now),
            ..Default::default()
        };

        item.insert(self.db).await
    }

    pub async fn count_checklist_items(&self, task_id: i32) -> Result<u64, DbErr> {
        use sea_orm::PaginatorTrait;

        entity::prelude::TaskChecklistItem::find()
            .filter(entity::task_checklist_item::Column::TaskId.eq(task_id))
            .count(self.db)
            .await
    }

    /// Checklist items in explicit order.
    pub async fn list_checklist_items(
        &self,
        task_id: i32,
    ) -> Result<Vec<entity::task_checklist_item::Model>, DbErr> {
        entity::prelude::TaskChecklistItem::find()
            .filter(entity::task_checklist_item::Column::TaskId.eq(task_id))
            .order_by_asc(entity::task_checklist_item::Column::ItemOrder)
            .all(self.db)
            .await
    }

    pub async fn set_checklist_item_done(
        &self,
        item_id: i32,
        done: bool,
    ) -> Result<Option<entity::task_checklist_item::Model>, DbErr> {
        let item = match entity::prelude::TaskChecklistItem::find_by_id(item_id)
            .one(self.db)
            .await?
        {
            Some(item) => item,
            None => return Ok(None),
        };

        let mut item_am = item.into_active_model();
        item_am.done = ActiveValue::Set(done);

        let item = item_am.update(self.db).await?;

        Ok(Some(item))
    }

    pub async fn delete_checklist_item(&self, item_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::TaskChecklistItem::delete_by_id(item_id)
            .exec(self.db)
            .await
    }

    pub async fn add_comment(
        &self,
        task_id: i32,
        author_id: i32,
        body: String,
        now: NaiveDateTime,
    ) -> Result<entity::task_comment::Model, DbErr> {
        let comment = entity::task_comment::ActiveModel {
            task_id: ActiveValue::Set(task_id),
            author_id: ActiveValue::Set(author_id),
            body: ActiveValue::Set(body),
            created_at: ActiveValue::Set(now),
            ..Default::default()
        };

        comment.insert(self.db).await
    }

    pub async fn count_comments(&self, task_id: i32) -> Result<u64, DbErr> {
        use sea_orm::PaginatorTrait;

        entity::prelude::TaskComment::find()
            .filter(entity::task_comment::Column::TaskId.eq(task_id))
            .count(self.db)
            .await
    }

    pub async fn count_attachments(&self, task_id: i32) -> Result<u64, DbErr> {
        use sea_orm::PaginatorTrait;

        entity::prelude::TaskAttachment::find()
            .filter(entity::task_attachment::Column::TaskId.eq(task_id))
            .count(self.db)
            .await
    }

    /// Comments newest first.
    pub async fn list_comments(
        &self,
        task_id: i32,
    ) -> Result<Vec<entity::task_comment::Model>, DbErr> {
        entity::prelude::TaskComment::find()
            .filter(entity::task_comment::Column::TaskId.eq(task_id))
            .order_by_desc(entity::task_comment::Column::CreatedAt)
            .all(self.db)
            .await
    }

    pub async fn add_attachment(
        &self,
        task_id: i32,
        file_name: String,
        url: String,
        now: NaiveDateTime,
    ) -> Result<entity::task_attachment::Model, DbErr> {
        let attachment = entity::task_attachment::ActiveModel {
            task_id: ActiveValue::Set(task_id),
            file_name: ActiveValue::Set(file_name),
            url: ActiveValue::Set(url),
            created_at: ActiveValue::Set(now),
            ..Default::default()
        };

        attachment.insert(self.db).await
    }

    pub async fn list_attachments(
        &self,
        task_id: i32,
    ) -> Result<Vec<entity::task_attachment::Model>, DbErr> {
        entity::prelude::TaskAttachment::find()
            .filter(entity::task_attachment::Column::TaskId.eq(task_id))
            .all(self.db)
            .await
    }
}
