//! Task CRUD and the task status lifecycle.
//!
//! Status writes are accepted between any two states; the completion
//! timestamp is a pure function of the written status. DONE sets it, every
//! other status clears it, regardless of what the previous status was.

use chrono::NaiveDateTime;
use sea_orm::DatabaseConnection;

use crate::{
    model::{
        status::{TaskPriority, WorkflowStatus},
        task::{
            AttachmentDto, ChecklistItemDto, CommentDto, CreateAttachmentDto, CreateChecklistItemDto,
            CreateCommentDto, CreateTaskDto, TaskDetailDto, TaskDto, TaskFilter, UpdateTaskDto,
            UpdateTaskStatusDto,
        },
    },
    server::{
        data::{
            project::ProjectRepository,
            task::{NewTask, TaskChanges, TaskListFilter, TaskRepository},
            workstream::WorkstreamRepository,
        },
        error::{validation::ValidationError, Error},
        model::{context::RequestContext, permission::Resource},
        service::{relations::RelationResolver, validate},
        util::{payload, time},
    },
};

/// The completion timestamp implied by a status write.
pub fn completed_at_for(status: WorkflowStatus, now: NaiveDateTime) -> Option<NaiveDateTime> {
    match status {
        WorkflowStatus::Done => Some(now),
        _ => None,
    }
}

pub struct TaskService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> TaskService<'a> {
    /// Creates a new instance of [`TaskService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, ctx: &RequestContext, dto: CreateTaskDto) -> Result<TaskDto, Error> {
        ctx.require(Resource::Tasks)?;

        validate::require_non_empty("title", &dto.title)?;
        let status = validate::parse_status("status", dto.status.as_deref(), WorkflowStatus::Backlog)?;
        let priority =
            validate::parse_priority("priority", dto.priority.as_deref(), TaskPriority::Medium)?;
        let due_date = match dto.due_date.as_deref() {
            None => None,
            Some(raw) => Some(time::parse_datetime("dueDate", raw)?),
        };
        let tags = match &dto.tags {
            None => None,
            Some(tags) => Some(payload::encode_tags(tags)?),
        };

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

        let now = time::now();
        let repo = TaskRepository::new(self.db);
        let task = repo
            .create(
                NewTask {
                    title: dto.title,
                    description: dto.description,
                    status,
                    priority,
                    due_date,
                    tags,
                    assignee_id: dto.assignee_id,
                    workstream_id: dto.workstream_id,
                    project_id: dto.project_id,
                    creator_id: ctx.user_id,
                    completed_at: completed_at_for(status, now),
                },
                now,
            )
            .await?;

        self.to_dto(task).await
    }

    pub async fn get(&self, task_id: i32) -> Result<TaskDetailDto, Error> {
        let repo = TaskRepository::new(self.db);
        let task = repo.get(task_id).await?.ok_or(Error::NotFound {
            entity: "task",
            id: task_id,
        })?;

        let mut resolver = RelationResolver::new(self.db);
        let creator = resolver.user(Some(task.creator_id)).await?;

        let comments = repo.list_comments(task_id).await?;
        let mut comment_dtos = Vec::with_capacity(comments.len());
        for comment in comments {
            comment_dtos.push(CommentDto {
                id: comment.id,
                body: comment.body,
                author: resolver.user(Some(comment.author_id)).await?,
                created_at: comment.created_at,
            });
        }

        let attachments = repo
            .list_attachments(task_id)
            .await?
            .into_iter()
            .map(|a| AttachmentDto {
                id: a.id,
                file_name: a.file_name,
                url: a.url,
                created_at: a.created_at,
            })
            .collect();

        let task = self.assemble(task, &mut resolver).await?;

        Ok(TaskDetailDto {
            task,
            creator,
            comments: comment_dtos,
            attachments,
        })
    }

    /// Tasks ordered by priority desc, due date asc (missing dates last),
    /// then creation desc.
    pub async fn list(&self, filter: TaskFilter) -> Result<Vec<TaskDto>, Error> {
        let status = match filter.status.as_deref() {
            None => None,
            Some(raw) => Some(
                WorkflowStatus::parse(raw).ok_or_else(|| ValidationError::InvalidValue {
                    field: "status",
                    value: raw.to_string(),
                })?,
            ),
        };
        let priority = match filter.priority.as_deref() {
            None => None,
            Some(raw) => Some(
                TaskPriority::parse(raw).ok_or_else(|| ValidationError::InvalidValue {
                    field: "priority",
                    value: raw.to_string(),
                })?,
            ),
        };

        let repo = TaskRepository::new(self.db);
        let mut tasks = repo
            .list(TaskListFilter {
                project_id: filter.project_id,
                workstream_id: filter.workstream_id,
                assignee_id: filter.assignee_id,
                status,
                priority,
            })
            .await?;

        tasks.sort_by(|a, b| {
            let a_priority = TaskPriority::parse(&a.priority).map(|p| p.rank()).unwrap_or(0);
            let b_priority = TaskPriority::parse(&b.priority).map(|p| p.rank()).unwrap_or(0);

            b_priority
                .cmp(&a_priority)
                .then_with(|| match (a.due_date, b.due_date) {
                    (Some(a_due), Some(b_due)) => a_due.cmp(&b_due),
                    (Some(_), None) => std::cmp::Ordering::Less,
                    (None, Some(_)) => std::cmp::Ordering::Greater,
                    (None, None) => std::cmp::Ordering::Equal,
                })
                .then_with(|| b.created_at.cmp(&a.created_at))
        });

        let mut resolver = RelationResolver::new(self.db);
        let mut dtos = Vec::with_capacity(tasks.len());
        for task in tasks {
            dtos.push(self.assemble(task, &mut resolver).await?);
        }

        Ok(dtos)
    }

    pub async fn update(
        &self,
        ctx: &RequestContext,
        task_id: i32,
        dto: UpdateTaskDto,
    ) -> Result<TaskDto, Error> {
        ctx.require(Resource::Tasks)?;

        if let Some(title) = &dto.title {
            validate::require_non_empty("title", title)?;
        }
        let now = time::now();
        let status = match dto.status.as_deref() {
            None => None,
            Some(raw) => {
                let status =
                    WorkflowStatus::parse(raw).ok_or_else(|| ValidationError::InvalidValue {
                        field: "status",
                        value: raw.to_string(),
                    })?;
                Some((status, completed_at_for(status, now)))
            }
        };
        let priority = match dto.priority.as_deref() {
            None => None,
            Some(raw) => Some(
                TaskPriority::parse(raw).ok_or_else(|| ValidationError::InvalidValue {
                    field: "priority",
                    value: raw.to_string(),
                })?,
            ),
        };
        let due_date = match dto.due_date {
            None => None,
            Some(None) => Some(None),
            Some(Some(raw)) => Some(Some(time::parse_datetime("dueDate", &raw)?)),
        };
        let tags = match &dto.tags {
            None => None,
            Some(tags) => Some(Some(payload::encode_tags(tags)?)),
        };

        let repo = TaskRepository::new(self.db);
        let existing = repo.get(task_id).await?.ok_or(Error::NotFound {
            entity: "task",
            id: task_id,
        })?;

        if let Some(Some(workstream_id)) = dto.workstream_id {
            self.check_workstream_project(workstream_id, existing.project_id)
                .await?;
        }

        let task = repo
            .update(
                task_id,
                TaskChanges {
                    title: dto.title,
                    description: dto.description,
                    status,
                    priority,
                    due_date,
                    tags,
                    assignee_id: dto.assignee_id,
                    workstream_id: dto.workstream_id,
                },
                now,
            )
            .await?
            .ok_or(Error::NotFound {
                entity: "task",
                id: task_id,
            })?;

        self.to_dto(task).await
    }

    /// Status-only write; applies the same completion timestamp rule as a
    /// full update.
    pub async fn update_status(
        &self,
        ctx: &RequestContext,
        task_id: i32,
        dto: UpdateTaskStatusDto,
    ) -> Result<TaskDto, Error> {
        ctx.require(Resource::Tasks)?;

        let status =
            WorkflowStatus::parse(&dto.status).ok_or_else(|| ValidationError::InvalidValue {
                field: "status",
                value: dto.status.clone(),
            })?;

        let now = time::now();
        let repo = TaskRepository::new(self.db);
        let task = repo
            .update(
                task_id,
                TaskChanges {
                    status: Some((status, completed_at_for(status, now))),
                    ..Default::default()
                },
                now,
            )
            .await?
            .ok_or(Error::NotFound {
                entity: "task",
                id: task_id,
            })?;

        self.to_dto(task).await
    }

    pub async fn delete(&self, ctx: &RequestContext, task_id: i32) -> Result<(), Error> {
        ctx.require(Resource::Tasks)?;

        let repo = TaskRepository::new(self.db);
        let result = repo.delete(task_id).await?;

        if result.rows_affected == 0 {
            return Err(Error::NotFound {
                entity: "task",
                id: task_id,
            });
        }

        Ok(())
    }

    pub async fn add_checklist_item(
        &self,
        ctx: &RequestContext,
        task_id: i32,
        dto: CreateChecklistItemDto,
    ) -> Result<ChecklistItemDto, Error> {
        ctx.require(Resource::Tasks)?;

        validate::require_non_empty("title", &dto.title)?;

        let repo = TaskRepository::new(self.db);
        if repo.get(task_id).await?.is_none() {
            return Err(Error::NotFound {
                entity: "task",
                id: task_id,
            });
        }

        let item_order = repo.count_checklist_items(task_id).await? as i32 + 1;
        let item = repo
            .add_checklist_item(task_id, dto.title, item_order, time::now())
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
        ctx.require(Resource::Tasks)?;

        let repo = TaskRepository::new(self.db);
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
        ctx.require(Resource::Tasks)?;

        let repo = TaskRepository::new(self.db);
        let result = repo.delete_checklist_item(item_id).await?;

        if result.rows_affected == 0 {
            return Err(Error::NotFound {
                entity: "checklist item",
                id: item_id,
            });
        }

        Ok(())
    }

    pub async fn add_comment(
        &self,
        ctx: &RequestContext,
        task_id: i32,
        dto: CreateCommentDto,
    ) -> Result<CommentDto, Error> {
        ctx.require(Resource::Tasks)?;

        validate::require_non_empty("body", &dto.body)?;

        let repo = TaskRepository::new(self.db);
        if repo.get(task_id).await?.is_none() {
            return Err(Error::NotFound {
                entity: "task",
                id: task_id,
            });
        }

        let comment = repo
            .add_comment(task_id, ctx.user_id, dto.body, time::now())
            .await?;

        let mut resolver = RelationResolver::new(self.db);

        Ok(CommentDto {
            id: comment.id,
            body: comment.body,
            author: resolver.user(Some(comment.author_id)).await?,
            created_at: comment.created_at,
        })
    }

    pub async fn add_attachment(
        &self,
        ctx: &RequestContext,
        task_id: i32,
        dto: CreateAttachmentDto,
    ) -> Result<AttachmentDto, Error> {
        ctx.require(Resource::Tasks)?;

        validate::require_non_empty("fileName", &dto.file_name)?;
        validate::require_non_empty("url", &dto.url)?;

        let repo = TaskRepository::new(self.db);
        if repo.get(task_id).await?.is_none() {
            return Err(Error::NotFound {
                entity: "task",
                id: task_id,
            });
        }

        let attachment = repo
            .add_attachment(task_id, dto.file_name, dto.url, time::now())
            .await?;

        Ok(AttachmentDto {
            id: attachment.id,
            file_name: attachment.file_name,
            url: attachment.url,
            created_at: attachment.created_at,
        })
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

    async fn to_dto(&self, task: entity::task::Model) -> Result<TaskDto, Error> {
        let mut resolver = RelationResolver::new(self.db);
        self.assemble(task, &mut resolver).await
    }

    async fn assemble(
        &self,
        task: entity::task::Model,
        resolver: &mut RelationResolver<'_, DatabaseConnection>,
    ) -> Result<TaskDto, Error> {
        let repo = TaskRepository::new(self.db);

        let status = WorkflowStatus::parse(&task.status)
            .ok_or_else(|| Error::ParseError(format!("task status '{}'", task.status)))?;
        let priority = TaskPriority::parse(&task.priority)
            .ok_or_else(|| Error::ParseError(format!("task priority '{}'", task.priority)))?;

        let checklist = repo
            .list_checklist_items(task.id)
            .await?
            .into_iter()
            .map(|item| ChecklistItemDto {
                id: item.id,
                title: item.title,
                done: item.done,
                order: item.item_order,
            })
            .collect();

        Ok(TaskDto {
            id: task.id,
            title: task.title,
            description: task.description,
            status,
            priority,
            due_date: task.due_date,
            tags: payload::decode_tags(task.tags.as_deref()),
            project: resolver.project(task.project_id).await?,
            workstream: resolver.workstream(task.workstream_id).await?,
            assignee: resolver.user(task.assignee_id).await?,
            checklist,
            comment_count: repo.count_comments(task.id).await?,
            attachment_count: repo.count_attachments(task.id).await?,
            completed_at: task.completed_at,
            created_at: task.created_at,
            updated_at: task.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {

    mod completed_at {
        use crate::{
            model::status::WorkflowStatus,
            server::{service::task::completed_at_for, util::time},
        };

        /// Expect DONE to set the timestamp and every other status to clear it
        #[test]
        fn follows_status() {
            let now = time::now();

            assert_eq!(completed_at_for(WorkflowStatus::Done, now), Some(now));
            assert_eq!(completed_at_for(WorkflowStatus::Backlog, now), None);
            assert_eq!(completed_at_for(WorkflowStatus::Todo, now), None);
            assert_eq!(completed_at_for(WorkflowStatus::InProgress, now), None);
            assert_eq!(completed_at_for(WorkflowStatus::Blocked, now), None);
        }
    }

    mod update_status {
        use launchpad_test_utils::prelude::*;

        use crate::{
            model::{task::UpdateTaskStatusDto, user::Role},
            server::{model::context::RequestContext, service::task::TaskService},
        };

        /// Expect DONE to set completedAt and a later non-DONE write to clear it
        #[tokio::test]
        async fn done_sets_and_other_clears_completed_at() -> Result<(), TestError> {
            let mut test = test_setup_with_core_tables!()?;
            let project = test.projects().insert_project("Market Launch").await?;
            let pm = test.users().insert_user("pm@example.com", Role::Pm).await?;
            let task = test
                .projects()
                .insert_task(project.id, None, pm.id, "Order devices")
                .await?;

            let service = TaskService::new(&test.state.db);
            let ctx = RequestContext::new(pm.id, Role::Pm);

            let done = service
                .update_status(
                    &ctx,
                    task.id,
                    UpdateTaskStatusDto {
                        status: "DONE".to_string(),
                    },
                )
                .await
                .unwrap();
            assert!(done.completed_at.is_some());

            let reopened = service
                .update_status(
                    &ctx,
                    task.id,
                    UpdateTaskStatusDto {
                        status: "IN_PROGRESS".to_string(),
                    },
                )
                .await
                .unwrap();
            assert!(reopened.completed_at.is_none());

            Ok(())
        }

        /// Expect repeating DONE to keep a non-null timestamp (idempotent)
        #[tokio::test]
        async fn done_twice_stays_completed() -> Result<(), TestError> {
            let mut test = test_setup_with_core_tables!()?;
            let project = test.projects().insert_project("Market Launch").await?;
            let pm = test.users().insert_user("pm@example.com", Role::Pm).await?;
            let task = test
                .projects()
                .insert_task(project.id, None, pm.id, "Order devices")
                .await?;

            let service = TaskService::new(&test.state.db);
            let ctx = RequestContext::new(pm.id, Role::Pm);

            for _ in 0..2 {
                let updated = service
                    .update_status(
                        &ctx,
                        task.id,
                        UpdateTaskStatusDto {
                            status: "DONE".to_string(),
                        },
                    )
                    .await
                    .unwrap();

                assert!(updated.completed_at.is_some());
            }

            Ok(())
        }

        /// Expect an unknown status to fail validation without a write
        #[tokio::test]
        async fn rejects_unknown_status() -> Result<(), TestError> {
            let mut test = test_setup_with_core_tables!()?;
            let project = test.projects().insert_project("Market Launch").await?;
            let pm = test.users().insert_user("pm@example.com", Role::Pm).await?;
            let task = test
                .projects()
                .insert_task(project.id, None, pm.id, "Order devices")
                .await?;

            let service = TaskService::new(&test.state.db);
            let ctx = RequestContext::new(pm.id, Role::Pm);
            let result = service
                .update_status(
                    &ctx,
                    task.id,
                    UpdateTaskStatusDto {
                        status: "SHIPPED".to_string(),
                    },
                )
                .await;

            assert!(result.is_err());

            let unchanged = service.get(task.id).await.unwrap();
            assert_eq!(unchanged.task.status, crate::model::status::WorkflowStatus::Backlog);

            Ok(())
        }
    }

    mod list {
        use launchpad_test_utils::prelude::*;

        use crate::{
            model::{
                task::{CreateTaskDto, TaskFilter},
                user::Role,
            },
            server::{model::context::RequestContext, service::task::TaskService},
        };

        /// Expect priority desc then due date asc ordering
        #[tokio::test]
        async fn orders_by_priority_then_due_date() -> Result<(), TestError> {
            let mut test = test_setup_with_core_tables!()?;
            let project = test.projects().insert_project("Market Launch").await?;
            let pm = test.users().insert_user("pm@example.com", Role::Pm).await?;

            let service = TaskService::new(&test.state.db);
            let ctx = RequestContext::new(pm.id, Role::Pm);

            for (title, priority, due) in [
                ("Later critical", "CRITICAL", Some("2025-10-01")),
                ("Early critical", "CRITICAL", Some("2025-09-01")),
                ("Low priority", "LOW", Some("2025-08-01")),
            ] {
                service
                    .create(
                        &ctx,
                        CreateTaskDto {
                            title: title.to_string(),
                            description: None,
                            status: None,
                            priority: Some(priority.to_string()),
                            due_date: due.map(|d| d.to_string()),
                            workstream_id: None,
                            assignee_id: None,
                            project_id: project.id,
                            tags: None,
                        },
                    )
                    .await
                    .unwrap();
            }

            let listed = service.list(TaskFilter::default()).await.unwrap();

            let titles: Vec<&str> = listed.iter().map(|t| t.title.as_str()).collect();
            assert_eq!(
                titles,
                vec!["Early critical", "Later critical", "Low priority"]
            );

            Ok(())
        }
    }
}
