use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::model::{
    api::double_option,
    project::ProjectSummaryDto,
    status::{TaskPriority, WorkflowStatus},
    user::UserSummaryDto,
    workstream::WorkstreamSummaryDto,
};

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistItemDto {
    pub id: i32,
    pub title: String,
    pub done: bool,
    pub order: i32,
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentDto {
    pub id: i32,
    pub body: String,
    pub author: Option<UserSummaryDto>,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentDto {
    pub id: i32,
    pub file_name: String,
    pub url: String,
    pub created_at: NaiveDateTime,
}

/// Task as returned by list endpoints: immediate relation summaries plus
/// child counts, not full nested collections.
#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskDto {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub status: WorkflowStatus,
    pub priority: TaskPriority,
    pub due_date: Option<NaiveDateTime>,
    pub tags: Vec<String>,
    pub project: ProjectSummaryDto,
    pub workstream: Option<WorkstreamSummaryDto>,
    pub assignee: Option<UserSummaryDto>,
    pub checklist: Vec<ChecklistItemDto>,
    pub comment_count: u64,
    pub attachment_count: u64,
    pub completed_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Task detail: everything in [`TaskDto`] plus creator, comments newest
/// first, and attachments.
#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskDetailDto {
    #[serde(flatten)]
    pub task: TaskDto,
    pub creator: Option<UserSummaryDto>,
    pub comments: Vec<CommentDto>,
    pub attachments: Vec<AttachmentDto>,
}

#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskDto {
    pub title: String,
    pub description: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub due_date: Option<String>,
    pub workstream_id: Option<i32>,
    pub assignee_id: Option<i32>,
    pub project_id: i32,
    pub tags: Option<Vec<String>>,
}

#[derive(Default, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskDto {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    pub status: Option<String>,
    pub priority: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub due_date: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub workstream_id: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    pub assignee_id: Option<Option<i32>>,
    pub tags: Option<Vec<String>>,
}

#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskStatusDto {
    pub status: String,
}

#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateChecklistItemDto {
    pub title: String,
}

#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateChecklistItemDto {
    pub done: bool,
}

#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentDto {
    pub body: String,
}

#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAttachmentDto {
    pub file_name: String,
    pub url: String,
}

/// Optional equality filters accepted by the task list endpoint.
#[derive(Default, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct TaskFilter {
    pub project_id: Option<i32>,
    pub workstream_id: Option<i32>,
    pub assignee_id: Option<i32>,
    pub status: Option<String>,
    pub priority: Option<String>,
}
