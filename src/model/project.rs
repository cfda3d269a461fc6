use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::model::{api::double_option, status::WorkflowStatus, workstream::WorkstreamDto};

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummaryDto {
    pub id: i32,
    pub name: String,
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDto {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub target_date: Option<NaiveDateTime>,
    pub status: WorkflowStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Rollup of task statuses within a project.
#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskStatusRollupDto {
    pub total: u64,
    pub backlog: u64,
    pub todo: u64,
    pub in_progress: u64,
    pub blocked: u64,
    pub done: u64,
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MilestoneRollupDto {
    pub total: u64,
    pub completed: u64,
}

/// Project with its workstreams and progress rollups.
#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDetailDto {
    #[serde(flatten)]
    pub project: ProjectDto,
    pub workstreams: Vec<WorkstreamDto>,
    pub tasks: TaskStatusRollupDto,
    pub milestones: MilestoneRollupDto,
}

#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectDto {
    pub name: String,
    pub description: Option<String>,
    pub target_date: Option<String>,
    pub status: Option<String>,
}

#[derive(Default, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectDto {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub target_date: Option<Option<String>>,
    pub status: Option<String>,
}
