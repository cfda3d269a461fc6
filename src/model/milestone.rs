use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::model::{
    api::double_option, project::ProjectSummaryDto, task::ChecklistItemDto, user::UserSummaryDto,
    workstream::WorkstreamSummaryDto,
};

/// Display classification derived from target date and completion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MilestoneTiming {
    Upcoming,
    Overdue,
    Completed,
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MilestoneDto {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub target_date: NaiveDateTime,
    pub timing: MilestoneTiming,
    pub project: ProjectSummaryDto,
    pub workstream: Option<WorkstreamSummaryDto>,
    pub owner: Option<UserSummaryDto>,
    pub order: i32,
    pub checklist: Vec<ChecklistItemDto>,
    pub dependency_count: u64,
    pub dependent_count: u64,
    pub completed_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Reference to a milestone on the other end of a dependency edge.
#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MilestoneRefDto {
    pub id: i32,
    pub title: String,
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MilestoneDetailDto {
    #[serde(flatten)]
    pub milestone: MilestoneDto,
    /// Milestones this one depends on.
    pub dependencies: Vec<MilestoneRefDto>,
    /// Milestones depending on this one.
    pub dependents: Vec<MilestoneRefDto>,
}

#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateMilestoneDto {
    pub title: String,
    pub description: Option<String>,
    pub target_date: String,
    pub owner_id: Option<i32>,
    pub workstream_id: Option<i32>,
    pub project_id: i32,
    pub order: Option<i32>,
}

#[derive(Default, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMilestoneDto {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    pub target_date: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub owner_id: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    pub workstream_id: Option<Option<i32>>,
    pub order: Option<i32>,
}

#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDependencyDto {
    pub depends_on_id: i32,
}

#[derive(Default, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct MilestoneFilter {
    pub project_id: Option<i32>,
    pub workstream_id: Option<i32>,
    /// "true" returns only completed milestones, "false" only open ones.
    pub completed: Option<bool>,
}
