use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::model::{api::double_option, project::ProjectSummaryDto};

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkstreamSummaryDto {
    pub id: i32,
    pub name: String,
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkstreamDto {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub objectives: Option<String>,
    pub project: ProjectSummaryDto,
    pub task_count: u64,
    pub milestone_count: u64,
    pub risk_count: u64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateWorkstreamDto {
    pub name: String,
    pub description: Option<String>,
    pub objectives: Option<String>,
    pub project_id: i32,
}

#[derive(Default, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWorkstreamDto {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub objectives: Option<Option<String>>,
}
