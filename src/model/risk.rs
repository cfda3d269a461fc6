use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::model::{
    api::double_option, project::ProjectSummaryDto, status::WorkflowStatus, user::UserSummaryDto,
    workstream::WorkstreamSummaryDto,
};

/// Severity tier derived from the probability × impact score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskTier {
    Low,
    Medium,
    High,
    Critical,
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        };
        f.write_str(s)
    }
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RiskDto {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub probability: i32,
    pub impact: i32,
    pub score: i32,
    pub tier: RiskTier,
    pub mitigation: Option<String>,
    pub status: WorkflowStatus,
    pub project: ProjectSummaryDto,
    pub workstream: Option<WorkstreamSummaryDto>,
    pub owner: Option<UserSummaryDto>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRiskDto {
    pub title: String,
    pub description: Option<String>,
    pub probability: Option<i32>,
    pub impact: Option<i32>,
    pub mitigation: Option<String>,
    pub status: Option<String>,
    pub project_id: i32,
    pub workstream_id: Option<i32>,
    pub owner_id: Option<i32>,
}

#[derive(Default, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRiskDto {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    pub probability: Option<i32>,
    pub impact: Option<i32>,
    #[serde(default, deserialize_with = "double_option")]
    pub mitigation: Option<Option<String>>,
    pub status: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub workstream_id: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    pub owner_id: Option<Option<i32>>,
}

#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRiskStatusDto {
    pub status: String,
}

#[derive(Default, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct RiskFilter {
    pub project_id: Option<i32>,
    pub status: Option<String>,
    /// Keep only risks whose probability × impact is at least this value.
    pub min_score: Option<i32>,
}

/// One cell of the 5×5 probability/impact matrix.
#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RiskMatrixCellDto {
    pub probability: i32,
    pub impact: i32,
    pub tier: RiskTier,
    pub risks: Vec<RiskMatrixEntryDto>,
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RiskMatrixEntryDto {
    pub id: i32,
    pub title: String,
    pub score: i32,
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RiskMatrixDto {
    pub cells: Vec<RiskMatrixCellDto>,
}
