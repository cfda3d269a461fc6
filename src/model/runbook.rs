use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::model::api::double_option;

/// One titled section of a runbook checklist with its ordered items.
#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RunbookSectionDto {
    pub section: String,
    pub items: Vec<String>,
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RunbookDto {
    pub id: i32,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub content: String,
    pub checklist: Vec<RunbookSectionDto>,
    pub version: String,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRunbookDto {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub content: Option<String>,
    pub checklist: Option<Vec<RunbookSectionDto>>,
    pub version: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Default, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRunbookDto {
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub content: Option<String>,
    pub checklist: Option<Vec<RunbookSectionDto>>,
    pub version: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Default, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct RunbookFilter {
    pub active: Option<bool>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}
