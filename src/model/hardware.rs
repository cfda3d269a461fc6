use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::model::{api::double_option, status::WorkflowStatus};

/// Recommendation slot for a hardware candidate. PRIMARY is exclusive:
/// at most one candidate may hold it at a time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Recommendation {
    Primary,
    Backup,
    Rejected,
}

impl Recommendation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Primary => "PRIMARY",
            Self::Backup => "BACKUP",
            Self::Rejected => "REJECTED",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "PRIMARY" => Some(Self::Primary),
            "BACKUP" => Some(Self::Backup),
            "REJECTED" => Some(Self::Rejected),
            _ => None,
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HardwareCandidateDto {
    pub id: i32,
    pub name: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub price: Option<f64>,
    pub currency: String,
    pub availability: Option<String>,
    pub specs: BTreeMap<String, String>,
    pub constraints: BTreeMap<String, String>,
    pub field_notes: Option<String>,
    pub score: Option<i32>,
    pub recommendation: Option<Recommendation>,
    pub status: WorkflowStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateHardwareCandidateDto {
    pub name: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub price: Option<f64>,
    pub currency: Option<String>,
    pub availability: Option<String>,
    pub specs: Option<BTreeMap<String, String>>,
    pub constraints: Option<BTreeMap<String, String>>,
    pub field_notes: Option<String>,
    pub score: Option<i32>,
    pub recommendation: Option<String>,
    pub status: Option<String>,
}

#[derive(Default, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateHardwareCandidateDto {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub brand: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub model: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub price: Option<Option<f64>>,
    pub currency: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub availability: Option<Option<String>>,
    pub specs: Option<BTreeMap<String, String>>,
    pub constraints: Option<BTreeMap<String, String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub field_notes: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub score: Option<Option<i32>>,
    pub status: Option<String>,
}

/// Body for the recommendation slot operation; null clears the slot.
#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SetRecommendationDto {
    pub recommendation: Option<String>,
}

#[derive(Default, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct HardwareFilter {
    pub status: Option<String>,
    pub recommendation: Option<String>,
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccessoryDesignDto {
    pub id: i32,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: Option<String>,
    pub materials: Option<String>,
    pub dimensions: Option<String>,
    pub branding: Option<String>,
    pub supplier: Option<String>,
    pub unit_cost: Option<f64>,
    pub currency: String,
    pub lead_time: Option<String>,
    pub status: WorkflowStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccessoryDesignDto {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: Option<String>,
    pub materials: Option<String>,
    pub dimensions: Option<String>,
    pub branding: Option<String>,
    pub supplier: Option<String>,
    pub unit_cost: Option<f64>,
    pub currency: Option<String>,
    pub lead_time: Option<String>,
    pub status: Option<String>,
}

#[derive(Default, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAccessoryDesignDto {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub materials: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub dimensions: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub branding: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub supplier: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub unit_cost: Option<Option<f64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub lead_time: Option<Option<String>>,
    pub status: Option<String>,
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BundleDto {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub total_cost: Option<f64>,
    pub currency: String,
    pub is_standard: bool,
    pub status: WorkflowStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBundleDto {
    pub name: String,
    pub description: Option<String>,
    pub total_cost: Option<f64>,
    pub currency: Option<String>,
    pub is_standard: Option<bool>,
    pub status: Option<String>,
}

#[derive(Default, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBundleDto {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub total_cost: Option<Option<f64>>,
    pub currency: Option<String>,
    pub is_standard: Option<bool>,
    pub status: Option<String>,
}
