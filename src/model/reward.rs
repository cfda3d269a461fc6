use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::model::api::double_option;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RewardType {
    PerTx,
    PerVolume,
    Adoption,
}

impl RewardType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PerTx => "PER_TX",
            Self::PerVolume => "PER_VOLUME",
            Self::Adoption => "ADOPTION",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "PER_TX" => Some(Self::PerTx),
            "PER_VOLUME" => Some(Self::PerVolume),
            "ADOPTION" => Some(Self::Adoption),
            _ => None,
        }
    }
}

impl fmt::Display for RewardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RewardRuleDto {
    pub id: i32,
    pub name: String,
    #[serde(rename = "type")]
    pub rule_type: RewardType,
    pub description: Option<String>,
    pub formula: Option<String>,
    pub min_threshold: Option<f64>,
    pub max_threshold: Option<f64>,
    pub cap_per_day: Option<f64>,
    pub cap_per_month: Option<f64>,
    pub conditions: Option<String>,
    pub is_active: bool,
    pub test_period: Option<String>,
    pub test_location: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRewardRuleDto {
    pub name: String,
    #[serde(rename = "type")]
    pub rule_type: String,
    pub description: Option<String>,
    pub formula: Option<String>,
    pub min_threshold: Option<f64>,
    pub max_threshold: Option<f64>,
    pub cap_per_day: Option<f64>,
    pub cap_per_month: Option<f64>,
    pub conditions: Option<String>,
    pub is_active: Option<bool>,
    pub test_period: Option<String>,
    pub test_location: Option<String>,
}

#[derive(Default, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRewardRuleDto {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub rule_type: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub formula: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub min_threshold: Option<Option<f64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub max_threshold: Option<Option<f64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub cap_per_day: Option<Option<f64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub cap_per_month: Option<Option<f64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub conditions: Option<Option<String>>,
    pub is_active: Option<bool>,
    #[serde(default, deserialize_with = "double_option")]
    pub test_period: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub test_location: Option<Option<String>>,
}

#[derive(Default, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct RewardRuleFilter {
    pub active: Option<bool>,
    #[serde(rename = "type")]
    pub rule_type: Option<String>,
}
