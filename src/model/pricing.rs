use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::model::api::double_option;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeeType {
    Percentage,
    Fixed,
}

impl FeeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Percentage => "PERCENTAGE",
            Self::Fixed => "FIXED",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "PERCENTAGE" => Some(Self::Percentage),
            "FIXED" => Some(Self::Fixed),
            _ => None,
        }
    }
}

impl fmt::Display for FeeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PricingPlanDto {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub hardware_model: Option<String>,
    pub setup_fee: Option<f64>,
    pub monthly_fee: Option<f64>,
    pub transaction_fee: Option<f64>,
    pub fee_type: FeeType,
    pub currency: String,
    pub inclusions: Vec<String>,
    pub sla_level: Option<String>,
    pub support_hours: Option<String>,
    pub is_active: bool,
    pub order: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePricingPlanDto {
    pub name: String,
    pub description: Option<String>,
    pub hardware_model: Option<String>,
    pub setup_fee: Option<f64>,
    pub monthly_fee: Option<f64>,
    pub transaction_fee: Option<f64>,
    pub fee_type: Option<String>,
    pub currency: Option<String>,
    pub inclusions: Option<Vec<String>>,
    pub sla_level: Option<String>,
    pub support_hours: Option<String>,
    pub is_active: Option<bool>,
    pub order: Option<i32>,
}

#[derive(Default, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePricingPlanDto {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub hardware_model: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub setup_fee: Option<Option<f64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub monthly_fee: Option<Option<f64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub transaction_fee: Option<Option<f64>>,
    pub fee_type: Option<String>,
    pub currency: Option<String>,
    pub inclusions: Option<Vec<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub sla_level: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub support_hours: Option<Option<String>>,
    pub is_active: Option<bool>,
    pub order: Option<i32>,
}

#[derive(Default, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct PricingPlanFilter {
    pub active: Option<bool>,
}
