use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::model::status::WorkflowStatus;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContentType {
    Website,
    Faq,
    Pitch,
    Pricing,
    Other,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Website => "WEBSITE",
            Self::Faq => "FAQ",
            Self::Pitch => "PITCH",
            Self::Pricing => "PRICING",
            Self::Other => "OTHER",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "WEBSITE" => Some(Self::Website),
            "FAQ" => Some(Self::Faq),
            "PITCH" => Some(Self::Pitch),
            "PRICING" => Some(Self::Pricing),
            "OTHER" => Some(Self::Other),
            _ => None,
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContentItemDto {
    pub id: i32,
    pub title: String,
    #[serde(rename = "type")]
    pub content_type: ContentType,
    pub raw_html: String,
    /// Structured summary extracted from the raw markup.
    pub extracted: serde_json::Value,
    pub markdown_proposal: String,
    pub tags: Vec<String>,
    pub status: WorkflowStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateContentItemDto {
    pub title: String,
    #[serde(rename = "type")]
    pub content_type: String,
    pub raw_html: String,
    pub extracted: serde_json::Value,
    pub markdown_proposal: String,
    pub tags: Option<Vec<String>>,
}

#[derive(Default, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ContentItemFilter {
    #[serde(rename = "type")]
    pub content_type: Option<String>,
    pub status: Option<String>,
}
