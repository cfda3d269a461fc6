use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::model::api::double_option;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LegalDocType {
    Msa,
    Sla,
    Dpa,
    Terms,
    Privacy,
    Disclaimer,
    Nda,
    Other,
}

impl LegalDocType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Msa => "MSA",
            Self::Sla => "SLA",
            Self::Dpa => "DPA",
            Self::Terms => "TERMS",
            Self::Privacy => "PRIVACY",
            Self::Disclaimer => "DISCLAIMER",
            Self::Nda => "NDA",
            Self::Other => "OTHER",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "MSA" => Some(Self::Msa),
            "SLA" => Some(Self::Sla),
            "DPA" => Some(Self::Dpa),
            "TERMS" => Some(Self::Terms),
            "PRIVACY" => Some(Self::Privacy),
            "DISCLAIMER" => Some(Self::Disclaimer),
            "NDA" => Some(Self::Nda),
            "OTHER" => Some(Self::Other),
            _ => None,
        }
    }
}

impl fmt::Display for LegalDocType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LegalStatus {
    Draft,
    InReview,
    Approved,
    Sent,
    Signed,
}

impl LegalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::InReview => "IN_REVIEW",
            Self::Approved => "APPROVED",
            Self::Sent => "SENT",
            Self::Signed => "SIGNED",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "DRAFT" => Some(Self::Draft),
            "IN_REVIEW" => Some(Self::InReview),
            "APPROVED" => Some(Self::Approved),
            "SENT" => Some(Self::Sent),
            "SIGNED" => Some(Self::Signed),
            _ => None,
        }
    }

    /// Whether entering this status bumps the document's minor version.
    pub fn bumps_version(&self) -> bool {
        matches!(self, Self::Approved | Self::Signed)
    }
}

impl fmt::Display for LegalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LegalDocDto {
    pub id: i32,
    pub title: String,
    #[serde(rename = "type")]
    pub doc_type: LegalDocType,
    pub status: LegalStatus,
    pub version: String,
    pub content: Option<String>,
    pub file_url: Option<String>,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateLegalDocDto {
    pub title: String,
    #[serde(rename = "type")]
    pub doc_type: String,
    pub status: Option<String>,
    pub version: Option<String>,
    pub content: Option<String>,
    pub file_url: Option<String>,
    pub notes: Option<String>,
}

#[derive(Default, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLegalDocDto {
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub doc_type: Option<String>,
    pub version: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub content: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub file_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub notes: Option<Option<String>>,
}

#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLegalStatusDto {
    pub status: String,
}

#[derive(Default, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct LegalDocFilter {
    pub status: Option<String>,
    #[serde(rename = "type")]
    pub doc_type: Option<String>,
}
