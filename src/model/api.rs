use serde::{Deserialize, Deserializer, Serialize};

/// The response when an error occurs with an API request
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorDto {
    /// The error message
    pub error: String,
}

/// Body for the active-flag toggle shared by pricing plans, reward rules,
/// and runbooks.
#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SetActiveDto {
    pub is_active: bool,
}

/// Deserializes a field that distinguishes "absent" from "explicitly null".
///
/// Partial updates need three states per nullable field: absent (leave
/// unchanged), null (clear), and a value (set). Plain `Option<Option<T>>`
/// collapses null into absent, so fields using this helper pair it with
/// `#[serde(default)]`: absent stays `None`, a present field (null or value)
/// becomes `Some(inner)`.
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}
