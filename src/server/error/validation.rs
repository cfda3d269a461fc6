use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

/// Input validation failure naming the first offending field.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Field '{0}' is required")]
    Required(&'static str),
    #[error("Field '{field}' has invalid value '{value}'")]
    InvalidValue { field: &'static str, value: String },
    #[error("Field '{field}' must be between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        min: i64,
        max: i64,
    },
    #[error("Field '{field}' is malformed: {reason}")]
    Malformed {
        field: &'static str,
        reason: String,
    },
}

impl ValidationError {
    /// The name of the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Required(field) => field,
            Self::InvalidValue { field, .. } => field,
            Self::OutOfRange { field, .. } => field,
            Self::Malformed { field, .. } => field,
        }
    }
}

impl IntoResponse for ValidationError {
    fn into_response(self) -> Response {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorDto {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
