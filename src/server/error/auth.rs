use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing;

use crate::{model::api::ErrorDto, server::model::permission::Resource};

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("No user ID present in session")]
    Unauthenticated,
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("User ID {0:?} not found in database despite having an active session")]
    UserNotInDatabase(i32),
    #[error("Role lacks permission for resource {0:?}")]
    Forbidden(Resource),
    #[error("Operation requires the ADMIN role")]
    AdminRequired,
    #[error("A user cannot delete their own account")]
    SelfDeletion,
    #[error("Current password is incorrect")]
    WrongPassword,
}

impl AuthError {
    fn unauthorized(message: &str) -> Response {
        (
            StatusCode::UNAUTHORIZED,
            Json(ErrorDto {
                error: message.to_string(),
            }),
        )
            .into_response()
    }

    fn forbidden(message: &str) -> Response {
        (
            StatusCode::FORBIDDEN,
            Json(ErrorDto {
                error: message.to_string(),
            }),
        )
            .into_response()
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            Self::Unauthenticated => {
                tracing::debug!("{}", self);

                Self::unauthorized("Not authenticated")
            }
            Self::InvalidCredentials => Self::unauthorized("Invalid email or password"),
            Self::UserNotInDatabase(user_id) => {
                tracing::debug!(user_id = %user_id, "{}", self);

                Self::unauthorized("Not authenticated")
            }
            Self::Forbidden(resource) => {
                tracing::debug!(resource = ?resource, "{}", self);

                Self::forbidden("Insufficient permissions")
            }
            Self::AdminRequired => Self::forbidden("Insufficient permissions"),
            Self::SelfDeletion => Self::forbidden("You cannot delete your own account"),
            Self::WrongPassword => Self::forbidden("Current password is incorrect"),
        }
    }
}
