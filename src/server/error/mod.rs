//! Error types for the Launchpad server.
//!
//! Domain-specific error enums (authentication/authorization, validation)
//! are aggregated into a single [`Error`] type that implements
//! `IntoResponse`, mapping the failure taxonomy onto HTTP status codes:
//! 401 for missing sessions, 403 for insufficient roles, 400 for invalid
//! input (naming the offending field), 404 for missing rows, 409 for
//! consistency conflicts, and 500 for everything else.

pub mod auth;
pub mod validation;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing;

use crate::{
    model::api::ErrorDto,
    server::error::{auth::AuthError, validation::ValidationError},
};

/// Main error type for the Launchpad server.
///
/// Aggregates domain errors and external library errors into a single type
/// so handlers can use `?` throughout. The `IntoResponse` implementation
/// maps each variant to the HTTP response described in the module docs.
#[derive(Error, Debug)]
pub enum Error {
    /// Authentication or authorization failure.
    #[error(transparent)]
    AuthError(#[from] AuthError),
    /// Malformed or out-of-range input.
    #[error(transparent)]
    ValidationError(#[from] ValidationError),
    /// The targeted row does not exist.
    #[error("{entity} ID {id} not found")]
    NotFound {
        /// Entity kind, e.g. "task".
        entity: &'static str,
        /// The id that was requested.
        id: i32,
    },
    /// A write that would break referential consistency, e.g. assigning a
    /// workstream belonging to a different project, or a duplicate email.
    #[error("Conflict: {0}")]
    Conflict(String),
    /// Parse error (failed to parse a value from string or other format).
    #[error("Failed to parse value: {0:?}")]
    ParseError(String),
    /// Internal error indicating a bug in Launchpad's code.
    #[error("Internal error with Launchpad's code, please open an issue as this indicates a bug: {0:?}")]
    InternalError(String),
    /// Database error (query failures, connection issues, constraint violations).
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
    /// Session error (session retrieval, storage, serialization).
    #[error(transparent)]
    SessionError(#[from] tower_sessions::session::Error),
    /// Redis session store error (connection, command execution).
    #[error(transparent)]
    SessionRedisError(#[from] tower_sessions_redis_store::fred::prelude::Error),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Self::AuthError(err) => err.into_response(),
            Self::ValidationError(err) => err.into_response(),
            Self::NotFound { entity, id } => (
                StatusCode::NOT_FOUND,
                Json(ErrorDto {
                    error: format!("{} ID {} not found", entity, id),
                }),
            )
                .into_response(),
            Self::Conflict(message) => {
                (StatusCode::CONFLICT, Json(ErrorDto { error: message })).into_response()
            }
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Wrapper type for converting any displayable error into a 500 Internal
/// Server Error response.
///
/// Logs the full error message, but returns a generic body to the client to
/// avoid exposing internal details.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorDto {
                error: "Internal server error".to_string(),
            }),
        )
            .into_response()
    }
}
