use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        user::{ChangePasswordDto, CreateUserDto, UpdateProfileDto, UpdateUserDto, UserDto},
    },
    server::{
        controller::util::get_context, error::Error, model::app::AppState,
        service::user::UserService,
    },
};

pub static USER_TAG: &str = "user";

#[derive(Default, Deserialize, utoipa::IntoParams)]
pub struct UserListParams {
    pub role: Option<String>,
}

/// List users, optionally filtered by role (ADMIN only)
#[utoipa::path(
    get,
    path = "/api/users",
    tag = USER_TAG,
    params(UserListParams),
    responses(
        (status = 200, description = "Users sorted by name", body = Vec<UserDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_users(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<UserListParams>,
) -> Result<impl IntoResponse, Error> {
    let ctx = get_context(&state, &session).await?;

    let users = UserService::new(&state.db).list(&ctx, params.role).await?;

    Ok((StatusCode::OK, Json(users)))
}

/// Create a user (ADMIN only)
#[utoipa::path(
    post,
    path = "/api/users",
    tag = USER_TAG,
    request_body = CreateUserDto,
    responses(
        (status = 201, description = "User created", body = UserDto),
        (status = 400, description = "Invalid input", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 409, description = "Email already in use", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_user(
    State(state): State<AppState>,
    session: Session,
    Json(dto): Json<CreateUserDto>,
) -> Result<impl IntoResponse, Error> {
    let ctx = get_context(&state, &session).await?;

    let user = UserService::new(&state.db).create(&ctx, dto).await?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// Update a user's name or role (ADMIN only)
#[utoipa::path(
    patch,
    path = "/api/users/{id}",
    tag = USER_TAG,
    params(("id" = i32, Path, description = "User ID")),
    request_body = UpdateUserDto,
    responses(
        (status = 200, description = "User updated", body = UserDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_user(
    State(state): State<AppState>,
    session: Session,
    Path(user_id): Path<i32>,
    Json(dto): Json<UpdateUserDto>,
) -> Result<impl IntoResponse, Error> {
    let ctx = get_context(&state, &session).await?;

    let user = UserService::new(&state.db).update(&ctx, user_id, dto).await?;

    Ok((StatusCode::OK, Json(user)))
}

/// Delete a user (ADMIN only, never the caller's own account)
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = USER_TAG,
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Insufficient permissions or self-delete", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_user(
    State(state): State<AppState>,
    session: Session,
    Path(user_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let ctx = get_context(&state, &session).await?;

    UserService::new(&state.db).delete(&ctx, user_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Update the caller's display name
#[utoipa::path(
    patch,
    path = "/api/profile",
    tag = USER_TAG,
    request_body = UpdateProfileDto,
    responses(
        (status = 200, description = "Profile updated", body = UserDto),
        (status = 400, description = "Invalid input", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_profile(
    State(state): State<AppState>,
    session: Session,
    Json(dto): Json<UpdateProfileDto>,
) -> Result<impl IntoResponse, Error> {
    let ctx = get_context(&state, &session).await?;

    let user = UserService::new(&state.db).update_profile(&ctx, dto).await?;

    Ok((StatusCode::OK, Json(user)))
}

/// Change the caller's password
#[utoipa::path(
    post,
    path = "/api/profile/password",
    tag = USER_TAG,
    request_body = ChangePasswordDto,
    responses(
        (status = 204, description = "Password changed"),
        (status = 400, description = "Invalid input", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Current password is incorrect", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn change_password(
    State(state): State<AppState>,
    session: Session,
    Json(dto): Json<ChangePasswordDto>,
) -> Result<impl IntoResponse, Error> {
    let ctx = get_context(&state, &session).await?;

    UserService::new(&state.db).change_password(&ctx, dto).await?;

    Ok(StatusCode::NO_CONTENT)
}
