use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::{ErrorDto, SetActiveDto},
        runbook::{CreateRunbookDto, RunbookDto, RunbookFilter, UpdateRunbookDto},
    },
    server::{
        controller::util::get_context, error::Error, model::app::AppState,
        service::runbook::RunbookService,
    },
};

pub static RUNBOOK_TAG: &str = "runbook";

/// List operational runbooks, newest first
#[utoipa::path(
    get,
    path = "/api/runbooks",
    tag = RUNBOOK_TAG,
    params(RunbookFilter),
    responses(
        (status = 200, description = "Runbooks", body = Vec<RunbookDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_runbooks(
    State(state): State<AppState>,
    session: Session,
    Query(filter): Query<RunbookFilter>,
) -> Result<impl IntoResponse, Error> {
    get_context(&state, &session).await?;

    let runbooks = RunbookService::new(&state.db).list(filter).await?;

    Ok((StatusCode::OK, Json(runbooks)))
}

/// Create a runbook
#[utoipa::path(
    post,
    path = "/api/runbooks",
    tag = RUNBOOK_TAG,
    request_body = CreateRunbookDto,
    responses(
        (status = 201, description = "Runbook created", body = RunbookDto),
        (status = 400, description = "Invalid input", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_runbook(
    State(state): State<AppState>,
    session: Session,
    Json(dto): Json<CreateRunbookDto>,
) -> Result<impl IntoResponse, Error> {
    let ctx = get_context(&state, &session).await?;

    let runbook = RunbookService::new(&state.db).create(&ctx, dto).await?;

    Ok((StatusCode::CREATED, Json(runbook)))
}

/// Get a runbook
#[utoipa::path(
    get,
    path = "/api/runbooks/{id}",
    tag = RUNBOOK_TAG,
    params(("id" = i32, Path, description = "Runbook ID")),
    responses(
        (status = 200, description = "Runbook", body = RunbookDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 404, description = "Runbook not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_runbook(
    State(state): State<AppState>,
    session: Session,
    Path(runbook_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    get_context(&state, &session).await?;

    let runbook = RunbookService::new(&state.db).get(runbook_id).await?;

    Ok((StatusCode::OK, Json(runbook)))
}

/// Update a runbook
#[utoipa::path(
    patch,
    path = "/api/runbooks/{id}",
    tag = RUNBOOK_TAG,
    params(("id" = i32, Path, description = "Runbook ID")),
    request_body = UpdateRunbookDto,
    responses(
        (status = 200, description = "Runbook updated", body = RunbookDto),
        (status = 400, description = "Invalid input", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 404, description = "Runbook not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_runbook(
    State(state): State<AppState>,
    session: Session,
    Path(runbook_id): Path<i32>,
    Json(dto): Json<UpdateRunbookDto>,
) -> Result<impl IntoResponse, Error> {
    let ctx = get_context(&state, &session).await?;

    let runbook = RunbookService::new(&state.db)
        .update(&ctx, runbook_id, dto)
        .await?;

    Ok((StatusCode::OK, Json(runbook)))
}

/// Toggle a runbook's active flag
#[utoipa::path(
    patch,
    path = "/api/runbooks/{id}/active",
    tag = RUNBOOK_TAG,
    params(("id" = i32, Path, description = "Runbook ID")),
    request_body = SetActiveDto,
    responses(
        (status = 200, description = "Active flag written", body = RunbookDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 404, description = "Runbook not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn set_runbook_active(
    State(state): State<AppState>,
    session: Session,
    Path(runbook_id): Path<i32>,
    Json(dto): Json<SetActiveDto>,
) -> Result<impl IntoResponse, Error> {
    let ctx = get_context(&state, &session).await?;

    let runbook = RunbookService::new(&state.db)
        .set_active(&ctx, runbook_id, dto.is_active)
        .await?;

    Ok((StatusCode::OK, Json(runbook)))
}

/// Delete a runbook
#[utoipa::path(
    delete,
    path = "/api/runbooks/{id}",
    tag = RUNBOOK_TAG,
    params(("id" = i32, Path, description = "Runbook ID")),
    responses(
        (status = 204, description = "Runbook deleted"),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 404, description = "Runbook not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_runbook(
    State(state): State<AppState>,
    session: Session,
    Path(runbook_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let ctx = get_context(&state, &session).await?;

    RunbookService::new(&state.db).delete(&ctx, runbook_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
