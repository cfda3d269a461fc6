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
        workstream::{CreateWorkstreamDto, UpdateWorkstreamDto, WorkstreamDto},
    },
    server::{
        controller::util::get_context, error::Error, model::app::AppState,
        service::workstream::WorkstreamService,
    },
};

pub static WORKSTREAM_TAG: &str = "workstream";

#[derive(Default, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct WorkstreamListParams {
    pub project_id: Option<i32>,
}

/// List workstreams, sorted by name
#[utoipa::path(
    get,
    path = "/api/workstreams",
    tag = WORKSTREAM_TAG,
    params(WorkstreamListParams),
    responses(
        (status = 200, description = "Workstreams with child counts", body = Vec<WorkstreamDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_workstreams(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<WorkstreamListParams>,
) -> Result<impl IntoResponse, Error> {
    get_context(&state, &session).await?;

    let workstreams = WorkstreamService::new(&state.db)
        .list(params.project_id)
        .await?;

    Ok((StatusCode::OK, Json(workstreams)))
}

/// Create a workstream under a project
#[utoipa::path(
    post,
    path = "/api/workstreams",
    tag = WORKSTREAM_TAG,
    request_body = CreateWorkstreamDto,
    responses(
        (status = 201, description = "Workstream created", body = WorkstreamDto),
        (status = 400, description = "Invalid input", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 404, description = "Project not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_workstream(
    State(state): State<AppState>,
    session: Session,
    Json(dto): Json<CreateWorkstreamDto>,
) -> Result<impl IntoResponse, Error> {
    let ctx = get_context(&state, &session).await?;

    let workstream = WorkstreamService::new(&state.db).create(&ctx, dto).await?;

    Ok((StatusCode::CREATED, Json(workstream)))
}

/// Get a workstream
#[utoipa::path(
    get,
    path = "/api/workstreams/{id}",
    tag = WORKSTREAM_TAG,
    params(("id" = i32, Path, description = "Workstream ID")),
    responses(
        (status = 200, description = "Workstream", body = WorkstreamDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 404, description = "Workstream not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_workstream(
    State(state): State<AppState>,
    session: Session,
    Path(workstream_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    get_context(&state, &session).await?;

    let workstream = WorkstreamService::new(&state.db).get(workstream_id).await?;

    Ok((StatusCode::OK, Json(workstream)))
}

/// Update a workstream
#[utoipa::path(
    patch,
    path = "/api/workstreams/{id}",
    tag = WORKSTREAM_TAG,
    params(("id" = i32, Path, description = "Workstream ID")),
    request_body = UpdateWorkstreamDto,
    responses(
        (status = 200, description = "Workstream updated", body = WorkstreamDto),
        (status = 400, description = "Invalid input", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 404, description = "Workstream not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_workstream(
    State(state): State<AppState>,
    session: Session,
    Path(workstream_id): Path<i32>,
    Json(dto): Json<UpdateWorkstreamDto>,
) -> Result<impl IntoResponse, Error> {
    let ctx = get_context(&state, &session).await?;

    let workstream = WorkstreamService::new(&state.db)
        .update(&ctx, workstream_id, dto)
        .await?;

    Ok((StatusCode::OK, Json(workstream)))
}

/// Delete a workstream, keeping its children with nulled references
#[utoipa::path(
    delete,
    path = "/api/workstreams/{id}",
    tag = WORKSTREAM_TAG,
    params(("id" = i32, Path, description = "Workstream ID")),
    responses(
        (status = 204, description = "Workstream deleted"),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 404, description = "Workstream not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_workstream(
    State(state): State<AppState>,
    session: Session,
    Path(workstream_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let ctx = get_context(&state, &session).await?;

    WorkstreamService::new(&state.db)
        .delete(&ctx, workstream_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
