use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        project::{CreateProjectDto, ProjectDetailDto, ProjectDto, UpdateProjectDto},
    },
    server::{
        controller::util::get_context, error::Error, model::app::AppState,
        service::project::ProjectService,
    },
};

pub static PROJECT_TAG: &str = "project";

/// List projects, newest first
#[utoipa::path(
    get,
    path = "/api/projects",
    tag = PROJECT_TAG,
    responses(
        (status = 200, description = "Projects", body = Vec<ProjectDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_projects(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    get_context(&state, &session).await?;

    let projects = ProjectService::new(&state.db).list().await?;

    Ok((StatusCode::OK, Json(projects)))
}

/// Create a project
#[utoipa::path(
    post,
    path = "/api/projects",
    tag = PROJECT_TAG,
    request_body = CreateProjectDto,
    responses(
        (status = 201, description = "Project created", body = ProjectDto),
        (status = 400, description = "Invalid input", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_project(
    State(state): State<AppState>,
    session: Session,
    Json(dto): Json<CreateProjectDto>,
) -> Result<impl IntoResponse, Error> {
    let ctx = get_context(&state, &session).await?;

    let project = ProjectService::new(&state.db).create(&ctx, dto).await?;

    Ok((StatusCode::CREATED, Json(project)))
}

/// Get a project with workstreams and progress rollups
#[utoipa::path(
    get,
    path = "/api/projects/{id}",
    tag = PROJECT_TAG,
    params(("id" = i32, Path, description = "Project ID")),
    responses(
        (status = 200, description = "Project detail", body = ProjectDetailDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 404, description = "Project not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_project(
    State(state): State<AppState>,
    session: Session,
    Path(project_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    get_context(&state, &session).await?;

    let project = ProjectService::new(&state.db).get(project_id).await?;

    Ok((StatusCode::OK, Json(project)))
}

/// Update a project
#[utoipa::path(
    patch,
    path = "/api/projects/{id}",
    tag = PROJECT_TAG,
    params(("id" = i32, Path, description = "Project ID")),
    request_body = UpdateProjectDto,
    responses(
        (status = 200, description = "Project updated", body = ProjectDto),
        (status = 400, description = "Invalid input", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 404, description = "Project not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_project(
    State(state): State<AppState>,
    session: Session,
    Path(project_id): Path<i32>,
    Json(dto): Json<UpdateProjectDto>,
) -> Result<impl IntoResponse, Error> {
    let ctx = get_context(&state, &session).await?;

    let project = ProjectService::new(&state.db)
        .update(&ctx, project_id, dto)
        .await?;

    Ok((StatusCode::OK, Json(project)))
}

/// Delete a project and everything it owns
#[utoipa::path(
    delete,
    path = "/api/projects/{id}",
    tag = PROJECT_TAG,
    params(("id" = i32, Path, description = "Project ID")),
    responses(
        (status = 204, description = "Project and owned entities deleted"),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 404, description = "Project not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_project(
    State(state): State<AppState>,
    session: Session,
    Path(project_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let ctx = get_context(&state, &session).await?;

    ProjectService::new(&state.db).delete(&ctx, project_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
