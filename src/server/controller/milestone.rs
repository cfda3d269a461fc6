use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        milestone::{
            CreateDependencyDto, CreateMilestoneDto, MilestoneDetailDto, MilestoneDto,
            MilestoneFilter, UpdateMilestoneDto,
        },
        task::{ChecklistItemDto, CreateChecklistItemDto, UpdateChecklistItemDto},
    },
    server::{
        controller::util::get_context, error::Error, model::app::AppState,
        service::milestone::MilestoneService,
    },
};

pub static MILESTONE_TAG: &str = "milestone";

/// List milestones, soonest target date first
#[utoipa::path(
    get,
    path = "/api/milestones",
    tag = MILESTONE_TAG,
    params(MilestoneFilter),
    responses(
        (status = 200, description = "Milestones", body = Vec<MilestoneDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_milestones(
    State(state): State<AppState>,
    session: Session,
    Query(filter): Query<MilestoneFilter>,
) -> Result<impl IntoResponse, Error> {
    get_context(&state, &session).await?;

    let milestones = MilestoneService::new(&state.db).list(filter).await?;

    Ok((StatusCode::OK, Json(milestones)))
}

/// Create a milestone
#[utoipa::path(
    post,
    path = "/api/milestones",
    tag = MILESTONE_TAG,
    request_body = CreateMilestoneDto,
    responses(
        (status = 201, description = "Milestone created", body = MilestoneDto),
        (status = 400, description = "Invalid input", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 404, description = "Project or workstream not found", body = ErrorDto),
        (status = 409, description = "Workstream belongs to another project", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_milestone(
    State(state): State<AppState>,
    session: Session,
    Json(dto): Json<CreateMilestoneDto>,
) -> Result<impl IntoResponse, Error> {
    let ctx = get_context(&state, &session).await?;

    let milestone = MilestoneService::new(&state.db).create(&ctx, dto).await?;

    Ok((StatusCode::CREATED, Json(milestone)))
}

/// Get a milestone with its dependency edges
#[utoipa::path(
    get,
    path = "/api/milestones/{id}",
    tag = MILESTONE_TAG,
    params(("id" = i32, Path, description = "Milestone ID")),
    responses(
        (status = 200, description = "Milestone detail", body = MilestoneDetailDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 404, description = "Milestone not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_milestone(
    State(state): State<AppState>,
    session: Session,
    Path(milestone_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    get_context(&state, &session).await?;

    let milestone = MilestoneService::new(&state.db).get(milestone_id).await?;

    Ok((StatusCode::OK, Json(milestone)))
}

/// Update a milestone
#[utoipa::path(
    patch,
    path = "/api/milestones/{id}",
    tag = MILESTONE_TAG,
    params(("id" = i32, Path, description = "Milestone ID")),
    request_body = UpdateMilestoneDto,
    responses(
        (status = 200, description = "Milestone updated", body = MilestoneDto),
        (status = 400, description = "Invalid input", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 404, description = "Milestone not found", body = ErrorDto),
        (status = 409, description = "Workstream belongs to another project", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_milestone(
    State(state): State<AppState>,
    session: Session,
    Path(milestone_id): Path<i32>,
    Json(dto): Json<UpdateMilestoneDto>,
) -> Result<impl IntoResponse, Error> {
    let ctx = get_context(&state, &session).await?;

    let milestone = MilestoneService::new(&state.db)
        .update(&ctx, milestone_id, dto)
        .await?;

    Ok((StatusCode::OK, Json(milestone)))
}

/// Toggle a milestone's completion flag
#[utoipa::path(
    post,
    path = "/api/milestones/{id}/complete",
    tag = MILESTONE_TAG,
    params(("id" = i32, Path, description = "Milestone ID")),
    responses(
        (status = 200, description = "Completion flag flipped", body = MilestoneDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 404, description = "Milestone not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn toggle_milestone_complete(
    State(state): State<AppState>,
    session: Session,
    Path(milestone_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let ctx = get_context(&state, &session).await?;

    let milestone = MilestoneService::new(&state.db)
        .toggle_complete(&ctx, milestone_id)
        .await?;

    Ok((StatusCode::OK, Json(milestone)))
}

/// Delete a milestone
#[utoipa::path(
    delete,
    path = "/api/milestones/{id}",
    tag = MILESTONE_TAG,
    params(("id" = i32, Path, description = "Milestone ID")),
    responses(
        (status = 204, description = "Milestone deleted"),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 404, description = "Milestone not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_milestone(
    State(state): State<AppState>,
    session: Session,
    Path(milestone_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let ctx = get_context(&state, &session).await?;

    MilestoneService::new(&state.db)
        .delete(&ctx, milestone_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Add a dependency edge; self-dependencies and cycles are rejected
#[utoipa::path(
    post,
    path = "/api/milestones/{id}/dependencies",
    tag = MILESTONE_TAG,
    params(("id" = i32, Path, description = "Milestone ID")),
    request_body = CreateDependencyDto,
    responses(
        (status = 200, description = "Dependency added", body = MilestoneDetailDto),
        (status = 400, description = "Self-dependency or cycle", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 404, description = "Milestone not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn add_milestone_dependency(
    State(state): State<AppState>,
    session: Session,
    Path(milestone_id): Path<i32>,
    Json(dto): Json<CreateDependencyDto>,
) -> Result<impl IntoResponse, Error> {
    let ctx = get_context(&state, &session).await?;

    let milestone = MilestoneService::new(&state.db)
        .add_dependency(&ctx, milestone_id, dto)
        .await?;

    Ok((StatusCode::OK, Json(milestone)))
}

/// Remove a dependency edge
#[utoipa::path(
    delete,
    path = "/api/milestones/{id}/dependencies/{dependsOnId}",
    tag = MILESTONE_TAG,
    params(
        ("id" = i32, Path, description = "Milestone ID"),
        ("dependsOnId" = i32, Path, description = "Milestone depended on")
    ),
    responses(
        (status = 200, description = "Dependency removed", body = MilestoneDetailDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 404, description = "Dependency not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn remove_milestone_dependency(
    State(state): State<AppState>,
    session: Session,
    Path((milestone_id, depends_on_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, Error> {
    let ctx = get_context(&state, &session).await?;

    let milestone = MilestoneService::new(&state.db)
        .remove_dependency(&ctx, milestone_id, depends_on_id)
        .await?;

    Ok((StatusCode::OK, Json(milestone)))
}

/// Add a checklist item to a milestone
#[utoipa::path(
    post,
    path = "/api/milestones/{id}/checklist",
    tag = MILESTONE_TAG,
    params(("id" = i32, Path, description = "Milestone ID")),
    request_body = CreateChecklistItemDto,
    responses(
        (status = 201, description = "Checklist item added", body = ChecklistItemDto),
        (status = 400, description = "Invalid input", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 404, description = "Milestone not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn add_milestone_checklist_item(
    State(state): State<AppState>,
    session: Session,
    Path(milestone_id): Path<i32>,
    Json(dto): Json<CreateChecklistItemDto>,
) -> Result<impl IntoResponse, Error> {
    let ctx = get_context(&state, &session).await?;

    let item = MilestoneService::new(&state.db)
        .add_checklist_item(&ctx, milestone_id, dto)
        .await?;

    Ok((StatusCode::CREATED, Json(item)))
}

/// Toggle a milestone checklist item's done flag
#[utoipa::path(
    patch,
    path = "/api/milestones/checklist/{itemId}",
    tag = MILESTONE_TAG,
    params(("itemId" = i32, Path, description = "Checklist item ID")),
    request_body = UpdateChecklistItemDto,
    responses(
        (status = 200, description = "Checklist item updated", body = ChecklistItemDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 404, description = "Checklist item not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_milestone_checklist_item(
    State(state): State<AppState>,
    session: Session,
    Path(item_id): Path<i32>,
    Json(dto): Json<UpdateChecklistItemDto>,
) -> Result<impl IntoResponse, Error> {
    let ctx = get_context(&state, &session).await?;

    let item = MilestoneService::new(&state.db)
        .set_checklist_item_done(&ctx, item_id, dto.done)
        .await?;

    Ok((StatusCode::OK, Json(item)))
}

/// Delete a milestone checklist item
#[utoipa::path(
    delete,
    path = "/api/milestones/checklist/{itemId}",
    tag = MILESTONE_TAG,
    params(("itemId" = i32, Path, description = "Checklist item ID")),
    responses(
        (status = 204, description = "Checklist item deleted"),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 404, description = "Checklist item not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_milestone_checklist_item(
    State(state): State<AppState>,
    session: Session,
    Path(item_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let ctx = get_context(&state, &session).await?;

    MilestoneService::new(&state.db)
        .delete_checklist_item(&ctx, item_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
