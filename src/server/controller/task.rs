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
        task::{
            AttachmentDto, ChecklistItemDto, CommentDto, CreateAttachmentDto,
            CreateChecklistItemDto, CreateCommentDto, CreateTaskDto, TaskDetailDto, TaskDto,
            TaskFilter, UpdateChecklistItemDto, UpdateTaskDto, UpdateTaskStatusDto,
        },
    },
    server::{
        controller::util::get_context, error::Error, model::app::AppState,
        service::task::TaskService,
    },
};

pub static TASK_TAG: &str = "task";

/// List tasks with optional equality filters
#[utoipa::path(
    get,
    path = "/api/tasks",
    tag = TASK_TAG,
    params(TaskFilter),
    responses(
        (status = 200, description = "Tasks sorted by priority, due date, creation", body = Vec<TaskDto>),
        (status = 400, description = "Invalid filter value", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_tasks(
    State(state): State<AppState>,
    session: Session,
    Query(filter): Query<TaskFilter>,
) -> Result<impl IntoResponse, Error> {
    get_context(&state, &session).await?;

    let tasks = TaskService::new(&state.db).list(filter).await?;

    Ok((StatusCode::OK, Json(tasks)))
}

/// Create a task
#[utoipa::path(
    post,
    path = "/api/tasks",
    tag = TASK_TAG,
    request_body = CreateTaskDto,
    responses(
        (status = 201, description = "Task created", body = TaskDto),
        (status = 400, description = "Invalid input", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 404, description = "Project or workstream not found", body = ErrorDto),
        (status = 409, description = "Workstream belongs to another project", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_task(
    State(state): State<AppState>,
    session: Session,
    Json(dto): Json<CreateTaskDto>,
) -> Result<impl IntoResponse, Error> {
    let ctx = get_context(&state, &session).await?;

    let task = TaskService::new(&state.db).create(&ctx, dto).await?;

    Ok((StatusCode::CREATED, Json(task)))
}

/// Get a task with comments and attachments
#[utoipa::path(
    get,
    path = "/api/tasks/{id}",
    tag = TASK_TAG,
    params(("id" = i32, Path, description = "Task ID")),
    responses(
        (status = 200, description = "Task detail", body = TaskDetailDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 404, description = "Task not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_task(
    State(state): State<AppState>,
    session: Session,
    Path(task_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    get_context(&state, &session).await?;

    let task = TaskService::new(&state.db).get(task_id).await?;

    Ok((StatusCode::OK, Json(task)))
}

/// Update a task
#[utoipa::path(
    patch,
    path = "/api/tasks/{id}",
    tag = TASK_TAG,
    params(("id" = i32, Path, description = "Task ID")),
    request_body = UpdateTaskDto,
    responses(
        (status = 200, description = "Task updated", body = TaskDto),
        (status = 400, description = "Invalid input", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 404, description = "Task not found", body = ErrorDto),
        (status = 409, description = "Workstream belongs to another project", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_task(
    State(state): State<AppState>,
    session: Session,
    Path(task_id): Path<i32>,
    Json(dto): Json<UpdateTaskDto>,
) -> Result<impl IntoResponse, Error> {
    let ctx = get_context(&state, &session).await?;

    let task = TaskService::new(&state.db).update(&ctx, task_id, dto).await?;

    Ok((StatusCode::OK, Json(task)))
}

/// Write a task's status; DONE sets the completion timestamp, any other
/// status clears it
#[utoipa::path(
    patch,
    path = "/api/tasks/{id}/status",
    tag = TASK_TAG,
    params(("id" = i32, Path, description = "Task ID")),
    request_body = UpdateTaskStatusDto,
    responses(
        (status = 200, description = "Status written", body = TaskDto),
        (status = 400, description = "Unknown status value", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 404, description = "Task not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_task_status(
    State(state): State<AppState>,
    session: Session,
    Path(task_id): Path<i32>,
    Json(dto): Json<UpdateTaskStatusDto>,
) -> Result<impl IntoResponse, Error> {
    let ctx = get_context(&state, &session).await?;

    let task = TaskService::new(&state.db)
        .update_status(&ctx, task_id, dto)
        .await?;

    Ok((StatusCode::OK, Json(task)))
}

/// Delete a task
#[utoipa::path(
    delete,
    path = "/api/tasks/{id}",
    tag = TASK_TAG,
    params(("id" = i32, Path, description = "Task ID")),
    responses(
        (status = 204, description = "Task deleted"),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 404, description = "Task not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_task(
    State(state): State<AppState>,
    session: Session,
    Path(task_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let ctx = get_context(&state, &session).await?;

    TaskService::new(&state.db).delete(&ctx, task_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Add a checklist item to a task
#[utoipa::path(
    post,
    path = "/api/tasks/{id}/checklist",
    tag = TASK_TAG,
    params(("id" = i32, Path, description = "Task ID")),
    request_body = CreateChecklistItemDto,
    responses(
        (status = 201, description = "Checklist item added", body = ChecklistItemDto),
        (status = 400, description = "Invalid input", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 404, description = "Task not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn add_task_checklist_item(
    State(state): State<AppState>,
    session: Session,
    Path(task_id): Path<i32>,
    Json(dto): Json<CreateChecklistItemDto>,
) -> Result<impl IntoResponse, Error> {
    let ctx = get_context(&state, &session).await?;

    let item = TaskService::new(&state.db)
        .add_checklist_item(&ctx, task_id, dto)
        .await?;

    Ok((StatusCode::CREATED, Json(item)))
}

/// Toggle a task checklist item's done flag
#[utoipa::path(
    patch,
    path = "/api/tasks/checklist/{itemId}",
    tag = TASK_TAG,
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
pub async fn update_task_checklist_item(
    State(state): State<AppState>,
    session: Session,
    Path(item_id): Path<i32>,
    Json(dto): Json<UpdateChecklistItemDto>,
) -> Result<impl IntoResponse, Error> {
    let ctx = get_context(&state, &session).await?;

    let item = TaskService::new(&state.db)
        .set_checklist_item_done(&ctx, item_id, dto.done)
        .await?;

    Ok((StatusCode::OK, Json(item)))
}

/// Delete a task checklist item
#[utoipa::path(
    delete,
    path = "/api/tasks/checklist/{itemId}",
    tag = TASK_TAG,
    params(("itemId" = i32, Path, description = "Checklist item ID")),
    responses(
        (status = 204, description = "Checklist item deleted"),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 404, description = "Checklist item not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_task_checklist_item(
    State(state): State<AppState>,
    session: Session,
    Path(item_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let ctx = get_context(&state, &session).await?;

    TaskService::new(&state.db)
        .delete_checklist_item(&ctx, item_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Comment on a task
#[utoipa::path(
    post,
    path = "/api/tasks/{id}/comments",
    tag = TASK_TAG,
    params(("id" = i32, Path, description = "Task ID")),
    request_body = CreateCommentDto,
    responses(
        (status = 201, description = "Comment added", body = CommentDto),
        (status = 400, description = "Invalid input", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 404, description = "Task not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn add_task_comment(
    State(state): State<AppState>,
    session: Session,
    Path(task_id): Path<i32>,
    Json(dto): Json<CreateCommentDto>,
) -> Result<impl IntoResponse, Error> {
    let ctx = get_context(&state, &session).await?;

    let comment = TaskService::new(&state.db)
        .add_comment(&ctx, task_id, dto)
        .await?;

    Ok((StatusCode::CREATED, Json(comment)))
}

/// Attach a file reference to a task
#[utoipa::path(
    post,
    path = "/api/tasks/{id}/attachments",
    tag = TASK_TAG,
    params(("id" = i32, Path, description = "Task ID")),
    request_body = CreateAttachmentDto,
    responses(
        (status = 201, description = "Attachment added", body = AttachmentDto),
        (status = 400, description = "Invalid input", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 404, description = "Task not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn add_task_attachment(
    State(state): State<AppState>,
    session: Session,
    Path(task_id): Path<i32>,
    Json(dto): Json<CreateAttachmentDto>,
) -> Result<impl IntoResponse, Error> {
    let ctx = get_context(&state, &session).await?;

    let attachment = TaskService::new(&state.db)
        .add_attachment(&ctx, task_id, dto)
        .await?;

    Ok((StatusCode::CREATED, Json(attachment)))
}
