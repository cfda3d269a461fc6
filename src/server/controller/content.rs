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
        content::{ContentItemDto, ContentItemFilter, CreateContentItemDto},
    },
    server::{
        controller::util::get_context, error::Error, model::app::AppState,
        service::content::ContentItemService,
    },
};

pub static CONTENT_TAG: &str = "content";

/// List content items, newest first
#[utoipa::path(
    get,
    path = "/api/content",
    tag = CONTENT_TAG,
    params(ContentItemFilter),
    responses(
        (status = 200, description = "Content items", body = Vec<ContentItemDto>),
        (status = 400, description = "Invalid filter value", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_content_items(
    State(state): State<AppState>,
    session: Session,
    Query(filter): Query<ContentItemFilter>,
) -> Result<impl IntoResponse, Error> {
    get_context(&state, &session).await?;

    let items = ContentItemService::new(&state.db).list(filter).await?;

    Ok((StatusCode::OK, Json(items)))
}

/// Store a content item with its client-side extraction payload
#[utoipa::path(
    post,
    path = "/api/content",
    tag = CONTENT_TAG,
    request_body = CreateContentItemDto,
    responses(
        (status = 201, description = "Content item stored", body = ContentItemDto),
        (status = 400, description = "Invalid input", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_content_item(
    State(state): State<AppState>,
    session: Session,
    Json(dto): Json<CreateContentItemDto>,
) -> Result<impl IntoResponse, Error> {
    let ctx = get_context(&state, &session).await?;

    let item = ContentItemService::new(&state.db).create(&ctx, dto).await?;

    Ok((StatusCode::CREATED, Json(item)))
}

/// Get a content item
#[utoipa::path(
    get,
    path = "/api/content/{id}",
    tag = CONTENT_TAG,
    params(("id" = i32, Path, description = "Content item ID")),
    responses(
        (status = 200, description = "Content item", body = ContentItemDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 404, description = "Content item not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_content_item(
    State(state): State<AppState>,
    session: Session,
    Path(item_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    get_context(&state, &session).await?;

    let item = ContentItemService::new(&state.db).get(item_id).await?;

    Ok((StatusCode::OK, Json(item)))
}

/// Delete a content item
#[utoipa::path(
    delete,
    path = "/api/content/{id}",
    tag = CONTENT_TAG,
    params(("id" = i32, Path, description = "Content item ID")),
    responses(
        (status = 204, description = "Content item deleted"),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 404, description = "Content item not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_content_item(
    State(state): State<AppState>,
    session: Session,
    Path(item_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let ctx = get_context(&state, &session).await?;

    ContentItemService::new(&state.db).delete(&ctx, item_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
