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
        legal::{
            CreateLegalDocDto, LegalDocDto, LegalDocFilter, UpdateLegalDocDto,
            UpdateLegalStatusDto,
        },
    },
    server::{
        controller::util::get_context, error::Error, model::app::AppState,
        service::legal::LegalDocService,
    },
};

pub static LEGAL_TAG: &str = "legal";

/// List legal documents, newest first
#[utoipa::path(
    get,
    path = "/api/legal",
    tag = LEGAL_TAG,
    params(LegalDocFilter),
    responses(
        (status = 200, description = "Legal documents", body = Vec<LegalDocDto>),
        (status = 400, description = "Invalid filter value", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_legal_docs(
    State(state): State<AppState>,
    session: Session,
    Query(filter): Query<LegalDocFilter>,
) -> Result<impl IntoResponse, Error> {
    get_context(&state, &session).await?;

    let docs = LegalDocService::new(&state.db).list(filter).await?;

    Ok((StatusCode::OK, Json(docs)))
}

/// Create a legal document
#[utoipa::path(
    post,
    path = "/api/legal",
    tag = LEGAL_TAG,
    request_body = CreateLegalDocDto,
    responses(
        (status = 201, description = "Document created", body = LegalDocDto),
        (status = 400, description = "Invalid input", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_legal_doc(
    State(state): State<AppState>,
    session: Session,
    Json(dto): Json<CreateLegalDocDto>,
) -> Result<impl IntoResponse, Error> {
    let ctx = get_context(&state, &session).await?;

    let doc = LegalDocService::new(&state.db).create(&ctx, dto).await?;

    Ok((StatusCode::CREATED, Json(doc)))
}

/// Get a legal document
#[utoipa::path(
    get,
    path = "/api/legal/{id}",
    tag = LEGAL_TAG,
    params(("id" = i32, Path, description = "Document ID")),
    responses(
        (status = 200, description = "Document", body = LegalDocDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 404, description = "Document not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_legal_doc(
    State(state): State<AppState>,
    session: Session,
    Path(doc_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    get_context(&state, &session).await?;

    let doc = LegalDocService::new(&state.db).get(doc_id).await?;

    Ok((StatusCode::OK, Json(doc)))
}

/// Update a legal document's fields (status changes go through the status
/// endpoint)
#[utoipa::path(
    patch,
    path = "/api/legal/{id}",
    tag = LEGAL_TAG,
    params(("id" = i32, Path, description = "Document ID")),
    request_body = UpdateLegalDocDto,
    responses(
        (status = 200, description = "Document updated", body = LegalDocDto),
        (status = 400, description = "Invalid input", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 404, description = "Document not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_legal_doc(
    State(state): State<AppState>,
    session: Session,
    Path(doc_id): Path<i32>,
    Json(dto): Json<UpdateLegalDocDto>,
) -> Result<impl IntoResponse, Error> {
    let ctx = get_context(&state, &session).await?;

    let doc = LegalDocService::new(&state.db).update(&ctx, doc_id, dto).await?;

    Ok((StatusCode::OK, Json(doc)))
}

/// Write a legal document's status
///
/// Entering APPROVED or SIGNED from a different status bumps the minor
/// version; writing the current status again does not.
#[utoipa::path(
    patch,
    path = "/api/legal/{id}/status",
    tag = LEGAL_TAG,
    params(("id" = i32, Path, description = "Document ID")),
    request_body = UpdateLegalStatusDto,
    responses(
        (status = 200, description = "Status written", body = LegalDocDto),
        (status = 400, description = "Unknown status value", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 404, description = "Document not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_legal_status(
    State(state): State<AppState>,
    session: Session,
    Path(doc_id): Path<i32>,
    Json(dto): Json<UpdateLegalStatusDto>,
) -> Result<impl IntoResponse, Error> {
    let ctx = get_context(&state, &session).await?;

    let doc = LegalDocService::new(&state.db)
        .update_status(&ctx, doc_id, dto)
        .await?;

    Ok((StatusCode::OK, Json(doc)))
}

/// Delete a legal document
#[utoipa::path(
    delete,
    path = "/api/legal/{id}",
    tag = LEGAL_TAG,
    params(("id" = i32, Path, description = "Document ID")),
    responses(
        (status = 204, description = "Document deleted"),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 404, description = "Document not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_legal_doc(
    State(state): State<AppState>,
    session: Session,
    Path(doc_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let ctx = get_context(&state, &session).await?;

    LegalDocService::new(&state.db).delete(&ctx, doc_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
