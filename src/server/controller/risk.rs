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
        risk::{
            CreateRiskDto, RiskDto, RiskFilter, RiskMatrixDto, UpdateRiskDto, UpdateRiskStatusDto,
        },
    },
    server::{
        controller::util::get_context, error::Error, model::app::AppState,
        service::risk::RiskService,
    },
};

pub static RISK_TAG: &str = "risk";

#[derive(Default, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct RiskMatrixParams {
    pub project_id: Option<i32>,
}

/// List risks ordered by impact then probability, both descending
///
/// With `minScore`, only risks whose probability × impact reaches the
/// threshold are returned, re-sorted by score descending.
#[utoipa::path(
    get,
    path = "/api/risks",
    tag = RISK_TAG,
    params(RiskFilter),
    responses(
        (status = 200, description = "Risks with derived score and tier", body = Vec<RiskDto>),
        (status = 400, description = "Invalid filter value", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_risks(
    State(state): State<AppState>,
    session: Session,
    Query(filter): Query<RiskFilter>,
) -> Result<impl IntoResponse, Error> {
    get_context(&state, &session).await?;

    let risks = RiskService::new(&state.db).list(filter).await?;

    Ok((StatusCode::OK, Json(risks)))
}

/// Create a risk
#[utoipa::path(
    post,
    path = "/api/risks",
    tag = RISK_TAG,
    request_body = CreateRiskDto,
    responses(
        (status = 201, description = "Risk created", body = RiskDto),
        (status = 400, description = "Invalid input", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 404, description = "Project or workstream not found", body = ErrorDto),
        (status = 409, description = "Workstream belongs to another project", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_risk(
    State(state): State<AppState>,
    session: Session,
    Json(dto): Json<CreateRiskDto>,
) -> Result<impl IntoResponse, Error> {
    let ctx = get_context(&state, &session).await?;

    let risk = RiskService::new(&state.db).create(&ctx, dto).await?;

    Ok((StatusCode::CREATED, Json(risk)))
}

/// The 5×5 probability/impact matrix
#[utoipa::path(
    get,
    path = "/api/risks/matrix",
    tag = RISK_TAG,
    params(RiskMatrixParams),
    responses(
        (status = 200, description = "Matrix cells with bucketed risks", body = RiskMatrixDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn risk_matrix(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<RiskMatrixParams>,
) -> Result<impl IntoResponse, Error> {
    get_context(&state, &session).await?;

    let matrix = RiskService::new(&state.db).matrix(params.project_id).await?;

    Ok((StatusCode::OK, Json(matrix)))
}

/// Get a risk
#[utoipa::path(
    get,
    path = "/api/risks/{id}",
    tag = RISK_TAG,
    params(("id" = i32, Path, description = "Risk ID")),
    responses(
        (status = 200, description = "Risk", body = RiskDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 404, description = "Risk not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_risk(
    State(state): State<AppState>,
    session: Session,
    Path(risk_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    get_context(&state, &session).await?;

    let risk = RiskService::new(&state.db).get(risk_id).await?;

    Ok((StatusCode::OK, Json(risk)))
}

/// Update a risk
#[utoipa::path(
    patch,
    path = "/api/risks/{id}",
    tag = RISK_TAG,
    params(("id" = i32, Path, description = "Risk ID")),
    request_body = UpdateRiskDto,
    responses(
        (status = 200, description = "Risk updated", body = RiskDto),
        (status = 400, description = "Invalid input", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 404, description = "Risk not found", body = ErrorDto),
        (status = 409, description = "Workstream belongs to another project", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_risk(
    State(state): State<AppState>,
    session: Session,
    Path(risk_id): Path<i32>,
    Json(dto): Json<UpdateRiskDto>,
) -> Result<impl IntoResponse, Error> {
    let ctx = get_context(&state, &session).await?;

    let risk = RiskService::new(&state.db).update(&ctx, risk_id, dto).await?;

    Ok((StatusCode::OK, Json(risk)))
}

/// Write a risk's workflow status
#[utoipa::path(
    patch,
    path = "/api/risks/{id}/status",
    tag = RISK_TAG,
    params(("id" = i32, Path, description = "Risk ID")),
    request_body = UpdateRiskStatusDto,
    responses(
        (status = 200, description = "Status written", body = RiskDto),
        (status = 400, description = "Unknown status value", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 404, description = "Risk not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_risk_status(
    State(state): State<AppState>,
    session: Session,
    Path(risk_id): Path<i32>,
    Json(dto): Json<UpdateRiskStatusDto>,
) -> Result<impl IntoResponse, Error> {
    let ctx = get_context(&state, &session).await?;

    let risk = RiskService::new(&state.db)
        .update_status(&ctx, risk_id, dto)
        .await?;

    Ok((StatusCode::OK, Json(risk)))
}

/// Delete a risk
#[utoipa::path(
    delete,
    path = "/api/risks/{id}",
    tag = RISK_TAG,
    params(("id" = i32, Path, description = "Risk ID")),
    responses(
        (status = 204, description = "Risk deleted"),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 404, description = "Risk not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_risk(
    State(state): State<AppState>,
    session: Session,
    Path(risk_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let ctx = get_context(&state, &session).await?;

    RiskService::new(&state.db).delete(&ctx, risk_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
