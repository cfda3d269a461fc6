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
        pricing::{CreatePricingPlanDto, PricingPlanDto, PricingPlanFilter, UpdatePricingPlanDto},
    },
    server::{
        controller::util::get_context, error::Error, model::app::AppState,
        service::pricing::PricingPlanService,
    },
};

pub static PRICING_TAG: &str = "pricing";

/// List pricing plans in display order
#[utoipa::path(
    get,
    path = "/api/pricing",
    tag = PRICING_TAG,
    params(PricingPlanFilter),
    responses(
        (status = 200, description = "Pricing plans", body = Vec<PricingPlanDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_pricing_plans(
    State(state): State<AppState>,
    session: Session,
    Query(filter): Query<PricingPlanFilter>,
) -> Result<impl IntoResponse, Error> {
    get_context(&state, &session).await?;

    let plans = PricingPlanService::new(&state.db).list(filter).await?;

    Ok((StatusCode::OK, Json(plans)))
}

/// Create a pricing plan
#[utoipa::path(
    post,
    path = "/api/pricing",
    tag = PRICING_TAG,
    request_body = CreatePricingPlanDto,
    responses(
        (status = 201, description = "Plan created", body = PricingPlanDto),
        (status = 400, description = "Invalid input", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_pricing_plan(
    State(state): State<AppState>,
    session: Session,
    Json(dto): Json<CreatePricingPlanDto>,
) -> Result<impl IntoResponse, Error> {
    let ctx = get_context(&state, &session).await?;

    let plan = PricingPlanService::new(&state.db).create(&ctx, dto).await?;

    Ok((StatusCode::CREATED, Json(plan)))
}

/// Get a pricing plan
#[utoipa::path(
    get,
    path = "/api/pricing/{id}",
    tag = PRICING_TAG,
    params(("id" = i32, Path, description = "Plan ID")),
    responses(
        (status = 200, description = "Plan", body = PricingPlanDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 404, description = "Plan not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_pricing_plan(
    State(state): State<AppState>,
    session: Session,
    Path(plan_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    get_context(&state, &session).await?;

    let plan = PricingPlanService::new(&state.db).get(plan_id).await?;

    Ok((StatusCode::OK, Json(plan)))
}

/// Update a pricing plan
#[utoipa::path(
    patch,
    path = "/api/pricing/{id}",
    tag = PRICING_TAG,
    params(("id" = i32, Path, description = "Plan ID")),
    request_body = UpdatePricingPlanDto,
    responses(
        (status = 200, description = "Plan updated", body = PricingPlanDto),
        (status = 400, description = "Invalid input", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 404, description = "Plan not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_pricing_plan(
    State(state): State<AppState>,
    session: Session,
    Path(plan_id): Path<i32>,
    Json(dto): Json<UpdatePricingPlanDto>,
) -> Result<impl IntoResponse, Error> {
    let ctx = get_context(&state, &session).await?;

    let plan = PricingPlanService::new(&state.db)
        .update(&ctx, plan_id, dto)
        .await?;

    Ok((StatusCode::OK, Json(plan)))
}

/// Toggle a pricing plan's active flag
#[utoipa::path(
    patch,
    path = "/api/pricing/{id}/active",
    tag = PRICING_TAG,
    params(("id" = i32, Path, description = "Plan ID")),
    request_body = SetActiveDto,
    responses(
        (status = 200, description = "Active flag written", body = PricingPlanDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 404, description = "Plan not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn set_pricing_plan_active(
    State(state): State<AppState>,
    session: Session,
    Path(plan_id): Path<i32>,
    Json(dto): Json<SetActiveDto>,
) -> Result<impl IntoResponse, Error> {
    let ctx = get_context(&state, &session).await?;

    let plan = PricingPlanService::new(&state.db)
        .set_active(&ctx, plan_id, dto.is_active)
        .await?;

    Ok((StatusCode::OK, Json(plan)))
}

/// Delete a pricing plan
#[utoipa::path(
    delete,
    path = "/api/pricing/{id}",
    tag = PRICING_TAG,
    params(("id" = i32, Path, description = "Plan ID")),
    responses(
        (status = 204, description = "Plan deleted"),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 404, description = "Plan not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_pricing_plan(
    State(state): State<AppState>,
    session: Session,
    Path(plan_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let ctx = get_context(&state, &session).await?;

    PricingPlanService::new(&state.db).delete(&ctx, plan_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
