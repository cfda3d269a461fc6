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
        reward::{CreateRewardRuleDto, RewardRuleDto, RewardRuleFilter, UpdateRewardRuleDto},
    },
    server::{
        controller::util::get_context, error::Error, model::app::AppState,
        service::reward::RewardRuleService,
    },
};

pub static REWARD_TAG: &str = "reward";

/// List staff reward rules, newest first
#[utoipa::path(
    get,
    path = "/api/rewards",
    tag = REWARD_TAG,
    params(RewardRuleFilter),
    responses(
        (status = 200, description = "Reward rules", body = Vec<RewardRuleDto>),
        (status = 400, description = "Invalid filter value", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_reward_rules(
    State(state): State<AppState>,
    session: Session,
    Query(filter): Query<RewardRuleFilter>,
) -> Result<impl IntoResponse, Error> {
    get_context(&state, &session).await?;

    let rules = RewardRuleService::new(&state.db).list(filter).await?;

    Ok((StatusCode::OK, Json(rules)))
}

/// Create a reward rule
#[utoipa::path(
    post,
    path = "/api/rewards",
    tag = REWARD_TAG,
    request_body = CreateRewardRuleDto,
    responses(
        (status = 201, description = "Rule created", body = RewardRuleDto),
        (status = 400, description = "Invalid input", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_reward_rule(
    State(state): State<AppState>,
    session: Session,
    Json(dto): Json<CreateRewardRuleDto>,
) -> Result<impl IntoResponse, Error> {
    let ctx = get_context(&state, &session).await?;

    let rule = RewardRuleService::new(&state.db).create(&ctx, dto).await?;

    Ok((StatusCode::CREATED, Json(rule)))
}

/// Get a reward rule
#[utoipa::path(
    get,
    path = "/api/rewards/{id}",
    tag = REWARD_TAG,
    params(("id" = i32, Path, description = "Rule ID")),
    responses(
        (status = 200, description = "Rule", body = RewardRuleDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 404, description = "Rule not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_reward_rule(
    State(state): State<AppState>,
    session: Session,
    Path(rule_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    get_context(&state, &session).await?;

    let rule = RewardRuleService::new(&state.db).get(rule_id).await?;

    Ok((StatusCode::OK, Json(rule)))
}

/// Update a reward rule
#[utoipa::path(
    patch,
    path = "/api/rewards/{id}",
    tag = REWARD_TAG,
    params(("id" = i32, Path, description = "Rule ID")),
    request_body = UpdateRewardRuleDto,
    responses(
        (status = 200, description = "Rule updated", body = RewardRuleDto),
        (status = 400, description = "Invalid input", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 404, description = "Rule not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_reward_rule(
    State(state): State<AppState>,
    session: Session,
    Path(rule_id): Path<i32>,
    Json(dto): Json<UpdateRewardRuleDto>,
) -> Result<impl IntoResponse, Error> {
    let ctx = get_context(&state, &session).await?;

    let rule = RewardRuleService::new(&state.db)
        .update(&ctx, rule_id, dto)
        .await?;

    Ok((StatusCode::OK, Json(rule)))
}

/// Toggle a reward rule's active flag
#[utoipa::path(
    patch,
    path = "/api/rewards/{id}/active",
    tag = REWARD_TAG,
    params(("id" = i32, Path, description = "Rule ID")),
    request_body = SetActiveDto,
    responses(
        (status = 200, description = "Active flag written", body = RewardRuleDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 404, description = "Rule not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn set_reward_rule_active(
    State(state): State<AppState>,
    session: Session,
    Path(rule_id): Path<i32>,
    Json(dto): Json<SetActiveDto>,
) -> Result<impl IntoResponse, Error> {
    let ctx = get_context(&state, &session).await?;

    let rule = RewardRuleService::new(&state.db)
        .set_active(&ctx, rule_id, dto.is_active)
        .await?;

    Ok((StatusCode::OK, Json(rule)))
}

/// Delete a reward rule
#[utoipa::path(
    delete,
    path = "/api/rewards/{id}",
    tag = REWARD_TAG,
    params(("id" = i32, Path, description = "Rule ID")),
    responses(
        (status = 204, description = "Rule deleted"),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 404, description = "Rule not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_reward_rule(
    State(state): State<AppState>,
    session: Session,
    Path(rule_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let ctx = get_context(&state, &session).await?;

    RewardRuleService::new(&state.db).delete(&ctx, rule_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
