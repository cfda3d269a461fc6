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
        hardware::{
            AccessoryDesignDto, BundleDto, CreateAccessoryDesignDto, CreateBundleDto,
            CreateHardwareCandidateDto, HardwareCandidateDto, HardwareFilter,
            SetRecommendationDto, UpdateAccessoryDesignDto, UpdateBundleDto,
            UpdateHardwareCandidateDto,
        },
    },
    server::{
        controller::util::get_context,
        error::Error,
        model::app::AppState,
        service::hardware::{
            accessory::AccessoryDesignService, bundle::BundleService, HardwareCandidateService,
        },
    },
};

pub static HARDWARE_TAG: &str = "hardware";

/// List hardware candidates
#[utoipa::path(
    get,
    path = "/api/hardware",
    tag = HARDWARE_TAG,
    params(HardwareFilter),
    responses(
        (status = 200, description = "Hardware candidates, newest first", body = Vec<HardwareCandidateDto>),
        (status = 400, description = "Invalid filter value", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_hardware(
    State(state): State<AppState>,
    session: Session,
    Query(filter): Query<HardwareFilter>,
) -> Result<impl IntoResponse, Error> {
    get_context(&state, &session).await?;

    let candidates = HardwareCandidateService::new(&state.db).list(filter).await?;

    Ok((StatusCode::OK, Json(candidates)))
}

/// Create a hardware candidate
#[utoipa::path(
    post,
    path = "/api/hardware",
    tag = HARDWARE_TAG,
    request_body = CreateHardwareCandidateDto,
    responses(
        (status = 201, description = "Candidate created", body = HardwareCandidateDto),
        (status = 400, description = "Invalid input", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_hardware(
    State(state): State<AppState>,
    session: Session,
    Json(dto): Json<CreateHardwareCandidateDto>,
) -> Result<impl IntoResponse, Error> {
    let ctx = get_context(&state, &session).await?;

    let candidate = HardwareCandidateService::new(&state.db).create(&ctx, dto).await?;

    Ok((StatusCode::CREATED, Json(candidate)))
}

/// Get a hardware candidate
#[utoipa::path(
    get,
    path = "/api/hardware/{id}",
    tag = HARDWARE_TAG,
    params(("id" = i32, Path, description = "Candidate ID")),
    responses(
        (status = 200, description = "Candidate", body = HardwareCandidateDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 404, description = "Candidate not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_hardware(
    State(state): State<AppState>,
    session: Session,
    Path(candidate_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    get_context(&state, &session).await?;

    let candidate = HardwareCandidateService::new(&state.db).get(candidate_id).await?;

    Ok((StatusCode::OK, Json(candidate)))
}

/// Update a hardware candidate
#[utoipa::path(
    patch,
    path = "/api/hardware/{id}",
    tag = HARDWARE_TAG,
    params(("id" = i32, Path, description = "Candidate ID")),
    request_body = UpdateHardwareCandidateDto,
    responses(
        (status = 200, description = "Candidate updated", body = HardwareCandidateDto),
        (status = 400, description = "Invalid input", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 404, description = "Candidate not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_hardware(
    State(state): State<AppState>,
    session: Session,
    Path(candidate_id): Path<i32>,
    Json(dto): Json<UpdateHardwareCandidateDto>,
) -> Result<impl IntoResponse, Error> {
    let ctx = get_context(&state, &session).await?;

    let candidate = HardwareCandidateService::new(&state.db)
        .update(&ctx, candidate_id, dto)
        .await?;

    Ok((StatusCode::OK, Json(candidate)))
}

/// Write the recommendation slot; PRIMARY is single-winner
#[utoipa::path(
    patch,
    path = "/api/hardware/{id}/recommendation",
    tag = HARDWARE_TAG,
    params(("id" = i32, Path, description = "Candidate ID")),
    request_body = SetRecommendationDto,
    responses(
        (status = 200, description = "Recommendation written", body = HardwareCandidateDto),
        (status = 400, description = "Unknown recommendation value", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 404, description = "Candidate not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn set_hardware_recommendation(
    State(state): State<AppState>,
    session: Session,
    Path(candidate_id): Path<i32>,
    Json(dto): Json<SetRecommendationDto>,
) -> Result<impl IntoResponse, Error> {
    let ctx = get_context(&state, &session).await?;

    let candidate = HardwareCandidateService::new(&state.db)
        .set_recommendation(&ctx, candidate_id, dto)
        .await?;

    Ok((StatusCode::OK, Json(candidate)))
}

/// Delete a hardware candidate
#[utoipa::path(
    delete,
    path = "/api/hardware/{id}",
    tag = HARDWARE_TAG,
    params(("id" = i32, Path, description = "Candidate ID")),
    responses(
        (status = 204, description = "Candidate deleted"),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 404, description = "Candidate not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_hardware(
    State(state): State<AppState>,
    session: Session,
    Path(candidate_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let ctx = get_context(&state, &session).await?;

    HardwareCandidateService::new(&state.db)
        .delete(&ctx, candidate_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// List accessory designs
#[utoipa::path(
    get,
    path = "/api/hardware/accessories",
    tag = HARDWARE_TAG,
    responses(
        (status = 200, description = "Accessory designs, newest first", body = Vec<AccessoryDesignDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_accessories(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    get_context(&state, &session).await?;

    let accessories = AccessoryDesignService::new(&state.db).list().await?;

    Ok((StatusCode::OK, Json(accessories)))
}

/// Create an accessory design
#[utoipa::path(
    post,
    path = "/api/hardware/accessories",
    tag = HARDWARE_TAG,
    request_body = CreateAccessoryDesignDto,
    responses(
        (status = 201, description = "Accessory design created", body = AccessoryDesignDto),
        (status = 400, description = "Invalid input", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_accessory(
    State(state): State<AppState>,
    session: Session,
    Json(dto): Json<CreateAccessoryDesignDto>,
) -> Result<impl IntoResponse, Error> {
    let ctx = get_context(&state, &session).await?;

    let accessory = AccessoryDesignService::new(&state.db).create(&ctx, dto).await?;

    Ok((StatusCode::CREATED, Json(accessory)))
}

/// Update an accessory design
#[utoipa::path(
    patch,
    path = "/api/hardware/accessories/{id}",
    tag = HARDWARE_TAG,
    params(("id" = i32, Path, description = "Accessory design ID")),
    request_body = UpdateAccessoryDesignDto,
    responses(
        (status = 200, description = "Accessory design updated", body = AccessoryDesignDto),
        (status = 400, description = "Invalid input", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 404, description = "Accessory design not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_accessory(
    State(state): State<AppState>,
    session: Session,
    Path(accessory_id): Path<i32>,
    Json(dto): Json<UpdateAccessoryDesignDto>,
) -> Result<impl IntoResponse, Error> {
    let ctx = get_context(&state, &session).await?;

    let accessory = AccessoryDesignService::new(&state.db)
        .update(&ctx, accessory_id, dto)
        .await?;

    Ok((StatusCode::OK, Json(accessory)))
}

/// Delete an accessory design
#[utoipa::path(
    delete,
    path = "/api/hardware/accessories/{id}",
    tag = HARDWARE_TAG,
    params(("id" = i32, Path, description = "Accessory design ID")),
    responses(
        (status = 204, description = "Accessory design deleted"),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 404, description = "Accessory design not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_accessory(
    State(state): State<AppState>,
    session: Session,
    Path(accessory_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let ctx = get_context(&state, &session).await?;

    AccessoryDesignService::new(&state.db)
        .delete(&ctx, accessory_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// List bundles
#[utoipa::path(
    get,
    path = "/api/hardware/bundles",
    tag = HARDWARE_TAG,
    responses(
        (status = 200, description = "Bundles, newest first", body = Vec<BundleDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_bundles(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    get_context(&state, &session).await?;

    let bundles = BundleService::new(&state.db).list().await?;

    Ok((StatusCode::OK, Json(bundles)))
}

/// Create a bundle
#[utoipa::path(
    post,
    path = "/api/hardware/bundles",
    tag = HARDWARE_TAG,
    request_body = CreateBundleDto,
    responses(
        (status = 201, description = "Bundle created", body = BundleDto),
        (status = 400, description = "Invalid input", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_bundle(
    State(state): State<AppState>,
    session: Session,
    Json(dto): Json<CreateBundleDto>,
) -> Result<impl IntoResponse, Error> {
    let ctx = get_context(&state, &session).await?;

    let bundle = BundleService::new(&state.db).create(&ctx, dto).await?;

    Ok((StatusCode::CREATED, Json(bundle)))
}

/// Update a bundle
#[utoipa::path(
    patch,
    path = "/api/hardware/bundles/{id}",
    tag = HARDWARE_TAG,
    params(("id" = i32, Path, description = "Bundle ID")),
    request_body = UpdateBundleDto,
    responses(
        (status = 200, description = "Bundle updated", body = BundleDto),
        (status = 400, description = "Invalid input", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 404, description = "Bundle not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_bundle(
    State(state): State<AppState>,
    session: Session,
    Path(bundle_id): Path<i32>,
    Json(dto): Json<UpdateBundleDto>,
) -> Result<impl IntoResponse, Error> {
    let ctx = get_context(&state, &session).await?;

    let bundle = BundleService::new(&state.db)
        .update(&ctx, bundle_id, dto)
        .await?;

    Ok((StatusCode::OK, Json(bundle)))
}

/// Delete a bundle
#[utoipa::path(
    delete,
    path = "/api/hardware/bundles/{id}",
    tag = HARDWARE_TAG,
    params(("id" = i32, Path, description = "Bundle ID")),
    responses(
        (status = 204, description = "Bundle deleted"),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 404, description = "Bundle not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_bundle(
    State(state): State<AppState>,
    session: Session,
    Path(bundle_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let ctx = get_context(&state, &session).await?;

    BundleService::new(&state.db).delete(&ctx, bundle_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
