use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use launchpad::{
    model::{hardware::SetRecommendationDto, status::WorkflowStatus, user::Role},
    server::{
        controller::hardware::set_hardware_recommendation,
        data::hardware::{HardwareCandidateRepository, NewHardwareCandidate},
        model::{app::AppState, session::user::SessionUserId},
        util::time,
    },
};
use launchpad_test_utils::prelude::*;
use sea_orm::EntityTrait;

async fn insert_candidate(
    test: &launchpad_test_utils::TestSetup,
    name: &str,
) -> Result<entity::hardware_candidate::Model, TestError> {
    let repo = HardwareCandidateRepository::new(&test.state.db);
    Ok(repo
        .create(
            NewHardwareCandidate {
                name: name.to_string(),
                brand: None,
                model: None,
                price: None,
                currency: "USD".to_string(),
                availability: None,
                specs: None,
                constraints: None,
                field_notes: None,
                score: None,
                recommendation: None,
                status: WorkflowStatus::Todo,
            },
            time::now(),
        )
        .await?)
}

/// Expect making a second candidate PRIMARY to clear the slot from the first
#[tokio::test]
async fn primary_moves_between_candidates() -> Result<(), TestError> {
    let mut test = test_setup_with_tables!(
        entity::prelude::LaunchpadUser,
        entity::prelude::HardwareCandidate,
    )?;
    let ops = test.users().insert_user("ops@example.com", Role::Ops).await?;
    SessionUserId::insert(&test.session, ops.id).await.unwrap();

    let first = insert_candidate(&test, "Terminal A").await?;
    let second = insert_candidate(&test, "Terminal B").await?;

    let state: AppState = test.to_app_state();
    for id in [first.id, second.id] {
        let result = set_hardware_recommendation(
            State(state.clone()),
            test.session.clone(),
            Path(id),
            Json(SetRecommendationDto {
                recommendation: Some("PRIMARY".to_string()),
            }),
        )
        .await;

        assert!(result.is_ok());
        assert_eq!(result.unwrap().into_response().status(), StatusCode::OK);
    }

    let first = entity::prelude::HardwareCandidate::find_by_id(first.id)
        .one(&test.state.db)
        .await?
        .unwrap();
    let second = entity::prelude::HardwareCandidate::find_by_id(second.id)
        .one(&test.state.db)
        .await?
        .unwrap();

    assert_eq!(first.recommendation, None);
    assert_eq!(second.recommendation, Some("PRIMARY".to_string()));

    Ok(())
}

/// Expect a SALES caller to be refused; hardware is outside their scope
#[tokio::test]
async fn sales_is_403() -> Result<(), TestError> {
    let mut test = test_setup_with_tables!(
        entity::prelude::LaunchpadUser,
        entity::prelude::HardwareCandidate,
    )?;
    let sales = test
        .users()
        .insert_user("sales@example.com", Role::Sales)
        .await?;
    SessionUserId::insert(&test.session, sales.id).await.unwrap();

    let candidate = insert_candidate(&test, "Terminal A").await?;

    let state: AppState = test.to_app_state();
    let result = set_hardware_recommendation(
        State(state),
        test.session.clone(),
        Path(candidate.id),
        Json(SetRecommendationDto {
            recommendation: Some("PRIMARY".to_string()),
        }),
    )
    .await;

    let response = result.err().expect("expected auth failure").into_response();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    Ok(())
}
