use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use launchpad::{
    model::user::Role,
    server::{
        controller::risk::{risk_matrix, RiskMatrixParams},
        model::{app::AppState, session::user::SessionUserId},
    },
};
use launchpad_test_utils::prelude::*;

/// Expect the matrix to return 200 for an authenticated reader
#[tokio::test]
async fn returns_the_matrix() -> Result<(), TestError> {
    let mut test = test_setup_with_core_tables!()?;
    let project = test.projects().insert_project("Market Launch").await?;
    test.projects()
        .insert_risk(project.id, None, "Customs delay", 3, 4)
        .await?;
    let viewer = test
        .users()
        .insert_user("viewer@example.com", Role::Viewer)
        .await?;
    SessionUserId::insert(&test.session, viewer.id).await.unwrap();

    let state: AppState = test.to_app_state();
    let result = risk_matrix(
        State(state),
        test.session.clone(),
        Query(RiskMatrixParams::default()),
    )
    .await;

    assert!(result.is_ok());
    let response = result.unwrap().into_response();
    assert_eq!(response.status(), StatusCode::OK);

    Ok(())
}

/// Expect 401 without a session
#[tokio::test]
async fn unauthenticated_is_401() -> Result<(), TestError> {
    let test = test_setup_with_core_tables!()?;

    let state: AppState = test.to_app_state();
    let result = risk_matrix(
        State(state),
        test.session.clone(),
        Query(RiskMatrixParams::default()),
    )
    .await;

    let response = result.err().expect("expected auth failure").into_response();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}
