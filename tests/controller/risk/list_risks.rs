use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use launchpad::{
    model::{risk::RiskFilter, user::Role},
    server::{
        controller::risk::list_risks,
        model::{app::AppState, session::user::SessionUserId},
    },
};
use launchpad_test_utils::prelude::*;

/// Expect the min-score filter to return 200 for an authenticated reader
#[tokio::test]
async fn filters_by_min_score() -> Result<(), TestError> {
    let mut test = test_setup_with_core_tables!()?;
    let project = test.projects().insert_project("Market Launch").await?;
    test.projects()
        .insert_risk(project.id, None, "Customs delay", 3, 5)
        .await?;
    test.projects()
        .insert_risk(project.id, None, "Venue wifi", 2, 2)
        .await?;
    let viewer = test
        .users()
        .insert_user("viewer@example.com", Role::Viewer)
        .await?;
    SessionUserId::insert(&test.session, viewer.id).await.unwrap();

    let state: AppState = test.to_app_state();
    let result = list_risks(
        State(state),
        test.session.clone(),
        Query(RiskFilter {
            min_score: Some(15),
            ..Default::default()
        }),
    )
    .await;

    assert!(result.is_ok());
    let response = result.unwrap().into_response();
    assert_eq!(response.status(), StatusCode::OK);

    Ok(())
}

/// Expect an unknown status filter value to map to 400
#[tokio::test]
async fn unknown_status_filter_is_400() -> Result<(), TestError> {
    let mut test = test_setup_with_core_tables!()?;
    let viewer = test
        .users()
        .insert_user("viewer@example.com", Role::Viewer)
        .await?;
    SessionUserId::insert(&test.session, viewer.id).await.unwrap();

    let state: AppState = test.to_app_state();
    let result = list_risks(
        State(state),
        test.session.clone(),
        Query(RiskFilter {
            status: Some("SHIPPED".to_string()),
            ..Default::default()
        }),
    )
    .await;

    let response = result
        .err()
        .expect("expected validation failure")
        .into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    Ok(())
}
