use axum::{extract::State, http::StatusCode, response::IntoResponse};
use launchpad::{
    model::user::Role,
    server::{
        controller::project::list_projects,
        model::{app::AppState, session::user::SessionUserId},
    },
};
use launchpad_test_utils::prelude::*;

/// Expect an unauthenticated request to map to 401
#[tokio::test]
async fn unauthenticated_request_is_401() -> Result<(), TestError> {
    let test = test_setup_with_core_tables!()?;
    let state: AppState = test.to_app_state();

    let result = list_projects(State(state), test.session.clone()).await;

    let response = result.err().expect("expected auth failure").into_response();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}

/// Expect a VIEWER to read the project list; reads only need authentication
#[tokio::test]
async fn viewer_can_read() -> Result<(), TestError> {
    let mut test = test_setup_with_core_tables!()?;
    test.projects().insert_project("Market Launch").await?;
    let viewer = test
        .users()
        .insert_user("viewer@example.com", Role::Viewer)
        .await?;
    SessionUserId::insert(&test.session, viewer.id).await.unwrap();

    let state: AppState = test.to_app_state();
    let result = list_projects(State(state), test.session.clone()).await;

    assert!(result.is_ok());
    let response = result.unwrap().into_response();
    assert_eq!(response.status(), StatusCode::OK);

    Ok(())
}
