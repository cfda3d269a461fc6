use axum::{extract::State, http::StatusCode, response::IntoResponse};
use launchpad::{
    model::user::Role,
    server::{
        controller::auth::current_user,
        model::{app::AppState, session::user::SessionUserId},
    },
};
use launchpad_test_utils::prelude::*;

/// Expect the logged-in user's profile to come back with 200
#[tokio::test]
async fn returns_the_logged_in_user() -> Result<(), TestError> {
    let mut test = test_setup_with_tables!(entity::prelude::LaunchpadUser)?;
    let pm = test.users().insert_user("pm@example.com", Role::Pm).await?;
    SessionUserId::insert(&test.session, pm.id).await.unwrap();

    let state: AppState = test.to_app_state();
    let result = current_user(State(state), test.session.clone()).await;

    assert!(result.is_ok());
    let response = result.unwrap().into_response();
    assert_eq!(response.status(), StatusCode::OK);

    Ok(())
}

/// Expect 401 without a session
#[tokio::test]
async fn unauthenticated_is_401() -> Result<(), TestError> {
    let test = test_setup_with_tables!(entity::prelude::LaunchpadUser)?;

    let state: AppState = test.to_app_state();
    let result = current_user(State(state), test.session.clone()).await;

    let response = result.err().expect("expected auth failure").into_response();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}

/// Expect a session pointing at a deleted user to be rejected and cleared
#[tokio::test]
async fn stale_session_is_401_and_cleared() -> Result<(), TestError> {
    let test = test_setup_with_tables!(entity::prelude::LaunchpadUser)?;
    SessionUserId::insert(&test.session, 999).await.unwrap();

    let state: AppState = test.to_app_state();
    let result = current_user(State(state), test.session.clone()).await;

    let response = result.err().expect("expected auth failure").into_response();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(SessionUserId::get(&test.session).await.unwrap(), None);

    Ok(())
}
