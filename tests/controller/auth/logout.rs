use axum::{extract::State, http::StatusCode, response::IntoResponse};
use launchpad::{
    model::user::Role,
    server::{
        controller::auth::logout,
        model::{app::AppState, session::user::SessionUserId},
    },
};
use launchpad_test_utils::prelude::*;

/// Expect logout to return 204 and clear the session
#[tokio::test]
async fn clears_the_session() -> Result<(), TestError> {
    let mut test = test_setup_with_tables!(entity::prelude::LaunchpadUser)?;
    let pm = test.users().insert_user("pm@example.com", Role::Pm).await?;
    SessionUserId::insert(&test.session, pm.id).await.unwrap();

    let state: AppState = test.to_app_state();
    let result = logout(State(state), test.session.clone()).await;

    assert!(result.is_ok());
    let response = result.unwrap().into_response();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(SessionUserId::get(&test.session).await.unwrap(), None);

    Ok(())
}

/// Expect logout without a session to still return 204
#[tokio::test]
async fn succeeds_without_a_session() -> Result<(), TestError> {
    let test = test_setup_with_tables!(entity::prelude::LaunchpadUser)?;

    let state: AppState = test.to_app_state();
    let result = logout(State(state), test.session.clone()).await;

    assert!(result.is_ok());
    let response = result.unwrap().into_response();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    Ok(())
}
