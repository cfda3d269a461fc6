use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use launchpad::{
    model::user::{LoginDto, Role},
    server::{
        controller::auth::login,
        data::user::UserRepository,
        model::{app::AppState, session::user::SessionUserId},
        service::auth::hash_password,
        util::time,
    },
};
use launchpad_test_utils::prelude::*;

/// Expect valid credentials to return 200 and store the user id in the
/// session
#[tokio::test]
async fn logs_in_with_valid_credentials() -> Result<(), TestError> {
    let test = test_setup_with_tables!(entity::prelude::LaunchpadUser)?;

    let repo = UserRepository::new(&test.state.db);
    let user = repo
        .create(
            "pm@example.com".to_string(),
            "Sam Reyes".to_string(),
            hash_password("launch-day-2025").unwrap(),
            Role::Pm,
            time::now(),
        )
        .await?;

    let state: AppState = test.to_app_state();
    let result = login(
        State(state),
        test.session.clone(),
        Json(LoginDto {
            email: "pm@example.com".to_string(),
            password: "launch-day-2025".to_string(),
        }),
    )
    .await;

    assert!(result.is_ok());
    let response = result.unwrap().into_response();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        SessionUserId::get(&test.session).await.unwrap(),
        Some(user.id)
    );

    Ok(())
}

/// Expect a wrong password to return 401 without touching the session
#[tokio::test]
async fn wrong_password_is_401() -> Result<(), TestError> {
    let test = test_setup_with_tables!(entity::prelude::LaunchpadUser)?;

    let repo = UserRepository::new(&test.state.db);
    repo.create(
        "pm@example.com".to_string(),
        "Sam Reyes".to_string(),
        hash_password("launch-day-2025").unwrap(),
        Role::Pm,
        time::now(),
    )
    .await?;

    let state: AppState = test.to_app_state();
    let result = login(
        State(state),
        test.session.clone(),
        Json(LoginDto {
            email: "pm@example.com".to_string(),
            password: "wrong".to_string(),
        }),
    )
    .await;

    let response = result.err().expect("expected auth failure").into_response();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(SessionUserId::get(&test.session).await.unwrap(), None);

    Ok(())
}

/// Expect an unknown email to fail the same way as a wrong password
#[tokio::test]
async fn unknown_email_is_401() -> Result<(), TestError> {
    let test = test_setup_with_tables!(entity::prelude::LaunchpadUser)?;

    let state: AppState = test.to_app_state();
    let result = login(
        State(state),
        test.session.clone(),
        Json(LoginDto {
            email: "nobody@example.com".to_string(),
            password: "launch-day-2025".to_string(),
        }),
    )
    .await;

    let response = result.err().expect("expected auth failure").into_response();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}
