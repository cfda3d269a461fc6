use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use launchpad::{
    model::user::{CreateUserDto, Role},
    server::{
        controller::user::create_user,
        model::{app::AppState, session::user::SessionUserId},
    },
};
use launchpad_test_utils::prelude::*;

fn new_ops_user() -> CreateUserDto {
    CreateUserDto {
        email: "ops@example.com".to_string(),
        name: "Ana Flores".to_string(),
        password: "terminal-keys".to_string(),
        role: "OPS".to_string(),
    }
}

/// Expect an admin to create a user and get 201
#[tokio::test]
async fn admin_creates_user() -> Result<(), TestError> {
    let mut test = test_setup_with_tables!(entity::prelude::LaunchpadUser)?;
    let admin = test
        .users()
        .insert_user("admin@example.com", Role::Admin)
        .await?;
    SessionUserId::insert(&test.session, admin.id).await.unwrap();

    let state: AppState = test.to_app_state();
    let result = create_user(State(state), test.session.clone(), Json(new_ops_user())).await;

    assert!(result.is_ok());
    let response = result.unwrap().into_response();
    assert_eq!(response.status(), StatusCode::CREATED);

    Ok(())
}

/// Expect a PM caller to be refused; user management is admin-only
#[tokio::test]
async fn pm_is_403() -> Result<(), TestError> {
    let mut test = test_setup_with_tables!(entity::prelude::LaunchpadUser)?;
    let pm = test.users().insert_user("pm@example.com", Role::Pm).await?;
    SessionUserId::insert(&test.session, pm.id).await.unwrap();

    let state: AppState = test.to_app_state();
    let result = create_user(State(state), test.session.clone(), Json(new_ops_user())).await;

    let response = result.err().expect("expected auth failure").into_response();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    Ok(())
}

/// Expect a duplicate email to map to 409
#[tokio::test]
async fn duplicate_email_is_409() -> Result<(), TestError> {
    let mut test = test_setup_with_tables!(entity::prelude::LaunchpadUser)?;
    let admin = test
        .users()
        .insert_user("admin@example.com", Role::Admin)
        .await?;
    test.users().insert_user("ops@example.com", Role::Ops).await?;
    SessionUserId::insert(&test.session, admin.id).await.unwrap();

    let state: AppState = test.to_app_state();
    let result = create_user(State(state), test.session.clone(), Json(new_ops_user())).await;

    let response = result.err().expect("expected conflict").into_response();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    Ok(())
}
