use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use launchpad::{
    model::{project::CreateProjectDto, user::Role},
    server::{
        controller::project::create_project,
        model::{app::AppState, session::user::SessionUserId},
    },
};
use launchpad_test_utils::prelude::*;
use sea_orm::EntityTrait;

/// Expect a PM to create a project and get 201
#[tokio::test]
async fn pm_creates_project() -> Result<(), TestError> {
    let mut test = test_setup_with_core_tables!()?;
    let pm = test.users().insert_user("pm@example.com", Role::Pm).await?;
    SessionUserId::insert(&test.session, pm.id).await.unwrap();

    let state: AppState = test.to_app_state();
    let result = create_project(
        State(state),
        test.session.clone(),
        Json(CreateProjectDto {
            name: "Market Launch".to_string(),
            description: None,
            target_date: None,
            status: None,
        }),
    )
    .await;

    assert!(result.is_ok());
    let response = result.unwrap().into_response();
    assert_eq!(response.status(), StatusCode::CREATED);

    let projects = entity::prelude::Project::find().all(&test.state.db).await?;
    assert_eq!(projects.len(), 1);

    Ok(())
}

/// Expect a VIEWER mutation to map to 403 with no side effect
#[tokio::test]
async fn viewer_mutation_is_403_without_side_effect() -> Result<(), TestError> {
    let mut test = test_setup_with_core_tables!()?;
    let viewer = test
        .users()
        .insert_user("viewer@example.com", Role::Viewer)
        .await?;
    SessionUserId::insert(&test.session, viewer.id).await.unwrap();

    let state: AppState = test.to_app_state();
    let result = create_project(
        State(state),
        test.session.clone(),
        Json(CreateProjectDto {
            name: "Market Launch".to_string(),
            description: None,
            target_date: None,
            status: None,
        }),
    )
    .await;

    let response = result.err().expect("expected auth failure").into_response();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let projects = entity::prelude::Project::find().all(&test.state.db).await?;
    assert!(projects.is_empty());

    Ok(())
}

/// Expect a blank name to fail validation with 400
#[tokio::test]
async fn blank_name_is_400() -> Result<(), TestError> {
    let mut test = test_setup_with_core_tables!()?;
    let pm = test.users().insert_user("pm@example.com", Role::Pm).await?;
    SessionUserId::insert(&test.session, pm.id).await.unwrap();

    let state: AppState = test.to_app_state();
    let result = create_project(
        State(state),
        test.session.clone(),
        Json(CreateProjectDto {
            name: "   ".to_string(),
            description: None,
            target_date: None,
            status: None,
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
