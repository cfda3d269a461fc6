use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use launchpad::{
    model::user::Role,
    server::{
        controller::project::delete_project,
        model::{app::AppState, session::user::SessionUserId},
    },
};
use launchpad_test_utils::prelude::*;
use sea_orm::EntityTrait;

/// Expect deleting a project to return 204 and remove the row
#[tokio::test]
async fn deletes_the_project() -> Result<(), TestError> {
    let mut test = test_setup_with_core_tables!()?;
    let project = test.projects().insert_project("Market Launch").await?;
    let pm = test.users().insert_user("pm@example.com", Role::Pm).await?;
    SessionUserId::insert(&test.session, pm.id).await.unwrap();

    let state: AppState = test.to_app_state();
    let result = delete_project(State(state), test.session.clone(), Path(project.id)).await;

    assert!(result.is_ok());
    let response = result.unwrap().into_response();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let row = entity::prelude::Project::find_by_id(project.id)
        .one(&test.state.db)
        .await?;
    assert!(row.is_none());

    Ok(())
}

/// Expect a missing id to map to 404
#[tokio::test]
async fn missing_project_is_404() -> Result<(), TestError> {
    let mut test = test_setup_with_core_tables!()?;
    let pm = test.users().insert_user("pm@example.com", Role::Pm).await?;
    SessionUserId::insert(&test.session, pm.id).await.unwrap();

    let state: AppState = test.to_app_state();
    let result = delete_project(State(state), test.session.clone(), Path(999)).await;

    let response = result.err().expect("expected not-found").into_response();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    Ok(())
}
