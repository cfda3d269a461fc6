use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use launchpad::{
    model::{task::UpdateTaskStatusDto, user::Role},
    server::{
        controller::task::update_task_status,
        model::{app::AppState, session::user::SessionUserId},
    },
};
use launchpad_test_utils::prelude::*;
use sea_orm::EntityTrait;

/// Expect DONE to set the completion timestamp and TODO to clear it again
#[tokio::test]
async fn done_sets_completed_at_and_todo_clears_it() -> Result<(), TestError> {
    let mut test = test_setup_with_core_tables!()?;
    let project = test.projects().insert_project("Market Launch").await?;
    let ops = test.users().insert_user("ops@example.com", Role::Ops).await?;
    let task = test
        .projects()
        .insert_task(project.id, None, ops.id, "Install terminal")
        .await?;
    SessionUserId::insert(&test.session, ops.id).await.unwrap();

    let state: AppState = test.to_app_state();
    let result = update_task_status(
        State(state.clone()),
        test.session.clone(),
        Path(task.id),
        Json(UpdateTaskStatusDto {
            status: "DONE".to_string(),
        }),
    )
    .await;

    assert!(result.is_ok());
    assert_eq!(result.unwrap().into_response().status(), StatusCode::OK);

    let row = entity::prelude::Task::find_by_id(task.id)
        .one(&test.state.db)
        .await?
        .unwrap();
    assert_eq!(row.status, "DONE");
    assert!(row.completed_at.is_some());

    let result = update_task_status(
        State(state),
        test.session.clone(),
        Path(task.id),
        Json(UpdateTaskStatusDto {
            status: "TODO".to_string(),
        }),
    )
    .await;

    assert!(result.is_ok());

    let row = entity::prelude::Task::find_by_id(task.id)
        .one(&test.state.db)
        .await?
        .unwrap();
    assert_eq!(row.status, "TODO");
    assert!(row.completed_at.is_none());

    Ok(())
}

/// Expect an unknown status value to map to 400 without a write
#[tokio::test]
async fn unknown_status_is_400() -> Result<(), TestError> {
    let mut test = test_setup_with_core_tables!()?;
    let project = test.projects().insert_project("Market Launch").await?;
    let ops = test.users().insert_user("ops@example.com", Role::Ops).await?;
    let task = test
        .projects()
        .insert_task(project.id, None, ops.id, "Install terminal")
        .await?;
    SessionUserId::insert(&test.session, ops.id).await.unwrap();

    let state: AppState = test.to_app_state();
    let result = update_task_status(
        State(state),
        test.session.clone(),
        Path(task.id),
        Json(UpdateTaskStatusDto {
            status: "SHIPPED".to_string(),
        }),
    )
    .await;

    let response = result
        .err()
        .expect("expected validation failure")
        .into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let row = entity::prelude::Task::find_by_id(task.id)
        .one(&test.state.db)
        .await?
        .unwrap();
    assert_eq!(row.status, "BACKLOG");

    Ok(())
}

/// Expect a VIEWER status write to map to 403
#[tokio::test]
async fn viewer_is_403() -> Result<(), TestError> {
    let mut test = test_setup_with_core_tables!()?;
    let project = test.projects().insert_project("Market Launch").await?;
    let pm = test.users().insert_user("pm@example.com", Role::Pm).await?;
    let viewer = test
        .users()
        .insert_user("viewer@example.com", Role::Viewer)
        .await?;
    let task = test
        .projects()
        .insert_task(project.id, None, pm.id, "Install terminal")
        .await?;
    SessionUserId::insert(&test.session, viewer.id).await.unwrap();

    let state: AppState = test.to_app_state();
    let result = update_task_status(
        State(state),
        test.session.clone(),
        Path(task.id),
        Json(UpdateTaskStatusDto {
            status: "DONE".to_string(),
        }),
    )
    .await;

    let response = result.err().expect("expected auth failure").into_response();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    Ok(())
}
