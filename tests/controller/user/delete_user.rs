use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use launchpad::{
    model::user::Role,
    server::{
        controller::user::delete_user,
        model::{app::AppState, session::user::SessionUserId},
    },
};
use launchpad_test_utils::prelude::*;
use sea_orm::EntityTrait;

/// Expect an admin's attempt to delete their own account to map to 403
/// with the row left in place
#[tokio::test]
async fn self_delete_is_403_and_keeps_row() -> Result<(), TestError> {
    let mut test = test_setup_with_tables!(entity::prelude::LaunchpadUser)?;
    let admin = test
        .users()
        .insert_user("admin@example.com", Role::Admin)
        .await?;
    SessionUserId::insert(&test.session, admin.id).await.unwrap();

    let state: AppState = test.to_app_state();
    let result = delete_user(State(state), test.session.clone(), Path(admin.id)).await;

    let response = result.err().expect("expected auth failure").into_response();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let row = entity::prelude::LaunchpadUser::find_by_id(admin.id)
        .one(&test.state.db)
        .await?;
    assert!(row.is_some());

    Ok(())
}

/// Expect deleting another user to return 204 and remove the row
#[tokio::test]
async fn deletes_another_user() -> Result<(), TestError> {
    let mut test = test_setup_with_tables!(entity::prelude::LaunchpadUser)?;
    let admin = test
        .users()
        .insert_user("admin@example.com", Role::Admin)
        .await?;
    let ops = test.users().insert_user("ops@example.com", Role::Ops).await?;
    SessionUserId::insert(&test.session, admin.id).await.unwrap();

    let state: AppState = test.to_app_state();
    let result = delete_user(State(state), test.session.clone(), Path(ops.id)).await;

    assert!(result.is_ok());
    let response = result.unwrap().into_response();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let row = entity::prelude::LaunchpadUser::find_by_id(ops.id)
        .one(&test.state.db)
        .await?;
    assert!(row.is_none());

    Ok(())
}
