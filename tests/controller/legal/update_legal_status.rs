use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use launchpad::{
    model::{
        legal::{LegalDocType, LegalStatus, UpdateLegalStatusDto},
        user::Role,
    },
    server::{
        controller::legal::update_legal_status,
        data::legal::{LegalDocRepository, NewLegalDoc},
        model::{app::AppState, session::user::SessionUserId},
        util::time,
    },
};
use launchpad_test_utils::prelude::*;
use sea_orm::EntityTrait;

async fn insert_draft(
    test: &launchpad_test_utils::TestSetup,
) -> Result<entity::legal_doc::Model, TestError> {
    let repo = LegalDocRepository::new(&test.state.db);
    Ok(repo
        .create(
            NewLegalDoc {
                title: "Merchant agreement".to_string(),
                doc_type: LegalDocType::Msa,
                status: LegalStatus::Draft,
                version: "0.1".to_string(),
                content: None,
                file_url: None,
                notes: None,
            },
            time::now(),
        )
        .await?)
}

/// Expect approving a draft to bump the minor version exactly once
#[tokio::test]
async fn approval_bumps_version_once() -> Result<(), TestError> {
    let mut test = test_setup_with_tables!(
        entity::prelude::LaunchpadUser,
        entity::prelude::LegalDoc,
    )?;
    let counsel = test
        .users()
        .insert_user("legal@example.com", Role::Legal)
        .await?;
    SessionUserId::insert(&test.session, counsel.id).await.unwrap();

    let doc = insert_draft(&test).await?;

    let state: AppState = test.to_app_state();
    for _ in 0..2 {
        let result = update_legal_status(
            State(state.clone()),
            test.session.clone(),
            Path(doc.id),
            Json(UpdateLegalStatusDto {
                status: "APPROVED".to_string(),
            }),
        )
        .await;

        assert!(result.is_ok());
        assert_eq!(result.unwrap().into_response().status(), StatusCode::OK);
    }

    let row = entity::prelude::LegalDoc::find_by_id(doc.id)
        .one(&test.state.db)
        .await?
        .unwrap();
    assert_eq!(row.status, "APPROVED");
    assert_eq!(row.version, "0.2");

    Ok(())
}

/// Expect an OPS caller to be refused; legal docs are outside their scope
#[tokio::test]
async fn ops_is_403() -> Result<(), TestError> {
    let mut test = test_setup_with_tables!(
        entity::prelude::LaunchpadUser,
        entity::prelude::LegalDoc,
    )?;
    let ops = test.users().insert_user("ops@example.com", Role::Ops).await?;
    SessionUserId::insert(&test.session, ops.id).await.unwrap();

    let doc = insert_draft(&test).await?;

    let state: AppState = test.to_app_state();
    let result = update_legal_status(
        State(state),
        test.session.clone(),
        Path(doc.id),
        Json(UpdateLegalStatusDto {
            status: "APPROVED".to_string(),
        }),
    )
    .await;

    let response = result.err().expect("expected auth failure").into_response();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let row = entity::prelude::LegalDoc::find_by_id(doc.id)
        .one(&test.state.db)
        .await?
        .unwrap();
    assert_eq!(row.status, "DRAFT");
    assert_eq!(row.version, "0.1");

    Ok(())
}
