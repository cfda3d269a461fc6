//! A project gains a workstream and a severe risk, the risk surfaces in the
//! filtered list, and deleting the project takes the whole graph with it.

use launchpad::{
    model::{
        project::CreateProjectDto,
        risk::{CreateRiskDto, RiskFilter, RiskTier},
        user::Role,
        workstream::CreateWorkstreamDto,
    },
    server::{
        model::context::RequestContext,
        service::{project::ProjectService, risk::RiskService, workstream::WorkstreamService},
    },
};
use launchpad_test_utils::prelude::*;
use sea_orm::EntityTrait;

#[tokio::test]
async fn launch_project_lifecycle() -> Result<(), TestError> {
    let mut test = test_setup_with_core_tables!()?;
    let pm = test.users().insert_user("pm@example.com", Role::Pm).await?;
    let ctx = RequestContext::new(pm.id, Role::Pm);

    let project_service = ProjectService::new(&test.state.db);
    let workstream_service = WorkstreamService::new(&test.state.db);
    let risk_service = RiskService::new(&test.state.db);

    let project = project_service
        .create(
            &ctx,
            CreateProjectDto {
                name: "Launch".to_string(),
                description: None,
                target_date: None,
                status: None,
            },
        )
        .await
        .unwrap();

    let workstream = workstream_service
        .create(
            &ctx,
            CreateWorkstreamDto {
                name: "Hardware".to_string(),
                description: None,
                objectives: None,
                project_id: project.id,
            },
        )
        .await
        .unwrap();

    let risk = risk_service
        .create(
            &ctx,
            CreateRiskDto {
                title: "Terminal certification slips".to_string(),
                description: None,
                probability: Some(3),
                impact: Some(5),
                mitigation: None,
                status: None,
                project_id: project.id,
                workstream_id: Some(workstream.id),
                owner_id: None,
            },
        )
        .await
        .unwrap();

    assert_eq!(risk.score, 15);
    assert_eq!(risk.tier, RiskTier::Critical);

    let severe = risk_service
        .list(RiskFilter {
            min_score: Some(10),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(severe.iter().any(|r| r.id == risk.id));

    project_service.delete(&ctx, project.id).await.unwrap();

    assert!(entity::prelude::Workstream::find_by_id(workstream.id)
        .one(&test.state.db)
        .await?
        .is_none());
    assert!(entity::prelude::Risk::find_by_id(risk.id)
        .one(&test.state.db)
        .await?
        .is_none());

    Ok(())
}
