//! Risk scoring and risk CRUD.
//!
//! The score is probability × impact with both inputs in [1,5]; the severity
//! tier is derived from the score with inclusive lower bounds, highest match
//! winning. Scores are always derived, never stored.

use sea_orm::DatabaseConnection;

use crate::{
    model::risk::{
        CreateRiskDto, RiskDto, RiskFilter, RiskMatrixCellDto, RiskMatrixDto, RiskMatrixEntryDto,
        RiskTier, UpdateRiskDto, UpdateRiskStatusDto,
    },
    model::status::WorkflowStatus,
    server::{
        data::{
            project::ProjectRepository,
            risk::{NewRisk, RiskChanges, RiskListFilter, RiskRepository},
            workstream::WorkstreamRepository,
        },
        error::{validation::ValidationError, Error},
        model::{context::RequestContext, permission::Resource},
        service::{relations::RelationResolver, validate},
        util::time,
    },
};

/// Probability × impact, both in [1,5], yielding [1,25].
pub fn score(probability: i32, impact: i32) -> i32 {
    probability * impact
}

/// Severity tier for a score. Inclusive lower bounds, highest match wins.
pub fn tier(score: i32) -> RiskTier {
    if score >= 15 {
        RiskTier::Critical
    } else if score >= 10 {
        RiskTier::High
    } else if score >= 5 {
        RiskTier::Medium
    } else {
        RiskTier::Low
    }
}

pub struct RiskService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> RiskService<'a> {
    /// Creates a new instance of [`RiskService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, ctx: &RequestContext, dto: CreateRiskDto) -> Result<RiskDto, Error> {
        ctx.require(Resource::Risks)?;

        validate::require_non_empty("title", &dto.title)?;
        let probability = validate::require_in_range("probability", dto.probability.unwrap_or(3), 1, 5)?;
        let impact = validate::require_in_range("impact", dto.impact.unwrap_or(3), 1, 5)?;
        let status = validate::parse_status("status", dto.status.as_deref(), WorkflowStatus::Todo)?;

        let project_repo = ProjectRepository::new(self.db);
        if project_repo.get(dto.project_id).await?.is_none() {
            return Err(Error::NotFound {
                entity: "project",
                id: dto.project_id,
            });
        }

        if let Some(workstream_id) = dto.workstream_id {
            self.check_workstream_project(workstream_id, dto.project_id)
                .await?;
        }

        let repo = RiskRepository::new(self.db);
        let risk = repo
            .create(
                NewRisk {
                    title: dto.title,
                    description: dto.description,
                    probability,
                    impact,
                    mitigation: dto.mitigation,
                    status,
                    owner_id: dto.owner_id,
                    workstream_id: dto.workstream_id,
                    project_id: dto.project_id,
                },
                time::now(),
            )
            .await?;

        self.to_dto(risk).await
    }

    pub async fn get(&self, risk_id: i32) -> Result<RiskDto, Error> {
        let repo = RiskRepository::new(self.db);
        let risk = repo.get(risk_id).await?.ok_or(Error::NotFound {
            entity: "risk",
            id: risk_id,
        })?;

        self.to_dto(risk).await
    }

    /// Risks ordered by impact desc then probability desc. When a minimum
    /// score is requested the surviving rows are re-sorted by score desc.
    pub async fn list(&self, filter: RiskFilter) -> Result<Vec<RiskDto>, Error> {
        let status = match filter.status.as_deref() {
            None => None,
            Some(raw) => Some(
                WorkflowStatus::parse(raw).ok_or_else(|| ValidationError::InvalidValue {
                    field: "status",
                    value: raw.to_string(),
                })?,
            ),
        };

        let repo = RiskRepository::new(self.db);
        let mut risks = repo
            .list(RiskListFilter {
                project_id: filter.project_id,
                workstream_id: None,
                status,
            })
            .await?;

        if let Some(min_score) = filter.min_score {
            risks.retain(|r| score(r.probability, r.impact) >= min_score);
            risks.sort_by(|a, b| {
                score(b.probability, b.impact).cmp(&score(a.probability, a.impact))
            });
        }

        let mut resolver = RelationResolver::new(self.db);
        let mut dtos = Vec::with_capacity(risks.len());
        for risk in risks {
            dtos.push(self.assemble(risk, &mut resolver).await?);
        }

        Ok(dtos)
    }

    pub async fn update(
        &self,
        ctx: &RequestContext,
        risk_id: i32,
        dto: UpdateRiskDto,
    ) -> Result<RiskDto, Error> {
        ctx.require(Resource::Risks)?;

        if let Some(title) = &dto.title {
            validate::require_non_empty("title", title)?;
        }
        if let Some(probability) = dto.probability {
            validate::require_in_range("probability", probability, 1, 5)?;
        }
        if let Some(impact) = dto.impact {
            validate::require_in_range("impact", impact, 1, 5)?;
        }
        let status = match dto.status.as_deref() {
            None => None,
            Some(raw) => Some(
                WorkflowStatus::parse(raw).ok_or_else(|| ValidationError::InvalidValue {
                    field: "status",
                    value: raw.to_string(),
                })?,
            ),
        };

        let repo = RiskRepository::new(self.db);
        let existing = repo.get(risk_id).await?.ok_or(Error::NotFound {
            entity: "risk",
            id: risk_id,
        })?;

        if let Some(Some(workstream_id)) = dto.workstream_id {
            self.check_workstream_project(workstream_id, existing.project_id)
                .await?;
        }

        let risk = repo
            .update(
                risk_id,
                RiskChanges {
                    title: dto.title,
                    description: dto.description,
                    probability: dto.probability,
                    impact: dto.impact,
                    mitigation: dto.mitigation,
                    status,
                    owner_id: dto.owner_id,
                    workstream_id: dto.workstream_id,
                },
                time::now(),
            )
            .await?
            .ok_or(Error::NotFound {
                entity: "risk",
                id: risk_id,
            })?;

        self.to_dto(risk).await
    }

    pub async fn update_status(
        &self,
        ctx: &RequestContext,
        risk_id: i32,
        dto: UpdateRiskStatusDto,
    ) -> Result<RiskDto, Error> {
        ctx.require(Resource::Risks)?;

        let status =
            WorkflowStatus::parse(&dto.status).ok_or_else(|| ValidationError::InvalidValue {
                field: "status",
                value: dto.status.clone(),
            })?;

        let repo = RiskRepository::new(self.db);
        let risk = repo
            .update(
                risk_id,
                RiskChanges {
                    status: Some(status),
                    ..Default::default()
                },
                time::now(),
            )
            .await?
            .ok_or(Error::NotFound {
                entity: "risk",
                id: risk_id,
            })?;

        self.to_dto(risk).await
    }

    pub async fn delete(&self, ctx: &RequestContext, risk_id: i32) -> Result<(), Error> {
        ctx.require(Resource::Risks)?;

        let repo = RiskRepository::new(self.db);
        let result = repo.delete(risk_id).await?;

        if result.rows_affected == 0 {
            return Err(Error::NotFound {
                entity: "risk",
                id: risk_id,
            });
        }

        Ok(())
    }

    /// The 5×5 probability/impact matrix. Each risk lands in exactly the
    /// cell matching its stored probability and impact.
    pub async fn matrix(&self, project_id: Option<i32>) -> Result<RiskMatrixDto, Error> {
        let repo = RiskRepository::new(self.db);
        let risks = repo
            .list(RiskListFilter {
                project_id,
                ..Default::default()
            })
            .await?;

        let mut cells = Vec::with_capacity(25);
        for probability in 1..=5 {
            for impact in 1..=5 {
                let members: Vec<RiskMatrixEntryDto> = risks
                    .iter()
                    .filter(|r| r.probability == probability && r.impact == impact)
                    .map(|r| RiskMatrixEntryDto {
                        id: r.id,
                        title: r.title.clone(),
                        score: score(r.probability, r.impact),
                    })
                    .collect();

                cells.push(RiskMatrixCellDto {
                    probability,
                    impact,
                    tier: tier(score(probability, impact)),
                    risks: members,
                });
            }
        }

        Ok(RiskMatrixDto { cells })
    }

    async fn check_workstream_project(
        &self,
        workstream_id: i32,
        project_id: i32,
    ) -> Result<(), Error> {
        let workstream_repo = WorkstreamRepository::new(self.db);
        let workstream = workstream_repo
            .get(workstream_id)
            .await?
            .ok_or(Error::NotFound {
                entity: "workstream",
                id: workstream_id,
            })?;

        if workstream.project_id != project_id {
            return Err(Error::Conflict(format!(
                "Workstream ID {} belongs to a different project",
                workstream_id
            )));
        }

        Ok(())
    }

    async fn to_dto(&self, risk: entity::risk::Model) -> Result<RiskDto, Error> {
        let mut resolver = RelationResolver::new(self.db);
        self.assemble(risk, &mut resolver).await
    }

    async fn assemble(
        &self,
        risk: entity::risk::Model,
        resolver: &mut RelationResolver<'_, DatabaseConnection>,
    ) -> Result<RiskDto, Error> {
        let risk_score = score(risk.probability, risk.impact);
        let status = WorkflowStatus::parse(&risk.status)
            .ok_or_else(|| Error::ParseError(format!("risk status '{}'", risk.status)))?;

        Ok(RiskDto {
            id: risk.id,
            title: risk.title,
            description: risk.description,
            probability: risk.probability,
            impact: risk.impact,
            score: risk_score,
            tier: tier(risk_score),
            mitigation: risk.mitigation,
            status,
            project: resolver.project(risk.project_id).await?,
            workstream: resolver.workstream(risk.workstream_id).await?,
            owner: resolver.user(risk.owner_id).await?,
            created_at: risk.created_at,
            updated_at: risk.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {

    mod scoring {
        use crate::model::risk::RiskTier;
        use crate::server::service::risk::{score, tier};

        /// Expect score to be the product of probability and impact
        #[test]
        fn score_is_product() {
            for probability in 1..=5 {
                for impact in 1..=5 {
                    let s = score(probability, impact);

                    assert_eq!(s, probability * impact);
                    assert!((1..=25).contains(&s));
                }
            }
        }

        /// Expect tier boundaries at 5, 10 and 15 inclusive
        #[test]
        fn tier_boundaries_are_inclusive() {
            assert_eq!(tier(1), RiskTier::Low);
            assert_eq!(tier(4), RiskTier::Low);
            assert_eq!(tier(5), RiskTier::Medium);
            assert_eq!(tier(9), RiskTier::Medium);
            assert_eq!(tier(10), RiskTier::High);
            assert_eq!(tier(14), RiskTier::High);
            assert_eq!(tier(15), RiskTier::Critical);
            assert_eq!(tier(25), RiskTier::Critical);
        }

        /// Expect tier to be monotonic non-decreasing in score
        #[test]
        fn tier_is_monotonic() {
            for s in 1..25 {
                assert!(tier(s) <= tier(s + 1));
            }
        }
    }

    mod create {
        use launchpad_test_utils::prelude::*;

        use crate::{
            model::{
                risk::{CreateRiskDto, RiskTier},
                user::Role,
            },
            server::{
                error::Error,
                model::context::RequestContext,
                service::risk::RiskService,
            },
        };

        /// Expect probability 3 and impact 5 to yield score 15 and CRITICAL
        #[tokio::test]
        async fn derives_score_and_tier() -> Result<(), TestError> {
            let mut test = test_setup_with_core_tables!()?;
            let project = test.projects().insert_project("Market Launch").await?;
            let workstream = test
                .projects()
                .insert_workstream(project.id, "Hardware")
                .await?;
            let pm = test.users().insert_user("pm@example.com", Role::Pm).await?;

            let service = RiskService::new(&test.state.db);
            let ctx = RequestContext::new(pm.id, Role::Pm);
            let risk = service
                .create(
                    &ctx,
                    CreateRiskDto {
                        title: "Customs delay".to_string(),
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

            Ok(())
        }

        /// Expect out-of-range probability to fail naming the field
        #[tokio::test]
        async fn rejects_out_of_range_probability() -> Result<(), TestError> {
            let mut test = test_setup_with_core_tables!()?;
            let project = test.projects().insert_project("Market Launch").await?;
            let pm = test.users().insert_user("pm@example.com", Role::Pm).await?;

            let service = RiskService::new(&test.state.db);
            let ctx = RequestContext::new(pm.id, Role::Pm);
            let result = service
                .create(
                    &ctx,
                    CreateRiskDto {
                        title: "Customs delay".to_string(),
                        description: None,
                        probability: Some(6),
                        impact: None,
                        mitigation: None,
                        status: None,
                        project_id: project.id,
                        workstream_id: None,
                        owner_id: None,
                    },
                )
                .await;

            match result {
                Err(Error::ValidationError(err)) => assert_eq!(err.field(), "probability"),
                other => panic!("expected validation error, got {:?}", other.map(|r| r.id)),
            }

            Ok(())
        }

        /// Expect a workstream from another project to be rejected
        #[tokio::test]
        async fn rejects_cross_project_workstream() -> Result<(), TestError> {
            let mut test = test_setup_with_core_tables!()?;
            let project = test.projects().insert_project("Market Launch").await?;
            let other = test.projects().insert_project("Side Project").await?;
            let workstream = test
                .projects()
                .insert_workstream(other.id, "Hardware")
                .await?;
            let pm = test.users().insert_user("pm@example.com", Role::Pm).await?;

            let service = RiskService::new(&test.state.db);
            let ctx = RequestContext::new(pm.id, Role::Pm);
            let result = service
                .create(
                    &ctx,
                    CreateRiskDto {
                        title: "Customs delay".to_string(),
                        description: None,
                        probability: None,
                        impact: None,
                        mitigation: None,
                        status: None,
                        project_id: project.id,
                        workstream_id: Some(workstream.id),
                        owner_id: None,
                    },
                )
                .await;

            assert!(matches!(result, Err(Error::Conflict(_))));

            Ok(())
        }

        /// Expect VIEWER to be refused before any validation runs
        #[tokio::test]
        async fn refuses_viewer() -> Result<(), TestError> {
            let mut test = test_setup_with_core_tables!()?;
            let project = test.projects().insert_project("Market Launch").await?;
            let viewer = test
                .users()
                .insert_user("viewer@example.com", Role::Viewer)
                .await?;

            let service = RiskService::new(&test.state.db);
            let ctx = RequestContext::new(viewer.id, Role::Viewer);
            let result = service
                .create(
                    &ctx,
                    CreateRiskDto {
                        title: "Customs delay".to_string(),
                        description: None,
                        probability: None,
                        impact: None,
                        mitigation: None,
                        status: None,
                        project_id: project.id,
                        workstream_id: None,
                        owner_id: None,
                    },
                )
                .await;

            assert!(matches!(result, Err(Error::AuthError(_))));

            Ok(())
        }
    }

    mod list {
        use launchpad_test_utils::prelude::*;

        use crate::{
            model::risk::RiskFilter,
            server::service::risk::RiskService,
        };

        /// Expect min_score to keep only matching risks sorted by score desc
        #[tokio::test]
        async fn filters_by_min_score() -> Result<(), TestError> {
            let mut test = test_setup_with_core_tables!()?;
            let project = test.projects().insert_project("Market Launch").await?;
            test.projects()
                .insert_risk(project.id, None, "Minor", 2, 2)
                .await?;
            test.projects()
                .insert_risk(project.id, None, "Severe", 4, 5)
                .await?;
            test.projects()
                .insert_risk(project.id, None, "Borderline", 3, 5)
                .await?;

            let service = RiskService::new(&test.state.db);
            let listed = service
                .list(RiskFilter {
                    min_score: Some(15),
                    ..Default::default()
                })
                .await
                .unwrap();

            let titles: Vec<&str> = listed.iter().map(|r| r.title.as_str()).collect();
            assert_eq!(titles, vec!["Severe", "Borderline"]);
            assert!(listed.iter().all(|r| r.score >= 15));

            Ok(())
        }
    }

    mod matrix {
        use launchpad_test_utils::prelude::*;

        use crate::server::service::risk::RiskService;

        /// Expect each risk to appear in exactly one cell
        #[tokio::test]
        async fn buckets_risks_exactly_once() -> Result<(), TestError> {
            let mut test = test_setup_with_core_tables!()?;
            let project = test.projects().insert_project("Market Launch").await?;
            let risk = test
                .projects()
                .insert_risk(project.id, None, "Customs delay", 3, 4)
                .await?;

            let service = RiskService::new(&test.state.db);
            let matrix = service.matrix(None).await.unwrap();

            assert_eq!(matrix.cells.len(), 25);
            let holding: Vec<_> = matrix
                .cells
                .iter()
                .filter(|c| c.risks.iter().any(|r| r.id == risk.id))
                .collect();
            assert_eq!(holding.len(), 1);
            assert_eq!(holding[0].probability, 3);
            assert_eq!(holding[0].impact, 4);

            Ok(())
        }
    }
}
