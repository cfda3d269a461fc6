//! Hardware evaluation services: candidates, accessory designs, bundles.
//!
//! The recommendation slot is the one multi-row write in the system: making
//! a candidate PRIMARY clears the slot from every other candidate and
//! assigns it to the target inside a single transaction.

pub mod accessory;
pub mod bundle;

use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::{
    model::{
        hardware::{
            CreateHardwareCandidateDto, HardwareCandidateDto, HardwareFilter, Recommendation,
            SetRecommendationDto, UpdateHardwareCandidateDto,
        },
        status::WorkflowStatus,
    },
    server::{
        data::hardware::{
            HardwareCandidateChanges, HardwareCandidateRepository, HardwareListFilter,
            NewHardwareCandidate,
        },
        error::{validation::ValidationError, Error},
        model::{context::RequestContext, permission::Resource},
        service::validate,
        util::{payload, time},
    },
};

pub struct HardwareCandidateService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> HardwareCandidateService<'a> {
    /// Creates a new instance of [`HardwareCandidateService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        ctx: &RequestContext,
        dto: CreateHardwareCandidateDto,
    ) -> Result<HardwareCandidateDto, Error> {
        ctx.require(Resource::Hardware)?;

        validate::require_non_empty("name", &dto.name)?;
        let status = validate::parse_status("status", dto.status.as_deref(), WorkflowStatus::Todo)?;
        let score = match dto.score {
            None => None,
            Some(score) => Some(validate::require_in_range("score", score, 1, 10)?),
        };
        let recommendation = match dto.recommendation.as_deref() {
            None => None,
            Some(raw) => Some(Recommendation::parse(raw).ok_or_else(|| {
                ValidationError::InvalidValue {
                    field: "recommendation",
                    value: raw.to_string(),
                }
            })?),
        };
        let specs = match &dto.specs {
            None => None,
            Some(map) => Some(payload::encode_kv(map)?),
        };
        let constraints = match &dto.constraints {
            None => None,
            Some(map) => Some(payload::encode_kv(map)?),
        };

        // A creation that claims PRIMARY must also respect exclusivity.
        if recommendation == Some(Recommendation::Primary) {
            let txn = self.db.begin().await?;
            let repo = HardwareCandidateRepository::new(&txn);
            repo.clear_primary(time::now()).await?;
            let candidate = repo
                .create(
                    NewHardwareCandidate {
                        name: dto.name,
                        brand: dto.brand,
                        model: dto.model,
                        price: dto.price,
                        currency: dto.currency.unwrap_or_else(|| "USD".to_string()),
                        availability: dto.availability,
                        specs,
                        constraints,
                        field_notes: dto.field_notes,
                        score,
                        recommendation,
                        status,
                    },
                    time::now(),
                )
                .await?;
            txn.commit().await?;

            return Self::to_dto(candidate);
        }

        let repo = HardwareCandidateRepository::new(self.db);
        let candidate = repo
            .create(
                NewHardwareCandidate {
                    name: dto.name,
                    brand: dto.brand,
                    model: dto.model,
                    price: dto.price,
                    currency: dto.currency.unwrap_or_else(|| "USD".to_string()),
                    availability: dto.availability,
                    specs,
                    constraints,
                    field_notes: dto.field_notes,
                    score,
                    recommendation,
                    status,
                },
                time::now(),
            )
            .await?;

        Self::to_dto(candidate)
    }

    pub async fn get(&self, candidate_id: i32) -> Result<HardwareCandidateDto, Error> {
        let repo = HardwareCandidateRepository::new(self.db);
        let candidate = repo.get(candidate_id).await?.ok_or(Error::NotFound {
            entity: "hardware candidate",
            id: candidate_id,
        })?;

        Self::to_dto(candidate)
    }

    pub async fn list(&self, filter: HardwareFilter) -> Result<Vec<HardwareCandidateDto>, Error> {
        let status = match filter.status.as_deref() {
            None => None,
            Some(raw) => Some(
                WorkflowStatus::parse(raw).ok_or_else(|| ValidationError::InvalidValue {
                    field: "status",
                    value: raw.to_string(),
                })?,
            ),
        };
        let recommendation = match filter.recommendation.as_deref() {
            None => None,
            Some(raw) => Some(Recommendation::parse(raw).ok_or_else(|| {
                ValidationError::InvalidValue {
                    field: "recommendation",
                    value: raw.to_string(),
                }
            })?),
        };

        let repo = HardwareCandidateRepository::new(self.db);
        let candidates = repo
            .list(HardwareListFilter {
                status,
                recommendation,
            })
            .await?;

        candidates.into_iter().map(Self::to_dto).collect()
    }

    pub async fn update(
        &self,
        ctx: &RequestContext,
        candidate_id: i32,
        dto: UpdateHardwareCandidateDto,
    ) -> Result<HardwareCandidateDto, Error> {
        ctx.require(Resource::Hardware)?;

        if let Some(name) = &dto.name {
            validate::require_non_empty("name", name)?;
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
        let score = match dto.score {
            None => None,
            Some(None) => Some(None),
            Some(Some(score)) => Some(Some(validate::require_in_range("score", score, 1, 10)?)),
        };
        let specs = match &dto.specs {
            None => None,
            Some(map) => Some(payload::encode_kv(map)?),
        };
        let constraints = match &dto.constraints {
            None => None,
            Some(map) => Some(payload::encode_kv(map)?),
        };

        let repo = HardwareCandidateRepository::new(self.db);
        let candidate = repo
            .update(
                candidate_id,
                HardwareCandidateChanges {
                    name: dto.name,
                    brand: dto.brand,
                    model: dto.model,
                    price: dto.price,
                    currency: dto.currency,
                    availability: dto.availability,
                    specs,
                    constraints,
                    field_notes: dto.field_notes,
                    score,
                    status,
                },
                time::now(),
            )
            .await?
            .ok_or(Error::NotFound {
                entity: "hardware candidate",
                id: candidate_id,
            })?;

        Self::to_dto(candidate)
    }

    /// Writes the recommendation slot. PRIMARY clears the slot from every
    /// other candidate first; both writes commit in one transaction. BACKUP,
    /// REJECTED, and clearing carry no exclusivity.
    pub async fn set_recommendation(
        &self,
        ctx: &RequestContext,
        candidate_id: i32,
        dto: SetRecommendationDto,
    ) -> Result<HardwareCandidateDto, Error> {
        ctx.require(Resource::Hardware)?;

        let recommendation = match dto.recommendation.as_deref() {
            None => None,
            Some(raw) => Some(Recommendation::parse(raw).ok_or_else(|| {
                ValidationError::InvalidValue {
                    field: "recommendation",
                    value: raw.to_string(),
                }
            })?),
        };

        let now = time::now();

        let candidate = if recommendation == Some(Recommendation::Primary) {
            let txn = self.db.begin().await?;
            let repo = HardwareCandidateRepository::new(&txn);

            if repo.get(candidate_id).await?.is_none() {
                return Err(Error::NotFound {
                    entity: "hardware candidate",
                    id: candidate_id,
                });
            }

            repo.clear_primary(now).await?;
            let candidate = repo
                .set_recommendation(candidate_id, recommendation, now)
                .await?
                .ok_or(Error::NotFound {
                    entity: "hardware candidate",
                    id: candidate_id,
                })?;
            txn.commit().await?;

            candidate
        } else {
            let repo = HardwareCandidateRepository::new(self.db);
            repo.set_recommendation(candidate_id, recommendation, now)
                .await?
                .ok_or(Error::NotFound {
                    entity: "hardware candidate",
                    id: candidate_id,
                })?
        };

        Self::to_dto(candidate)
    }

    pub async fn delete(&self, ctx: &RequestContext, candidate_id: i32) -> Result<(), Error> {
        ctx.require(Resource::Hardware)?;

        let repo = HardwareCandidateRepository::new(self.db);
        let result = repo.delete(candidate_id).await?;

        if result.rows_affected == 0 {
            return Err(Error::NotFound {
                entity: "hardware candidate",
                id: candidate_id,
            });
        }

        Ok(())
    }

    fn to_dto(candidate: entity::hardware_candidate::Model) -> Result<HardwareCandidateDto, Error> {
        let status = WorkflowStatus::parse(&candidate.status)
            .ok_or_else(|| Error::ParseError(format!("hardware status '{}'", candidate.status)))?;
        let recommendation = match candidate.recommendation.as_deref() {
            None => None,
            Some(raw) => Some(
                Recommendation::parse(raw)
                    .ok_or_else(|| Error::ParseError(format!("recommendation '{}'", raw)))?,
            ),
        };

        Ok(HardwareCandidateDto {
            id: candidate.id,
            name: candidate.name,
            brand: candidate.brand,
            model: candidate.model,
            price: candidate.price,
            currency: candidate.currency,
            availability: candidate.availability,
            specs: payload::decode_kv(candidate.specs.as_deref()),
            constraints: payload::decode_kv(candidate.constraints.as_deref()),
            field_notes: candidate.field_notes,
            score: candidate.score,
            recommendation,
            status,
            created_at: candidate.created_at,
            updated_at: candidate.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {

    mod set_recommendation {
        use launchpad_test_utils::prelude::*;

        use crate::{
            model::{
                hardware::{CreateHardwareCandidateDto, Recommendation, SetRecommendationDto},
                user::Role,
            },
            server::{
                model::context::RequestContext,
                service::hardware::HardwareCandidateService,
            },
        };

        async fn create_candidate(
            service: &HardwareCandidateService<'_>,
            ctx: &RequestContext,
            name: &str,
        ) -> crate::model::hardware::HardwareCandidateDto {
            service
                .create(
                    ctx,
                    CreateHardwareCandidateDto {
                        name: name.to_string(),
                        brand: None,
                        model: None,
                        price: None,
                        currency: None,
                        availability: None,
                        specs: None,
                        constraints: None,
                        field_notes: None,
                        score: None,
                        recommendation: None,
                        status: None,
                    },
                )
                .await
                .unwrap()
        }

        /// Expect setting a new PRIMARY to clear the previous holder
        #[tokio::test]
        async fn primary_is_exclusive() -> Result<(), TestError> {
            let test = test_setup_with_tables!(entity::prelude::HardwareCandidate)?;

            let service = HardwareCandidateService::new(&test.state.db);
            let ctx = RequestContext::new(1, Role::Ops);
            let first = create_candidate(&service, &ctx, "Terminal A").await;
            let second = create_candidate(&service, &ctx, "Terminal B").await;

            service
                .set_recommendation(
                    &ctx,
                    first.id,
                    SetRecommendationDto {
                        recommendation: Some("PRIMARY".to_string()),
                    },
                )
                .await
                .unwrap();
            service
                .set_recommendation(
                    &ctx,
                    second.id,
                    SetRecommendationDto {
                        recommendation: Some("PRIMARY".to_string()),
                    },
                )
                .await
                .unwrap();

            let first = service.get(first.id).await.unwrap();
            let second = service.get(second.id).await.unwrap();

            assert_eq!(first.recommendation, None);
            assert_eq!(second.recommendation, Some(Recommendation::Primary));

            Ok(())
        }

        /// Expect BACKUP to be held by several candidates at once
        #[tokio::test]
        async fn backup_is_not_exclusive() -> Result<(), TestError> {
            let test = test_setup_with_tables!(entity::prelude::HardwareCandidate)?;

            let service = HardwareCandidateService::new(&test.state.db);
            let ctx = RequestContext::new(1, Role::Ops);
            let first = create_candidate(&service, &ctx, "Terminal A").await;
            let second = create_candidate(&service, &ctx, "Terminal B").await;

            for id in [first.id, second.id] {
                service
                    .set_recommendation(
                        &ctx,
                        id,
                        SetRecommendationDto {
                            recommendation: Some("BACKUP".to_string()),
                        },
                    )
                    .await
                    .unwrap();
            }

            let first = service.get(first.id).await.unwrap();
            let second = service.get(second.id).await.unwrap();

            assert_eq!(first.recommendation, Some(Recommendation::Backup));
            assert_eq!(second.recommendation, Some(Recommendation::Backup));

            Ok(())
        }

        /// Expect null to clear the slot without touching other candidates
        #[tokio::test]
        async fn clearing_keeps_others() -> Result<(), TestError> {
            let test = test_setup_with_tables!(entity::prelude::HardwareCandidate)?;

            let service = HardwareCandidateService::new(&test.state.db);
            let ctx = RequestContext::new(1, Role::Ops);
            let first = create_candidate(&service, &ctx, "Terminal A").await;
            let second = create_candidate(&service, &ctx, "Terminal B").await;

            service
                .set_recommendation(
                    &ctx,
                    first.id,
                    SetRecommendationDto {
                        recommendation: Some("PRIMARY".to_string()),
                    },
                )
                .await
                .unwrap();
            service
                .set_recommendation(
                    &ctx,
                    second.id,
                    SetRecommendationDto {
                        recommendation: Some("BACKUP".to_string()),
                    },
                )
                .await
                .unwrap();
            service
                .set_recommendation(&ctx, first.id, SetRecommendationDto { recommendation: None })
                .await
                .unwrap();

            let first = service.get(first.id).await.unwrap();
            let second = service.get(second.id).await.unwrap();

            assert_eq!(first.recommendation, None);
            assert_eq!(second.recommendation, Some(Recommendation::Backup));

            Ok(())
        }

        /// Expect an unknown recommendation value to fail validation
        #[tokio::test]
        async fn rejects_unknown_value() -> Result<(), TestError> {
            let test = test_setup_with_tables!(entity::prelude::HardwareCandidate)?;

            let service = HardwareCandidateService::new(&test.state.db);
            let ctx = RequestContext::new(1, Role::Ops);
            let candidate = create_candidate(&service, &ctx, "Terminal A").await;

            let result = service
                .set_recommendation(
                    &ctx,
                    candidate.id,
                    SetRecommendationDto {
                        recommendation: Some("FAVOURITE".to_string()),
                    },
                )
                .await;

            assert!(result.is_err());

            Ok(())
        }
    }
}
