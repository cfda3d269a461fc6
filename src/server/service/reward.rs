use sea_orm::DatabaseConnection;

use crate::{
    model::reward::{
        CreateRewardRuleDto, RewardRuleDto, RewardRuleFilter, RewardType, UpdateRewardRuleDto,
    },
    server::{
        data::reward::{NewRewardRule, RewardRuleChanges, RewardRuleListFilter, RewardRuleRepository},
        error::{validation::ValidationError, Error},
        model::{context::RequestContext, permission::Resource},
        service::validate,
        util::time,
    },
};

pub struct RewardRuleService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> RewardRuleService<'a> {
    /// Creates a new instance of [`RewardRuleService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        ctx: &RequestContext,
        dto: CreateRewardRuleDto,
    ) -> Result<RewardRuleDto, Error> {
        ctx.require(Resource::Rewards)?;

        validate::require_non_empty("name", &dto.name)?;
        let rule_type =
            RewardType::parse(&dto.rule_type).ok_or_else(|| ValidationError::InvalidValue {
                field: "type",
                value: dto.rule_type.clone(),
            })?;

        let repo = RewardRuleRepository::new(self.db);
        let rule = repo
            .create(
                NewRewardRule {
                    name: dto.name,
                    rule_type,
                    description: dto.description,
                    formula: dto.formula,
                    min_threshold: dto.min_threshold,
                    max_threshold: dto.max_threshold,
                    cap_per_day: dto.cap_per_day,
                    cap_per_month: dto.cap_per_month,
                    conditions: dto.conditions,
                    is_active: dto.is_active.unwrap_or(true),
                    test_period: dto.test_period,
                    test_location: dto.test_location,
                },
                time::now(),
            )
            .await?;

        Self::to_dto(rule)
    }

    pub async fn get(&self, rule_id: i32) -> Result<RewardRuleDto, Error> {
        let repo = RewardRuleRepository::new(self.db);
        let rule = repo.get(rule_id).await?.ok_or(Error::NotFound {
            entity: "reward rule",
            id: rule_id,
        })?;

        Self::to_dto(rule)
    }

    pub async fn list(&self, filter: RewardRuleFilter) -> Result<Vec<RewardRuleDto>, Error> {
        let rule_type = match filter.rule_type.as_deref() {
            None => None,
            Some(raw) => Some(RewardType::parse(raw).ok_or_else(|| {
                ValidationError::InvalidValue {
                    field: "type",
                    value: raw.to_string(),
                }
            })?),
        };

        let repo = RewardRuleRepository::new(self.db);
        let rules = repo
            .list(RewardRuleListFilter {
                active: filter.active,
                rule_type,
            })
            .await?;

        rules.into_iter().map(Self::to_dto).collect()
    }

    pub async fn update(
        &self,
        ctx: &RequestContext,
        rule_id: i32,
        dto: UpdateRewardRuleDto,
    ) -> Result<RewardRuleDto, Error> {
        ctx.require(Resource::Rewards)?;

        if let Some(name) = &dto.name {
            validate::require_non_empty("name", name)?;
        }
        let rule_type = match dto.rule_type.as_deref() {
            None => None,
            Some(raw) => Some(RewardType::parse(raw).ok_or_else(|| {
                ValidationError::InvalidValue {
                    field: "type",
                    value: raw.to_string(),
                }
            })?),
        };

        let repo = RewardRuleRepository::new(self.db);
        let rule = repo
            .update(
                rule_id,
                RewardRuleChanges {
                    name: dto.name,
                    rule_type,
                    description: dto.description,
                    formula: dto.formula,
                    min_threshold: dto.min_threshold,
                    max_threshold: dto.max_threshold,
                    cap_per_day: dto.cap_per_day,
                    cap_per_month: dto.cap_per_month,
                    conditions: dto.conditions,
                    is_active: dto.is_active,
                    test_period: dto.test_period,
                    test_location: dto.test_location,
                },
                time::now(),
            )
            .await?
            .ok_or(Error::NotFound {
                entity: "reward rule",
                id: rule_id,
            })?;

        Self::to_dto(rule)
    }

    pub async fn set_active(
        &self,
        ctx: &RequestContext,
        rule_id: i32,
        is_active: bool,
    ) -> Result<RewardRuleDto, Error> {
        ctx.require(Resource::Rewards)?;

        let repo = RewardRuleRepository::new(self.db);
        let rule = repo
            .set_active(rule_id, is_active, time::now())
            .await?
            .ok_or(Error::NotFound {
                entity: "reward rule",
                id: rule_id,
            })?;

        Self::to_dto(rule)
    }

    pub async fn delete(&self, ctx: &RequestContext, rule_id: i32) -> Result<(), Error> {
        ctx.require(Resource::Rewards)?;

        let repo = RewardRuleRepository::new(self.db);
        let result = repo.delete(rule_id).await?;

        if result.rows_affected == 0 {
            return Err(Error::NotFound {
                entity: "reward rule",
                id: rule_id,
            });
        }

        Ok(())
    }

    fn to_dto(rule: entity::reward_rule::Model) -> Result<RewardRuleDto, Error> {
        let rule_type = RewardType::parse(&rule.rule_type)
            .ok_or_else(|| Error::ParseError(format!("reward type '{}'", rule.rule_type)))?;

        Ok(RewardRuleDto {
            id: rule.id,
            name: rule.name,
            rule_type,
            description: rule.description,
            formula: rule.formula,
            min_threshold: rule.min_threshold,
            max_threshold: rule.max_threshold,
            cap_per_day: rule.cap_per_day,
            cap_per_month: rule.cap_per_month,
            conditions: rule.conditions,
            is_active: rule.is_active,
            test_period: rule.test_period,
            test_location: rule.test_location,
            created_at: rule.created_at,
            updated_at: rule.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {

    mod create {
        use launchpad_test_utils::prelude::*;

        use crate::{
            model::{reward::CreateRewardRuleDto, user::Role},
            server::{
                error::Error, model::context::RequestContext,
                service::reward::RewardRuleService,
            },
        };

        /// Expect an unknown rule type to fail validation naming the field
        #[tokio::test]
        async fn rejects_unknown_type() -> Result<(), TestError> {
            let test = test_setup_with_tables!(entity::prelude::RewardRule)?;

            let service = RewardRuleService::new(&test.state.db);
            let ctx = RequestContext::new(1, Role::Pm);
            let result = service
                .create(
                    &ctx,
                    CreateRewardRuleDto {
                        name: "Activation bonus".to_string(),
                        rule_type: "PER_REFERRAL".to_string(),
                        description: None,
                        formula: None,
                        min_threshold: None,
                        max_threshold: None,
                        cap_per_day: None,
                        cap_per_month: None,
                        conditions: None,
                        is_active: None,
                        test_period: None,
                        test_location: None,
                    },
                )
                .await;

            match result {
                Err(Error::ValidationError(err)) => assert_eq!(err.field(), "type"),
                other => panic!("expected validation error, got {:?}", other.map(|r| r.id)),
            }

            Ok(())
        }
    }
}
