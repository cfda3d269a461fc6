use sea_orm::DatabaseConnection;

use crate::{
    model::pricing::{
        CreatePricingPlanDto, FeeType, PricingPlanDto, PricingPlanFilter, UpdatePricingPlanDto,
    },
    server::{
        data::pricing::{NewPricingPlan, PricingPlanChanges, PricingPlanRepository},
        error::{validation::ValidationError, Error},
        model::{context::RequestContext, permission::Resource},
        service::validate,
        util::{payload, time},
    },
};

pub struct PricingPlanService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> PricingPlanService<'a> {
    /// Creates a new instance of [`PricingPlanService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        ctx: &RequestContext,
        dto: CreatePricingPlanDto,
    ) -> Result<PricingPlanDto, Error> {
        ctx.require(Resource::Pricing)?;

        validate::require_non_empty("name", &dto.name)?;
        let fee_type = match dto.fee_type.as_deref() {
            None => FeeType::Percentage,
            Some(raw) => FeeType::parse(raw).ok_or_else(|| ValidationError::InvalidValue {
                field: "feeType",
                value: raw.to_string(),
            })?,
        };
        let inclusions = match &dto.inclusions {
            None => None,
            Some(inclusions) => Some(payload::encode_tags(inclusions)?),
        };

        let repo = PricingPlanRepository::new(self.db);
        let display_order = match dto.order {
            Some(order) => order,
            // Append to the display sequence
            None => repo.list(None).await?.len() as i32 + 1,
        };

        let plan = repo
            .create(
                NewPricingPlan {
                    name: dto.name,
                    description: dto.description,
                    hardware_model: dto.hardware_model,
                    setup_fee: dto.setup_fee,
                    monthly_fee: dto.monthly_fee,
                    transaction_fee: dto.transaction_fee,
                    fee_type,
                    currency: dto.currency.unwrap_or_else(|| "USD".to_string()),
                    inclusions,
                    sla_level: dto.sla_level,
                    support_hours: dto.support_hours,
                    is_active: dto.is_active.unwrap_or(true),
                    display_order,
                },
                time::now(),
            )
            .await?;

        Self::to_dto(plan)
    }

    pub async fn get(&self, plan_id: i32) -> Result<PricingPlanDto, Error> {
        let repo = PricingPlanRepository::new(self.db);
        let plan = repo.get(plan_id).await?.ok_or(Error::NotFound {
            entity: "pricing plan",
            id: plan_id,
        })?;

        Self::to_dto(plan)
    }

    /// Plans in display order.
    pub async fn list(&self, filter: PricingPlanFilter) -> Result<Vec<PricingPlanDto>, Error> {
        let repo = PricingPlanRepository::new(self.db);
        let plans = repo.list(filter.active).await?;

        plans.into_iter().map(Self::to_dto).collect()
    }

    pub async fn update(
        &self,
        ctx: &RequestContext,
        plan_id: i32,
        dto: UpdatePricingPlanDto,
    ) -> Result<PricingPlanDto, Error> {
        ctx.require(Resource::Pricing)?;

        if let Some(name) = &dto.name {
            validate::require_non_empty("name", name)?;
        }
        let fee_type = match dto.fee_type.as_deref() {
            None => None,
            Some(raw) => Some(FeeType::parse(raw).ok_or_else(|| {
                ValidationError::InvalidValue {
                    field: "feeType",
                    value: raw.to_string(),
                }
            })?),
        };
        let inclusions = match &dto.inclusions {
            None => None,
            Some(inclusions) => Some(payload::encode_tags(inclusions)?),
        };

        let repo = PricingPlanRepository::new(self.db);
        let plan = repo
            .update(
                plan_id,
                PricingPlanChanges {
                    name: dto.name,
                    description: dto.description,
                    hardware_model: dto.hardware_model,
                    setup_fee: dto.setup_fee,
                    monthly_fee: dto.monthly_fee,
                    transaction_fee: dto.transaction_fee,
                    fee_type,
                    currency: dto.currency,
                    inclusions,
                    sla_level: dto.sla_level,
                    support_hours: dto.support_hours,
                    is_active: dto.is_active,
                    display_order: dto.order,
                },
                time::now(),
            )
            .await?
            .ok_or(Error::NotFound {
                entity: "pricing plan",
                id: plan_id,
            })?;

        Self::to_dto(plan)
    }

    pub async fn set_active(
        &self,
        ctx: &RequestContext,
        plan_id: i32,
        is_active: bool,
    ) -> Result<PricingPlanDto, Error> {
        ctx.require(Resource::Pricing)?;

        let repo = PricingPlanRepository::new(self.db);
        let plan = repo
            .set_active(plan_id, is_active, time::now())
            .await?
            .ok_or(Error::NotFound {
                entity: "pricing plan",
                id: plan_id,
            })?;

        Self::to_dto(plan)
    }

    pub async fn delete(&self, ctx: &RequestContext, plan_id: i32) -> Result<(), Error> {
        ctx.require(Resource::Pricing)?;

        let repo = PricingPlanRepository::new(self.db);
        let result = repo.delete(plan_id).await?;

        if result.rows_affected == 0 {
            return Err(Error::NotFound {
                entity: "pricing plan",
                id: plan_id,
            });
        }

        Ok(())
    }

    fn to_dto(plan: entity::pricing_plan::Model) -> Result<PricingPlanDto, Error> {
        let fee_type = FeeType::parse(&plan.fee_type)
            .ok_or_else(|| Error::ParseError(format!("fee type '{}'", plan.fee_type)))?;

        Ok(PricingPlanDto {
            id: plan.id,
            name: plan.name,
            description: plan.description,
            hardware_model: plan.hardware_model,
            setup_fee: plan.setup_fee,
            monthly_fee: plan.monthly_fee,
            transaction_fee: plan.transaction_fee,
            fee_type,
            currency: plan.currency,
            inclusions: payload::decode_tags(plan.inclusions.as_deref()),
            sla_level: plan.sla_level,
            support_hours: plan.support_hours,
            is_active: plan.is_active,
            order: plan.display_order,
            created_at: plan.created_at,
            updated_at: plan.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {

    mod set_active {
        use launchpad_test_utils::prelude::*;

        use crate::{
            model::{
                pricing::{CreatePricingPlanDto, PricingPlanFilter},
                user::Role,
            },
            server::{model::context::RequestContext, service::pricing::PricingPlanService},
        };

        /// Expect deactivated plans to drop out of the active-only list
        #[tokio::test]
        async fn toggles_visibility() -> Result<(), TestError> {
            let test = test_setup_with_tables!(entity::prelude::PricingPlan)?;

            let service = PricingPlanService::new(&test.state.db);
            let ctx = RequestContext::new(1, Role::Sales);
            let plan = service
                .create(
                    &ctx,
                    CreatePricingPlanDto {
                        name: "Starter".to_string(),
                        description: None,
                        hardware_model: None,
                        setup_fee: Some(99.0),
                        monthly_fee: Some(29.0),
                        transaction_fee: Some(1.5),
                        fee_type: Some("PERCENTAGE".to_string()),
                        currency: None,
                        inclusions: Some(vec!["Terminal".to_string(), "Support".to_string()]),
                        sla_level: None,
                        support_hours: None,
                        is_active: None,
                        order: None,
                    },
                )
                .await
                .unwrap();
            assert!(plan.is_active);

            service.set_active(&ctx, plan.id, false).await.unwrap();

            let active_only = service
                .list(PricingPlanFilter {
                    active: Some(true),
                })
                .await
                .unwrap();
            assert!(active_only.is_empty());

            Ok(())
        }
    }
}
