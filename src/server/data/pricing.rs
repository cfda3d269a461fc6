use chrono::NaiveDateTime;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, DeleteResult, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder,
};

use crate::model::pricing::FeeType;

pub struct NewPricingPlan {
    pub name: String,
    pub description: Option<String>,
    pub hardware_model: Option<String>,
    pub setup_fee: Option<f64>,
    pub monthly_fee: Option<f64>,
    pub transaction_fee: Option<f64>,
    pub fee_type: FeeType,
    pub currency: String,
    pub inclusions: Option<String>,
    pub sla_level: Option<String>,
    pub support_hours: Option<String>,
    pub is_active: bool,
    pub display_order: i32,
}

#[derive(Default)]
pub struct PricingPlanChanges {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub hardware_model: Option<Option<String>>,
    pub setup_fee: Option<Option<f64>>,
    pub monthly_fee: Option<Option<f64>>,
    pub transaction_fee: Option<Option<f64>>,
    pub fee_type: Option<FeeType>,
    pub currency: Option<String>,
    pub inclusions: Option<String>,
    pub sla_level: Option<Option<String>>,
    pub support_hours: Option<Option<String>>,
    pub is_active: Option<bool>,
    pub display_order: Option<i32>,
}

pub struct PricingPlanRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> PricingPlanRepository<'a, C> {
    /// Creates a new instance of [`PricingPlanRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        new: NewPricingPlan,
        now: NaiveDateTime,
    ) -> Result<entity::pricing_plan::Model, DbErr> {
        let plan = entity::pricing_plan::ActiveModel {
            name: ActiveValue::Set(new.name),
            description: ActiveValue::Set(new.description),
            hardware_model: ActiveValue::Set(new.hardware_model),
            setup_fee: ActiveValue::Set(new.setup_fee),
            monthly_fee: ActiveValue::Set(new.monthly_fee),
            transaction_fee: ActiveValue::Set(new.transaction_fee),
            fee_type: ActiveValue::Set(new.fee_type.as_str().to_string()),
            currency: ActiveValue::Set(new.currency),
            inclusions: ActiveValue::Set(new.inclusions),
            sla_level: ActiveValue::Set(new.sla_level),
            support_hours: ActiveValue::Set(new.support_hours),
            is_active: ActiveValue::Set(new.is_active),
            display_order: ActiveValue::Set(new.display_order),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        plan.insert(self.db).await
    }

    pub async fn get(&self, plan_id: i32) -> Result<Option<entity::pricing_plan::Model>, DbErr> {
        entity::prelude::PricingPlan::find_by_id(plan_id)
            .one(self.db)
            .await
    }

    /// Plans in display order.
    pub async fn list(
        &self,
        active: Option<bool>,
    ) -> Result<Vec<entity::pricing_plan::Model>, DbErr> {
        let mut query = entity::prelude::PricingPlan::find()
            .order_by_asc(entity::pricing_plan::Column::DisplayOrder);

        if let Some(active) = active {
            query = query.filter(entity::pricing_plan::Column::IsActive.eq(active));
        }

        query.all(self.db).await
    }

    pub async fn update(
        &self,
        plan_id: i32,
        changes: PricingPlanChanges,
        now: NaiveDateTime,
    ) -> Result<Option<entity::pricing_plan::Model>, DbErr> {
        let plan = match entity::prelude::PricingPlan::find_by_id(plan_id)
            .one(self.db)
            .await?
        {
            Some(plan) => plan,
            None => return Ok(None),
        };

        let mut plan_am = plan.into_active_model();
        if let Some(name) = changes.name {
            plan_am.name = ActiveValue::Set(name);
        }
        if let Some(description) = changes.description {
            plan_am.description = ActiveValue::Set(description);
        }
        if let Some(hardware_model) = changes.hardware_model {
            plan_am.hardware_model = ActiveValue::Set(hardware_model);
        }
        if let Some(setup_fee) = changes.setup_fee {
            plan_am.setup_fee = ActiveValue::Set(setup_fee);
        }
        if let Some(monthly_fee) = changes.monthly_fee {
            plan_am.monthly_fee = ActiveValue::Set(monthly_fee);
        }
        if let Some(transaction_fee) = changes.transaction_fee {
            plan_am.transaction_fee = ActiveValue::Set(transaction_fee);
        }
        if let Some(fee_type) = changes.fee_type {
            plan_am.fee_type = ActiveValue::Set(fee_type.as_str().to_string());
        }
        if let Some(currency) = changes.currency {
            plan_am.currency = ActiveValue::Set(currency);
        }
        if let Some(inclusions) = changes.inclusions {
            plan_am.inclusions = ActiveValue::Set(Some(inclusions));
        }
        if let Some(sla_level) = changes.sla_level {
            plan_am.sla_level = ActiveValue::Set(sla_level);
        }
        if let Some(support_hours) = changes.support_hours {
            plan_am.support_hours = ActiveValue::Set(support_hours);
        }
        if let Some(is_active) = changes.is_active {
            plan_am.is_active = ActiveValue::Set(is_active);
        }
        if let Some(display_order) = changes.display_order {
            plan_am.display_order = ActiveValue::Set(display_order);
        }
        plan_am.updated_at = ActiveValue::Set(now);

        let plan = plan_am.update(self.db).await?;

        Ok(Some(plan))
    }

    pub async fn set_active(
        &self,
        plan_id: i32,
        is_active: bool,
        now: NaiveDateTime,
    ) -> Result<Option<entity::pricing_plan::Model>, DbErr> {
        let plan = match entity::prelude::PricingPlan::find_by_id(plan_id)
            .one(self.db)
            .await?
        {
            Some(plan) => plan,
            None => return Ok(None),
        };

        let mut plan_am = plan.into_active_model();
        plan_am.is_active = ActiveValue::Set(is_active);
        plan_am.updated_at = ActiveValue::Set(now);

        let plan = plan_am.update(self.db).await?;

        Ok(Some(plan))
    }

    pub async fn delete(&self, plan_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::PricingPlan::delete_by_id(plan_id)
            .exec(self.db)
            .await
    }
}
