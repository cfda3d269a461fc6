use chrono::NaiveDateTime;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, DeleteResult, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder,
};

use crate::model::reward::RewardType;

pub struct NewRewardRule {
    pub name: String,
    pub rule_type: RewardType,
    pub description: Option<String>,
    pub formula: Option<String>,
    pub min_threshold: Option<f64>,
    pub max_threshold: Option<f64>,
    pub cap_per_day: Option<f64>,
    pub cap_per_month: Option<f64>,
    pub conditions: Option<String>,
    pub is_active: bool,
    pub test_period: Option<String>,
    pub test_location: Option<String>,
}

#[derive(Default)]
pub struct RewardRuleChanges {
    pub name: Option<String>,
    pub rule_type: Option<RewardType>,
    pub description: Option<Option<String>>,
    pub formula: Option<Option<String>>,
    pub min_threshold: Option<Option<f64>>,
    pub max_threshold: Option<Option<f64>>,
    pub cap_per_day: Option<Option<f64>>,
    pub cap_per_month: Option<Option<f64>>,
    pub conditions: Option<Option<String>>,
    pub is_active: Option<bool>,
    pub test_period: Option<Option<String>>,
    pub test_location: Option<Option<String>>,
}

#[derive(Default)]
pub struct RewardRuleListFilter {
    pub active: Option<bool>,
    pub rule_type: Option<RewardType>,
}

pub struct RewardRuleRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> RewardRuleRepository<'a, C> {
    /// Creates a new instance of [`RewardRuleRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        new: NewRewardRule,
        now: NaiveDateTime,
    ) -> Result<entity::reward_rule::Model, DbErr> {
        let rule = entity::reward_rule::ActiveModel {
            name: ActiveValue::Set(new.name),
            rule_type: ActiveValue::Set(new.rule_type.as_str().to_string()),
            description: ActiveValue::Set(new.description),
            formula: ActiveValue::Set(new.formula),
            min_threshold: ActiveValue::Set(new.min_threshold),
            max_threshold: ActiveValue::Set(new.max_threshold),
            cap_per_day: ActiveValue::Set(new.cap_per_day),
            cap_per_month: ActiveValue::Set(new.cap_per_month),
            conditions: ActiveValue::Set(new.conditions),
            is_active: ActiveValue::Set(new.is_active),
            test_period: ActiveValue::Set(new.test_period),
            test_location: ActiveValue::Set(new.test_location),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        rule.insert(self.db).await
    }

    pub async fn get(&self, rule_id: i32) -> Result<Option<entity::reward_rule::Model>, DbErr> {
        entity::prelude::RewardRule::find_by_id(rule_id)
            .one(self.db)
            .await
    }

    pub async fn list(
        &self,
        filter: RewardRuleListFilter,
    ) -> Result<Vec<entity::reward_rule::Model>, DbErr> {
        let mut query = entity::prelude::RewardRule::find()
            .order_by_desc(entity::reward_rule::Column::CreatedAt);

        if let Some(active) = filter.active {
            query = query.filter(entity::reward_rule::Column::IsActive.eq(active));
        }
        if let Some(rule_type) = filter.rule_type {
            query = query.filter(entity::reward_rule::Column::RuleType.eq(rule_type.as_str()));
        }

        query.all(self.db).await
    }

    pub async fn update(
        &self,
        rule_id: i32,
        changes: RewardRuleChanges,
        now: NaiveDateTime,
    ) -> Result<Option<entity::reward_rule::Model>, DbErr> {
        let rule = match entity::prelude::RewardRule::find_by_id(rule_id)
            .one(self.db)
            .await?
        {
            Some(rule) => rule,
            None => return Ok(None),
        };

        let mut rule_am = rule.into_active_model();
        if let Some(name) = changes.name {
            rule_am.name = ActiveValue::Set(name);
        }
        if let Some(rule_type) = changes.rule_type {
            rule_am.rule_type = ActiveValue::Set(rule_type.as_str().to_string());
        }
        if let Some(description) = changes.description {
            rule_am.description = ActiveValue::Set(description);
        }
        if let Some(formula) = changes.formula {
            rule_am.formula = ActiveValue::Set(formula);
        }
        if let Some(min_threshold) = changes.min_threshold {
            rule_am.min_threshold = ActiveValue::Set(min_threshold);
        }
        if let Some(max_threshold) = changes.max_threshold {
            rule_am.max_threshold = ActiveValue::Set(max_threshold);
        }
        if let Some(cap_per_day) = changes.cap_per_day {
            rule_am.cap_per_day = ActiveValue::Set(cap_per_day);
        }
        if let Some(cap_per_month) = changes.cap_per_month {
            rule_am.cap_per_month = ActiveValue::Set(cap_per_month);
        }
        if let Some(conditions) = changes.conditions {
            rule_am.conditions = ActiveValue::Set(conditions);
        }
        if let Some(is_active) = changes.is_active {
            rule_am.is_active = ActiveValue::Set(is_active);
        }
        if let Some(test_period) = changes.test_period {
            rule_am.test_period = ActiveValue::Set(test_period);
        }
        if let Some(test_location) = changes.test_location {
            rule_am.test_location = ActiveValue::Set(test_location);
        }
        rule_am.updated_at = ActiveValue::Set(now);

        let rule = rule_am.update(self.db).await?;

        Ok(Some(rule))
    }

    pub async fn set_active(
        &self,
        rule_id: i32,
        is_active: bool,
        now: NaiveDateTime,
    ) -> Result<Option<entity::reward_rule::Model>, DbErr> {
        let rule = match entity::prelude::RewardRule::find_by_id(rule_id)
            .one(self.db)
            .await?
        {
            Some(rule) => rule,
            None => return Ok(None),
        };

        let mut rule_am = rule.into_active_model();
        rule_am.is_active = ActiveValue::Set(is_active);
        rule_am.updated_at = ActiveValue::Set(now);

        let rule = rule_am.update(self.db).await?;

        Ok(Some(rule))
    }

    pub async fn delete(&self, rule_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::RewardRule::delete_by_id(rule_id)
            .exec(self.db)
            .await
    }
}
