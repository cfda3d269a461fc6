use chrono::NaiveDateTime;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ConnectionTrait, DbErr, DeleteResult, EntityTrait,
    IntoActiveModel, QueryOrder,
};

use crate::model::status::WorkflowStatus;

pub struct NewBundle {
    pub name: String,
    pub description: Option<String>,
    pub total_cost: Option<f64>,
    pub currency: String,
    pub is_standard: bool,
    pub status: WorkflowStatus,
}

#[derive(Default)]
pub struct BundleChanges {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub total_cost: Option<Option<f64>>,
    pub currency: Option<String>,
    pub is_standard: Option<bool>,
    pub status: Option<WorkflowStatus>,
}

pub struct BundleRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> BundleRepository<'a, C> {
    /// Creates a new instance of [`BundleRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        new: NewBundle,
        now: NaiveDateTime,
    ) -> Result<entity::bundle::Model, DbErr> {
        let bundle = entity::bundle::ActiveModel {
            name: ActiveValue::Set(new.name),
            description: ActiveValue::Set(new.description),
            total_cost: ActiveValue::Set(new.total_cost),
            currency: ActiveValue::Set(new.currency),
            is_standard: ActiveValue::Set(new.is_standard),
            status: ActiveValue::Set(new.status.as_str().to_string()),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        bundle.insert(self.db).await
    }

    pub async fn get(&self, bundle_id: i32) -> Result<Option<entity::bundle::Model>, DbErr> {
        entity::prelude::Bundle::find_by_id(bundle_id).one(self.db).await
    }

    pub async fn list(&self) -> Result<Vec<entity::bundle::Model>, DbErr> {
        entity::prelude::Bundle::find()
            .order_by_desc(entity::bundle::Column::CreatedAt)
            .all(self.db)
            .await
    }

    pub async fn update(
        &self,
        bundle_id: i32,
        changes: BundleChanges,
        now: NaiveDateTime,
    ) -> Result<Option<entity::bundle::Model>, DbErr> {
        let bundle = match entity::prelude::Bundle::find_by_id(bundle_id)
            .one(self.db)
            .await?
        {
            Some(bundle) => bundle,
            None => return Ok(None),
        };

        let mut bundle_am = bundle.into_active_model();
        if let Some(name) = changes.name {
            bundle_am.name = ActiveValue::Set(name);
        }
        if let Some(description) = changes.description {
            bundle_am.description = ActiveValue::Set(description);
        }
        if let Some(total_cost) = changes.total_cost {
            bundle_am.total_cost = ActiveValue::Set(total_cost);
        }
        if let Some(currency) = changes.currency {
            bundle_am.currency = ActiveValue::Set(currency);
        }
        if let Some(is_standard) = changes.is_standard {
            bundle_am.is_standard = ActiveValue::Set(is_standard);
        }
        if let Some(status) = changes.status {
            bundle_am.status = ActiveValue::Set(status.as_str().to_string());
        }
        bundle_am.updated_at = ActiveValue::Set(now);

        let bundle = bundle_am.update(self.db).await?;

        Ok(Some(bundle))
    }

    pub async fn delete(&self, bundle_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::Bundle::delete_by_id(bundle_id)
            .exec(self.db)
            .await
    }
}
