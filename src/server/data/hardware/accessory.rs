use chrono::NaiveDateTime;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ConnectionTrait, DbErr, DeleteResult, EntityTrait,
    IntoActiveModel, QueryOrder,
};

use crate::model::status::WorkflowStatus;

pub struct NewAccessoryDesign {
    pub name: String,
    pub kind: String,
    pub description: Option<String>,
    pub materials: Option<String>,
    pub dimensions: Option<String>,
    pub branding: Option<String>,
    pub supplier: Option<String>,
    pub unit_cost: Option<f64>,
    pub currency: String,
    pub lead_time: Option<String>,
    pub status: WorkflowStatus,
}

#[derive(Default)]
pub struct AccessoryDesignChanges {
    pub name: Option<String>,
    pub kind: Option<String>,
    pub description: Option<Option<String>>,
    pub materials: Option<Option<String>>,
    pub dimensions: Option<Option<String>>,
    pub branding: Option<Option<String>>,
    pub supplier: Option<Option<String>>,
    pub unit_cost: Option<Option<f64>>,
    pub lead_time: Option<Option<String>>,
    pub status: Option<WorkflowStatus>,
}

pub struct AccessoryDesignRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> AccessoryDesignRepository<'a, C> {
    /// Creates a new instance of [`AccessoryDesignRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        new: NewAccessoryDesign,
        now: NaiveDateTime,
    ) -> Result<entity::accessory_design::Model, DbErr> {
        let accessory = entity::accessory_design::ActiveModel {
            name: ActiveValue::Set(new.name),
            kind: ActiveValue::Set(new.kind),
            description: ActiveValue::Set(new.description),
            materials: ActiveValue::Set(new.materials),
            dimensions: ActiveValue::Set(new.dimensions),
            branding: ActiveValue::Set(new.branding),
            supplier: ActiveValue::Set(new.supplier),
            unit_cost: ActiveValue::Set(new.unit_cost),
            currency: ActiveValue::Set(new.currency),
            lead_time: ActiveValue::Set(new.lead_time),
            status: ActiveValue::Set(new.status.as_str().to_string()),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        accessory.insert(self.db).await
    }

    pub async fn get(
        &self,
        accessory_id: i32,
    ) -> Result<Option<entity::accessory_design::Model>, DbErr> {
        entity::prelude::AccessoryDesign::find_by_id(accessory_id)
            .one(self.db)
            .await
    }

    pub async fn list(&self) -> Result<Vec<entity::accessory_design::Model>, DbErr> {
        entity::prelude::AccessoryDesign::find()
            .order_by_desc(entity::accessory_design::Column::CreatedAt)
            .all(self.db)
            .await
    }

    pub async fn update(
        &self,
        accessory_id: i32,
        changes: AccessoryDesignChanges,
        now: NaiveDateTime,
    ) -> Result<Option<entity::accessory_design::Model>, DbErr> {
        let accessory = match entity::prelude::AccessoryDesign::find_by_id(accessory_id)
            .one(self.db)
            .await?
        {
            Some(accessory) => accessory,
            None => return Ok(None),
        };

        let mut accessory_am = accessory.into_active_model();
        if let Some(name) = changes.name {
            accessory_am.name = ActiveValue::Set(name);
        }
        if let Some(kind) = changes.kind {
            accessory_am.kind = ActiveValue::Set(kind);
        }
        if let Some(description) = changes.description {
            accessory_am.description = ActiveValue::Set(description);
        }
        if let Some(materials) = changes.materials {
            accessory_am.materials = ActiveValue::Set(materials);
        }
        if let Some(dimensions) = changes.dimensions {
            accessory_am.dimensions = ActiveValue::Set(dimensions);
        }
        if let Some(branding) = changes.branding {
            accessory_am.branding = ActiveValue::Set(branding);
        }
        if let Some(supplier) = changes.supplier {
            accessory_am.supplier = ActiveValue::Set(supplier);
        }
        if let Some(unit_cost) = changes.unit_cost {
            accessory_am.unit_cost = ActiveValue::Set(unit_cost);
        }
        if let Some(lead_time) = changes.lead_time {
            accessory_am.lead_time = ActiveValue::Set(lead_time);
        }
        if let Some(status) = changes.status {
            accessory_am.status = ActiveValue::Set(status.as_str().to_string());
        }
        accessory_am.updated_at = ActiveValue::Set(now);

        let accessory = accessory_am.update(self.db).await?;

        Ok(Some(accessory))
    }

    pub async fn delete(&self, accessory_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::AccessoryDesign::delete_by_id(accessory_id)
            .exec(self.db)
            .await
    }
}
