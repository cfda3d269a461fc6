use sea_orm::DatabaseConnection;

use crate::{
    model::{
        hardware::{AccessoryDesignDto, CreateAccessoryDesignDto, UpdateAccessoryDesignDto},
        status::WorkflowStatus,
    },
    server::{
        data::hardware::accessory::{
            AccessoryDesignChanges, AccessoryDesignRepository, NewAccessoryDesign,
        },
        error::{validation::ValidationError, Error},
        model::{context::RequestContext, permission::Resource},
        service::validate,
        util::time,
    },
};

pub struct AccessoryDesignService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AccessoryDesignService<'a> {
    /// Creates a new instance of [`AccessoryDesignService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        ctx: &RequestContext,
        dto: CreateAccessoryDesignDto,
    ) -> Result<AccessoryDesignDto, Error> {
        ctx.require(Resource::Hardware)?;

        validate::require_non_empty("name", &dto.name)?;
        validate::require_non_empty("type", &dto.kind)?;
        let status = validate::parse_status("status", dto.status.as_deref(), WorkflowStatus::Todo)?;

        let repo = AccessoryDesignRepository::new(self.db);
        let accessory = repo
            .create(
                NewAccessoryDesign {
                    name: dto.name,
                    kind: dto.kind,
                    description: dto.description,
                    materials: dto.materials,
                    dimensions: dto.dimensions,
                    branding: dto.branding,
                    supplier: dto.supplier,
                    unit_cost: dto.unit_cost,
                    currency: dto.currency.unwrap_or_else(|| "USD".to_string()),
                    lead_time: dto.lead_time,
                    status,
                },
                time::now(),
            )
            .await?;

        Self::to_dto(accessory)
    }

    pub async fn get(&self, accessory_id: i32) -> Result<AccessoryDesignDto, Error> {
        let repo = AccessoryDesignRepository::new(self.db);
        let accessory = repo.get(accessory_id).await?.ok_or(Error::NotFound {
            entity: "accessory design",
            id: accessory_id,
        })?;

        Self::to_dto(accessory)
    }

    pub async fn list(&self) -> Result<Vec<AccessoryDesignDto>, Error> {
        let repo = AccessoryDesignRepository::new(self.db);
        let accessories = repo.list().await?;

        accessories.into_iter().map(Self::to_dto).collect()
    }

    pub async fn update(
        &self,
        ctx: &RequestContext,
        accessory_id: i32,
        dto: UpdateAccessoryDesignDto,
    ) -> Result<AccessoryDesignDto, Error> {
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

        let repo = AccessoryDesignRepository::new(self.db);
        let accessory = repo
            .update(
                accessory_id,
                AccessoryDesignChanges {
                    name: dto.name,
                    kind: dto.kind,
                    description: dto.description,
                    materials: dto.materials,
                    dimensions: dto.dimensions,
                    branding: dto.branding,
                    supplier: dto.supplier,
                    unit_cost: dto.unit_cost,
                    lead_time: dto.lead_time,
                    status,
                },
                time::now(),
            )
            .await?
            .ok_or(Error::NotFound {
                entity: "accessory design",
                id: accessory_id,
            })?;

        Self::to_dto(accessory)
    }

    pub async fn delete(&self, ctx: &RequestContext, accessory_id: i32) -> Result<(), Error> {
        ctx.require(Resource::Hardware)?;

        let repo = AccessoryDesignRepository::new(self.db);
        let result = repo.delete(accessory_id).await?;

        if result.rows_affected == 0 {
            return Err(Error::NotFound {
                entity: "accessory design",
                id: accessory_id,
            });
        }

        Ok(())
    }

    fn to_dto(accessory: entity::accessory_design::Model) -> Result<AccessoryDesignDto, Error> {
        let status = WorkflowStatus::parse(&accessory.status)
            .ok_or_else(|| Error::ParseError(format!("accessory status '{}'", accessory.status)))?;

        Ok(AccessoryDesignDto {
            id: accessory.id,
            name: accessory.name,
            kind: accessory.kind,
            description: accessory.description,
            materials: accessory.materials,
            dimensions: accessory.dimensions,
            branding: accessory.branding,
            supplier: accessory.supplier,
            unit_cost: accessory.unit_cost,
            currency: accessory.currency,
            lead_time: accessory.lead_time,
            status,
            created_at: accessory.created_at,
            updated_at: accessory.updated_at,
        })
    }
}
