use sea_orm::DatabaseConnection;

use crate::{
    model::{
        hardware::{BundleDto, CreateBundleDto, UpdateBundleDto},
        status::WorkflowStatus,
    },
    server::{
        data::hardware::bundle::{BundleChanges, BundleRepository, NewBundle},
        error::{validation::ValidationError, Error},
        model::{context::RequestContext, permission::Resource},
        service::validate,
        util::time,
    },
};

pub struct BundleService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> BundleService<'a> {
    /// Creates a new instance of [`BundleService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        ctx: &RequestContext,
        dto: CreateBundleDto,
    ) -> Result<BundleDto, Error> {
        ctx.require(Resource::Hardware)?;

        validate::require_non_empty("name", &dto.name)?;
        let status = validate::parse_status("status", dto.status.as_deref(), WorkflowStatus::Todo)?;

        let repo = BundleRepository::new(self.db);
        let bundle = repo
            .create(
                NewBundle {
                    name: dto.name,
                    description: dto.description,
                    total_cost: dto.total_cost,
                    currency: dto.currency.unwrap_or_else(|| "USD".to_string()),
                    is_standard: dto.is_standard.unwrap_or(false),
                    status,
                },
                time::now(),
            )
            .await?;

        Self::to_dto(bundle)
    }

    pub async fn get(&self, bundle_id: i32) -> Result<BundleDto, Error> {
        let repo = BundleRepository::new(self.db);
        let bundle = repo.get(bundle_id).await?.ok_or(Error::NotFound {
            entity: "bundle",
            id: bundle_id,
        })?;

        Self::to_dto(bundle)
    }

    pub async fn list(&self) -> Result<Vec<BundleDto>, Error> {
        let repo = BundleRepository::new(self.db);
        let bundles = repo.list().await?;

        bundles.into_iter().map(Self::to_dto).collect()
    }

    pub async fn update(
        &self,
        ctx: &RequestContext,
        bundle_id: i32,
        dto: UpdateBundleDto,
    ) -> Result<BundleDto, Error> {
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

        let repo = BundleRepository::new(self.db);
        let bundle = repo
            .update(
                bundle_id,
                BundleChanges {
                    name: dto.name,
                    description: dto.description,
                    total_cost: dto.total_cost,
                    currency: dto.currency,
                    is_standard: dto.is_standard,
                    status,
                },
                time::now(),
            )
            .await?
            .ok_or(Error::NotFound {
                entity: "bundle",
                id: bundle_id,
            })?;

        Self::to_dto(bundle)
    }

    pub async fn delete(&self, ctx: &RequestContext, bundle_id: i32) -> Result<(), Error> {
        ctx.require(Resource::Hardware)?;

        let repo = BundleRepository::new(self.db);
        let result = repo.delete(bundle_id).await?;

        if result.rows_affected == 0 {
            return Err(Error::NotFound {
                entity: "bundle",
                id: bundle_id,
            });
        }

        Ok(())
    }

    fn to_dto(bundle: entity::bundle::Model) -> Result<BundleDto, Error> {
        let status = WorkflowStatus::parse(&bundle.status)
            .ok_or_else(|| Error::ParseError(format!("bundle status '{}'", bundle.status)))?;

        Ok(BundleDto {
            id: bundle.id,
            name: bundle.name,
            description: bundle.description,
            total_cost: bundle.total_cost,
            currency: bundle.currency,
            is_standard: bundle.is_standard,
            status,
            created_at: bundle.created_at,
            updated_at: bundle.updated_at,
        })
    }
}
