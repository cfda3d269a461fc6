use sea_orm::DatabaseConnection;

use crate::{
    model::runbook::{CreateRunbookDto, RunbookDto, RunbookFilter, UpdateRunbookDto},
    server::{
        data::runbook::{NewRunbook, RunbookChanges, RunbookListFilter, RunbookRepository},
        error::Error,
        model::{context::RequestContext, permission::Resource},
        service::validate,
        util::{payload, time},
    },
};

pub struct RunbookService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> RunbookService<'a> {
    /// Creates a new instance of [`RunbookService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        ctx: &RequestContext,
        dto: CreateRunbookDto,
    ) -> Result<RunbookDto, Error> {
        ctx.require(Resource::Ops)?;

        validate::require_non_empty("title", &dto.title)?;
        validate::require_non_empty("type", &dto.kind)?;
        let checklist = match &dto.checklist {
            None => None,
            Some(sections) => Some(payload::encode_sections(sections)?),
        };

        let repo = RunbookRepository::new(self.db);
        let runbook = repo
            .create(
                NewRunbook {
                    title: dto.title,
                    kind: dto.kind,
                    content: dto.content.unwrap_or_default(),
                    checklist,
                    version: dto.version.unwrap_or_else(|| "1.0".to_string()),
                    is_active: dto.is_active.unwrap_or(true),
                },
                time::now(),
            )
            .await?;

        Ok(Self::to_dto(runbook))
    }

    pub async fn get(&self, runbook_id: i32) -> Result<RunbookDto, Error> {
        let repo = RunbookRepository::new(self.db);
        let runbook = repo.get(runbook_id).await?.ok_or(Error::NotFound {
            entity: "runbook",
            id: runbook_id,
        })?;

        Ok(Self::to_dto(runbook))
    }

    pub async fn list(&self, filter: RunbookFilter) -> Result<Vec<RunbookDto>, Error> {
        let repo = RunbookRepository::new(self.db);
        let runbooks = repo
            .list(RunbookListFilter {
                active: filter.active,
                kind: filter.kind,
            })
            .await?;

        Ok(runbooks.into_iter().map(Self::to_dto).collect())
    }

    pub async fn update(
        &self,
        ctx: &RequestContext,
        runbook_id: i32,
        dto: UpdateRunbookDto,
    ) -> Result<RunbookDto, Error> {
        ctx.require(Resource::Ops)?;

        if let Some(title) = &dto.title {
            validate::require_non_empty("title", title)?;
        }
        let checklist = match &dto.checklist {
            None => None,
            Some(sections) => Some(Some(payload::encode_sections(sections)?)),
        };

        let repo = RunbookRepository::new(self.db);
        let runbook = repo
            .update(
                runbook_id,
                RunbookChanges {
                    title: dto.title,
                    kind: dto.kind,
                    content: dto.content,
                    checklist,
                    version: dto.version,
                    is_active: dto.is_active,
                },
                time::now(),
            )
            .await?
            .ok_or(Error::NotFound {
                entity: "runbook",
                id: runbook_id,
            })?;

        Ok(Self::to_dto(runbook))
    }

    pub async fn set_active(
        &self,
        ctx: &RequestContext,
        runbook_id: i32,
        is_active: bool,
    ) -> Result<RunbookDto, Error> {
        ctx.require(Resource::Ops)?;

        let repo = RunbookRepository::new(self.db);
        let runbook = repo
            .set_active(runbook_id, is_active, time::now())
            .await?
            .ok_or(Error::NotFound {
                entity: "runbook",
                id: runbook_id,
            })?;

        Ok(Self::to_dto(runbook))
    }

    pub async fn delete(&self, ctx: &RequestContext, runbook_id: i32) -> Result<(), Error> {
        ctx.require(Resource::Ops)?;

        let repo = RunbookRepository::new(self.db);
        let result = repo.delete(runbook_id).await?;

        if result.rows_affected == 0 {
            return Err(Error::NotFound {
                entity: "runbook",
                id: runbook_id,
            });
        }

        Ok(())
    }

    fn to_dto(runbook: entity::runbook::Model) -> RunbookDto {
        RunbookDto {
            id: runbook.id,
            title: runbook.title,
            kind: runbook.kind,
            content: runbook.content,
            checklist: payload::decode_sections(runbook.checklist.as_deref()),
            version: runbook.version,
            is_active: runbook.is_active,
            created_at: runbook.created_at,
            updated_at: runbook.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {

    mod checklist {
        use launchpad_test_utils::prelude::*;

        use crate::{
            model::{
                runbook::{CreateRunbookDto, RunbookSectionDto},
                user::Role,
            },
            server::{model::context::RequestContext, service::runbook::RunbookService},
        };

        /// Expect structured checklist sections to survive the round trip
        #[tokio::test]
        async fn stores_sections() -> Result<(), TestError> {
            let test = test_setup_with_tables!(entity::prelude::Runbook)?;

            let service = RunbookService::new(&test.state.db);
            let ctx = RequestContext::new(1, Role::Ops);
            let runbook = service
                .create(
                    &ctx,
                    CreateRunbookDto {
                        title: "Venue installation".to_string(),
                        kind: "INSTALLATION".to_string(),
                        content: Some("Steps for installing a terminal".to_string()),
                        checklist: Some(vec![RunbookSectionDto {
                            section: "On arrival".to_string(),
                            items: vec![
                                "Confirm power outlet".to_string(),
                                "Pair the terminal".to_string(),
                            ],
                        }]),
                        version: None,
                        is_active: None,
                    },
                )
                .await
                .unwrap();

            let fetched = service.get(runbook.id).await.unwrap();
            assert_eq!(fetched.checklist.len(), 1);
            assert_eq!(fetched.checklist[0].section, "On arrival");
            assert_eq!(fetched.checklist[0].items.len(), 2);
            assert_eq!(fetched.version, "1.0");

            Ok(())
        }
    }
}
