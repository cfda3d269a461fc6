//! Legal document CRUD and the status/version lifecycle.
//!
//! Moving a document into APPROVED or SIGNED from a different status bumps
//! the minor component of its version string. Writing the same status again
//! does not bump. Status and version land in one row update.

use sea_orm::DatabaseConnection;

use crate::{
    model::legal::{
        CreateLegalDocDto, LegalDocDto, LegalDocFilter, LegalDocType, LegalStatus,
        UpdateLegalDocDto, UpdateLegalStatusDto,
    },
    server::{
        data::legal::{LegalDocChanges, LegalDocListFilter, LegalDocRepository, NewLegalDoc},
        error::{validation::ValidationError, Error},
        model::{context::RequestContext, permission::Resource},
        service::validate,
        util::time,
    },
};

/// Increments the minor component of a "major.minor" version string.
///
/// Versions that do not parse as "major.minor" gain a ".1" suffix instead of
/// failing the status change.
pub fn bump_minor(version: &str) -> String {
    match version.rsplit_once('.') {
        Some((major, minor)) => match minor.parse::<u64>() {
            Ok(minor) => format!("{}.{}", major, minor + 1),
            Err(_) => format!("{}.1", version),
        },
        None => format!("{}.1", version),
    }
}

pub struct LegalDocService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> LegalDocService<'a> {
    /// Creates a new instance of [`LegalDocService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        ctx: &RequestContext,
        dto: CreateLegalDocDto,
    ) -> Result<LegalDocDto, Error> {
        ctx.require(Resource::Legal)?;

        validate::require_non_empty("title", &dto.title)?;
        let doc_type =
            LegalDocType::parse(&dto.doc_type).ok_or_else(|| ValidationError::InvalidValue {
                field: "type",
                value: dto.doc_type.clone(),
            })?;
        let status = match dto.status.as_deref() {
            None => LegalStatus::Draft,
            Some(raw) => {
                LegalStatus::parse(raw).ok_or_else(|| ValidationError::InvalidValue {
                    field: "status",
                    value: raw.to_string(),
                })?
            }
        };

        let repo = LegalDocRepository::new(self.db);
        let doc = repo
            .create(
                NewLegalDoc {
                    title: dto.title,
                    doc_type,
                    status,
                    version: dto.version.unwrap_or_else(|| "1.0".to_string()),
                    content: dto.content,
                    file_url: dto.file_url,
                    notes: dto.notes,
                },
                time::now(),
            )
            .await?;

        Self::to_dto(doc)
    }

    pub async fn get(&self, doc_id: i32) -> Result<LegalDocDto, Error> {
        let repo = LegalDocRepository::new(self.db);
        let doc = repo.get(doc_id).await?.ok_or(Error::NotFound {
            entity: "legal document",
            id: doc_id,
        })?;

        Self::to_dto(doc)
    }

    pub async fn list(&self, filter: LegalDocFilter) -> Result<Vec<LegalDocDto>, Error> {
        let status = match filter.status.as_deref() {
            None => None,
            Some(raw) => Some(
                LegalStatus::parse(raw).ok_or_else(|| ValidationError::InvalidValue {
                    field: "status",
                    value: raw.to_string(),
                })?,
            ),
        };
        let doc_type = match filter.doc_type.as_deref() {
            None => None,
            Some(raw) => Some(
                LegalDocType::parse(raw).ok_or_else(|| ValidationError::InvalidValue {
                    field: "type",
                    value: raw.to_string(),
                })?,
            ),
        };

        let repo = LegalDocRepository::new(self.db);
        let docs = repo.list(LegalDocListFilter { status, doc_type }).await?;

        docs.into_iter().map(Self::to_dto).collect()
    }

    pub async fn update(
        &self,
        ctx: &RequestContext,
        doc_id: i32,
        dto: UpdateLegalDocDto,
    ) -> Result<LegalDocDto, Error> {
        ctx.require(Resource::Legal)?;

        if let Some(title) = &dto.title {
            validate::require_non_empty("title", title)?;
        }
        let doc_type = match dto.doc_type.as_deref() {
            None => None,
            Some(raw) => Some(
                LegalDocType::parse(raw).ok_or_else(|| ValidationError::InvalidValue {
                    field: "type",
                    value: raw.to_string(),
                })?,
            ),
        };

        let repo = LegalDocRepository::new(self.db);
        let doc = repo
            .update(
                doc_id,
                LegalDocChanges {
                    title: dto.title,
                    doc_type,
                    version: dto.version,
                    content: dto.content,
                    file_url: dto.file_url,
                    notes: dto.notes,
                },
                time::now(),
            )
            .await?
            .ok_or(Error::NotFound {
                entity: "legal document",
                id: doc_id,
            })?;

        Self::to_dto(doc)
    }

    /// Status change with the version side effect. The minor version bumps
    /// only when the document enters APPROVED or SIGNED from a different
    /// status.
    pub async fn update_status(
        &self,
        ctx: &RequestContext,
        doc_id: i32,
        dto: UpdateLegalStatusDto,
    ) -> Result<LegalDocDto, Error> {
        ctx.require(Resource::Legal)?;

        let status =
            LegalStatus::parse(&dto.status).ok_or_else(|| ValidationError::InvalidValue {
                field: "status",
                value: dto.status.clone(),
            })?;

        let repo = LegalDocRepository::new(self.db);
        let existing = repo.get(doc_id).await?.ok_or(Error::NotFound {
            entity: "legal document",
            id: doc_id,
        })?;

        let previous = LegalStatus::parse(&existing.status)
            .ok_or_else(|| Error::ParseError(format!("legal status '{}'", existing.status)))?;

        let version = if status.bumps_version() && previous != status {
            bump_minor(&existing.version)
        } else {
            existing.version.clone()
        };

        let doc = repo
            .update_status(doc_id, status, version, time::now())
            .await?
            .ok_or(Error::NotFound {
                entity: "legal document",
                id: doc_id,
            })?;

        Self::to_dto(doc)
    }

    pub async fn delete(&self, ctx: &RequestContext, doc_id: i32) -> Result<(), Error> {
        ctx.require(Resource::Legal)?;

        let repo = LegalDocRepository::new(self.db);
        let result = repo.delete(doc_id).await?;

        if result.rows_affected == 0 {
            return Err(Error::NotFound {
                entity: "legal document",
                id: doc_id,
            });
        }

        Ok(())
    }

    fn to_dto(doc: entity::legal_doc::Model) -> Result<LegalDocDto, Error> {
        let doc_type = LegalDocType::parse(&doc.doc_type)
            .ok_or_else(|| Error::ParseError(format!("legal doc type '{}'", doc.doc_type)))?;
        let status = LegalStatus::parse(&doc.status)
            .ok_or_else(|| Error::ParseError(format!("legal status '{}'", doc.status)))?;

        Ok(LegalDocDto {
            id: doc.id,
            title: doc.title,
            doc_type,
            status,
            version: doc.version,
            content: doc.content,
            file_url: doc.file_url,
            notes: doc.notes,
            created_at: doc.created_at,
            updated_at: doc.updated_at,
        })
    }
}
