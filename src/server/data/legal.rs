use chrono::NaiveDateTime;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, DeleteResult, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder,
};

use crate::model::legal::{LegalDocType, LegalStatus};

pub struct NewLegalDoc {
    pub title: String,
    pub doc_type: LegalDocType,
    pub status: LegalStatus,
    pub version: String,
    pub content: Option<String>,
    pub file_url: Option<String>,
    pub notes: Option<String>,
}

#[derive(Default)]
pub struct LegalDocChanges {
    pub title: Option<String>,
    pub doc_type: Option<LegalDocType>,
    pub version: Option<String>,
    pub content: Option<Option<String>>,
    pub file_url: Option<Option<String>>,
    pub notes: Option<Option<String>>,
}

#[derive(Default)]
pub struct LegalDocListFilter {
    pub status: Option<LegalStatus>,
    pub doc_type: Option<LegalDocType>,
}

pub struct LegalDocRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> LegalDocRepository<'a, C> {
    /// Creates a new instance of [`LegalDocRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        new: NewLegalDoc,
        now: NaiveDateTime,
    ) -> Result<entity::legal_doc::Model, DbErr> {
        let doc = entity::legal_doc::ActiveModel {
            title: ActiveValue::Set(new.title),
            doc_type: ActiveValue::Set(new.doc_type.as_str().to_string()),
            status: ActiveValue::Set(new.status.as_str().to_string()),
            version: ActiveValue::Set(new.version),
            content: ActiveValue::Set(new.content),
            file_url: ActiveValue::Set(new.file_url),
            notes: ActiveValue::Set(new.notes),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        doc.insert(self.db).await
    }

    pub async fn get(&self, doc_id: i32) -> Result<Option<entity::legal_doc::Model>, DbErr> {
        entity::prelude::LegalDoc::find_by_id(doc_id).one(self.db).await
    }

    pub async fn list(
        &self,
        filter: LegalDocListFilter,
    ) -> Result<Vec<entity::legal_doc::Model>, DbErr> {
        let mut query = entity::prelude::LegalDoc::find();

        if let Some(status) = filter.status {
            query = query.filter(entity::legal_doc::Column::Status.eq(status.as_str()));
        }
        if let Some(doc_type) = filter.doc_type {
            query = query.filter(entity::legal_doc::Column::DocType.eq(doc_type.as_str()));
        }

        query
            .order_by_desc(entity::legal_doc::Column::CreatedAt)
            .all(self.db)
            .await
    }

    pub async fn update(
        &self,
        doc_id: i32,
        changes: LegalDocChanges,
        now: NaiveDateTime,
    ) -> Result<Option<entity::legal_doc::Model>, DbErr> {
        let doc = match entity::prelude::LegalDoc::find_by_id(doc_id).one(self.db).await? {
            Some(doc) => doc,
            None => return Ok(None),
        };

        let mut doc_am = doc.into_active_model();
        if let Some(title) = changes.title {
            doc_am.title = ActiveValue::Set(title);
        }
        if let Some(doc_type) = changes.doc_type {
            doc_am.doc_type = ActiveValue::Set(doc_type.as_str().to_string());
        }
        if let Some(version) = changes.version {
            doc_am.version = ActiveValue::Set(version);
        }
        if let Some(content) = changes.content {
            doc_am.content = ActiveValue::Set(content);
        }
        if let Some(file_url) = changes.file_url {
            doc_am.file_url = ActiveValue::Set(file_url);
        }
        if let Some(notes) = changes.notes {
            doc_am.notes = ActiveValue::Set(notes);
        }
        doc_am.updated_at = ActiveValue::Set(now);

        let doc = doc_am.update(self.db).await?;

        Ok(Some(doc))
    }

    /// Writes status and version in a single row update so the version bump
    /// cannot land without the status it belongs to.
    pub async fn update_status(
        &self,
        doc_id: i32,
        status: LegalStatus,
        version: String,
        now: NaiveDateTime,
    ) -> Result<Option<entity::legal_doc::Model>, DbErr> {
        let doc = match entity::prelude::LegalDoc::find_by_id(doc_id).one(self.db).await? {
            Some(doc) => doc,
            None => return Ok(None),
        };

        let mut doc_am = doc.into_active_model();
        doc_am.status = ActiveValue::Set(status.as_str().to_string());
        doc_am.version = ActiveValue::Set(version);
        doc_am.updated_at = ActiveValue::Set(now);

        let doc = doc_am.update(self.db).await?;

        Ok(Some(doc))
    }

    pub async fn delete(&self, doc_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::LegalDoc::delete_by_id(doc_id)
            .exec(self.db)
            .await
    }
}
