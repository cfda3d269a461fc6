use chrono::NaiveDateTime;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, DeleteResult, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder,
};

pub struct NewRunbook {
    pub title: String,
    pub kind: String,
    pub content: String,
    pub checklist: Option<String>,
    pub version: String,
    pub is_active: bool,
}

#[derive(Default)]
pub struct RunbookChanges {
    pub title: Option<String>,
    pub kind: Option<String>,
    pub content: Option<String>,
    pub checklist: Option<Option<String>>,
    pub version: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Default)]
pub struct RunbookListFilter {
    pub active: Option<bool>,
    pub kind: Option<String>,
}

pub struct RunbookRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> RunbookRepository<'a, C> {
    /// Creates a new instance of [`RunbookRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        new: NewRunbook,
        now: NaiveDateTime,
    ) -> Result<entity::runbook::Model, DbErr> {
        let runbook = entity::runbook::ActiveModel {
            title: ActiveValue::Set(new.title),
            kind: ActiveValue::Set(new.kind),
            content: ActiveValue::Set(new.content),
            checklist: ActiveValue::Set(new.checklist),
            version: ActiveValue::Set(new.version),
            is_active: ActiveValue::Set(new.is_active),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        runbook.insert(self.db).await
    }

    pub async fn get(&self, runbook_id: i32) -> Result<Option<entity::runbook::Model>, DbErr> {
        entity::prelude::Runbook::find_by_id(runbook_id)
            .one(self.db)
            .await
    }

    pub async fn list(
        &self,
        filter: RunbookListFilter,
    ) -> Result<Vec<entity::runbook::Model>, DbErr> {
        let mut query =
            entity::prelude::Runbook::find().order_by_desc(entity::runbook::Column::CreatedAt);

        if let Some(active) = filter.active {
            query = query.filter(entity::runbook::Column::IsActive.eq(active));
        }
        if let Some(kind) = filter.kind {
            query = query.filter(entity::runbook::Column::Kind.eq(kind));
        }

        query.all(self.db).await
    }

    pub async fn update(
        &self,
        runbook_id: i32,
        changes: RunbookChanges,
        now: NaiveDateTime,
    ) -> Result<Option<entity::runbook::Model>, DbErr> {
        let runbook = match entity::prelude::Runbook::find_by_id(runbook_id)
            .one(self.db)
            .await?
        {
            Some(runbook) => runbook,
            None => return Ok(None),
        };

        let mut runbook_am = runbook.into_active_model();
        if let Some(title) = changes.title {
            runbook_am.title = ActiveValue::Set(title);
        }
        if let Some(kind) = changes.kind {
            runbook_am.kind = ActiveValue::Set(kind);
        }
        if let Some(content) = changes.content {
            runbook_am.content = ActiveValue::Set(content);
        }
        if let Some(checklist) = changes.checklist {
            runbook_am.checklist = ActiveValue::Set(checklist);
        }
        if let Some(version) = changes.version {
            runbook_am.version = ActiveValue::Set(version);
        }
        if let Some(is_active) = changes.is_active {
            runbook_am.is_active = ActiveValue::Set(is_active);
        }
        runbook_am.updated_at = ActiveValue::Set(now);

        let runbook = runbook_am.update(self.db).await?;

        Ok(Some(runbook))
    }

    pub async fn set_active(
        &self,
        runbook_id: i32,
        is_active: bool,
        now: NaiveDateTime,
    ) -> Result<Option<entity::runbook::Model>, DbErr> {
        let runbook = match entity::prelude::Runbook::find_by_id(runbook_id)
            .one(self.db)
            .await?
        {
            Some(runbook) => runbook,
            None => return Ok(None),
        };

        let mut runbook_am = runbook.into_active_model();
        runbook_am.is_active = ActiveValue::Set(is_active);
        runbook_am.updated_at = ActiveValue::Set(now);

        let runbook = runbook_am.update(self.db).await?;

        Ok(Some(runbook))
    }

    pub async fn delete(&self, runbook_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::Runbook::delete_by_id(runbook_id)
            .exec(self.db)
            .await
    }
}
