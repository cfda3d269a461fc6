use chrono::NaiveDateTime;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, DeleteResult, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder,
};

use crate::model::status::WorkflowStatus;

pub struct NewRisk {
    pub title: String,
    pub description: Option<String>,
    pub probability: i32,
    pub impact: i32,
    pub mitigation: Option<String>,
    pub status: WorkflowStatus,
    pub owner_id: Option<i32>,
    pub workstream_id: Option<i32>,
    pub project_id: i32,
}

#[derive(Default)]
pub struct RiskChanges {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub probability: Option<i32>,
    pub impact: Option<i32>,
    pub mitigation: Option<Option<String>>,
    pub status: Option<WorkflowStatus>,
    pub owner_id: Option<Option<i32>>,
    pub workstream_id: Option<Option<i32>>,
}

#[derive(Default)]
pub struct RiskListFilter {
    pub project_id: Option<i32>,
    pub workstream_id: Option<i32>,
    pub status: Option<WorkflowStatus>,
}

pub struct RiskRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> RiskRepository<'a, C> {
    /// Creates a new instance of [`RiskRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        new: NewRisk,
        now: NaiveDateTime,
    ) -> Result<entity::risk::Model, DbErr> {
        let risk = entity::risk::ActiveModel {
            title: ActiveValue::Set(new.title),
            description: ActiveValue::Set(new.description),
            probability: ActiveValue::Set(new.probability),
            impact: ActiveValue::Set(new.impact),
            mitigation: ActiveValue::Set(new.mitigation),
            status: ActiveValue::Set(new.status.as_str().to_string()),
            owner_id: ActiveValue::Set(new.owner_id),
            workstream_id: ActiveValue::Set(new.workstream_id),
            project_id: ActiveValue::Set(new.project_id),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        risk.insert(self.db).await
    }

    pub async fn get(&self, risk_id: i32) -> Result<Option<entity::risk::Model>, DbErr> {
        entity::prelude::Risk::find_by_id(risk_id).one(self.db).await
    }

    /// Risks sorted by impact, then probability, both descending.
    pub async fn list(&self, filter: RiskListFilter) -> Result<Vec<entity::risk::Model>, DbErr> {
        let mut query = entity::prelude::Risk::find();

        if let Some(project_id) = filter.project_id {
            query = query.filter(entity::risk::Column::ProjectId.eq(project_id));
        }
        if let Some(workstream_id) = filter.workstream_id {
            query = query.filter(entity::risk::Column::WorkstreamId.eq(workstream_id));
        }
        if let Some(status) = filter.status {
            query = query.filter(entity::risk::Column::Status.eq(status.as_str()));
        }

        query
            .order_by_desc(entity::risk::Column::Impact)
            .order_by_desc(entity::risk::Column::Probability)
            .all(self.db)
            .await
    }

    pub async fn update(
        &self,
        risk_id: i32,
        changes: RiskChanges,
        now: NaiveDateTime,
    ) -> Result<Option<entity::risk::Model>, DbErr> {
        let risk = match entity::prelude::Risk::find_by_id(risk_id).one(self.db).await? {
            Some(risk) => risk,
            None => return Ok(None),
        };

        let mut risk_am = risk.into_active_model();
        if let Some(title) = changes.title {
            risk_am.title = ActiveValue::Set(title);
        }
        if let Some(description) = changes.description {
            risk_am.description = ActiveValue::Set(description);
        }
        if let Some(probability) = changes.probability {
            risk_am.probability = ActiveValue::Set(probability);
        }
        if let Some(impact) = changes.impact {
            risk_am.impact = ActiveValue::Set(impact);
        }
        if let Some(mitigation) = changes.mitigation {
            risk_am.mitigation = ActiveValue::Set(mitigation);
        }
        if let Some(status) = changes.status {
            risk_am.status = ActiveValue::Set(status.as_str().to_string());
        }
        if let Some(owner_id) = changes.owner_id {
            risk_am.owner_id = ActiveValue::Set(owner_id);
        }
        if let Some(workstream_id) = changes.workstream_id {
            risk_am.workstream_id = ActiveValue::Set(workstream_id);
        }
        risk_am.updated_at = ActiveValue::Set(now);

        let risk = risk_am.update(self.db).await?;

        Ok(Some(risk))
    }

    pub async fn delete(&self, risk_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::Risk::delete_by_id(risk_id)
            .exec(self.db)
            .await
    }
}

#[cfg(test)]
mod tests {

    mod list {
        use launchpad_test_utils::prelude::*;

        use crate::server::data::risk::{RiskListFilter, RiskRepository};

        /// Expect default ordering by impact desc then probability desc
        #[tokio::test]
        async fn orders_by_impact_then_probability() -> Result<(), TestError> {
            let mut test = test_setup_with_core_tables!()?;
            let project = test.projects().insert_project("Market Launch").await?;
            test.projects()
                .insert_risk(project.id, None, "Low impact", 5, 2)
                .await?;
            test.projects()
                .insert_risk(project.id, None, "Critical", 4, 5)
                .await?;
            test.projects()
                .insert_risk(project.id, None, "High impact low prob", 1, 5)
                .await?;

            let repo = RiskRepository::new(&test.state.db);
            let listed = repo.list(RiskListFilter::default()).await?;

            let titles: Vec<&str> = listed.iter().map(|r| r.title.as_str()).collect();
            assert_eq!(titles, vec!["Critical", "High impact low prob", "Low impact"]);

            Ok(())
        }
    }
}
