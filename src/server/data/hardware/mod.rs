pub mod accessory;
pub mod bundle;

use chrono::NaiveDateTime;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, DeleteResult, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder,
};

use crate::model::{hardware::Recommendation, status::WorkflowStatus};

pub struct NewHardwareCandidate {
    pub name: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub price: Option<f64>,
    pub currency: String,
    pub availability: Option<String>,
    pub specs: Option<String>,
    pub constraints: Option<String>,
    pub field_notes: Option<String>,
    pub score: Option<i32>,
    pub recommendation: Option<Recommendation>,
    pub status: WorkflowStatus,
}

#[derive(Default)]
pub struct HardwareCandidateChanges {
    pub name: Option<String>,
    pub brand: Option<Option<String>>,
    pub model: Option<Option<String>>,
    pub price: Option<Option<f64>>,
    pub currency: Option<String>,
    pub availability: Option<Option<String>>,
    pub specs: Option<String>,
    pub constraints: Option<String>,
    pub field_notes: Option<Option<String>>,
    pub score: Option<Option<i32>>,
    pub status: Option<WorkflowStatus>,
}

#[derive(Default)]
pub struct HardwareListFilter {
    pub status: Option<WorkflowStatus>,
    pub recommendation: Option<Recommendation>,
}

pub struct HardwareCandidateRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> HardwareCandidateRepository<'a, C> {
    /// Creates a new instance of [`HardwareCandidateRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        new: NewHardwareCandidate,
        now: NaiveDateTime,
    ) -> Result<entity::hardware_candidate::Model, DbErr> {
        let candidate = entity::hardware_candidate::ActiveModel {
            name: ActiveValue::Set(new.name),
            brand: ActiveValue::Set(new.brand),
            model: ActiveValue::Set(new.model),
            price: ActiveValue::Set(new.price),
            currency: ActiveValue::Set(new.currency),
            availability: ActiveValue::Set(new.availability),
            specs: ActiveValue::Set(new.specs),
            constraints: ActiveValue::Set(new.constraints),
            field_notes: ActiveValue::Set(new.field_notes),
            score: ActiveValue::Set(new.score),
            recommendation: ActiveValue::Set(new.recommendation.map(|r| r.as_str().to_string())),
            status: ActiveValue::Set(new.status.as_str().to_string()),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        candidate.insert(self.db).await
    }

    pub async fn get(
        &self,
        candidate_id: i32,
    ) -> Result<Option<entity::hardware_candidate::Model>, DbErr> {
        entity::prelude::HardwareCandidate::find_by_id(candidate_id)
            .one(self.db)
            .await
    }

    pub async fn list(
        &self,
        filter: HardwareListFilter,
    ) -> Result<Vec<entity::hardware_candidate::Model>, DbErr> {
        let mut query = entity::prelude::HardwareCandidate::find();

        if let Some(status) = filter.status {
            query = query.filter(entity::hardware_candidate::Column::Status.eq(status.as_str()));
        }
        if let Some(recommendation) = filter.recommendation {
            query = query.filter(
                entity::hardware_candidate::Column::Recommendation.eq(recommendation.as_str()),
            );
        }

        query
            .order_by_desc(entity::hardware_candidate::Column::CreatedAt)
            .all(self.db)
            .await
    }

    pub async fn update(
        &self,
        candidate_id: i32,
        changes: HardwareCandidateChanges,
        now: NaiveDateTime,
    ) -> Result<Option<entity::hardware_candidate::Model>, DbErr> {
        let candidate = match entity::prelude::HardwareCandidate::find_by_id(candidate_id)
            .one(self.db)
            .await?
        {
            Some(candidate) => candidate,
            None => return Ok(None),
        };

        let mut candidate_am = candidate.into_active_model();
        if let Some(name) = changes.name {
            candidate_am.name = ActiveValue::Set(name);
        }
        if let Some(brand) = changes.brand {
            candidate_am.brand = ActiveValue::Set(brand);
        }
        if let Some(model) = changes.model {
            candidate_am.model = ActiveValue::Set(model);
        }
        if let Some(price) = changes.price {
            candidate_am.price = ActiveValue::Set(price);
        }
        if let Some(currency) = changes.currency {
            candidate_am.currency = ActiveValue::Set(currency);
        }
        if let Some(availability) = changes.availability {
            candidate_am.availability = ActiveValue::Set(availability);
        }
        if let Some(specs) = changes.specs {
            candidate_am.specs = ActiveValue::Set(Some(specs));
        }
        if let Some(constraints) = changes.constraints {
            candidate_am.constraints = ActiveValue::Set(Some(constraints));
        }
        if let Some(field_notes) = changes.field_notes {
            candidate_am.field_notes = ActiveValue::Set(field_notes);
        }
        if let Some(score) = changes.score {
            candidate_am.score = ActiveValue::Set(score);
        }
        if let Some(status) = changes.status {
            candidate_am.status = ActiveValue::Set(status.as_str().to_string());
        }
        candidate_am.updated_at = ActiveValue::Set(now);

        let candidate = candidate_am.update(self.db).await?;

        Ok(Some(candidate))
    }

    /// Writes the recommendation slot for one candidate.
    pub async fn set_recommendation(
        &self,
        candidate_id: i32,
        recommendation: Option<Recommendation>,
        now: NaiveDateTime,
    ) -> Result<Option<entity::hardware_candidate::Model>, DbErr> {
        let candidate = match entity::prelude::HardwareCandidate::find_by_id(candidate_id)
            .one(self.db)
            .await?
        {
            Some(candidate) => candidate,
            None => return Ok(None),
        };

        let mut candidate_am = candidate.into_active_model();
        candidate_am.recommendation =
            ActiveValue::Set(recommendation.map(|r| r.as_str().to_string()));
        candidate_am.updated_at = ActiveValue::Set(now);

        let candidate = candidate_am.update(self.db).await?;

        Ok(Some(candidate))
    }

    /// Clears PRIMARY from every candidate currently holding it.
    pub async fn clear_primary(&self, now: NaiveDateTime) -> Result<u64, DbErr> {
        let result = entity::prelude::HardwareCandidate::update_many()
            .col_expr(
                entity::hardware_candidate::Column::Recommendation,
                sea_orm::sea_query::Expr::value(sea_orm::Value::String(None)),
            )
            .col_expr(
                entity::hardware_candidate::Column::UpdatedAt,
                sea_orm::sea_query::Expr::value(now),
            )
            .filter(
                entity::hardware_candidate::Column::Recommendation
                    .eq(Recommendation::Primary.as_str()),
            )
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    pub async fn find_primary(
        &self,
    ) -> Result<Option<entity::hardware_candidate::Model>, DbErr> {
        entity::prelude::HardwareCandidate::find()
            .filter(
                entity::hardware_candidate::Column::Recommendation
                    .eq(Recommendation::Primary.as_str()),
            )
            .one(self.db)
            .await
    }

    pub async fn delete(&self, candidate_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::HardwareCandidate::delete_by_id(candidate_id)
            .exec(self.db)
            .await
    }
}

#[cfg(test)]
mod tests {

    mod recommendation {
        use launchpad_test_utils::prelude::*;

        use crate::{
            model::{hardware::Recommendation, status::WorkflowStatus},
            server::data::hardware::{HardwareCandidateRepository, NewHardwareCandidate},
            server::util::time,
        };

        fn new_candidate(name: &str) -> NewHardwareCandidate {
            NewHardwareCandidate {
                name: name.to_string(),
                brand: None,
                model: None,
                price: None,
                currency: "USD".to_string(),
                availability: None,
                specs: None,
                constraints: None,
                field_notes: None,
                score: None,
                recommendation: None,
                status: WorkflowStatus::Todo,
            }
        }

        /// Expect clear_primary to strip the slot from every holder
        #[tokio::test]
        async fn clear_primary_strips_all_holders() -> Result<(), TestError> {
            let test = test_setup_with_tables!(entity::prelude::HardwareCandidate)?;

            let repo = HardwareCandidateRepository::new(&test.state.db);
            let candidate = repo.create(new_candidate("Terminal A"), time::now()).await?;
            repo.create(new_candidate("Terminal B"), time::now()).await?;

            repo.set_recommendation(candidate.id, Some(Recommendation::Primary), time::now())
                .await?;
            assert!(repo.find_primary().await?.is_some());

            let cleared = repo.clear_primary(time::now()).await?;

            assert_eq!(cleared, 1);
            assert!(repo.find_primary().await?.is_none());

            Ok(())
        }
    }
}
