use chrono::NaiveDateTime;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, DeleteResult, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder,
};

pub struct NewMilestone {
    pub title: String,
    pub description: Option<String>,
    pub target_date: NaiveDateTime,
    pub owner_id: Option<i32>,
    pub workstream_id: Option<i32>,
    pub project_id: i32,
    pub milestone_order: i32,
}

#[derive(Default)]
pub struct MilestoneChanges {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub target_date: Option<NaiveDateTime>,
    pub owner_id: Option<Option<i32>>,
    pub workstream_id: Option<Option<i32>>,
    pub milestone_order: Option<i32>,
}

#[derive(Default)]
pub struct MilestoneListFilter {
    pub project_id: Option<i32>,
    pub workstream_id: Option<i32>,
    pub completed: Option<bool>,
}

pub struct MilestoneRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> MilestoneRepository<'a, C> {
    /// Creates a new instance of [`MilestoneRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        new: NewMilestone,
        now: NaiveDateTime,
    ) -> Result<entity::milestone::Model, DbErr> {
        let milestone = entity::milestone::ActiveModel {
            title: ActiveValue::Set(new.title),
            description: ActiveValue::Set(new.description),
            target_date: ActiveValue::Set(new.target_date),
            owner_id: ActiveValue::Set(new.owner_id),
            workstream_id: ActiveValue::Set(new.workstream_id),
            project_id: ActiveValue::Set(new.project_id),
            milestone_order: ActiveValue::Set(new.milestone_order),
            completed_at: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        milestone.insert(self.db).await
    }

    pub async fn get(&self, milestone_id: i32) -> Result<Option<entity::milestone::Model>, DbErr> {
        entity::prelude::Milestone::find_by_id(milestone_id)
            .one(self.db)
            .await
    }

    pub async fn count_by_project(&self, project_id: i32) -> Result<u64, DbErr> {
        entity::prelude::Milestone::find()
            .filter(entity::milestone::Column::ProjectId.eq(project_id))
            .count(self.db)
            .await
    }

    /// Milestones sorted by target date, then explicit order.
    pub async fn list(
        &self,
        filter: MilestoneListFilter,
    ) -> Result<Vec<entity::milestone::Model>, DbErr> {
        let mut query = entity::prelude::Milestone::find();

        if let Some(project_id) = filter.project_id {
            query = query.filter(entity::milestone::Column::ProjectId.eq(project_id));
        }
        if let Some(workstream_id) = filter.workstream_id {
            query = query.filter(entity::milestone::Column::WorkstreamId.eq(workstream_id));
        }
        if let Some(completed) = filter.completed {
            query = if completed {
                query.filter(entity::milestone::Column::CompletedAt.is_not_null())
            } else {
                query.filter(entity::milestone::Column::CompletedAt.is_null())
            };
        }

        query
            .order_by_asc(entity::milestone::Column::TargetDate)
            .order_by_asc(entity::milestone::Column::MilestoneOrder)
            .all(self.db)
            .await
    }

    pub async fn update(
        &self,
        milestone_id: i32,
        changes: MilestoneChanges,
        now: NaiveDateTime,
    ) -> Result<Option<entity::milestone::Model>, DbErr> {
        let milestone = match entity::prelude::Milestone::find_by_id(milestone_id)
            .one(self.db)
            .await?
        {
            Some(milestone) => milestone,
            None => return Ok(None),
        };

        let mut milestone_am = milestone.into_active_model();
        if let Some(title) = changes.title {
            milestone_am.title = ActiveValue::Set(title);
        }
        if let Some(description) = changes.description {
            milestone_am.description = ActiveValue::Set(description);
        }
        if let Some(target_date) = changes.target_date {
            milestone_am.target_date = ActiveValue::Set(target_date);
        }
        if let Some(owner_id) = changes.owner_id {
            milestone_am.owner_id = ActiveValue::Set(owner_id);
        }
        if let Some(workstream_id) = changes.workstream_id {
            milestone_am.workstream_id = ActiveValue::Set(workstream_id);
        }
        if let Some(milestone_order) = changes.milestone_order {
            milestone_am.milestone_order = ActiveValue::Set(milestone_order);
        }
        milestone_am.updated_at = ActiveValue::Set(now);

        let milestone = milestone_am.update(self.db).await?;

        Ok(Some(milestone))
    }

    pub async fn set_completed_at(
        &self,
        milestone_id: i32,
        completed_at: Option<NaiveDateTime>,
        now: NaiveDateTime,
    ) -> Result<Option<entity::milestone::Model>, DbErr> {
        let milestone = match entity::prelude::Milestone::find_by_id(milestone_id)
            .one(self.db)
            .await?
        {
            Some(milestone) => milestone,
            None => return Ok(None),
        };

        let mut milestone_am = milestone.into_active_model();
        milestone_am.completed_at = ActiveValue::Set(completed_at);
        milestone_am.updated_at = ActiveValue::Set(now);

        let milestone = milestone_am.update(self.db).await?;

        Ok(Some(milestone))
    }

    pub async fn delete(&self, milestone_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::Milestone::delete_by_id(milestone_id)
            .exec(self.db)
            .await
    }

    pub async fn add_checklist_item(
        &self,
        milestone_id: i32,
        title: String,
        item_order: i32,
        now: NaiveDateTime,
    ) -> Result<entity::milestone_checklist_item::Model, DbErr> {
        let item = entity::milestone_checklist_item::ActiveModel {
            milestone_id: ActiveValue::Set(milestone_id),
            title: ActiveValue::Set(title),
            done: ActiveValue::Set(false),
            item_order: ActiveValue::Set(item_order),
            created_at: ActiveValue::Set(now),
            ..Default::default()
        };

        item.insert(self.db).await
    }

    pub async fn count_checklist_items(&self, milestone_id: i32) -> Result<u64, DbErr> {
        entity::prelude::MilestoneChecklistItem::find()
            .filter(entity::milestone_checklist_item::Column::MilestoneId.eq(milestone_id))
            .count(self.db)
            .await
    }

    /// Checklist items in explicit order.
    pub async fn list_checklist_items(
        &self,
        milestone_id: i32,
    ) -> Result<Vec<entity::milestone_checklist_item::Model>, DbErr> {
        entity::prelude::MilestoneChecklistItem::find()
            .filter(entity::milestone_checklist_item::Column::MilestoneId.eq(milestone_id))
            .order_by_asc(entity::milestone_checklist_item::Column::ItemOrder)
            .all(self.db)
            .await
    }

    pub async fn set_checklist_item_done(
        &self,
        item_id: i32,
        done: bool,
    ) -> Result<Option<entity::milestone_checklist_item::Model>, DbErr> {
        let item = match entity::prelude::MilestoneChecklistItem::find_by_id(item_id)
            .one(self.db)
            .await?
        {
            Some(item) => item,
            None => return Ok(None),
        };

        let mut item_am = item.into_active_model();
        item_am.done = ActiveValue::Set(done);

        let item = item_am.update(self.db).await?;

        Ok(Some(item))
    }

    pub async fn delete_checklist_item(&self, item_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::MilestoneChecklistItem::delete_by_id(item_id)
            .exec(self.db)
            .await
    }

    pub async fn add_dependency(
        &self,
        milestone_id: i32,
        depends_on_id: i32,
        now: NaiveDateTime,
    ) -> Result<entity::milestone_dependency::Model, DbErr> {
        let edge = entity::milestone_dependency::ActiveModel {
            milestone_id: ActiveValue::Set(milestone_id),
            depends_on_id: ActiveValue::Set(depends_on_id),
            created_at: ActiveValue::Set(now),
            ..Default::default()
        };

        edge.insert(self.db).await
    }

    pub async fn delete_dependency(
        &self,
        milestone_id: i32,
        depends_on_id: i32,
    ) -> Result<DeleteResult, DbErr> {
        entity::prelude::MilestoneDependency::delete_many()
            .filter(entity::milestone_dependency::Column::MilestoneId.eq(milestone_id))
            .filter(entity::milestone_dependency::Column::DependsOnId.eq(depends_on_id))
            .exec(self.db)
            .await
    }

    /// All dependency edges in the graph; small enough to walk in memory.
    pub async fn all_dependency_edges(
        &self,
    ) -> Result<Vec<entity::milestone_dependency::Model>, DbErr> {
        entity::prelude::MilestoneDependency::find().all(self.db).await
    }

    /// Edges where this milestone is the dependent side.
    pub async fn dependencies_of(
        &self,
        milestone_id: i32,
    ) -> Result<Vec<entity::milestone_dependency::Model>, DbErr> {
        entity::prelude::MilestoneDependency::find()
            .filter(entity::milestone_dependency::Column::MilestoneId.eq(milestone_id))
            .all(self.db)
            .await
    }

    /// Edges where this milestone is depended upon.
    pub async fn dependents_of(
        &self,
        milestone_id: i32,
    ) -> Result<Vec<entity::milestone_dependency::Model>, DbErr> {
        entity::prelude::MilestoneDependency::find()
            .filter(entity::milestone_dependency::Column::DependsOnId.eq(milestone_id))
            .all(self.db)
            .await
    }
}

#[cfg(test)]
mod tests {

    mod list {
        use launchpad_test_utils::prelude::*;

        use crate::server::data::milestone::{MilestoneListFilter, MilestoneRepository};

        /// Expect completed=false to return only open milestones
        #[tokio::test]
        async fn filters_open_milestones() -> Result<(), TestError> {
            let mut test = test_setup_with_core_tables!()?;
            let project = test.projects().insert_project("Market Launch").await?;
            let open = test
                .projects()
                .insert_milestone(project.id, None, "Pilot venue live")
                .await?;
            let done = test
                .projects()
                .insert_milestone(project.id, None, "Contracts signed")
                .await?;

            let repo = MilestoneRepository::new(&test.state.db);
            repo.set_completed_at(done.id, Some(crate::server::util::time::now()),
                crate::server::util::time::now())
                .await?;

            let listed = repo
                .list(MilestoneListFilter {
                    project_id: Some(project.id),
                    completed: Some(false),
                    ..Default::default()
                })
                .await?;

            assert_eq!(listed.len(), 1);
            assert_eq!(listed[0].id, open.id);

            Ok(())
        }
    }

    mod dependencies {
        use launchpad_test_utils::prelude::*;

        use crate::{server::data::milestone::MilestoneRepository, server::util::time};

        /// Expect dependency edges to be visible from both sides
        #[tokio::test]
        async fn records_edges_both_directions() -> Result<(), TestError> {
            let mut test = test_setup_with_core_tables!()?;
            let project = test.projects().insert_project("Market Launch").await?;
            let first = test
                .projects()
                .insert_milestone(project.id, None, "Hardware selected")
                .await?;
            let second = test
                .projects()
                .insert_milestone(project.id, None, "Pilot venue live")
                .await?;

            let repo = MilestoneRepository::new(&test.state.db);
            repo.add_dependency(second.id, first.id, time::now()).await?;

            let deps = repo.dependencies_of(second.id).await?;
            assert_eq!(deps.len(), 1);
            assert_eq!(deps[0].depends_on_id, first.id);

            let dependents = repo.dependents_of(first.id).await?;
            assert_eq!(dependents.len(), 1);
            assert_eq!(dependents[0].milestone_id, second.id);

            Ok(())
        }
    }
}
