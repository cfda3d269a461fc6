//! Memoized lookup of relation summaries for response assembly.
//!
//! List endpoints embed id + name summaries of their immediate relations.
//! The resolver caches each row the first time it is fetched so assembling a
//! list of entities touches every referenced project, workstream, and user
//! once.

use std::collections::HashMap;

use sea_orm::{ConnectionTrait, EntityTrait};

use crate::{
    model::{
        project::ProjectSummaryDto, user::UserSummaryDto, workstream::WorkstreamSummaryDto,
    },
    server::error::Error,
};

pub struct RelationResolver<'a, C: ConnectionTrait> {
    db: &'a C,
    projects: HashMap<i32, ProjectSummaryDto>,
    workstreams: HashMap<i32, WorkstreamSummaryDto>,
    users: HashMap<i32, UserSummaryDto>,
}

impl<'a, C: ConnectionTrait> RelationResolver<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self {
            db,
            projects: HashMap::new(),
            workstreams: HashMap::new(),
            users: HashMap::new(),
        }
    }

    /// Summary of the owning project. The row must exist; entities reference
    /// projects through an enforced foreign key.
    pub async fn project(&mut self, project_id: i32) -> Result<ProjectSummaryDto, Error> {
        if let Some(summary) = self.projects.get(&project_id) {
            return Ok(summary.clone());
        }

        let project = entity::prelude::Project::find_by_id(project_id)
            .one(self.db)
            .await?
            .ok_or_else(|| {
                Error::InternalError(format!(
                    "Project ID {} referenced by foreign key but not found",
                    project_id
                ))
            })?;

        let summary = ProjectSummaryDto {
            id: project.id,
            name: project.name,
        };
        self.projects.insert(project_id, summary.clone());

        Ok(summary)
    }

    pub async fn workstream(
        &mut self,
        workstream_id: Option<i32>,
    ) -> Result<Option<WorkstreamSummaryDto>, Error> {
        let Some(workstream_id) = workstream_id else {
            return Ok(None);
        };

        if let Some(summary) = self.workstreams.get(&workstream_id) {
            return Ok(Some(summary.clone()));
        }

        let Some(workstream) = entity::prelude::Workstream::find_by_id(workstream_id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let summary = WorkstreamSummaryDto {
            id: workstream.id,
            name: workstream.name,
        };
        self.workstreams.insert(workstream_id, summary.clone());

        Ok(Some(summary))
    }

    pub async fn user(&mut self, user_id: Option<i32>) -> Result<Option<UserSummaryDto>, Error> {
        let Some(user_id) = user_id else {
            return Ok(None);
        };

        if let Some(summary) = self.users.get(&user_id) {
            return Ok(Some(summary.clone()));
        }

        let Some(user) = entity::prelude::LaunchpadUser::find_by_id(user_id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let summary = UserSummaryDto {
            id: user.id,
            name: user.name,
            email: user.email,
        };
        self.users.insert(user_id, summary.clone());

        Ok(Some(summary))
    }
}
