use std::sync::Arc;

use sea_orm::{sea_query::TableCreateStatement, ConnectionTrait, Database, DatabaseConnection};
use tower_sessions::{MemoryStore, Session};

use crate::{
    error::TestError,
    fixtures::{project::ProjectFixtures, user::UserFixtures},
};

pub struct TestAppState {
    pub db: DatabaseConnection,
}

pub struct TestSetup {
    pub state: TestAppState,
    pub session: Session,
}

impl TestSetup {
    /// Convert TestAppState into any type that can be constructed from its
    /// database connection. This allows conversion to AppState without
    /// creating a circular dependency on the server crate.
    ///
    /// # Example
    /// ```ignore
    /// let app_state: AppState = test.to_app_state();
    /// ```
    pub fn to_app_state<T>(&self) -> T
    where
        T: From<DatabaseConnection>,
    {
        T::from(self.state.db.clone())
    }

    /// Fixture factory for user rows.
    pub fn users(&mut self) -> UserFixtures<'_> {
        UserFixtures::new(&self.state.db)
    }

    /// Fixture factory for the project graph: projects, workstreams, tasks,
    /// milestones, risks.
    pub fn projects(&mut self) -> ProjectFixtures<'_> {
        ProjectFixtures::new(&self.state.db)
    }
}

impl TestSetup {
    pub async fn new() -> Result<Self, TestError> {
        let store = Arc::new(MemoryStore::default());
        let session = Session::new(None, store, None);

        let db = Database::connect("sqlite::memory:").await?;

        Ok(TestSetup {
            state: TestAppState { db },
            session,
        })
    }

    pub async fn with_tables(&self, stmts: Vec<TableCreateStatement>) -> Result<(), TestError> {
        for stmt in stmts {
            self.state.db.execute(&stmt).await?;
        }

        Ok(())
    }
}

#[macro_export]
macro_rules! test_setup {
    () => {{
        $crate::TestSetup::new().await
    }};
}

#[macro_export]
macro_rules! test_setup_with_tables {
    // Pattern 1: No entities provided
    () => {{
        $crate::TestSetup::new().await
    }};

    // Pattern 2: Entities provided
    ($($entity:expr),+ $(,)?) => {{
        async {
            let setup = $crate::TestSetup::new().await?;

            let schema = sea_orm::Schema::new(sea_orm::DbBackend::Sqlite);
            let stmts = vec![
                $(schema.create_table_from_entity($entity),)+
            ];
            setup.with_tables(stmts).await?;

            Ok::<_, $crate::error::TestError>(setup)
        }.await
    }};
}

/// Sets up the user table plus the full project graph (workstreams, tasks
/// with children, milestones with children and dependency edges, risks).
#[macro_export]
macro_rules! test_setup_with_core_tables {
    // Pattern 1: No extra entities provided
    () => {{
        async {
            let setup = $crate::TestSetup::new().await?;

            let schema = sea_orm::Schema::new(sea_orm::DbBackend::Sqlite);
            let stmts = vec![
                schema.create_table_from_entity(entity::prelude::LaunchpadUser),
                schema.create_table_from_entity(entity::prelude::Project),
                schema.create_table_from_entity(entity::prelude::Workstream),
                schema.create_table_from_entity(entity::prelude::Task),
                schema.create_table_from_entity(entity::prelude::TaskChecklistItem),
                schema.create_table_from_entity(entity::prelude::TaskComment),
                schema.create_table_from_entity(entity::prelude::TaskAttachment),
                schema.create_table_from_entity(entity::prelude::Milestone),
                schema.create_table_from_entity(entity::prelude::MilestoneChecklistItem),
                schema.create_table_from_entity(entity::prelude::MilestoneDependency),
                schema.create_table_from_entity(entity::prelude::Risk),
            ];
            setup.with_tables(stmts).await?;

            Ok::<_, $crate::error::TestError>(setup)
        }.await
    }};

    // Pattern 2: Extra entities provided
    ($($entity:expr),+ $(,)?) => {{
        async {
            let setup = $crate::TestSetup::new().await?;

            let schema = sea_orm::Schema::new(sea_orm::DbBackend::Sqlite);
            let stmts = vec![
                schema.create_table_from_entity(entity::prelude::LaunchpadUser),
                schema.create_table_from_entity(entity::prelude::Project),
                schema.create_table_from_entity(entity::prelude::Workstream),
                schema.create_table_from_entity(entity::prelude::Task),
                schema.create_table_from_entity(entity::prelude::TaskChecklistItem),
                schema.create_table_from_entity(entity::prelude::TaskComment),
                schema.create_table_from_entity(entity::prelude::TaskAttachment),
                schema.create_table_from_entity(entity::prelude::Milestone),
                schema.create_table_from_entity(entity::prelude::MilestoneChecklistItem),
                schema.create_table_from_entity(entity::prelude::MilestoneDependency),
                schema.create_table_from_entity(entity::prelude::Risk),
                $(schema.create_table_from_entity($entity),)+
            ];
            setup.with_tables(stmts).await?;

            Ok::<_, $crate::error::TestError>(setup)
        }.await
    }};
}
