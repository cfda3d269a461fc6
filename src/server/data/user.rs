use chrono::NaiveDateTime;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, DeleteResult, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder,
};

use crate::model::user::Role;

pub struct UserRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> UserRepository<'a, C> {
    /// Creates a new instance of [`UserRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Creates a new user with a pre-hashed password
    pub async fn create(
        &self,
        email: String,
        name: String,
        password_hash: String,
        role: Role,
        now: NaiveDateTime,
    ) -> Result<entity::launchpad_user::Model, DbErr> {
        let user = entity::launchpad_user::ActiveModel {
            email: ActiveValue::Set(email),
            name: ActiveValue::Set(name),
            password_hash: ActiveValue::Set(password_hash),
            role: ActiveValue::Set(role.as_str().to_string()),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        user.insert(self.db).await
    }

    pub async fn get(&self, user_id: i32) -> Result<Option<entity::launchpad_user::Model>, DbErr> {
        entity::prelude::LaunchpadUser::find_by_id(user_id)
            .one(self.db)
            .await
    }

    pub async fn get_by_email(
        &self,
        email: &str,
    ) -> Result<Option<entity::launchpad_user::Model>, DbErr> {
        entity::prelude::LaunchpadUser::find()
            .filter(entity::launchpad_user::Column::Email.eq(email))
            .one(self.db)
            .await
    }

    pub async fn list(
        &self,
        role: Option<Role>,
    ) -> Result<Vec<entity::launchpad_user::Model>, DbErr> {
        let mut query =
            entity::prelude::LaunchpadUser::find().order_by_asc(entity::launchpad_user::Column::Name);

        if let Some(role) = role {
            query = query.filter(entity::launchpad_user::Column::Role.eq(role.as_str()));
        }

        query.all(self.db).await
    }

    /// Updates name and/or role; absent fields are untouched.
    pub async fn update(
        &self,
        user_id: i32,
        name: Option<String>,
        role: Option<Role>,
        now: NaiveDateTime,
    ) -> Result<Option<entity::launchpad_user::Model>, DbErr> {
        let user = match entity::prelude::LaunchpadUser::find_by_id(user_id)
            .one(self.db)
            .await?
        {
            Some(user) => user,
            None => return Ok(None),
        };

        let mut user_am = user.into_active_model();
        if let Some(name) = name {
            user_am.name = ActiveValue::Set(name);
        }
        if let Some(role) = role {
            user_am.role = ActiveValue::Set(role.as_str().to_string());
        }
        user_am.updated_at = ActiveValue::Set(now);

        let user = user_am.update(self.db).await?;

        Ok(Some(user))
    }

    pub async fn update_password(
        &self,
        user_id: i32,
        password_hash: String,
        now: NaiveDateTime,
    ) -> Result<Option<entity::launchpad_user::Model>, DbErr> {
        let user = match entity::prelude::LaunchpadUser::find_by_id(user_id)
            .one(self.db)
            .await?
        {
            Some(user) => user,
            None => return Ok(None),
        };

        let mut user_am = user.into_active_model();
        user_am.password_hash = ActiveValue::Set(password_hash);
        user_am.updated_at = ActiveValue::Set(now);

        let user = user_am.update(self.db).await?;

        Ok(Some(user))
    }

    /// Deletes a user
    ///
    /// Returns OK regardless of user existing, to confirm the deletion result
    /// check the [`DeleteResult::rows_affected`] field.
    pub async fn delete(&self, user_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::LaunchpadUser::delete_by_id(user_id)
            .exec(self.db)
            .await
    }
}

#[cfg(test)]
mod tests {

    mod create {
        use launchpad_test_utils::prelude::*;

        use crate::{model::user::Role, server::data::user::UserRepository, server::util::time};

        /// Expect success when creating a new user
        #[tokio::test]
        async fn creates_user() -> Result<(), TestError> {
            let test = test_setup_with_tables!(entity::prelude::LaunchpadUser)?;

            let user_repository = UserRepository::new(&test.state.db);
            let result = user_repository
                .create(
                    "pm@example.com".to_string(),
                    "Sam Reyes".to_string(),
                    "hash".to_string(),
                    Role::Pm,
                    time::now(),
                )
                .await;

            assert!(result.is_ok());
            let user = result.unwrap();
            assert_eq!(user.role, "PM");

            Ok(())
        }

        /// Expect Error when creating a user with a duplicate email
        #[tokio::test]
        async fn fails_for_duplicate_email() -> Result<(), TestError> {
            let mut test = test_setup_with_tables!(entity::prelude::LaunchpadUser)?;
            test.users().insert_user("pm@example.com", Role::Pm).await?;

            let user_repository = UserRepository::new(&test.state.db);
            let result = user_repository
                .create(
                    "pm@example.com".to_string(),
                    "Other".to_string(),
                    "hash".to_string(),
                    Role::Ops,
                    time::now(),
                )
                .await;

            assert!(result.is_err());

            Ok(())
        }
    }

    mod get {
        use launchpad_test_utils::prelude::*;

        use crate::{model::user::Role, server::data::user::UserRepository};

        /// Expect Ok(Some(_)) when existing user is found
        #[tokio::test]
        async fn finds_existing_user() -> Result<(), TestError> {
            let mut test = test_setup_with_tables!(entity::prelude::LaunchpadUser)?;
            let user = test.users().insert_user("pm@example.com", Role::Pm).await?;

            let user_repo = UserRepository::new(&test.state.db);
            let result = user_repo.get(user.id).await;

            assert!(matches!(result, Ok(Some(_))));

            Ok(())
        }

        /// Expect Ok(None) when user is not found
        #[tokio::test]
        async fn returns_none_for_nonexistent_user() -> Result<(), TestError> {
            let test = test_setup_with_tables!(entity::prelude::LaunchpadUser)?;

            let user_repo = UserRepository::new(&test.state.db);
            let result = user_repo.get(1).await;

            assert!(matches!(result, Ok(None)));

            Ok(())
        }

        /// Expect lookup by email to match exactly
        #[tokio::test]
        async fn finds_user_by_email() -> Result<(), TestError> {
            let mut test = test_setup_with_tables!(entity::prelude::LaunchpadUser)?;
            test.users().insert_user("ops@example.com", Role::Ops).await?;

            let user_repo = UserRepository::new(&test.state.db);
            let found = user_repo.get_by_email("ops@example.com").await?;
            let missing = user_repo.get_by_email("other@example.com").await?;

            assert!(found.is_some());
            assert!(missing.is_none());

            Ok(())
        }
    }

    mod update {
        use launchpad_test_utils::prelude::*;

        use crate::{model::user::Role, server::data::user::UserRepository, server::util::time};

        /// Expect only provided fields to change
        #[tokio::test]
        async fn updates_role_only() -> Result<(), TestError> {
            let mut test = test_setup_with_tables!(entity::prelude::LaunchpadUser)?;
            let user = test.users().insert_user("pm@example.com", Role::Pm).await?;

            let user_repo = UserRepository::new(&test.state.db);
            let updated = user_repo
                .update(user.id, None, Some(Role::Admin), time::now())
                .await?
                .unwrap();

            assert_eq!(updated.role, "ADMIN");
            assert_eq!(updated.name, user.name);

            Ok(())
        }

        /// Expect Ok(None) when updating a user that does not exist
        #[tokio::test]
        async fn returns_none_for_nonexistent_user() -> Result<(), TestError> {
            let test = test_setup_with_tables!(entity::prelude::LaunchpadUser)?;

            let user_repo = UserRepository::new(&test.state.db);
            let result = user_repo
                .update(42, Some("New Name".to_string()), None, time::now())
                .await?;

            assert!(result.is_none());

            Ok(())
        }
    }

    mod delete {
        use launchpad_test_utils::prelude::*;
        use sea_orm::EntityTrait;

        use crate::{model::user::Role, server::data::user::UserRepository};

        /// Expect success when deleting user
        #[tokio::test]
        async fn deletes_existing_user() -> Result<(), TestError> {
            let mut test = test_setup_with_tables!(entity::prelude::LaunchpadUser)?;
            let user = test.users().insert_user("pm@example.com", Role::Pm).await?;

            let user_repository = UserRepository::new(&test.state.db);
            let result = user_repository.delete(user.id).await?;

            assert_eq!(result.rows_affected, 1);
            let user_exists = entity::prelude::LaunchpadUser::find_by_id(user.id)
                .one(&test.state.db)
                .await?;
            assert!(user_exists.is_none());

            Ok(())
        }

        /// Expect no rows to be affected when deleting user that does not exist
        #[tokio::test]
        async fn returns_no_rows_for_nonexistent_user() -> Result<(), TestError> {
            let test = test_setup_with_tables!(entity::prelude::LaunchpadUser)?;

            let user_repository = UserRepository::new(&test.state.db);
            let result = user_repository.delete(1).await?;

            assert_eq!(result.rows_affected, 0);

            Ok(())
        }
    }
}
