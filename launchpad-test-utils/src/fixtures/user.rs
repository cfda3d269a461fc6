use chrono::Utc;
use sea_orm::{ActiveValue, DatabaseConnection, EntityTrait};

use crate::error::TestError;

/// Placeholder argon2 hash; fixture users never log in through the password
/// path unless a test overrides the hash explicitly.
pub const TEST_PASSWORD_HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$dGVzdHNhbHQ$c2VudGluZWw";

pub struct UserFixtures<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserFixtures<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a user with the given email and role. The display name is
    /// derived from the email's local part.
    pub async fn insert_user(
        &self,
        email: &str,
        role: impl ToString,
    ) -> Result<entity::launchpad_user::Model, TestError> {
        let name = email
            .split('@')
            .next()
            .unwrap_or("user")
            .to_string();

        self.insert_user_named(email, &name, role).await
    }

    pub async fn insert_user_named(
        &self,
        email: &str,
        name: &str,
        role: impl ToString,
    ) -> Result<entity::launchpad_user::Model, TestError> {
        let now = Utc::now().naive_utc();

        Ok(entity::prelude::LaunchpadUser::insert(
            entity::launchpad_user::ActiveModel {
                email: ActiveValue::Set(email.to_string()),
                name: ActiveValue::Set(name.to_string()),
                password_hash: ActiveValue::Set(TEST_PASSWORD_HASH.to_string()),
                role: ActiveValue::Set(role.to_string()),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
                ..Default::default()
            },
        )
        .exec_with_returning(self.db)
        .await?)
    }
}
