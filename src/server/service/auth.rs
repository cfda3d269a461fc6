//! Session authentication and password handling.
//!
//! Passwords are hashed with argon2id in PHC string format. The session
//! stores only the user id; role and profile data are re-read from the
//! database on every request so admin role changes apply immediately.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use sea_orm::DatabaseConnection;
use tower_sessions::Session;

use crate::{
    model::user::{LoginDto, Role, UserDto},
    server::{
        data::user::UserRepository,
        error::{auth::AuthError, Error},
        model::{context::RequestContext, session::user::SessionUserId},
        service::user::to_user_dto,
    },
};

/// Hashes a password with argon2id, returning the PHC-formatted string
/// containing salt and parameters.
pub fn hash_password(password: &str) -> Result<String, Error> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| Error::InternalError(format!("Failed to hash password: {e}")))
}

/// Verifies a password against a stored PHC hash.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, Error> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| Error::InternalError(format!("Invalid password hash format: {e}")))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

pub struct AuthService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AuthService<'a> {
    /// Creates a new instance of [`AuthService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Verifies the credentials and stores the user id in the session.
    ///
    /// An unknown email and a wrong password fail the same way so the
    /// response does not reveal which accounts exist.
    pub async fn login(&self, session: &Session, dto: LoginDto) -> Result<UserDto, Error> {
        let repo = UserRepository::new(self.db);

        let Some(user) = repo.get_by_email(&dto.email).await? else {
            return Err(AuthError::InvalidCredentials.into());
        };

        if !verify_password(&dto.password, &user.password_hash)? {
            return Err(AuthError::InvalidCredentials.into());
        }

        SessionUserId::insert(session, user.id).await?;

        to_user_dto(user)
    }

    pub async fn logout(&self, session: &Session) -> Result<(), Error> {
        let maybe_user_id = SessionUserId::get(session).await?;

        // Clearing a session that was never created returns an error from
        // the store, so only clear when a user is actually logged in
        if maybe_user_id.is_some() {
            session.clear().await;
        }

        Ok(())
    }

    /// The logged-in user's profile.
    pub async fn current_user(&self, session: &Session) -> Result<UserDto, Error> {
        let ctx = self.resolve_context(session).await?;

        let repo = UserRepository::new(self.db);
        let user = repo
            .get(ctx.user_id)
            .await?
            .ok_or(AuthError::UserNotInDatabase(ctx.user_id))?;

        to_user_dto(user)
    }

    /// Resolves the request context from the session, re-reading the role
    /// from the database. A session pointing at a deleted user is cleared.
    pub async fn resolve_context(&self, session: &Session) -> Result<RequestContext, Error> {
        let Some(user_id) = SessionUserId::get(session).await? else {
            return Err(AuthError::Unauthenticated.into());
        };

        let repo = UserRepository::new(self.db);
        let Some(user) = repo.get(user_id).await? else {
            session.clear().await;

            tracing::debug!(
                "Session cleared for user ID {} with active session but no database row",
                user_id
            );

            return Err(AuthError::UserNotInDatabase(user_id).into());
        };

        let role = Role::parse(&user.role)
            .ok_or_else(|| Error::ParseError(format!("user role '{}'", user.role)))?;

        Ok(RequestContext::new(user.id, role))
    }
}

#[cfg(test)]
mod tests {

    mod password {
        use crate::server::service::auth::{hash_password, verify_password};

        /// Expect a hashed password to verify and a wrong one to fail
        #[test]
        fn hash_and_verify_round_trip() {
            let hash = hash_password("launch-day-2025").unwrap();

            assert!(hash.starts_with("$argon2"));
            assert!(verify_password("launch-day-2025", &hash).unwrap());
            assert!(!verify_password("wrong-password", &hash).unwrap());
        }

        /// Expect two hashes of the same password to differ by salt
        #[test]
        fn salts_differ() {
            let first = hash_password("same-password").unwrap();
            let second = hash_password("same-password").unwrap();

            assert_ne!(first, second);
        }
    }

    mod login {
        use launchpad_test_utils::prelude::*;

        use crate::{
            model::user::{LoginDto, Role},
            server::{
                data::user::UserRepository,
                error::Error,
                model::session::user::SessionUserId,
                service::auth::{hash_password, AuthService},
                util::time,
            },
        };

        /// Expect a valid login to store the user id in the session
        #[tokio::test]
        async fn stores_user_id_in_session() -> Result<(), TestError> {
            let test = test_setup_with_tables!(entity::prelude::LaunchpadUser)?;

            let repo = UserRepository::new(&test.state.db);
            let user = repo
                .create(
                    "pm@example.com".to_string(),
                    "Sam Reyes".to_string(),
                    hash_password("launch-day-2025").unwrap(),
                    Role::Pm,
                    time::now(),
                )
                .await?;

            let service = AuthService::new(&test.state.db);
            let logged_in = service
                .login(
                    &test.session,
                    LoginDto {
                        email: "pm@example.com".to_string(),
                        password: "launch-day-2025".to_string(),
                    },
                )
                .await
                .unwrap();

            assert_eq!(logged_in.id, user.id);
            assert_eq!(SessionUserId::get(&test.session).await?, Some(user.id));

            Ok(())
        }

        /// Expect a wrong password to fail without touching the session
        #[tokio::test]
        async fn rejects_wrong_password() -> Result<(), TestError> {
            let test = test_setup_with_tables!(entity::prelude::LaunchpadUser)?;

            let repo = UserRepository::new(&test.state.db);
            repo.create(
                "pm@example.com".to_string(),
                "Sam Reyes".to_string(),
                hash_password("launch-day-2025").unwrap(),
                Role::Pm,
                time::now(),
            )
            .await?;

            let service = AuthService::new(&test.state.db);
            let result = service
                .login(
                    &test.session,
                    LoginDto {
                        email: "pm@example.com".to_string(),
                        password: "wrong".to_string(),
                    },
                )
                .await;

            assert!(matches!(result, Err(Error::AuthError(_))));
            assert_eq!(SessionUserId::get(&test.session).await?, None);

            Ok(())
        }

        /// Expect resolve_context to fail for an empty session
        #[tokio::test]
        async fn resolve_context_requires_session() -> Result<(), TestError> {
            let test = test_setup_with_tables!(entity::prelude::LaunchpadUser)?;

            let service = AuthService::new(&test.state.db);
            let result = service.resolve_context(&test.session).await;

            assert!(matches!(result, Err(Error::AuthError(_))));

            Ok(())
        }
    }
}
