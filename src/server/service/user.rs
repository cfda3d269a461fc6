//! User management.
//!
//! Creating, updating, and deleting accounts is ADMIN-only. Profile and
//! password changes are self-service. An admin cannot delete the account
//! their own session is authenticated as.

use sea_orm::DatabaseConnection;

use crate::{
    model::user::{
        ChangePasswordDto, CreateUserDto, Role, UpdateProfileDto, UpdateUserDto, UserDto,
    },
    server::{
        data::user::UserRepository,
        error::{auth::AuthError, validation::ValidationError, Error},
        model::context::RequestContext,
        service::{auth, validate},
        util::time,
    },
};

const MIN_PASSWORD_LENGTH: usize = 6;

pub(crate) fn to_user_dto(user: entity::launchpad_user::Model) -> Result<UserDto, Error> {
    let role = Role::parse(&user.role)
        .ok_or_else(|| Error::ParseError(format!("user role '{}'", user.role)))?;

    Ok(UserDto {
        id: user.id,
        email: user.email,
        name: user.name,
        role,
        created_at: user.created_at,
    })
}

pub struct UserService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserService<'a> {
    /// Creates a new instance of [`UserService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(
        &self,
        ctx: &RequestContext,
        role: Option<String>,
    ) -> Result<Vec<UserDto>, Error> {
        ctx.require_admin()?;

        let role = match role.as_deref() {
            None => None,
            Some(raw) => Some(validate::parse_role("role", raw)?),
        };

        let repo = UserRepository::new(self.db);
        let users = repo.list(role).await?;

        users.into_iter().map(to_user_dto).collect()
    }

    pub async fn create(&self, ctx: &RequestContext, dto: CreateUserDto) -> Result<UserDto, Error> {
        ctx.require_admin()?;

        validate::require_non_empty("email", &dto.email)?;
        validate::require_non_empty("name", &dto.name)?;
        let role = validate::parse_role("role", &dto.role)?;
        if dto.password.len() < MIN_PASSWORD_LENGTH {
            return Err(ValidationError::Malformed {
                field: "password",
                reason: format!("must be at least {} characters", MIN_PASSWORD_LENGTH),
            }
            .into());
        }

        let repo = UserRepository::new(self.db);
        if repo.get_by_email(&dto.email).await?.is_some() {
            return Err(Error::Conflict(format!(
                "A user with email {} already exists",
                dto.email
            )));
        }

        let password_hash = auth::hash_password(&dto.password)?;
        let user = repo
            .create(dto.email, dto.name, password_hash, role, time::now())
            .await?;

        to_user_dto(user)
    }

    /// Admin update of name and/or role.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        user_id: i32,
        dto: UpdateUserDto,
    ) -> Result<UserDto, Error> {
        ctx.require_admin()?;

        if let Some(name) = &dto.name {
            validate::require_non_empty("name", name)?;
        }
        let role = match dto.role.as_deref() {
            None => None,
            Some(raw) => Some(validate::parse_role("role", raw)?),
        };

        let repo = UserRepository::new(self.db);
        let user = repo
            .update(user_id, dto.name, role, time::now())
            .await?
            .ok_or(Error::NotFound {
                entity: "user",
                id: user_id,
            })?;

        to_user_dto(user)
    }

    /// Admin delete. The acting session's own account is refused.
    pub async fn delete(&self, ctx: &RequestContext, user_id: i32) -> Result<(), Error> {
        ctx.require_admin()?;

        if ctx.user_id == user_id {
            return Err(AuthError::SelfDeletion.into());
        }

        let repo = UserRepository::new(self.db);
        let result = repo.delete(user_id).await?;

        if result.rows_affected == 0 {
            return Err(Error::NotFound {
                entity: "user",
                id: user_id,
            });
        }

        Ok(())
    }

    /// Self-service display name change.
    pub async fn update_profile(
        &self,
        ctx: &RequestContext,
        dto: UpdateProfileDto,
    ) -> Result<UserDto, Error> {
        validate::require_non_empty("name", &dto.name)?;

        let repo = UserRepository::new(self.db);
        let user = repo
            .update(ctx.user_id, Some(dto.name), None, time::now())
            .await?
            .ok_or(Error::NotFound {
                entity: "user",
                id: ctx.user_id,
            })?;

        to_user_dto(user)
    }

    /// Self-service password change; the current password must verify.
    pub async fn change_password(
        &self,
        ctx: &RequestContext,
        dto: ChangePasswordDto,
    ) -> Result<(), Error> {
        if dto.new_password.len() < MIN_PASSWORD_LENGTH {
            return Err(ValidationError::Malformed {
                field: "newPassword",
                reason: format!("must be at least {} characters", MIN_PASSWORD_LENGTH),
            }
            .into());
        }
        if dto.new_password != dto.confirm_password {
            return Err(ValidationError::Malformed {
                field: "confirmPassword",
                reason: "does not match the new password".to_string(),
            }
            .into());
        }

        let repo = UserRepository::new(self.db);
        let user = repo.get(ctx.user_id).await?.ok_or(Error::NotFound {
            entity: "user",
            id: ctx.user_id,
        })?;

        if !auth::verify_password(&dto.current_password, &user.password_hash)? {
            return Err(AuthError::WrongPassword.into());
        }

        let password_hash = auth::hash_password(&dto.new_password)?;
        repo.update_password(ctx.user_id, password_hash, time::now())
            .await?
            .ok_or(Error::NotFound {
                entity: "user",
                id: ctx.user_id,
            })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {

    mod create {
        use launchpad_test_utils::prelude::*;

        use crate::{
            model::user::{CreateUserDto, Role},
            server::{error::Error, model::context::RequestContext, service::user::UserService},
        };

        /// Expect a duplicate email to be a conflict, not a validation error
        #[tokio::test]
        async fn rejects_duplicate_email() -> Result<(), TestError> {
            let mut test = test_setup_with_tables!(entity::prelude::LaunchpadUser)?;
            let admin = test
                .users()
                .insert_user("admin@example.com", Role::Admin)
                .await?;
            test.users().insert_user("pm@example.com", Role::Pm).await?;

            let service = UserService::new(&test.state.db);
            let ctx = RequestContext::new(admin.id, Role::Admin);
            let result = service
                .create(
                    &ctx,
                    CreateUserDto {
                        email: "pm@example.com".to_string(),
                        name: "Other".to_string(),
                        password: "secret-password".to_string(),
                        role: "OPS".to_string(),
                    },
                )
                .await;

            assert!(matches!(result, Err(Error::Conflict(_))));

            Ok(())
        }

        /// Expect a non-admin caller to be refused
        #[tokio::test]
        async fn requires_admin() -> Result<(), TestError> {
            let mut test = test_setup_with_tables!(entity::prelude::LaunchpadUser)?;
            let pm = test.users().insert_user("pm@example.com", Role::Pm).await?;

            let service = UserService::new(&test.state.db);
            let ctx = RequestContext::new(pm.id, Role::Pm);
            let result = service
                .create(
                    &ctx,
                    CreateUserDto {
                        email: "new@example.com".to_string(),
                        name: "New".to_string(),
                        password: "secret-password".to_string(),
                        role: "OPS".to_string(),
                    },
                )
                .await;

            assert!(matches!(result, Err(Error::AuthError(_))));

            Ok(())
        }
    }

    mod delete {
        use launchpad_test_utils::prelude::*;
        use sea_orm::EntityTrait;

        use crate::{
            model::user::Role,
            server::{
                error::{auth::AuthError, Error},
                model::context::RequestContext,
                service::user::UserService,
            },
        };

        /// Expect an admin to be unable to delete their own account
        #[tokio::test]
        async fn refuses_self_delete() -> Result<(), TestError> {
            let mut test = test_setup_with_tables!(entity::prelude::LaunchpadUser)?;
            let admin = test
                .users()
                .insert_user("admin@example.com", Role::Admin)
                .await?;

            let service = UserService::new(&test.state.db);
            let ctx = RequestContext::new(admin.id, Role::Admin);
            let result = service.delete(&ctx, admin.id).await;

            assert!(matches!(
                result,
                Err(Error::AuthError(AuthError::SelfDeletion))
            ));

            // The row must still exist
            let row = entity::prelude::LaunchpadUser::find_by_id(admin.id)
                .one(&test.state.db)
                .await?;
            assert!(row.is_some());

            Ok(())
        }

        /// Expect deleting another user to succeed
        #[tokio::test]
        async fn deletes_other_user() -> Result<(), TestError> {
            let mut test = test_setup_with_tables!(entity::prelude::LaunchpadUser)?;
            let admin = test
                .users()
                .insert_user("admin@example.com", Role::Admin)
                .await?;
            let pm = test.users().insert_user("pm@example.com", Role::Pm).await?;

            let service = UserService::new(&test.state.db);
            let ctx = RequestContext::new(admin.id, Role::Admin);
            service.delete(&ctx, pm.id).await.unwrap();

            let row = entity::prelude::LaunchpadUser::find_by_id(pm.id)
                .one(&test.state.db)
                .await?;
            assert!(row.is_none());

            Ok(())
        }
    }

    mod change_password {
        use launchpad_test_utils::prelude::*;

        use crate::{
            model::user::{ChangePasswordDto, Role},
            server::{
                data::user::UserRepository,
                error::{auth::AuthError, Error},
                model::context::RequestContext,
                service::{auth::hash_password, user::UserService},
                util::time,
            },
        };

        /// Expect a wrong current password to be refused
        #[tokio::test]
        async fn verifies_current_password() -> Result<(), TestError> {
            let test = test_setup_with_tables!(entity::prelude::LaunchpadUser)?;

            let repo = UserRepository::new(&test.state.db);
            let user = repo
                .create(
                    "pm@example.com".to_string(),
                    "Sam Reyes".to_string(),
                    hash_password("original-password").unwrap(),
                    Role::Pm,
                    time::now(),
                )
                .await?;

            let service = UserService::new(&test.state.db);
            let ctx = RequestContext::new(user.id, Role::Pm);
            let result = service
                .change_password(
                    &ctx,
                    ChangePasswordDto {
                        current_password: "not-the-password".to_string(),
                        new_password: "next-password".to_string(),
                        confirm_password: "next-password".to_string(),
                    },
                )
                .await;

            assert!(matches!(
                result,
                Err(Error::AuthError(AuthError::WrongPassword))
            ));

            Ok(())
        }

        /// Expect a too-short new password to fail validation
        #[tokio::test]
        async fn rejects_short_password() -> Result<(), TestError> {
            let test = test_setup_with_tables!(entity::prelude::LaunchpadUser)?;

            let repo = UserRepository::new(&test.state.db);
            let user = repo
                .create(
                    "pm@example.com".to_string(),
                    "Sam Reyes".to_string(),
                    hash_password("original-password").unwrap(),
                    Role::Pm,
                    time::now(),
                )
                .await?;

            let service = UserService::new(&test.state.db);
            let ctx = RequestContext::new(user.id, Role::Pm);
            let result = service
                .change_password(
                    &ctx,
                    ChangePasswordDto {
                        current_password: "original-password".to_string(),
                        new_password: "tiny".to_string(),
                        confirm_password: "tiny".to_string(),
                    },
                )
                .await;

            assert!(matches!(result, Err(Error::ValidationError(_))));

            Ok(())
        }
    }
}
