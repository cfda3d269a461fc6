use crate::{
    model::user::Role,
    server::{
        error::auth::AuthError,
        model::permission::{has_permission, Resource},
    },
};

/// Request-scoped identity: who is calling and with which role.
///
/// Resolved once per request from the session and passed explicitly into
/// services so authorization stays pure and testable.
#[derive(Clone, Copy, Debug)]
pub struct RequestContext {
    pub user_id: i32,
    pub role: Role,
}

impl RequestContext {
    pub fn new(user_id: i32, role: Role) -> Self {
        Self { user_id, role }
    }

    /// Fails with a 403-mapped error unless the caller's role may mutate
    /// `resource`.
    pub fn require(&self, resource: Resource) -> Result<(), AuthError> {
        if has_permission(self.role, resource) {
            Ok(())
        } else {
            Err(AuthError::Forbidden(resource))
        }
    }

    /// Fails unless the caller is an ADMIN.
    pub fn require_admin(&self) -> Result<(), AuthError> {
        if self.role == Role::Admin {
            Ok(())
        } else {
            Err(AuthError::AdminRequired)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Expect Ok when a PM mutates tasks
    #[test]
    fn require_passes_for_permitted_resource() {
        let ctx = RequestContext::new(1, Role::Pm);

        assert!(ctx.require(Resource::Tasks).is_ok());
    }

    /// Expect Forbidden when a VIEWER mutates tasks
    #[test]
    fn require_fails_for_viewer() {
        let ctx = RequestContext::new(1, Role::Viewer);

        let result = ctx.require(Resource::Tasks);

        assert!(matches!(result, Err(AuthError::Forbidden(_))));
    }

    /// Expect AdminRequired when a non-admin calls require_admin
    #[test]
    fn require_admin_fails_for_pm() {
        let ctx = RequestContext::new(1, Role::Pm);

        assert!(matches!(ctx.require_admin(), Err(AuthError::AdminRequired)));
    }
}
