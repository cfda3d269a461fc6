//! Central role-permission policy.
//!
//! Every mutation goes through [`has_permission`]; the table below is the
//! single authoritative mapping from role to writable resource categories.
//! Reads only require authentication. User management is gated separately
//! behind the ADMIN role.

use crate::model::user::Role;

/// Resource categories a role may mutate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resource {
    Projects,
    Tasks,
    Milestones,
    Risks,
    Hardware,
    Legal,
    Pricing,
    Rewards,
    Content,
    Ops,
}

/// The resource categories a role is allowed to mutate.
///
/// ADMIN is handled in [`has_permission`] as a wildcard and does not appear
/// here. VIEWER is read-only and maps to the empty set.
pub fn role_permissions(role: Role) -> &'static [Resource] {
    match role {
        Role::Admin => &[],
        Role::Pm => &[
            Resource::Projects,
            Resource::Tasks,
            Resource::Milestones,
            Resource::Hardware,
            Resource::Legal,
            Resource::Pricing,
            Resource::Rewards,
            Resource::Content,
            Resource::Ops,
            Resource::Risks,
        ],
        Role::Ops => &[Resource::Tasks, Resource::Hardware, Resource::Ops],
        Role::Legal => &[Resource::Legal, Resource::Tasks],
        Role::Sales => &[Resource::Pricing, Resource::Tasks, Resource::Content],
        Role::Viewer => &[],
    }
}

/// Whether `role` may mutate `resource`.
pub fn has_permission(role: Role, resource: Resource) -> bool {
    if role == Role::Admin {
        return true;
    }

    role_permissions(role).contains(&resource)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Expect ADMIN to pass every resource check
    #[test]
    fn admin_has_all_permissions() {
        let all = [
            Resource::Projects,
            Resource::Tasks,
            Resource::Milestones,
            Resource::Risks,
            Resource::Hardware,
            Resource::Legal,
            Resource::Pricing,
            Resource::Rewards,
            Resource::Content,
            Resource::Ops,
        ];

        for resource in all {
            assert!(has_permission(Role::Admin, resource));
        }
    }

    /// Expect VIEWER to fail every mutation check
    #[test]
    fn viewer_has_no_permissions() {
        let all = [
            Resource::Projects,
            Resource::Tasks,
            Resource::Milestones,
            Resource::Risks,
            Resource::Hardware,
            Resource::Legal,
            Resource::Pricing,
            Resource::Rewards,
            Resource::Content,
            Resource::Ops,
        ];

        for resource in all {
            assert!(!has_permission(Role::Viewer, resource));
        }
    }

    /// Expect OPS to mutate tasks, hardware and ops but not legal or pricing
    #[test]
    fn ops_scope_is_limited() {
        assert!(has_permission(Role::Ops, Resource::Tasks));
        assert!(has_permission(Role::Ops, Resource::Hardware));
        assert!(has_permission(Role::Ops, Resource::Ops));
        assert!(!has_permission(Role::Ops, Resource::Legal));
        assert!(!has_permission(Role::Ops, Resource::Pricing));
        assert!(!has_permission(Role::Ops, Resource::Projects));
    }

    /// Expect LEGAL to mutate legal docs and tasks only
    #[test]
    fn legal_scope_is_limited() {
        assert!(has_permission(Role::Legal, Resource::Legal));
        assert!(has_permission(Role::Legal, Resource::Tasks));
        assert!(!has_permission(Role::Legal, Resource::Hardware));
        assert!(!has_permission(Role::Legal, Resource::Content));
    }

    /// Expect SALES to mutate pricing, tasks and content only
    #[test]
    fn sales_scope_is_limited() {
        assert!(has_permission(Role::Sales, Resource::Pricing));
        assert!(has_permission(Role::Sales, Resource::Tasks));
        assert!(has_permission(Role::Sales, Resource::Content));
        assert!(!has_permission(Role::Sales, Resource::Legal));
        assert!(!has_permission(Role::Sales, Resource::Risks));
    }

    /// Expect PM to mutate every launch resource
    #[test]
    fn pm_scope_covers_launch_resources() {
        assert!(has_permission(Role::Pm, Resource::Projects));
        assert!(has_permission(Role::Pm, Resource::Risks));
        assert!(has_permission(Role::Pm, Resource::Legal));
        assert!(has_permission(Role::Pm, Resource::Ops));
    }
}
