//! Shared input validation helpers.
//!
//! Every helper names the offending field so the validation error that
//! reaches the client identifies what to fix.

use crate::{
    model::{
        status::{TaskPriority, WorkflowStatus},
        user::Role,
    },
    server::error::validation::ValidationError,
};

pub fn require_non_empty(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required(field));
    }

    Ok(())
}

/// Parses a workflow status string, falling back to `default` when absent.
pub fn parse_status(
    field: &'static str,
    value: Option<&str>,
    default: WorkflowStatus,
) -> Result<WorkflowStatus, ValidationError> {
    match value {
        None => Ok(default),
        Some(raw) => WorkflowStatus::parse(raw).ok_or_else(|| ValidationError::InvalidValue {
            field,
            value: raw.to_string(),
        }),
    }
}

pub fn parse_priority(
    field: &'static str,
    value: Option<&str>,
    default: TaskPriority,
) -> Result<TaskPriority, ValidationError> {
    match value {
        None => Ok(default),
        Some(raw) => TaskPriority::parse(raw).ok_or_else(|| ValidationError::InvalidValue {
            field,
            value: raw.to_string(),
        }),
    }
}

pub fn parse_role(field: &'static str, value: &str) -> Result<Role, ValidationError> {
    Role::parse(value).ok_or_else(|| ValidationError::InvalidValue {
        field,
        value: value.to_string(),
    })
}

/// Validates an inclusive integer range, e.g. probability and impact in
/// [1,5] or hardware score in [1,10].
pub fn require_in_range(
    field: &'static str,
    value: i32,
    min: i32,
    max: i32,
) -> Result<i32, ValidationError> {
    if value < min || value > max {
        return Err(ValidationError::OutOfRange {
            field,
            min: min as i64,
            max: max as i64,
        });
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Expect whitespace-only strings to fail the non-empty check
    #[test]
    fn rejects_blank_title() {
        assert!(require_non_empty("title", "  ").is_err());
        assert!(require_non_empty("title", "Order devices").is_ok());
    }

    /// Expect unknown status strings to fail with the field name
    #[test]
    fn rejects_unknown_status() {
        let err = parse_status("status", Some("SHIPPED"), WorkflowStatus::Todo).unwrap_err();

        assert_eq!(err.field(), "status");
    }

    /// Expect absent status to use the default
    #[test]
    fn defaults_absent_status() {
        let status = parse_status("status", None, WorkflowStatus::Backlog).unwrap();

        assert_eq!(status, WorkflowStatus::Backlog);
    }

    /// Expect range bounds to be inclusive
    #[test]
    fn range_bounds_are_inclusive() {
        assert!(require_in_range("probability", 1, 1, 5).is_ok());
        assert!(require_in_range("probability", 5, 1, 5).is_ok());
        assert!(require_in_range("probability", 0, 1, 5).is_err());
        assert!(require_in_range("probability", 6, 1, 5).is_err());
    }
}
