//! Role entity, capability flags, and the in-memory wizard draft.

use std::fmt;

use uuid::Uuid;

use crate::domain::department::DraftId;

/// Validation errors for role values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleValidationError {
    PriorityTooLow,
}

impl fmt::Display for RoleValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PriorityTooLow => write!(f, "role priority must be at least 1"),
        }
    }
}

impl std::error::Error for RoleValidationError {}

/// Role ordering weight; 1 is the highest-ranked role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RolePriority(u32);

impl RolePriority {
    /// Validate and construct a priority (must be ≥ 1).
    pub fn new(value: u32) -> Result<Self, RoleValidationError> {
        if value < 1 {
            return Err(RoleValidationError::PriorityTooLow);
        }
        Ok(Self(value))
    }

    /// The underlying integer weight.
    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for RolePriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Fixed set of boolean capabilities a role can grant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoleCapabilities {
    pub post_news: bool,
    pub post_events: bool,
    pub assign_tasks: bool,
    pub receive_tasks: bool,
    pub view_statistics: bool,
    pub hire: bool,
    pub reassign_tasks: bool,
}

/// A role accumulated in wizard memory, bound to a department draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleDraft {
    pub id: DraftId,
    /// The department draft this role belongs to. The referenced draft is
    /// guaranteed to exist while this draft does: removal cascades.
    pub department: DraftId,
    pub name: String,
    pub priority: RolePriority,
    pub capabilities: RoleCapabilities,
}

/// A role as the directory returns it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    pub id: Uuid,
    pub department_id: Uuid,
    pub name: String,
    pub priority: u32,
    pub capabilities: RoleCapabilities,
}

/// Payload for a role create call at wizard commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRole {
    pub department_id: Uuid,
    pub name: String,
    pub priority: u32,
    pub capabilities: RoleCapabilities,
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    #[test]
    fn priority_floor_is_one() {
        assert_eq!(
            RolePriority::new(0).expect_err("zero must fail"),
            RoleValidationError::PriorityTooLow
        );
        assert_eq!(RolePriority::new(1).expect("one is valid").get(), 1);
    }

    #[test]
    fn capabilities_default_to_none_granted() {
        let capabilities = RoleCapabilities::default();
        assert!(!capabilities.post_news);
        assert!(!capabilities.hire);
        assert!(!capabilities.reassign_tasks);
    }
}
