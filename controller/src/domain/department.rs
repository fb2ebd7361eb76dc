//! Department entity and its in-memory wizard draft.

use std::fmt;

use uuid::Uuid;

/// Presentation default applied to every department created by the wizard.
pub const DEFAULT_DEPARTMENT_ICON: &str = "briefcase";

/// Handle for a draft accumulated in wizard memory.
///
/// Assigned from a per-wizard counter at draft creation and resolved to a
/// directory identity only at commit, so reordering or removing drafts
/// cannot silently re-link a role to the wrong department.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DraftId(pub(crate) u64);

impl fmt::Display for DraftId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "draft-{}", self.0)
    }
}

/// A department accumulated in wizard memory, not yet persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartmentDraft {
    pub id: DraftId,
    pub name: String,
    pub description: Option<String>,
    pub icon: String,
}

impl DepartmentDraft {
    /// Build a draft with the fixed presentation defaults.
    pub(crate) fn new(id: DraftId, name: impl Into<String>, description: Option<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description,
            icon: DEFAULT_DEPARTMENT_ICON.to_owned(),
        }
    }
}

/// A department as the directory returns it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Department {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub icon: String,
}

/// Payload for a department create call at wizard commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDepartment {
    pub organization_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub icon: String,
}

impl NewDepartment {
    /// Bind a draft to its freshly persisted organization.
    pub(crate) fn from_draft(organization_id: Uuid, draft: &DepartmentDraft) -> Self {
        Self {
            organization_id,
            name: draft.name.clone(),
            description: draft.description.clone(),
            icon: draft.icon.clone(),
        }
    }
}
