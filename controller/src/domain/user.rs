//! Directory user records.

use uuid::Uuid;

use crate::domain::email::EmailAddress;

/// A user account as the directory returns it.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectoryUser {
    pub id: Uuid,
    pub full_name: String,
    pub email: EmailAddress,
    /// Credential as stored by the directory.
    pub password: String,
    /// Set by an administrator when the join request is reviewed.
    pub approved: bool,
    pub active: bool,
    pub organization_id: Option<Uuid>,
    pub department_id: Option<Uuid>,
    pub role_id: Option<Uuid>,
}

/// Payload for the user create call during employee registration.
///
/// New accounts start unapproved and active, with no department or role
/// assignment; those arrive later when the join request is reviewed.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub full_name: String,
    pub email: EmailAddress,
    pub password: String,
    pub approved: bool,
    pub active: bool,
}

impl NewUser {
    /// Build the standard not-yet-approved account payload.
    pub fn unapproved(full_name: impl Into<String>, email: EmailAddress, password: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            email,
            password: password.into(),
            approved: false,
            active: true,
        }
    }
}
