//! The minimal identity record written after a successful sign-in.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::user::DirectoryUser;

/// Which sign-in path produced the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserType {
    Ceo,
    Employee,
}

/// Identity record persisted by the session store.
///
/// Written only after every credential check for the path has passed: the
/// password for employees, the password and the organization code for CEOs.
/// Absent or malformed stored content reads as "not authenticated".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionIdentity {
    pub user_id: Uuid,
    pub user_type: UserType,
    pub organization_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub department_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub role_id: Option<Uuid>,
}

impl SessionIdentity {
    /// Identity for an organization's primary account holder.
    ///
    /// CEO accounts are the organization record itself, so the user id and
    /// the organization id coincide.
    pub fn ceo(organization_id: Uuid) -> Self {
        Self {
            user_id: organization_id,
            user_type: UserType::Ceo,
            organization_id,
            department_id: None,
            role_id: None,
        }
    }

    /// Identity for an approved employee account.
    pub fn employee(user: &DirectoryUser, organization_id: Uuid) -> Self {
        Self {
            user_id: user.id,
            user_type: UserType::Employee,
            organization_id,
            department_id: user.department_id,
            role_id: user.role_id,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use serde_json::json;

    #[test]
    fn ceo_identity_serialises_without_optional_ids() {
        let org = Uuid::new_v4();
        let value = serde_json::to_value(SessionIdentity::ceo(org)).expect("serializes");
        assert_eq!(
            value,
            json!({
                "userId": org,
                "userType": "ceo",
                "organizationId": org,
            })
        );
    }

    #[test]
    fn employee_identity_round_trips() {
        let identity = SessionIdentity {
            user_id: Uuid::new_v4(),
            user_type: UserType::Employee,
            organization_id: Uuid::new_v4(),
            department_id: Some(Uuid::new_v4()),
            role_id: None,
        };
        let raw = serde_json::to_string(&identity).expect("serializes");
        let parsed: SessionIdentity = serde_json::from_str(&raw).expect("parses");
        assert_eq!(parsed, identity);
    }
}
