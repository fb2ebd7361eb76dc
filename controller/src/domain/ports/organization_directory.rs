//! Port for the organization-facing half of the Directory Service.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::department::{Department, NewDepartment};
use crate::domain::organization::{NewOrganization, Organization};
use crate::domain::role::{NewRole, Role};

use super::define_port_error;

define_port_error! {
    /// Failures raised by organization directory adapters.
    pub enum OrganizationDirectoryError {
        /// Service could not be reached or the call timed out.
        Transport { message: String } =>
            "organization directory unreachable: {message}",
        /// Service answered but refused the request.
        Rejected { message: String } =>
            "organization directory rejected the request: {message}",
        /// Payload could not be decoded into domain records.
        Decode { message: String } =>
            "organization directory payload invalid: {message}",
    }
}

/// Read/write access to organizations, departments, and roles.
///
/// Creates return the persisted record so the caller can pick up the
/// directory-assigned identity; the controller never invents ids.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrganizationDirectory: Send + Sync {
    /// List every registered organization.
    async fn list_organizations(&self) -> Result<Vec<Organization>, OrganizationDirectoryError>;

    /// Departments belonging to one organization.
    async fn departments(
        &self,
        organization_id: Uuid,
    ) -> Result<Vec<Department>, OrganizationDirectoryError>;

    /// Roles scoped to one department.
    async fn roles(&self, department_id: Uuid) -> Result<Vec<Role>, OrganizationDirectoryError>;

    /// Persist a new organization.
    async fn create_organization(
        &self,
        organization: &NewOrganization,
    ) -> Result<Organization, OrganizationDirectoryError>;

    /// Persist one department draft.
    async fn create_department(
        &self,
        department: &NewDepartment,
    ) -> Result<Department, OrganizationDirectoryError>;

    /// Persist one role draft.
    async fn create_role(&self, role: &NewRole) -> Result<Role, OrganizationDirectoryError>;
}

/// Fixture returning an empty directory and echoing creates back with
/// fresh identities. Use it in tests where directory contents are not
/// under test.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureOrganizationDirectory;

#[async_trait]
impl OrganizationDirectory for FixtureOrganizationDirectory {
    async fn list_organizations(&self) -> Result<Vec<Organization>, OrganizationDirectoryError> {
        Ok(Vec::new())
    }

    async fn departments(
        &self,
        _organization_id: Uuid,
    ) -> Result<Vec<Department>, OrganizationDirectoryError> {
        Ok(Vec::new())
    }

    async fn roles(&self, _department_id: Uuid) -> Result<Vec<Role>, OrganizationDirectoryError> {
        Ok(Vec::new())
    }

    async fn create_organization(
        &self,
        organization: &NewOrganization,
    ) -> Result<Organization, OrganizationDirectoryError> {
        Ok(Organization {
            id: Uuid::new_v4(),
            identifier: organization.identifier.clone(),
            join_code: organization.join_code.clone(),
            name: organization.name.clone(),
            ceo_email: organization.ceo_email.clone(),
            ceo_password: organization.ceo_password.clone(),
            phone: organization.phone.clone(),
            address: organization.address.clone(),
            logo_url: organization.logo_url.clone(),
            website_url: organization.website_url.clone(),
            employee_count: 0,
            department_count: 0,
        })
    }

    async fn create_department(
        &self,
        department: &NewDepartment,
    ) -> Result<Department, OrganizationDirectoryError> {
        Ok(Department {
            id: Uuid::new_v4(),
            organization_id: department.organization_id,
            name: department.name.clone(),
            description: department.description.clone(),
            icon: department.icon.clone(),
        })
    }

    async fn create_role(&self, role: &NewRole) -> Result<Role, OrganizationDirectoryError> {
        Ok(Role {
            id: Uuid::new_v4(),
            department_id: role.department_id,
            name: role.name.clone(),
            priority: role.priority,
            capabilities: role.capabilities,
        })
    }
}
