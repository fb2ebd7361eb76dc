//! In-memory collaborators for integration tests.
//!
//! [`InMemoryDirectory`] implements all three directory-facing ports over
//! plain vectors, with targeted failure injection for the partial-commit
//! and clock-in scenarios. [`RecordingNavigator`] captures navigation
//! requests for assertion.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::department::{Department, NewDepartment};
use crate::domain::email::EmailAddress;
use crate::domain::join_request::{JoinRequest, JoinRequestStatus, NewJoinRequest};
use crate::domain::organization::{NewOrganization, Organization};
use crate::domain::ports::{
    AttendanceLog, AttendanceLogError, ClockInRecord, NavTarget, Navigator,
    OrganizationDirectory, OrganizationDirectoryError, UserDirectory, UserDirectoryError,
};
use crate::domain::role::{NewRole, Role};
use crate::domain::user::{DirectoryUser, NewUser};

#[derive(Default)]
struct DirectoryState {
    organizations: Vec<Organization>,
    departments: Vec<Department>,
    roles: Vec<Role>,
    users: Vec<DirectoryUser>,
    join_requests: Vec<JoinRequest>,
    clock_ins: Vec<ClockInRecord>,
    fail_department_names: HashSet<String>,
    fail_clock_in: bool,
}

/// Vector-backed directory implementing every directory-facing port.
#[derive(Default)]
pub struct InMemoryDirectory {
    state: Mutex<DirectoryState>,
}

impl InMemoryDirectory {
    /// Build an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, DirectoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Seed an existing organization.
    pub fn seed_organization(&self, organization: Organization) {
        self.state().organizations.push(organization);
    }

    /// Seed an existing department.
    pub fn seed_department(&self, department: Department) {
        self.state().departments.push(department);
    }

    /// Seed an existing role.
    pub fn seed_role(&self, role: Role) {
        self.state().roles.push(role);
    }

    /// Seed an existing user account.
    pub fn seed_user(&self, user: DirectoryUser) {
        self.state().users.push(user);
    }

    /// Make future creates of the named department fail.
    pub fn fail_department(&self, name: impl Into<String>) {
        self.state().fail_department_names.insert(name.into());
    }

    /// Make future clock-ins fail.
    pub fn fail_clock_in(&self) {
        self.state().fail_clock_in = true;
    }

    /// Snapshot of stored organizations.
    pub fn organizations(&self) -> Vec<Organization> {
        self.state().organizations.clone()
    }

    /// Snapshot of stored departments.
    pub fn stored_departments(&self) -> Vec<Department> {
        self.state().departments.clone()
    }

    /// Snapshot of stored roles.
    pub fn stored_roles(&self) -> Vec<Role> {
        self.state().roles.clone()
    }

    /// Snapshot of stored users.
    pub fn users(&self) -> Vec<DirectoryUser> {
        self.state().users.clone()
    }

    /// Snapshot of stored join requests.
    pub fn join_requests(&self) -> Vec<JoinRequest> {
        self.state().join_requests.clone()
    }

    /// Snapshot of recorded clock-ins.
    pub fn clock_ins(&self) -> Vec<ClockInRecord> {
        self.state().clock_ins.clone()
    }
}

#[async_trait]
impl OrganizationDirectory for InMemoryDirectory {
    async fn list_organizations(&self) -> Result<Vec<Organization>, OrganizationDirectoryError> {
        Ok(self.state().organizations.clone())
    }

    async fn departments(
        &self,
        organization_id: Uuid,
    ) -> Result<Vec<Department>, OrganizationDirectoryError> {
        Ok(self
            .state()
            .departments
            .iter()
            .filter(|department| department.organization_id == organization_id)
            .cloned()
            .collect())
    }

    async fn roles(&self, department_id: Uuid) -> Result<Vec<Role>, OrganizationDirectoryError> {
        Ok(self
            .state()
            .roles
            .iter()
            .filter(|role| role.department_id == department_id)
            .cloned()
            .collect())
    }

    async fn create_organization(
        &self,
        organization: &NewOrganization,
    ) -> Result<Organization, OrganizationDirectoryError> {
        let mut state = self.state();
        if state
            .organizations
            .iter()
            .any(|existing| existing.identifier == organization.identifier)
        {
            return Err(OrganizationDirectoryError::rejected(
                "identifier already exists",
            ));
        }
        let created = Organization {
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
        };
        state.organizations.push(created.clone());
        Ok(created)
    }

    async fn create_department(
        &self,
        department: &NewDepartment,
    ) -> Result<Department, OrganizationDirectoryError> {
        let mut state = self.state();
        if state.fail_department_names.contains(&department.name) {
            return Err(OrganizationDirectoryError::transport("injected failure"));
        }
        let created = Department {
            id: Uuid::new_v4(),
            organization_id: department.organization_id,
            name: department.name.clone(),
            description: department.description.clone(),
            icon: department.icon.clone(),
        };
        state.departments.push(created.clone());
        Ok(created)
    }

    async fn create_role(&self, role: &NewRole) -> Result<Role, OrganizationDirectoryError> {
        let created = Role {
            id: Uuid::new_v4(),
            department_id: role.department_id,
            name: role.name.clone(),
            priority: role.priority,
            capabilities: role.capabilities,
        };
        self.state().roles.push(created.clone());
        Ok(created)
    }
}

#[async_trait]
impl UserDirectory for InMemoryDirectory {
    async fn email_exists(&self, email: &EmailAddress) -> Result<bool, UserDirectoryError> {
        let state = self.state();
        let taken = state
            .users
            .iter()
            .any(|user| user.email.matches(email.as_ref()))
            || state
                .organizations
                .iter()
                .any(|organization| organization.ceo_email.matches(email.as_ref()));
        Ok(taken)
    }

    async fn create_user(&self, user: &NewUser) -> Result<DirectoryUser, UserDirectoryError> {
        let created = DirectoryUser {
            id: Uuid::new_v4(),
            full_name: user.full_name.clone(),
            email: user.email.clone(),
            password: user.password.clone(),
            approved: user.approved,
            active: user.active,
            organization_id: None,
            department_id: None,
            role_id: None,
        };
        self.state().users.push(created.clone());
        Ok(created)
    }

    async fn list_users(&self) -> Result<Vec<DirectoryUser>, UserDirectoryError> {
        Ok(self.state().users.clone())
    }

    async fn create_join_request(
        &self,
        request: &NewJoinRequest,
    ) -> Result<JoinRequest, UserDirectoryError> {
        let created = JoinRequest {
            id: Uuid::new_v4(),
            user_id: request.user_id,
            organization_id: request.organization_id,
            department_id: request.department_id,
            role_id: request.role_id,
            status: JoinRequestStatus::Pending,
            requested_at: request.requested_at,
            reviewed_at: None,
            reviewed_by: None,
        };
        self.state().join_requests.push(created.clone());
        Ok(created)
    }
}

#[async_trait]
impl AttendanceLog for InMemoryDirectory {
    async fn clock_in(&self, record: &ClockInRecord) -> Result<(), AttendanceLogError> {
        let mut state = self.state();
        if state.fail_clock_in {
            return Err(AttendanceLogError::transport("injected failure"));
        }
        state.clock_ins.push(*record);
        Ok(())
    }
}

/// Navigation sink that records every requested destination.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    targets: Mutex<Vec<NavTarget>>,
}

impl RecordingNavigator {
    /// Build an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Destinations requested so far, in order.
    pub fn targets(&self) -> Vec<NavTarget> {
        self.targets
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, target: NavTarget) {
        self.targets
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(target);
    }
}
