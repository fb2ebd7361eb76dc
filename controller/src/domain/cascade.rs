//! Cascading organization → department → role loader.
//!
//! Backs the employee registration form: organizations load once, the
//! search box narrows them until one is chosen, and each downstream level
//! is fetched lazily for the current upstream choice. Changing a higher
//! level always invalidates everything below it.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::department::Department;
use crate::domain::error::DomainError;
use crate::domain::feedback::Feedback;
use crate::domain::organization::Organization;
use crate::domain::ports::OrganizationDirectory;
use crate::domain::role::Role;

/// Three-level dependent selection state.
pub struct CascadeLoader<D> {
    directory: Arc<D>,
    feedback: Feedback,
    organizations: Vec<Organization>,
    loaded: bool,
    search: String,
    selected: Option<Organization>,
    departments: Vec<Department>,
    selected_department: Option<Uuid>,
    roles: Vec<Role>,
    selected_role: Option<Uuid>,
}

impl<D> CascadeLoader<D>
where
    D: OrganizationDirectory,
{
    /// Build a loader over the given directory port.
    pub fn new(directory: Arc<D>, feedback: Feedback) -> Self {
        Self {
            directory,
            feedback,
            organizations: Vec::new(),
            loaded: false,
            search: String::new(),
            selected: None,
            departments: Vec::new(),
            selected_department: None,
            roles: Vec::new(),
            selected_role: None,
        }
    }

    /// Fetch the organization set once.
    ///
    /// The top-level load blocks the whole flow, so its failure is surfaced
    /// to the user; subsequent calls after a success are no-ops.
    pub async fn load(&mut self) {
        if self.loaded {
            return;
        }
        match self.directory.list_organizations().await {
            Ok(organizations) => {
                self.organizations = organizations;
                self.loaded = true;
            }
            Err(error) => {
                tracing::error!(error = %error, "organization list failed to load");
                self.feedback.report(&DomainError::remote_unavailable(
                    "Could not load organizations. Please try again later.",
                ));
            }
        }
    }

    /// Pre-select an organization supplied by the entry point, echoing its
    /// join code into the search field and loading its departments.
    pub async fn preselect(&mut self, organization_id: Uuid) {
        self.load().await;
        self.choose(organization_id).await;
    }

    /// Update the free-typed search text.
    ///
    /// Editing after a selection was made abandons it: the selection and
    /// all dependent department/role state are cleared, forcing
    /// re-resolution.
    pub fn set_search(&mut self, text: impl Into<String>) {
        if self.selected.is_some() {
            self.selected = None;
            self.clear_downstream();
        }
        self.search = text.into();
    }

    /// Dropdown matches for the current free-typed text: case-insensitive
    /// substring against both join code and name. Empty once a selection
    /// was made.
    pub fn suggestions(&self) -> Vec<&Organization> {
        if self.selected.is_some() {
            return Vec::new();
        }
        let needle = self.search.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.organizations
            .iter()
            .filter(|organization| {
                organization
                    .join_code
                    .as_ref()
                    .to_lowercase()
                    .contains(&needle)
                    || organization.name.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Resolve a suggestion to a concrete organization.
    ///
    /// Echoes the join code into the search field, closes the dropdown,
    /// clears any previously chosen department/role, and loads the
    /// organization's departments. Unknown ids are ignored.
    pub async fn choose(&mut self, organization_id: Uuid) {
        let Some(organization) = self
            .organizations
            .iter()
            .find(|candidate| candidate.id == organization_id)
            .cloned()
        else {
            return;
        };
        self.search = organization.join_code.to_string();
        self.selected = Some(organization);
        self.clear_downstream();
        self.load_departments().await;
    }

    /// Pick a department from the loaded list, loading its roles.
    pub async fn choose_department(&mut self, department_id: Uuid) {
        if !self
            .departments
            .iter()
            .any(|department| department.id == department_id)
        {
            return;
        }
        self.selected_department = Some(department_id);
        self.selected_role = None;
        self.roles = match self.directory.roles(department_id).await {
            Ok(roles) => roles,
            Err(error) => {
                // Roles are optional for the employee path; degrade to none.
                tracing::warn!(
                    error = %error,
                    department = %department_id,
                    "role list failed to load",
                );
                Vec::new()
            }
        };
    }

    /// Drop the department choice and everything below it.
    pub fn clear_department(&mut self) {
        self.selected_department = None;
        self.roles.clear();
        self.selected_role = None;
    }

    /// Pick a role from the loaded list. Unknown ids are ignored.
    pub fn choose_role(&mut self, role_id: Uuid) {
        if self.roles.iter().any(|role| role.id == role_id) {
            self.selected_role = Some(role_id);
        }
    }

    /// Drop the role choice.
    pub fn clear_role(&mut self) {
        self.selected_role = None;
    }

    async fn load_departments(&mut self) {
        let Some(organization) = &self.selected else {
            return;
        };
        self.departments = match self.directory.departments(organization.id).await {
            Ok(departments) => departments,
            Err(error) => {
                // Departments are optional for the employee path; degrade
                // to none.
                tracing::warn!(
                    error = %error,
                    organization = %organization.id,
                    "department list failed to load",
                );
                Vec::new()
            }
        };
    }

    fn clear_downstream(&mut self) {
        self.departments.clear();
        self.selected_department = None;
        self.roles.clear();
        self.selected_role = None;
    }

    /// Whether the one-shot organization load has succeeded.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// The full organization set (empty until loaded).
    pub fn organizations(&self) -> &[Organization] {
        &self.organizations
    }

    /// Current search text.
    pub fn search(&self) -> &str {
        &self.search
    }

    /// The resolved organization, if any.
    pub fn selected(&self) -> Option<&Organization> {
        self.selected.as_ref()
    }

    /// Departments for the resolved organization.
    pub fn departments(&self) -> &[Department] {
        &self.departments
    }

    /// The chosen department id, if any.
    pub fn selected_department(&self) -> Option<Uuid> {
        self.selected_department
    }

    /// Roles for the chosen department.
    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    /// The chosen role id, if any.
    pub fn selected_role(&self) -> Option<Uuid> {
        self.selected_role
    }
}
