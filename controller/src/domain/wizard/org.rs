//! Organization onboarding wizard.

use std::collections::HashMap;
use std::sync::Arc;

use futures_util::future::join_all;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use uuid::Uuid;

use crate::domain::department::{DepartmentDraft, DraftId, NewDepartment};
use crate::domain::email::EmailAddress;
use crate::domain::error::{DomainError, ErrorCode};
use crate::domain::feedback::Feedback;
use crate::domain::fields::Field;
use crate::domain::organization::{JoinCode, NewOrganization, OrgIdentifier, Organization};
use crate::domain::ports::{
    NavTarget, Navigator, OrganizationDirectory, OrganizationDirectoryError, UserDirectory,
};
use crate::domain::role::{NewRole, RoleCapabilities, RoleDraft, RolePriority};
use crate::domain::validation::{self, RequiredField};

/// Steps of the organization path. `Committed` is terminal and one-way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    OrgInfo,
    Departments,
    Roles,
    Committed,
}

/// Raw values of the organization-info step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrgInfoForm {
    pub identifier: String,
    pub name: String,
    pub ceo_email: String,
    pub password: String,
    pub confirm_password: String,
    pub phone: String,
    pub address: String,
    pub logo_url: String,
    pub website_url: String,
}

/// Tagged field update for the organization-info step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrgInfoField {
    Identifier(String),
    Name(String),
    CeoEmail(String),
    Password(String),
    ConfirmPassword(String),
    Phone(String),
    Address(String),
    LogoUrl(String),
    WebsiteUrl(String),
}

impl OrgInfoForm {
    /// Single reducer for every field update.
    pub fn apply(&mut self, update: OrgInfoField) {
        match update {
            OrgInfoField::Identifier(value) => self.identifier = value,
            OrgInfoField::Name(value) => self.name = value,
            OrgInfoField::CeoEmail(value) => self.ceo_email = value,
            OrgInfoField::Password(value) => self.password = value,
            OrgInfoField::ConfirmPassword(value) => self.confirm_password = value,
            OrgInfoField::Phone(value) => self.phone = value,
            OrgInfoField::Address(value) => self.address = value,
            OrgInfoField::LogoUrl(value) => self.logo_url = value,
            OrgInfoField::WebsiteUrl(value) => self.website_url = value,
        }
    }
}

/// Outcome of a successful commit, held until the user acknowledges it.
#[derive(Debug, Clone, PartialEq)]
pub struct CommitSummary {
    pub organization: Organization,
    pub departments_created: usize,
    pub roles_created: usize,
}

/// The three-step organization onboarding state machine.
///
/// Department and role entries accumulate as in-memory drafts and nothing
/// is persisted until the single final commit, reachable from the
/// departments step (when no departments were added) or the roles step.
pub struct OrgRegistrationWizard<D, U, N> {
    directory: Arc<D>,
    users: Arc<U>,
    navigator: Arc<N>,
    feedback: Feedback,
    step: WizardStep,
    form: OrgInfoForm,
    departments: Vec<DepartmentDraft>,
    roles: Vec<RoleDraft>,
    next_draft: u64,
    in_flight: bool,
    confirmation: Option<CommitSummary>,
}

impl<D, U, N> OrgRegistrationWizard<D, U, N>
where
    D: OrganizationDirectory,
    U: UserDirectory,
    N: Navigator,
{
    /// Build a wizard at the organization-info step.
    pub fn new(directory: Arc<D>, users: Arc<U>, navigator: Arc<N>, feedback: Feedback) -> Self {
        Self {
            directory,
            users,
            navigator,
            feedback,
            step: WizardStep::OrgInfo,
            form: OrgInfoForm::default(),
            departments: Vec::new(),
            roles: Vec::new(),
            next_draft: 0,
            in_flight: false,
            confirmation: None,
        }
    }

    /// Current step.
    pub fn step(&self) -> WizardStep {
        self.step
    }

    /// Raw organization-info values.
    pub fn form(&self) -> &OrgInfoForm {
        &self.form
    }

    /// Accumulated department drafts.
    pub fn departments(&self) -> &[DepartmentDraft] {
        &self.departments
    }

    /// Accumulated role drafts.
    pub fn roles(&self) -> &[RoleDraft] {
        &self.roles
    }

    /// The pending success confirmation, if the commit has happened.
    pub fn confirmation(&self) -> Option<&CommitSummary> {
        self.confirmation.as_ref()
    }

    /// Apply a field update; only meaningful on the organization-info step.
    pub fn update(&mut self, update: OrgInfoField) {
        if self.step != WizardStep::OrgInfo {
            return;
        }
        self.form.apply(update);
    }

    /// Validate the organization-info step and move on to departments.
    ///
    /// Nothing is persisted yet; the CEO email is checked for uniqueness
    /// against the directory as part of the gate.
    pub async fn advance_from_org_info(&mut self) {
        if self.step != WizardStep::OrgInfo {
            return;
        }
        if let Err(error) = self.try_advance().await {
            self.feedback.report(&error);
        }
    }

    async fn try_advance(&mut self) -> Result<(), DomainError> {
        validation::require_all(
            &self.feedback,
            &[
                RequiredField::new(Field::OrgIdentifier, &self.form.identifier),
                RequiredField::new(Field::OrgName, &self.form.name),
                RequiredField::new(Field::CeoEmail, &self.form.ceo_email),
                RequiredField::new(Field::Password, &self.form.password),
                RequiredField::new(Field::ConfirmPassword, &self.form.confirm_password),
                RequiredField::new(Field::Phone, &self.form.phone),
                RequiredField::new(Field::Address, &self.form.address),
            ],
        )?;
        validation::check_org_identifier(&self.feedback, &self.form.identifier).map_err(
            |error| {
                self.form.identifier.clear();
                error
            },
        )?;
        validation::check_name(&self.feedback, Field::OrgName, &self.form.name).map_err(
            |error| {
                self.form.name.clear();
                error
            },
        )?;
        let email = validation::check_email(&self.feedback, Field::CeoEmail, &self.form.ceo_email)
            .map_err(|error| {
                self.form.ceo_email.clear();
                error
            })?;
        validation::check_password_pair(
            &self.feedback,
            &self.form.password,
            &self.form.confirm_password,
        )
        .map_err(|error| {
            self.form.password.clear();
            self.form.confirm_password.clear();
            error
        })?;
        validation::check_optional_url(&self.feedback, Field::LogoUrl, &self.form.logo_url)
            .map_err(|error| {
                self.form.logo_url.clear();
                error
            })?;
        validation::check_optional_url(&self.feedback, Field::WebsiteUrl, &self.form.website_url)
            .map_err(|error| {
                self.form.website_url.clear();
                error
            })?;
        validation::ensure_email_available(
            self.users.as_ref(),
            &self.feedback,
            Field::CeoEmail,
            &email,
        )
        .await
        .map_err(|error| {
            if error.code() == ErrorCode::Conflict {
                self.form.ceo_email.clear();
            }
            error
        })?;

        self.step = WizardStep::Departments;
        Ok(())
    }

    /// Add a department draft from the mini-form.
    ///
    /// Returns the draft handle on success; a missing name is flagged and
    /// reported instead.
    pub fn add_department(&mut self, name: &str, description: &str) -> Option<DraftId> {
        if self.step != WizardStep::Departments {
            return None;
        }
        if let Err(error) = validation::require_all(
            &self.feedback,
            &[RequiredField::new(Field::DepartmentName, name)],
        ) {
            self.feedback.report(&error);
            return None;
        }
        let id = self.allocate_draft();
        let description = non_empty(description);
        self.departments
            .push(DepartmentDraft::new(id, name.trim(), description));
        Some(id)
    }

    /// Remove a department draft and every role draft bound to it.
    pub fn remove_department(&mut self, id: DraftId) {
        if self.step == WizardStep::Committed {
            return;
        }
        self.departments.retain(|draft| draft.id != id);
        self.roles.retain(|draft| draft.department != id);
    }

    /// Leave the departments step.
    ///
    /// With no accumulated departments the roles step is skipped and the
    /// commit runs directly; an organization with zero departments is a
    /// valid outcome.
    pub async fn proceed_from_departments(&mut self) {
        if self.step != WizardStep::Departments {
            return;
        }
        if self.departments.is_empty() {
            self.commit().await;
        } else {
            self.step = WizardStep::Roles;
        }
    }

    /// Add a role draft bound to one of the accumulated departments.
    pub fn add_role(
        &mut self,
        department: DraftId,
        name: &str,
        priority: u32,
        capabilities: RoleCapabilities,
    ) -> Option<DraftId> {
        if self.step != WizardStep::Roles {
            return None;
        }
        if let Err(error) =
            validation::require_all(&self.feedback, &[RequiredField::new(Field::RoleName, name)])
        {
            self.feedback.report(&error);
            return None;
        }
        let Ok(priority) = RolePriority::new(priority) else {
            self.feedback.flag_error(Field::RolePriority);
            self.feedback
                .report(&DomainError::format_invalid("Role priority must be at least 1."));
            return None;
        };
        if !self.departments.iter().any(|draft| draft.id == department) {
            self.feedback.report(&DomainError::not_found(
                "Choose one of the added departments for this role.",
            ));
            return None;
        }
        let id = self.allocate_draft();
        self.roles.push(RoleDraft {
            id,
            department,
            name: name.trim().to_owned(),
            priority,
            capabilities,
        });
        Some(id)
    }

    /// Remove a role draft.
    pub fn remove_role(&mut self, id: DraftId) {
        if self.step == WizardStep::Committed {
            return;
        }
        self.roles.retain(|draft| draft.id != id);
    }

    /// Leave the roles step and commit, even with zero role drafts.
    pub async fn finish(&mut self) {
        if self.step != WizardStep::Roles {
            return;
        }
        self.commit().await;
    }

    /// Dismiss the success confirmation and navigate away.
    pub fn acknowledge(&mut self) {
        if self.confirmation.take().is_some() {
            self.navigator.navigate(NavTarget::Login);
        }
    }

    async fn commit(&mut self) {
        if self.in_flight {
            return;
        }
        self.in_flight = true;
        let result = self.try_commit().await;
        self.in_flight = false;
        if let Err(error) = result {
            self.feedback.report(&error);
        }
    }

    async fn try_commit(&mut self) -> Result<(), DomainError> {
        let new_organization = self.build_new_organization()?;
        let organization = self
            .directory
            .create_organization(&new_organization)
            .await
            .map_err(map_create_error)?;

        let department_payloads: Vec<NewDepartment> = self
            .departments
            .iter()
            .map(|draft| NewDepartment::from_draft(organization.id, draft))
            .collect();
        let department_results = join_all(
            department_payloads
                .iter()
                .map(|payload| self.directory.create_department(payload)),
        )
        .await;

        let mut department_ids: HashMap<String, Uuid> = HashMap::new();
        let mut failed_departments = 0_usize;
        for (payload, result) in department_payloads.iter().zip(department_results) {
            match result {
                Ok(department) => {
                    department_ids.insert(department.name.clone(), department.id);
                }
                Err(error) => {
                    failed_departments += 1;
                    tracing::warn!(
                        error = %error,
                        department = %payload.name,
                        "department create failed during commit",
                    );
                }
            }
        }
        if failed_departments > 0 {
            // Already-created rows stay in place; roles are not attempted
            // against a partially confirmed department set.
            return Err(DomainError::partial_commit(format!(
                "{failed_departments} of {} departments could not be created. \
                 The organization itself was registered; please review its departments.",
                department_payloads.len(),
            )));
        }

        let role_payloads = self.resolve_role_payloads(&department_ids);
        let role_results = join_all(
            role_payloads
                .iter()
                .map(|payload| self.directory.create_role(payload)),
        )
        .await;
        let mut failed_roles = 0_usize;
        for (payload, result) in role_payloads.iter().zip(role_results) {
            if let Err(error) = result {
                failed_roles += 1;
                tracing::warn!(
                    error = %error,
                    role = %payload.name,
                    "role create failed during commit",
                );
            }
        }
        if failed_roles > 0 {
            return Err(DomainError::partial_commit(format!(
                "{failed_roles} of {} roles could not be created. \
                 The organization and its departments were registered.",
                role_payloads.len(),
            )));
        }

        self.step = WizardStep::Committed;
        self.confirmation = Some(CommitSummary {
            organization,
            departments_created: department_payloads.len(),
            roles_created: role_payloads.len(),
        });
        self.feedback.notify_success("Organization registered.");
        Ok(())
    }

    /// Map each role draft onto the persisted department identities.
    ///
    /// Identities come back keyed by name, the only stable attribute a
    /// draft and its persisted row share.
    fn resolve_role_payloads(&self, department_ids: &HashMap<String, Uuid>) -> Vec<NewRole> {
        let mut payloads = Vec::with_capacity(self.roles.len());
        for draft in &self.roles {
            let department_name = self
                .departments
                .iter()
                .find(|department| department.id == draft.department)
                .map(|department| department.name.as_str());
            let Some(department_name) = department_name else {
                // Unreachable while removal cascades; kept as a guard.
                tracing::error!(role = %draft.name, "role draft references a removed department");
                continue;
            };
            let Some(department_id) = department_ids.get(department_name).copied() else {
                tracing::error!(
                    role = %draft.name,
                    department = department_name,
                    "persisted department missing from the identity map",
                );
                continue;
            };
            payloads.push(NewRole {
                department_id,
                name: draft.name.clone(),
                priority: draft.priority.get(),
                capabilities: draft.capabilities,
            });
        }
        payloads
    }

    fn build_new_organization(&self) -> Result<NewOrganization, DomainError> {
        let identifier = OrgIdentifier::new(&self.form.identifier)
            .map_err(|error| DomainError::format_invalid(error.to_string()))?;
        let ceo_email = EmailAddress::new(&self.form.ceo_email)
            .map_err(|error| DomainError::format_invalid(error.to_string()))?;
        // The join code is issued exactly here: after the info step
        // validated, before the first persistence call.
        let join_code = JoinCode::generate(&mut SmallRng::from_entropy());
        Ok(NewOrganization {
            identifier,
            join_code,
            name: self.form.name.trim().to_owned(),
            ceo_email,
            ceo_password: self.form.password.clone(),
            phone: self.form.phone.trim().to_owned(),
            address: self.form.address.trim().to_owned(),
            logo_url: non_empty(&self.form.logo_url),
            website_url: non_empty(&self.form.website_url),
        })
    }

    fn allocate_draft(&mut self) -> DraftId {
        let id = DraftId(self.next_draft);
        self.next_draft += 1;
        id
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}

fn map_create_error(error: OrganizationDirectoryError) -> DomainError {
    match error {
        OrganizationDirectoryError::Rejected { message } => DomainError::conflict(message),
        other => {
            tracing::error!(error = %other, "organization create failed");
            DomainError::remote_unavailable(
                "Could not reach the directory service. Please try again.",
            )
        }
    }
}

#[cfg(test)]
mod tests;
