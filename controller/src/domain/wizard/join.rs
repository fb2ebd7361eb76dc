//! Employee join flow: one form, one commit.

use std::sync::Arc;

use mockable::Clock;
use uuid::Uuid;

use crate::domain::cascade::CascadeLoader;
use crate::domain::error::{DomainError, ErrorCode};
use crate::domain::feedback::Feedback;
use crate::domain::fields::Field;
use crate::domain::join_request::{JoinRequest, NewJoinRequest};
use crate::domain::ports::{
    NavTarget, Navigator, OrganizationDirectory, UserDirectory, UserDirectoryError,
};
use crate::domain::user::{DirectoryUser, NewUser};
use crate::domain::validation::{self, RequiredField};

/// Raw values of the employee join form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JoinForm {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Tagged field update for the join form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinField {
    FullName(String),
    Email(String),
    Password(String),
    ConfirmPassword(String),
}

impl JoinForm {
    /// Single reducer for every field update.
    pub fn apply(&mut self, update: JoinField) {
        match update {
            JoinField::FullName(value) => self.full_name = value,
            JoinField::Email(value) => self.email = value,
            JoinField::Password(value) => self.password = value,
            JoinField::ConfirmPassword(value) => self.confirm_password = value,
        }
    }
}

/// Outcome of a successful submission, held until acknowledged.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinConfirmation {
    pub user: DirectoryUser,
    pub join_request: JoinRequest,
}

/// Single-step employee registration backed by the cascading loader.
///
/// The organization choice is required; department and role stay optional
/// and are persisted as null when never chosen.
pub struct EmployeeRegistration<D, U, N> {
    users: Arc<U>,
    navigator: Arc<N>,
    feedback: Feedback,
    clock: Arc<dyn Clock>,
    cascade: CascadeLoader<D>,
    form: JoinForm,
    in_flight: bool,
    committed: bool,
    confirmation: Option<JoinConfirmation>,
}

impl<D, U, N> EmployeeRegistration<D, U, N>
where
    D: OrganizationDirectory,
    U: UserDirectory,
    N: Navigator,
{
    /// Build the flow; call [`EmployeeRegistration::start`] before use.
    pub fn new(
        directory: Arc<D>,
        users: Arc<U>,
        navigator: Arc<N>,
        feedback: Feedback,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            users,
            navigator,
            feedback: feedback.clone(),
            clock,
            cascade: CascadeLoader::new(directory, feedback),
            form: JoinForm::default(),
            in_flight: false,
            committed: false,
            confirmation: None,
        }
    }

    /// Load organizations, honouring an entry-point preselection.
    pub async fn start(&mut self, preselect: Option<Uuid>) {
        match preselect {
            Some(organization_id) => self.cascade.preselect(organization_id).await,
            None => self.cascade.load().await,
        }
    }

    /// The backing organization → department → role loader.
    pub fn cascade(&self) -> &CascadeLoader<D> {
        &self.cascade
    }

    /// Mutable access for search/selection interactions.
    pub fn cascade_mut(&mut self) -> &mut CascadeLoader<D> {
        &mut self.cascade
    }

    /// Raw form values.
    pub fn form(&self) -> &JoinForm {
        &self.form
    }

    /// The pending success confirmation, if the submission went through.
    pub fn confirmation(&self) -> Option<&JoinConfirmation> {
        self.confirmation.as_ref()
    }

    /// Apply a field update; ignored once committed.
    pub fn update(&mut self, update: JoinField) {
        if self.committed {
            return;
        }
        self.form.apply(update);
    }

    /// Validate and commit: create the account, then the join request.
    pub async fn submit(&mut self) {
        if self.in_flight || self.committed {
            return;
        }
        self.in_flight = true;
        let result = self.try_submit().await;
        self.in_flight = false;
        if let Err(error) = result {
            self.feedback.report(&error);
        }
    }

    /// Dismiss the success confirmation and navigate away.
    pub fn acknowledge(&mut self) {
        if self.confirmation.take().is_some() {
            self.navigator.navigate(NavTarget::Login);
        }
    }

    async fn try_submit(&mut self) -> Result<(), DomainError> {
        // An unresolved organization counts as missing even when search
        // text was typed; only a resolved selection satisfies the check.
        let organization = if self.cascade.selected().is_some() {
            "resolved"
        } else {
            ""
        };
        validation::require_all(
            &self.feedback,
            &[
                RequiredField::new(Field::FullName, &self.form.full_name),
                RequiredField::new(Field::Email, &self.form.email),
                RequiredField::new(Field::Password, &self.form.password),
                RequiredField::new(Field::ConfirmPassword, &self.form.confirm_password),
                RequiredField::new(Field::OrganizationSearch, organization),
            ],
        )?;
        validation::check_name(&self.feedback, Field::FullName, &self.form.full_name).map_err(
            |error| {
                self.form.full_name.clear();
                error
            },
        )?;
        let email = validation::check_email(&self.feedback, Field::Email, &self.form.email)
            .map_err(|error| {
                self.form.email.clear();
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
        validation::ensure_email_available(self.users.as_ref(), &self.feedback, Field::Email, &email)
            .await
            .map_err(|error| {
                if error.code() == ErrorCode::Conflict {
                    self.form.email.clear();
                }
                error
            })?;

        let organization_id = self
            .cascade
            .selected()
            .map(|organization| organization.id)
            .ok_or_else(|| {
                DomainError::missing_field(validation::missing_fields_message(&[
                    Field::OrganizationSearch,
                ]))
            })?;

        let new_user = NewUser::unapproved(
            self.form.full_name.trim(),
            email,
            self.form.password.clone(),
        );
        let user = self
            .users
            .create_user(&new_user)
            .await
            .map_err(map_user_create_error)?;

        let request = NewJoinRequest {
            user_id: user.id,
            organization_id,
            department_id: self.cascade.selected_department(),
            role_id: self.cascade.selected_role(),
            requested_at: self.clock.utc(),
        };
        let join_request = match self.users.create_join_request(&request).await {
            Ok(join_request) => join_request,
            Err(error) => {
                // The account row is already persisted and there is no
                // delete endpoint to compensate with.
                tracing::error!(
                    error = %error,
                    user = %user.id,
                    "join request failed after account creation",
                );
                return Err(DomainError::remote_unavailable(
                    "Your account was created but the join request could not be submitted. \
                     Please contact support.",
                ));
            }
        };

        self.committed = true;
        self.confirmation = Some(JoinConfirmation { user, join_request });
        self.feedback.notify_success(
            "Registration submitted. You can sign in once an administrator approves your request.",
        );
        Ok(())
    }
}

fn map_user_create_error(error: UserDirectoryError) -> DomainError {
    match error {
        UserDirectoryError::Rejected { message } => DomainError::conflict(message),
        other => {
            tracing::error!(error = %other, "account create failed");
            DomainError::remote_unavailable(
                "Could not reach the directory service. Please try again.",
            )
        }
    }
}
