//! Two-path sign-in resolver.
//!
//! Every submit resolves the actor fresh: a CEO (the organization record
//! itself, finishing with an organization-code challenge on a second
//! submit) or an employee (password check, approval gate, attendance
//! clock-in, session write). Exactly one path is ever active; the
//! [`AuthPhase`] enum is the whole story.

use std::sync::{Arc, Mutex};

use crate::domain::credentials::LoginCredentials;
use crate::domain::email::EmailAddress;
use crate::domain::error::DomainError;
use crate::domain::feedback::{Feedback, TimerSet, Timings, lock};
use crate::domain::fields::Field;
use crate::domain::organization::Organization;
use crate::domain::ports::{
    AttendanceLog, ClockInRecord, NavTarget, Navigator, OrganizationDirectory, SessionStore,
    UserDirectory,
};
use crate::domain::session::SessionIdentity;
use crate::domain::validation::{self, RequiredField};

/// Observable resolver phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthPhase {
    /// Email/password entry.
    Credentials,
    /// CEO organization-code challenge is pending.
    CodeChallenge,
    /// Employee credentials were correct but the account awaits approval.
    PendingApproval,
}

/// Tagged field update for the sign-in form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthField {
    Email(String),
    Password(String),
    Code(String),
}

#[derive(Clone)]
enum Phase {
    Credentials,
    CodeChallenge { organization: Organization },
    PendingApproval,
}

struct AuthState {
    phase: Phase,
    email: String,
    password: String,
    code: String,
    fields_locked: bool,
    in_flight: bool,
    // Bumped on every phase transition; an armed reset timer only fires
    // against the generation it saw.
    generation: u64,
}

impl AuthState {
    fn fresh() -> Self {
        Self {
            phase: Phase::Credentials,
            email: String::new(),
            password: String::new(),
            code: String::new(),
            fields_locked: false,
            in_flight: false,
            generation: 0,
        }
    }

    fn reset_form(&mut self) {
        self.phase = Phase::Credentials;
        self.email.clear();
        self.password.clear();
        self.code.clear();
        self.fields_locked = false;
        self.generation += 1;
    }
}

/// The sign-in state machine.
pub struct AuthResolver<O, U, A, S, N> {
    organizations: Arc<O>,
    users: Arc<U>,
    attendance: Arc<A>,
    sessions: Arc<S>,
    navigator: Arc<N>,
    feedback: Feedback,
    timings: Timings,
    state: Arc<Mutex<AuthState>>,
    timers: TimerSet,
}

impl<O, U, A, S, N> AuthResolver<O, U, A, S, N>
where
    O: OrganizationDirectory + 'static,
    U: UserDirectory + 'static,
    A: AttendanceLog + 'static,
    S: SessionStore + 'static,
    N: Navigator + 'static,
{
    /// Build a resolver on the email/password phase.
    pub fn new(
        organizations: Arc<O>,
        users: Arc<U>,
        attendance: Arc<A>,
        sessions: Arc<S>,
        navigator: Arc<N>,
        feedback: Feedback,
    ) -> Self {
        let timings = feedback.timings();
        Self {
            organizations,
            users,
            attendance,
            sessions,
            navigator,
            feedback,
            timings,
            state: Arc::new(Mutex::new(AuthState::fresh())),
            timers: TimerSet::default(),
        }
    }

    /// Current phase.
    pub fn phase(&self) -> AuthPhase {
        match lock(&self.state).phase {
            Phase::Credentials => AuthPhase::Credentials,
            Phase::CodeChallenge { .. } => AuthPhase::CodeChallenge,
            Phase::PendingApproval => AuthPhase::PendingApproval,
        }
    }

    /// Current email field value.
    pub fn email(&self) -> String {
        lock(&self.state).email.clone()
    }

    /// Current password field value.
    pub fn password(&self) -> String {
        lock(&self.state).password.clone()
    }

    /// Current organization-code field value.
    pub fn code(&self) -> String {
        lock(&self.state).code.clone()
    }

    /// Whether the email/password fields are locked read-only.
    pub fn fields_locked(&self) -> bool {
        lock(&self.state).fields_locked
    }

    /// Apply a field update. Email/password edits are ignored while those
    /// fields are locked by a pending challenge.
    pub fn update(&self, update: AuthField) {
        let mut state = lock(&self.state);
        match update {
            AuthField::Email(value) => {
                if !state.fields_locked {
                    state.email = value;
                }
            }
            AuthField::Password(value) => {
                if !state.fields_locked {
                    state.password = value;
                }
            }
            AuthField::Code(value) => state.code = value,
        }
    }

    /// The stored session identity, consulted at startup.
    ///
    /// Storage failures read as "not authenticated".
    pub fn existing_session(&self) -> Option<SessionIdentity> {
        match self.sessions.load() {
            Ok(identity) => identity,
            Err(error) => {
                tracing::warn!(error = %error, "session load failed");
                None
            }
        }
    }

    /// Resolve the current submission.
    ///
    /// A submit while a previous one is still outstanding is ignored.
    pub async fn submit(&self) {
        let snapshot = {
            let mut state = lock(&self.state);
            if state.in_flight {
                return;
            }
            state.in_flight = true;
            (
                state.phase.clone(),
                state.email.clone(),
                state.password.clone(),
                state.code.clone(),
            )
        };
        let (phase, email, password, code) = snapshot;
        let result = match phase {
            Phase::CodeChallenge { organization } => self.resolve_code(&organization, &code),
            Phase::Credentials => self.resolve_credentials(&email, &password).await,
            // The pending-approval modal owns the screen; submits are inert.
            Phase::PendingApproval => Ok(()),
        };
        lock(&self.state).in_flight = false;
        if let Err(error) = result {
            self.feedback.report(&error);
        }
    }

    /// Forgot-password action: existence check plus a simulated reset
    /// notice. Delivery happens outside this core.
    pub async fn forgot_password(&self) {
        let email = lock(&self.state).email.clone();
        if let Err(error) = self.try_forgot_password(&email).await {
            self.feedback.report(&error);
        }
    }

    /// Pending-approval escape hatch: clear the form for another account.
    pub fn try_another_account(&self) {
        let mut state = lock(&self.state);
        if matches!(state.phase, Phase::PendingApproval) {
            state.reset_form();
        }
    }

    /// Pending-approval escape hatch: leave for the public landing page.
    pub fn go_home(&self) {
        let pending = matches!(lock(&self.state).phase, Phase::PendingApproval);
        if pending {
            self.navigator.navigate(NavTarget::Home);
        }
    }

    /// Abort outstanding reset/navigation timers. Call on teardown.
    pub fn shutdown(&self) {
        self.timers.shutdown();
    }

    fn resolve_code(&self, organization: &Organization, code: &str) -> Result<(), DomainError> {
        if code.as_bytes() != organization.join_code.as_ref().as_bytes() {
            let generation = {
                let mut state = lock(&self.state);
                state.code.clear();
                state.generation
            };
            self.feedback.flag_error(Field::OrganizationCode);
            self.arm_challenge_reset(generation);
            return Err(DomainError::credential_mismatch(
                "The organization code is incorrect.",
            ));
        }

        let identity = SessionIdentity::ceo(organization.id);
        self.persist_session(&identity)?;
        lock(&self.state).generation += 1;
        self.feedback.notify_success("Signed in.");
        self.arm_navigation(NavTarget::Dashboard);
        Ok(())
    }

    async fn resolve_credentials(&self, email: &str, password: &str) -> Result<(), DomainError> {
        validation::require_all(
            &self.feedback,
            &[
                RequiredField::new(Field::Email, email),
                RequiredField::new(Field::Password, password),
            ],
        )?;
        let credentials = LoginCredentials::try_from_parts(email, password)
            .map_err(|error| DomainError::missing_field(error.to_string()))?;

        let organizations = self.organizations.list_organizations().await.map_err(|error| {
            tracing::error!(error = %error, "organization lookup failed during sign-in");
            DomainError::remote_unavailable(
                "Could not reach the directory service. Please try again.",
            )
        })?;

        let ceo_match = organizations
            .into_iter()
            .find(|organization| organization.ceo_email.matches(credentials.email()));
        match ceo_match {
            Some(organization) => self.resolve_ceo(organization, &credentials),
            None => self.resolve_employee(&credentials).await,
        }
    }

    fn resolve_ceo(
        &self,
        organization: Organization,
        credentials: &LoginCredentials,
    ) -> Result<(), DomainError> {
        if organization.ceo_password != credentials.password() {
            lock(&self.state).password.clear();
            self.feedback.flag_error(Field::Password);
            return Err(DomainError::credential_mismatch("Incorrect password."));
        }
        {
            let mut state = lock(&self.state);
            state.fields_locked = true;
            state.phase = Phase::CodeChallenge { organization };
            state.generation += 1;
        }
        self.feedback
            .notify_info("Enter your organization code to finish signing in.");
        Ok(())
    }

    async fn resolve_employee(&self, credentials: &LoginCredentials) -> Result<(), DomainError> {
        let not_found = || {
            self.feedback.flag_error(Field::Email);
            DomainError::not_found("No account found for this email.")
        };

        let Ok(email) = EmailAddress::new(credentials.email()) else {
            return Err(not_found());
        };
        if !validation::remote_email_exists(self.users.as_ref(), &email).await? {
            return Err(not_found());
        }

        let users = self.users.list_users().await.map_err(|error| {
            tracing::error!(error = %error, "user lookup failed during sign-in");
            DomainError::remote_unavailable(
                "Could not reach the directory service. Please try again.",
            )
        })?;
        let Some(user) = users
            .into_iter()
            .find(|user| user.email.matches(credentials.email()))
        else {
            return Err(not_found());
        };

        if user.password != credentials.password() {
            lock(&self.state).password.clear();
            self.feedback.flag_error(Field::Password);
            return Err(DomainError::credential_mismatch(
                "Incorrect password. Use password recovery if you have forgotten it.",
            ));
        }

        if !user.approved {
            let mut state = lock(&self.state);
            state.phase = Phase::PendingApproval;
            state.generation += 1;
            return Ok(());
        }

        let Some(organization_id) = user.organization_id else {
            tracing::error!(user = %user.id, "approved account has no organization");
            return Err(DomainError::not_found(
                "Your account is not linked to an organization. Please contact support.",
            ));
        };

        let record = ClockInRecord {
            user_id: user.id,
            organization_id,
            department_id: user.department_id,
        };
        if let Err(error) = self.attendance.clock_in(&record).await {
            // Attendance is a side record, not an authentication factor.
            tracing::warn!(error = %error, user = %user.id, "clock-in failed during sign-in");
        }

        let identity = SessionIdentity::employee(&user, organization_id);
        self.persist_session(&identity)?;
        lock(&self.state).generation += 1;
        self.feedback.notify_success("Signed in.");
        self.arm_navigation(NavTarget::Dashboard);
        Ok(())
    }

    async fn try_forgot_password(&self, raw_email: &str) -> Result<(), DomainError> {
        validation::require_all(
            &self.feedback,
            &[RequiredField::new(Field::Email, raw_email)],
        )?;
        let email = validation::check_email(&self.feedback, Field::Email, raw_email)?;
        if !validation::remote_email_exists(self.users.as_ref(), &email).await? {
            self.feedback.flag_error(Field::Email);
            return Err(DomainError::not_found("This email is not registered."));
        }
        self.feedback
            .notify_success("A password reset link has been sent to your email.");
        Ok(())
    }

    fn persist_session(&self, identity: &SessionIdentity) -> Result<(), DomainError> {
        self.sessions.persist(identity).map_err(|error| {
            tracing::error!(error = %error, "session write failed");
            DomainError::remote_unavailable("Could not save your session. Please try again.")
        })
    }

    fn arm_challenge_reset(&self, generation: u64) {
        let state = Arc::clone(&self.state);
        let delay = self.timings.challenge_reset;
        self.timers.spawn(async move {
            tokio::time::sleep(delay).await;
            let mut state = lock(&state);
            if state.generation == generation && matches!(state.phase, Phase::CodeChallenge { .. })
            {
                state.reset_form();
            }
        });
    }

    fn arm_navigation(&self, target: NavTarget) {
        let navigator = Arc::clone(&self.navigator);
        let delay = self.timings.post_login_navigation;
        self.timers.spawn(async move {
            tokio::time::sleep(delay).await;
            navigator.navigate(target);
        });
    }
}
