//! Domain types, validation, and the flow controllers.
//!
//! Purpose: everything with real conditional/state complexity lives here —
//! the validation engine, the cascading dependent-data loader, the
//! registration wizard state machines, and the sign-in resolver — together
//! with the entities they operate on and the ports they drive.

pub mod auth;
pub mod cascade;
pub mod credentials;
pub mod department;
pub mod email;
pub mod error;
pub mod feedback;
pub mod fields;
pub mod join_request;
pub mod organization;
pub mod ports;
pub mod role;
pub mod session;
pub mod user;
pub mod validation;
pub mod wizard;

pub use self::auth::{AuthField, AuthPhase, AuthResolver};
pub use self::cascade::CascadeLoader;
pub use self::credentials::{CredentialsError, LoginCredentials};
pub use self::department::{Department, DepartmentDraft, DraftId, NewDepartment};
pub use self::email::{EmailAddress, EmailValidationError};
pub use self::error::{DomainError, ErrorCode};
pub use self::feedback::{Feedback, FieldFlags, Notification, NotificationKind, Timings};
pub use self::fields::Field;
pub use self::join_request::{JoinRequest, JoinRequestStatus, NewJoinRequest};
pub use self::organization::{
    JoinCode, NewOrganization, OrgIdentifier, Organization, OrganizationValidationError,
};
pub use self::role::{NewRole, Role, RoleCapabilities, RoleDraft, RolePriority};
pub use self::session::{SessionIdentity, UserType};
pub use self::user::{DirectoryUser, NewUser};
pub use self::wizard::{
    CommitSummary, EmployeeRegistration, JoinConfirmation, JoinField, JoinForm, OrgInfoField,
    OrgInfoForm, OrgRegistrationWizard, WizardStep,
};
