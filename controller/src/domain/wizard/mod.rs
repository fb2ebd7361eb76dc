//! Registration wizard state machines.
//!
//! Two flows share the drafting and validation machinery: the three-step
//! organization onboarding wizard ([`OrgRegistrationWizard`]) and the
//! single-form employee join flow ([`EmployeeRegistration`]). Both
//! accumulate everything in memory and persist in one commit at the end.

mod join;
mod org;

pub use join::{EmployeeRegistration, JoinConfirmation, JoinField, JoinForm};
pub use org::{CommitSummary, OrgInfoField, OrgInfoForm, OrgRegistrationWizard, WizardStep};
