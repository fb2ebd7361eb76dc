//! Form field identities shared by the validation engine and controllers.

use std::fmt;

/// Closed set of named form fields across the registration and sign-in
/// flows.
///
/// Feedback marking and the form update reducers are keyed on this enum
/// rather than on field-name strings, so adding a field forces every match
/// that must handle it to be revisited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Human-entered organization identifier (`ORG-…`).
    OrgIdentifier,
    /// Organization display name.
    OrgName,
    /// CEO account email on the organization form.
    CeoEmail,
    /// Password on any form that carries one.
    Password,
    /// Password confirmation paired with [`Field::Password`].
    ConfirmPassword,
    /// Organization contact phone number.
    Phone,
    /// Organization postal address.
    Address,
    /// Optional organization logo URL.
    LogoUrl,
    /// Optional organization website URL.
    WebsiteUrl,
    /// Employee full name.
    FullName,
    /// Employee or sign-in email.
    Email,
    /// Free-typed organization search box on the employee form.
    OrganizationSearch,
    /// Department name in the wizard mini-form.
    DepartmentName,
    /// Role name in the wizard mini-form.
    RoleName,
    /// Role priority in the wizard mini-form.
    RolePriority,
    /// Organization code entered during the CEO sign-in challenge.
    OrganizationCode,
}

impl Field {
    /// Label used in aggregated user-facing messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::OrgIdentifier => "Organization ID",
            Self::OrgName => "Organization name",
            Self::CeoEmail => "CEO email",
            Self::Password => "Password",
            Self::ConfirmPassword => "Password confirmation",
            Self::Phone => "Phone number",
            Self::Address => "Address",
            Self::LogoUrl => "Logo URL",
            Self::WebsiteUrl => "Website URL",
            Self::FullName => "Full name",
            Self::Email => "Email",
            Self::OrganizationSearch => "Organization",
            Self::DepartmentName => "Department name",
            Self::RoleName => "Role name",
            Self::RolePriority => "Role priority",
            Self::OrganizationCode => "Organization code",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
