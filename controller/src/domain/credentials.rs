//! Sign-in credential primitives.
//!
//! Constructed only after the resolver's aggregate required-field check has
//! passed, so the constructor enforces the same invariants defensively
//! rather than producing user-facing messages.

use std::fmt;

use zeroize::Zeroizing;

/// Domain error returned when sign-in payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialsError {
    /// Email was missing or blank once trimmed.
    EmptyEmail,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for CredentialsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for CredentialsError {}

/// Validated sign-in credentials.
///
/// ## Invariants
/// - `email` is trimmed and non-empty after trimming.
/// - `password` is non-empty but keeps caller-provided whitespace, to avoid
///   surprising credential comparisons.
///
/// The password buffer is zeroed on drop.
#[derive(Debug, Clone)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, CredentialsError> {
        let normalized = email.trim();
        if normalized.is_empty() {
            return Err(CredentialsError::EmptyEmail);
        }
        if password.is_empty() {
            return Err(CredentialsError::EmptyPassword);
        }
        Ok(Self {
            email: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Email string suitable for account lookups.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password exactly as the caller provided it.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw", CredentialsError::EmptyEmail)]
    #[case("   ", "pw", CredentialsError::EmptyEmail)]
    #[case("ceo@example.com", "", CredentialsError::EmptyPassword)]
    fn invalid_credentials(
        #[case] email: &str,
        #[case] password: &str,
        #[case] expected: CredentialsError,
    ) {
        let err =
            LoginCredentials::try_from_parts(email, password).expect_err("invalid inputs fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    #[case("  ceo@example.com  ", "secret1")]
    #[case("worker@example.com", " spaced password ")]
    fn valid_credentials_trim_email_only(#[case] email: &str, #[case] password: &str) {
        let creds =
            LoginCredentials::try_from_parts(email, password).expect("valid inputs succeed");
        assert_eq!(creds.email(), email.trim());
        assert_eq!(creds.password(), password);
    }
}
