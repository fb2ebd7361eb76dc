//! Field validation engine.
//!
//! Validators take the shared [`Feedback`] handle so a rejected field is
//! flagged (error + one wiggle) at the point of failure. They return
//! [`DomainError`]s; the owning controller surfaces the error as a banner
//! and clears the offending stored value, since the controller owns the
//! form state. Re-validating an already-valid field set flags nothing and
//! produces no other observable side effect.

use url::Url;

use crate::domain::email::EmailAddress;
use crate::domain::error::DomainError;
use crate::domain::feedback::Feedback;
use crate::domain::fields::Field;
use crate::domain::organization::OrgIdentifier;
use crate::domain::ports::UserDirectory;

/// Minimum accepted password length.
pub const PASSWORD_MIN_LEN: usize = 6;

/// A required field paired with its current raw value.
#[derive(Debug, Clone, Copy)]
pub struct RequiredField<'a> {
    pub field: Field,
    pub value: &'a str,
}

impl<'a> RequiredField<'a> {
    pub fn new(field: Field, value: &'a str) -> Self {
        Self { field, value }
    }

    fn is_missing(&self) -> bool {
        self.value.trim().is_empty()
    }
}

/// Aggregate message for a set of missing fields.
///
/// Singular phrasing for one field, "X and Y" for two, and an
/// Oxford-comma list for three or more.
pub fn missing_fields_message(missing: &[Field]) -> String {
    let labels: Vec<&str> = missing.iter().map(|field| field.label()).collect();
    match labels.as_slice() {
        [] => String::new(),
        [only] => format!("{only} is required."),
        [first, second] => format!("{first} and {second} are required."),
        [head @ .., last] => format!("{}, and {last} are required.", head.join(", ")),
    }
}

/// Check every listed required field, flagging each missing one.
///
/// All missing fields of a submission are collected and reported together
/// as one aggregated [`ErrorCode::MissingField`](crate::domain::error::ErrorCode::MissingField)
/// error.
pub fn require_all(feedback: &Feedback, fields: &[RequiredField<'_>]) -> Result<(), DomainError> {
    let missing: Vec<Field> = fields
        .iter()
        .filter(|required| required.is_missing())
        .map(|required| required.field)
        .collect();
    if missing.is_empty() {
        return Ok(());
    }
    for field in &missing {
        feedback.flag_error(*field);
    }
    Err(DomainError::missing_field(missing_fields_message(&missing)))
}

/// Validate the human-entered organization identifier shape.
pub fn check_org_identifier(
    feedback: &Feedback,
    value: &str,
) -> Result<OrgIdentifier, DomainError> {
    OrgIdentifier::new(value).map_err(|_| {
        feedback.flag_error(Field::OrgIdentifier);
        DomainError::format_invalid(
            "Organization ID must look like ORG-TECH-A7K4M (uppercase letters and digits).",
        )
    })
}

/// Validate an email field's shape.
pub fn check_email(
    feedback: &Feedback,
    field: Field,
    value: &str,
) -> Result<EmailAddress, DomainError> {
    EmailAddress::new(value).map_err(|_| {
        feedback.flag_error(field);
        DomainError::format_invalid(format!("{} must be a valid email address.", field.label()))
    })
}

/// Names must start with an alphabetic character.
pub fn check_name(feedback: &Feedback, field: Field, value: &str) -> Result<(), DomainError> {
    let starts_alphabetic = value
        .trim()
        .chars()
        .next()
        .is_some_and(char::is_alphabetic);
    if starts_alphabetic {
        return Ok(());
    }
    feedback.flag_error(field);
    Err(DomainError::format_invalid(format!(
        "{} must start with a letter.",
        field.label()
    )))
}

/// Cross-field password check: equal pair, minimum length.
///
/// On failure both password fields are flagged together; the caller clears
/// both stored values.
pub fn check_password_pair(
    feedback: &Feedback,
    password: &str,
    confirmation: &str,
) -> Result<(), DomainError> {
    let message = if password.chars().count() < PASSWORD_MIN_LEN {
        format!("Password must be at least {PASSWORD_MIN_LEN} characters.")
    } else if password != confirmation {
        "Passwords do not match.".to_owned()
    } else {
        return Ok(());
    };
    feedback.flag_error(Field::Password);
    feedback.flag_error(Field::ConfirmPassword);
    Err(DomainError::format_invalid(message))
}

/// Optional URL fields: emptiness is always valid, anything else must
/// parse.
pub fn check_optional_url(
    feedback: &Feedback,
    field: Field,
    value: &str,
) -> Result<Option<String>, DomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    match Url::parse(trimmed) {
        Ok(url) => Ok(Some(url.into())),
        Err(_) => {
            feedback.flag_error(field);
            Err(DomainError::format_invalid(format!(
                "{} must be a well-formed URL.",
                field.label()
            )))
        }
    }
}

/// Remote email-existence lookup with the service failure folded into a
/// distinct transient error.
pub async fn remote_email_exists<U>(users: &U, email: &EmailAddress) -> Result<bool, DomainError>
where
    U: UserDirectory + ?Sized,
{
    users.email_exists(email).await.map_err(|error| {
        tracing::warn!(error = %error, "email existence lookup failed");
        DomainError::remote_unavailable("Could not verify the email address right now.")
    })
}

/// Registration gate: the email must not belong to an existing account.
pub async fn ensure_email_available<U>(
    users: &U,
    feedback: &Feedback,
    field: Field,
    email: &EmailAddress,
) -> Result<(), DomainError>
where
    U: UserDirectory + ?Sized,
{
    if remote_email_exists(users, email).await? {
        feedback.flag_error(field);
        return Err(DomainError::conflict("This email is already registered."));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::{MockUserDirectory, UserDirectoryError};
    use crate::domain::error::ErrorCode;
    use rstest::rstest;

    fn feedback() -> Feedback {
        Feedback::default()
    }

    #[rstest]
    #[case(&[Field::OrgName], "Organization name is required.")]
    #[case(&[Field::OrgName, Field::CeoEmail], "Organization name and CEO email are required.")]
    #[case(
        &[Field::OrgName, Field::CeoEmail, Field::Phone],
        "Organization name, CEO email, and Phone number are required."
    )]
    #[case(
        &[Field::OrgIdentifier, Field::OrgName, Field::CeoEmail, Field::Address],
        "Organization ID, Organization name, CEO email, and Address are required."
    )]
    fn missing_field_phrasing(#[case] missing: &[Field], #[case] expected: &str) {
        assert_eq!(missing_fields_message(missing), expected);
    }

    #[tokio::test]
    async fn require_all_collects_every_missing_field() {
        let feedback = feedback();
        let error = require_all(
            &feedback,
            &[
                RequiredField::new(Field::FullName, "  "),
                RequiredField::new(Field::Email, "a@b.co"),
                RequiredField::new(Field::Password, ""),
            ],
        )
        .expect_err("two fields are missing");

        assert_eq!(error.code(), ErrorCode::MissingField);
        assert_eq!(
            error.message(),
            "Full name and Password are required."
        );
        assert!(feedback.flags(Field::FullName).error);
        assert!(feedback.flags(Field::Password).error);
        assert!(!feedback.flags(Field::Email).error);
    }

    #[tokio::test]
    async fn revalidating_a_valid_set_has_no_side_effects() {
        let feedback = feedback();
        for _ in 0..2 {
            require_all(
                &feedback,
                &[
                    RequiredField::new(Field::FullName, "Ada"),
                    RequiredField::new(Field::Email, "ada@example.com"),
                ],
            )
            .expect("all fields present");
        }
        assert!(feedback.is_clean());
        assert!(feedback.notification().is_none());
    }

    #[tokio::test]
    async fn lowercase_identifier_is_rejected() {
        let feedback = feedback();
        let error = check_org_identifier(&feedback, "ORG-tech-1").expect_err("lowercase fails");
        assert_eq!(error.code(), ErrorCode::FormatInvalid);
        assert!(feedback.flags(Field::OrgIdentifier).error);

        check_org_identifier(&feedback, "ORG-TECH-A7K4M").expect("uppercase passes");
    }

    #[rstest]
    #[case("abc123", "abc124", true)]
    #[case("abc123", "abc123", false)]
    #[case("abc", "abc", true)]
    #[tokio::test]
    async fn password_pair_rules(
        #[case] password: &str,
        #[case] confirmation: &str,
        #[case] should_fail: bool,
    ) {
        let feedback = feedback();
        let result = check_password_pair(&feedback, password, confirmation);
        if should_fail {
            result.expect_err("pair must fail");
            assert!(feedback.flags(Field::Password).error);
            assert!(feedback.flags(Field::ConfirmPassword).error);
        } else {
            result.expect("pair must pass");
            assert!(feedback.is_clean());
        }
    }

    #[rstest]
    #[case("", None)]
    #[case("   ", None)]
    #[case("https://example.com/logo.png", Some("https://example.com/logo.png"))]
    #[tokio::test]
    async fn optional_urls_accept_emptiness(
        #[case] value: &str,
        #[case] expected: Option<&str>,
    ) {
        let feedback = feedback();
        let parsed = check_optional_url(&feedback, Field::LogoUrl, value).expect("value is valid");
        assert_eq!(parsed.as_deref(), expected);
    }

    #[tokio::test]
    async fn malformed_url_flags_the_field() {
        let feedback = feedback();
        let error =
            check_optional_url(&feedback, Field::LogoUrl, "not a url").expect_err("must fail");
        assert_eq!(error.code(), ErrorCode::FormatInvalid);
        assert!(feedback.flags(Field::LogoUrl).error);
    }

    #[tokio::test]
    async fn taken_email_is_a_conflict() {
        let mut users = MockUserDirectory::new();
        users.expect_email_exists().return_once(|_| Ok(true));
        let feedback = feedback();
        let email = EmailAddress::new("taken@example.com").expect("fixture email");

        let error = ensure_email_available(&users, &feedback, Field::CeoEmail, &email)
            .await
            .expect_err("taken email conflicts");
        assert_eq!(error.code(), ErrorCode::Conflict);
        assert!(feedback.flags(Field::CeoEmail).error);
    }

    #[tokio::test]
    async fn lookup_failure_is_distinct_from_validation() {
        let mut users = MockUserDirectory::new();
        users
            .expect_email_exists()
            .return_once(|_| Err(UserDirectoryError::transport("connection refused")));
        let feedback = feedback();
        let email = EmailAddress::new("someone@example.com").expect("fixture email");

        let error = ensure_email_available(&users, &feedback, Field::CeoEmail, &email)
            .await
            .expect_err("lookup failure surfaces");
        assert_eq!(error.code(), ErrorCode::RemoteUnavailable);
        assert!(
            !feedback.flags(Field::CeoEmail).error,
            "a service failure is not a field error"
        );
    }
}
