//! Domain-level error payloads.
//!
//! Every failure a controller surfaces to the user travels as a
//! [`DomainError`]: a stable [`ErrorCode`] plus a human-readable message and
//! optional structured details. Port-level errors are mapped into this shape
//! at the controller boundary; nothing here is transport specific.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Stable machine-readable code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// A required field was empty or whitespace-only.
    MissingField,
    /// A field failed a pattern, email, or URL shape check.
    FormatInvalid,
    /// The submission collides with an existing record (email in use).
    Conflict,
    /// The referenced email, organization, or account does not exist.
    NotFound,
    /// A password or organization code did not match.
    CredentialMismatch,
    /// The Directory Service could not be reached or answered garbage.
    RemoteUnavailable,
    /// Some, but not all, rows of a batch commit were persisted.
    PartialCommitFailure,
}

/// User-facing error produced by the validation engine and controllers.
///
/// ## Invariants
/// - `message` is non-empty once trimmed of whitespace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainError {
    code: ErrorCode,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

/// Validation errors emitted by the [`DomainError`] constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainErrorValidationError {
    EmptyMessage,
}

impl std::fmt::Display for DomainErrorValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyMessage => write!(f, "error message must not be empty"),
        }
    }
}

impl std::error::Error for DomainErrorValidationError {}

impl DomainError {
    /// Create a new error, panicking if validation fails.
    ///
    /// Reserved for call sites with compile-time constant messages; prefer
    /// [`DomainError::try_new`] when the message is assembled at runtime.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        match Self::try_new(code, message) {
            Ok(value) => value,
            Err(err) => panic!("error messages must satisfy validation: {err}"),
        }
    }

    /// Fallible constructor that validates the message content.
    pub fn try_new(
        code: ErrorCode,
        message: impl Into<String>,
    ) -> Result<Self, DomainErrorValidationError> {
        let message = message.into();
        if message.trim().is_empty() {
            return Err(DomainErrorValidationError::EmptyMessage);
        }
        Ok(Self {
            code,
            message,
            details: None,
        })
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message shown in the notification banner.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Supplementary structured details, if any.
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Attach structured details to the error.
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Convenience constructor for [`ErrorCode::MissingField`].
    pub fn missing_field(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::MissingField, message)
    }

    /// Convenience constructor for [`ErrorCode::FormatInvalid`].
    pub fn format_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::FormatInvalid, message)
    }

    /// Convenience constructor for [`ErrorCode::Conflict`].
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Conflict, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::CredentialMismatch`].
    pub fn credential_mismatch(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::CredentialMismatch, message)
    }

    /// Convenience constructor for [`ErrorCode::RemoteUnavailable`].
    pub fn remote_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::RemoteUnavailable, message)
    }

    /// Convenience constructor for [`ErrorCode::PartialCommitFailure`].
    pub fn partial_commit(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::PartialCommitFailure, message)
    }
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for DomainError {}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(ErrorCode::MissingField, "missing_field")]
    #[case(ErrorCode::CredentialMismatch, "credential_mismatch")]
    #[case(ErrorCode::PartialCommitFailure, "partial_commit_failure")]
    fn codes_serialize_as_snake_case(#[case] code: ErrorCode, #[case] expected: &str) {
        let serialized = serde_json::to_value(code).expect("code serializes");
        assert_eq!(serialized, json!(expected));
    }

    #[test]
    fn rejects_blank_messages() {
        let err = DomainError::try_new(ErrorCode::NotFound, "   ").expect_err("blank must fail");
        assert_eq!(err, DomainErrorValidationError::EmptyMessage);
    }

    #[test]
    fn details_round_trip() {
        let error = DomainError::conflict("email in use").with_details(json!({ "field": "email" }));
        assert_eq!(error.code(), ErrorCode::Conflict);
        assert_eq!(
            error.details().and_then(|d| d.get("field")),
            Some(&json!("email"))
        );
    }
}
