//! Organization entity and its validated identifiers.

use std::fmt;
use std::sync::OnceLock;

use rand::Rng;
use regex::Regex;
use uuid::Uuid;

use crate::domain::email::EmailAddress;

/// Validation errors for organization identifiers and join codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrganizationValidationError {
    EmptyIdentifier,
    IdentifierFormat,
    JoinCodeLength { expected: usize },
    JoinCodeCharacters,
}

impl fmt::Display for OrganizationValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyIdentifier => write!(f, "organization identifier must not be empty"),
            Self::IdentifierFormat => write!(
                f,
                "organization identifier must match ORG-<LETTERS>-<LETTERS/DIGITS>",
            ),
            Self::JoinCodeLength { expected } => {
                write!(f, "join code must be exactly {expected} characters")
            }
            Self::JoinCodeCharacters => {
                write!(f, "join code may only contain uppercase letters and digits")
            }
        }
    }
}

impl std::error::Error for OrganizationValidationError {}

static ORG_IDENTIFIER_RE: OnceLock<Regex> = OnceLock::new();

fn org_identifier_regex() -> &'static Regex {
    ORG_IDENTIFIER_RE.get_or_init(|| {
        let pattern = "^ORG-[A-Z]+-[A-Z0-9]+$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("identifier regex failed to compile: {error}"))
    })
}

/// Human-entered organization identifier (`ORG-TECH-A7K4M` shape).
///
/// Immutable after commit; uppercase only, no normalisation is applied.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OrgIdentifier(String);

impl OrgIdentifier {
    /// Validate and construct an [`OrgIdentifier`].
    pub fn new(raw: impl AsRef<str>) -> Result<Self, OrganizationValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(OrganizationValidationError::EmptyIdentifier);
        }
        if !org_identifier_regex().is_match(trimmed) {
            return Err(OrganizationValidationError::IdentifierFormat);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for OrgIdentifier {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for OrgIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl TryFrom<String> for OrgIdentifier {
    type Error = OrganizationValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Length of a generated join code.
pub const JOIN_CODE_LEN: usize = 5;

const JOIN_CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// System-generated code employees use to locate an organization.
///
/// Issued exactly once per organization, after the organization form
/// validates and before any persistence call; never re-derived.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JoinCode(String);

impl JoinCode {
    /// Validate and construct a [`JoinCode`] from stored input.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, OrganizationValidationError> {
        let raw = raw.as_ref();
        if raw.chars().count() != JOIN_CODE_LEN {
            return Err(OrganizationValidationError::JoinCodeLength {
                expected: JOIN_CODE_LEN,
            });
        }
        if !raw
            .bytes()
            .all(|byte| JOIN_CODE_ALPHABET.contains(&byte))
        {
            return Err(OrganizationValidationError::JoinCodeCharacters);
        }
        Ok(Self(raw.to_owned()))
    }

    /// Generate a fresh code from the given randomness source.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let code = (0..JOIN_CODE_LEN)
            .map(|_| {
                let index = rng.gen_range(0..JOIN_CODE_ALPHABET.len());
                char::from(JOIN_CODE_ALPHABET[index])
            })
            .collect();
        Self(code)
    }
}

impl AsRef<str> for JoinCode {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for JoinCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// An organization as the directory returns it.
#[derive(Debug, Clone, PartialEq)]
pub struct Organization {
    /// Directory-assigned identity.
    pub id: Uuid,
    /// Human-entered identifier, immutable after commit.
    pub identifier: OrgIdentifier,
    /// Shareable join code, immutable after commit.
    pub join_code: JoinCode,
    pub name: String,
    pub ceo_email: EmailAddress,
    /// CEO credential as stored by the directory.
    pub ceo_password: String,
    pub phone: String,
    pub address: String,
    pub logo_url: Option<String>,
    pub website_url: Option<String>,
    pub employee_count: u32,
    pub department_count: u32,
}

/// Payload for the organization create call at wizard commit.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrganization {
    pub identifier: OrgIdentifier,
    pub join_code: JoinCode,
    pub name: String,
    pub ceo_email: EmailAddress,
    pub ceo_password: String,
    pub phone: String,
    pub address: String,
    pub logo_url: Option<String>,
    pub website_url: Option<String>,
}
