//! User data model: identifiers, roles and the stored account record.
//!
//! Value types validate on construction so commands and reconstituted rows
//! share a single set of rules. [`User`] deliberately does not implement
//! `Serialize`; adapters expose accounts through an explicit projection that
//! never carries the password hash.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Validation errors raised by the user value types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    #[error("user id must be a valid UUID")]
    InvalidId,
    #[error("studentId is required")]
    EmptyStudentId,
    #[error("studentId must be {min}-{max} characters of letters, digits, '_' or '-'")]
    InvalidStudentId { min: usize, max: usize },
    #[error("email is required")]
    EmptyEmail,
    #[error("email must look like name@domain")]
    InvalidEmail,
    #[error("name is required")]
    EmptyName,
    #[error("name must be {min}-{max} characters")]
    NameLength { min: usize, max: usize },
    #[error("name must start with a letter and contain only letters, spaces, '.', ''' or '-'")]
    NameInvalidCharacters,
    #[error("{field} is required")]
    MissingField { field: &'static str },
    #[error("password must be at least {min} characters")]
    PasswordTooShort { min: usize },
    #[error("role must be 'student' or 'admin'")]
    UnknownRole,
}

impl UserValidationError {
    /// Name of the request field the error relates to.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidId => "id",
            Self::EmptyStudentId | Self::InvalidStudentId { .. } => "studentId",
            Self::EmptyEmail | Self::InvalidEmail => "email",
            Self::EmptyName | Self::NameLength { .. } | Self::NameInvalidCharacters => "name",
            Self::MissingField { field } => *field,
            Self::PasswordTooShort { .. } => "password",
            Self::UnknownRole => "role",
        }
    }
}

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = String, format = Uuid)]
pub struct UserId(Uuid);

impl UserId {
    /// Validate and construct a [`UserId`] from its textual form.
    ///
    /// # Errors
    /// Returns [`UserValidationError::InvalidId`] for non-UUID input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        Uuid::parse_str(id.as_ref())
            .map(Self)
            .map_err(|_| UserValidationError::InvalidId)
    }

    /// Generate a new random [`UserId`].
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for UserId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Account role used by the authorization gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Admin,
}

impl Role {
    /// Wire and storage representation.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UserValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "student" => Ok(Self::Student),
            "admin" => Ok(Self::Admin),
            _ => Err(UserValidationError::UnknownRole),
        }
    }
}

/// Minimum length of a student identifier.
pub const STUDENT_ID_MIN: usize = 4;
/// Maximum length of a student identifier.
pub const STUDENT_ID_MAX: usize = 20;

static STUDENT_ID_RE: OnceLock<Regex> = OnceLock::new();

fn student_id_regex() -> &'static Regex {
    STUDENT_ID_RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9_-]{4,20}$")
            .unwrap_or_else(|error| panic!("student id regex failed to compile: {error}"))
    })
}

/// Institution-issued student identifier, unique across accounts.
///
/// # Examples
/// ```
/// use complaints::domain::StudentId;
///
/// let id = StudentId::new(" stu01 ").expect("valid student id");
/// assert_eq!(id.as_ref(), "stu01");
/// assert!(StudentId::new("ab").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StudentId(String);

impl StudentId {
    /// Trim and validate a student identifier.
    ///
    /// # Errors
    /// Rejects blank input and anything outside 4-20 characters of
    /// `[A-Za-z0-9_-]`.
    pub fn new(value: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyStudentId);
        }
        if !student_id_regex().is_match(trimmed) {
            return Err(UserValidationError::InvalidStudentId {
                min: STUDENT_ID_MIN,
                max: STUDENT_ID_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for StudentId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lower-cased email address, unique across accounts.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    /// Trim, lower-case and sanity-check an email address.
    ///
    /// # Errors
    /// Rejects blank input and values without a local part and domain.
    pub fn new(value: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let normalised = value.as_ref().trim().to_lowercase();
        if normalised.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        let well_formed = normalised
            .split_once('@')
            .is_some_and(|(local, domain)| {
                !local.is_empty() && !domain.is_empty() && !domain.contains('@')
            })
            && !normalised.chars().any(char::is_whitespace);
        if !well_formed {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(normalised))
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Minimum length of a person's display name.
pub const NAME_MIN: usize = 2;
/// Maximum length of a person's display name.
pub const NAME_MAX: usize = 60;

static PERSON_NAME_RE: OnceLock<Regex> = OnceLock::new();

fn person_name_regex() -> &'static Regex {
    PERSON_NAME_RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z][A-Za-z\s.'-]*$")
            .unwrap_or_else(|error| panic!("person name regex failed to compile: {error}"))
    })
}

/// Display name of an account holder.
///
/// ## Invariants
/// - 2-60 characters once trimmed.
/// - Starts with an ASCII letter; otherwise only ASCII letters, whitespace,
///   `.`, `'` and `-`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonName(String);

impl PersonName {
    /// Trim and validate a display name.
    ///
    /// # Errors
    /// Returns the first rule the value violates.
    pub fn new(value: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyName);
        }

        let length = trimmed.chars().count();
        if !(NAME_MIN..=NAME_MAX).contains(&length) {
            return Err(UserValidationError::NameLength {
                min: NAME_MIN,
                max: NAME_MAX,
            });
        }

        if !person_name_regex().is_match(trimmed) {
            return Err(UserValidationError::NameInvalidCharacters);
        }

        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for PersonName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for PersonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Salted one-way password hash in PHC string format.
///
/// Never serialised; `Debug` output is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap an encoded hash produced by a [`PasswordHasher`](crate::domain::ports::PasswordHasher).
    #[must_use]
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Encoded PHC string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}

/// Stored account record.
///
/// ## Invariants
/// - At least one of `student_id` or `email` is present.
/// - Student accounts carry `student_id`, `department` and `class_level`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub role: Role,
    pub name: PersonName,
    pub student_id: Option<StudentId>,
    pub email: Option<Email>,
    pub department: Option<String>,
    pub class_level: Option<String>,
    pub password_hash: PasswordHash,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated payload for registering a student account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStudent {
    pub student_id: StudentId,
    pub name: PersonName,
    pub department: String,
    pub class_level: String,
}

impl NewStudent {
    /// Validate the raw registration fields.
    ///
    /// # Errors
    /// Returns the first validation failure, naming the offending field.
    pub fn try_from_parts(
        student_id: &str,
        name: &str,
        department: &str,
        class_level: &str,
    ) -> Result<Self, UserValidationError> {
        Ok(Self {
            student_id: StudentId::new(student_id)?,
            name: PersonName::new(name)?,
            department: required_text(department, "department")?,
            class_level: required_text(class_level, "classLevel")?,
        })
    }
}

fn required_text(value: &str, field: &'static str) -> Result<String, UserValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(UserValidationError::MissingField { field });
    }
    Ok(trimmed.to_owned())
}

/// Validated payload for bootstrapping an administrator account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAdmin {
    pub email: Email,
    pub name: PersonName,
}

impl NewAdmin {
    /// Validate the raw administrator fields.
    ///
    /// # Errors
    /// Returns the first validation failure, naming the offending field.
    pub fn try_from_parts(email: &str, name: &str) -> Result<Self, UserValidationError> {
        Ok(Self {
            email: Email::new(email)?,
            name: PersonName::new(name)?,
        })
    }
}
