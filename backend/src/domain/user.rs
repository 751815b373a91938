//! User accounts and role membership.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::UserId;

/// Validation errors returned by [`Email::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EmailValidationError {
    /// Nothing but whitespace was supplied.
    #[error("email must not be empty")]
    Empty,
    /// The address has no `@`.
    #[error("email must contain '@'")]
    MissingAt,
}

/// Email address identifying an account.
///
/// Stored trimmed. The only shape rule is the presence of `@`; anything
/// stricter belongs to a mail provider, not to enrollment.
///
/// # Examples
/// ```
/// use learnhub::domain::Email;
///
/// let email = Email::new("  ada@example.org ").expect("valid email");
/// assert_eq!(email.as_ref(), "ada@example.org");
/// assert_eq!(email.local_part(), "ada");
/// assert!(Email::new("ada.example.org").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
#[schema(value_type = String, example = "ada@example.org")]
pub struct Email(String);

impl Email {
    /// Validate and normalise an address.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, EmailValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(EmailValidationError::Empty);
        }
        if !trimmed.contains('@') {
            return Err(EmailValidationError::MissingAt);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Text before the first `@`.
    #[must_use]
    pub fn local_part(&self) -> &str {
        self.0.split('@').next().unwrap_or_default()
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Email {
    type Error = EmailValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

/// Role names stored in the `roles` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Role {
    /// Learner enrolled in courses.
    Student,
    /// Instructor assignable to courses.
    Trainer,
    /// Back-office operator.
    Admin,
}

impl Role {
    /// Name as stored in `roles.role_name`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Student => "Student",
            Self::Trainer => "Trainer",
            Self::Admin => "Admin",
        }
    }
}

/// Raised when a stored role name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role '{0}'")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Student" => Ok(Self::Student),
            "Trainer" => Ok(Self::Trainer),
            "Admin" => Ok(Self::Admin),
            other => Err(UnknownRole(other.to_owned())),
        }
    }
}

/// Registered account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Surrogate key.
    pub id: UserId,
    /// Unique login address.
    pub email: Email,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Optional contact number.
    pub phone_number: Option<String>,
    /// Optional age in years.
    pub age: Option<i32>,
    /// Optional free-text location.
    pub location: Option<String>,
    /// Optional free-text experience summary.
    pub experience: Option<String>,
    /// Account creation time.
    pub created_at: DateTime<Utc>,
    /// Last profile change.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Name shown in the portal header.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_owned()
    }
}

/// Account to be created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    /// Unique login address.
    pub email: Email,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Role granted on creation.
    pub role: Role,
}

impl NewUser {
    /// Student account created on first login with an unknown email.
    ///
    /// The first name is the address's local part and the last name is the
    /// placeholder `User`, mirroring the portal's signup-on-login flow.
    #[must_use]
    pub fn learner_from_email(email: Email) -> Self {
        let first_name = email.local_part().to_owned();
        Self {
            email,
            first_name,
            last_name: "User".to_owned(),
            role: Role::Student,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", EmailValidationError::Empty)]
    #[case("   ", EmailValidationError::Empty)]
    #[case("learner.example.org", EmailValidationError::MissingAt)]
    fn rejects_invalid_emails(#[case] raw: &str, #[case] expected: EmailValidationError) {
        assert_eq!(Email::new(raw).expect_err("invalid email"), expected);
    }

    #[rstest]
    fn learner_signup_derives_names_from_email() {
        let email = Email::new("grace.hopper@navy.example").expect("valid email");
        let new_user = NewUser::learner_from_email(email);
        assert_eq!(new_user.first_name, "grace.hopper");
        assert_eq!(new_user.last_name, "User");
        assert_eq!(new_user.role, Role::Student);
    }

    #[rstest]
    #[case(Role::Student)]
    #[case(Role::Trainer)]
    #[case(Role::Admin)]
    fn role_names_parse_back(#[case] role: Role) {
        assert_eq!(role.as_str().parse::<Role>(), Ok(role));
    }

    #[rstest]
    fn unknown_role_is_reported() {
        assert_eq!(
            "Manager".parse::<Role>(),
            Err(UnknownRole("Manager".to_owned()))
        );
    }
}
