//! Staff accounts.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Error, Role, UserId};

/// Minimum accepted password length for new or reset passwords.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Validation errors for account fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    InvalidEmail,
    EmptyName,
    PasswordTooShort { min: usize },
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEmail => write!(f, "email must be a valid address"),
            Self::EmptyName => write!(f, "name must not be empty"),
            Self::PasswordTooShort { min } => {
                write!(f, "password must be at least {min} characters")
            }
        }
    }
}

impl std::error::Error for UserValidationError {}

impl UserValidationError {
    /// Field the error refers to, in wire casing.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidEmail => "email",
            Self::EmptyName => "name",
            Self::PasswordTooShort { .. } => "password",
        }
    }
}

impl From<UserValidationError> for Error {
    fn from(err: UserValidationError) -> Self {
        let code = match &err {
            UserValidationError::InvalidEmail => "invalid_email",
            UserValidationError::EmptyName => "empty",
            UserValidationError::PasswordTooShort { .. } => "too_short",
        };
        Error::invalid_field(err.field(), code, err.to_string())
    }
}

/// Login email, trimmed and lowercased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and normalise an email address.
    ///
    /// # Examples
    /// ```
    /// use frontdesk::domain::EmailAddress;
    ///
    /// let email = EmailAddress::new("  Desk@HotelFountain.com ").unwrap();
    /// assert_eq!(email.as_ref(), "desk@hotelfountain.com");
    /// assert!(EmailAddress::new("desk").is_err());
    /// ```
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let normalised = raw.as_ref().trim().to_lowercase();
        let valid = normalised
            .split_once('@')
            .is_some_and(|(local, domain)| !local.is_empty() && !domain.is_empty());
        if valid && !normalised.contains(char::is_whitespace) {
            Ok(Self(normalised))
        } else {
            Err(UserValidationError::InvalidEmail)
        }
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

/// Staff account visible to the application. Password hashes never leave the
/// repository layer through this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub email: EmailAddress,
    pub name: String,
    pub role: Role,
}

impl User {
    /// Build a user after validating the display name.
    pub fn new(
        id: UserId,
        email: EmailAddress,
        name: impl Into<String>,
        role: Role,
    ) -> Result<Self, UserValidationError> {
        Ok(Self {
            id,
            email,
            name: validate_name(name)?,
            role,
        })
    }
}

pub(crate) fn validate_name(name: impl Into<String>) -> Result<String, UserValidationError> {
    let name = name.into();
    let trimmed = name.trim();
    if trimmed.is_empty() {
        Err(UserValidationError::EmptyName)
    } else {
        Ok(trimmed.to_owned())
    }
}

pub(crate) fn validate_password(password: &str) -> Result<(), UserValidationError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        Err(UserValidationError::PasswordTooShort {
            min: MIN_PASSWORD_LEN,
        })
    } else {
        Ok(())
    }
}
