//! Guest ledger records and ID verification state.

use serde::{Deserialize, Serialize};

use super::labels::labelled_enum;
use super::{Error, GuestId, Money};

/// City recorded when the desk leaves the field blank.
pub const DEFAULT_CITY: &str = "Dhaka";
/// Country recorded when the desk leaves the field blank.
pub const DEFAULT_COUNTRY: &str = "Bangladesh";

labelled_enum! {
    /// Identity document presented at registration.
    pub enum IdType ("id type") {
        Nid => "NID",
        Passport => "Passport",
        BirthCertificate => "Birth Certificate",
        DrivingLicense => "Driving License",
    }
}

impl Default for IdType {
    fn default() -> Self {
        Self::Nid
    }
}

/// Validation failures for guest input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GuestValidationError {
    #[error("guest name must not be empty")]
    EmptyName,
    #[error("guest phone must not be empty")]
    EmptyPhone,
    #[error("guest email must contain '@'")]
    InvalidEmail,
    #[error("outstanding balance must not be negative")]
    NegativeBalance,
    #[error("id image must not be empty")]
    EmptyIdImage,
}

impl From<GuestValidationError> for Error {
    fn from(err: GuestValidationError) -> Self {
        let (field, code) = match &err {
            GuestValidationError::EmptyName => ("name", "empty"),
            GuestValidationError::EmptyPhone => ("phone", "empty"),
            GuestValidationError::InvalidEmail => ("email", "invalid"),
            GuestValidationError::NegativeBalance => ("outstandingBalance", "negative"),
            GuestValidationError::EmptyIdImage => ("idImageUrl", "empty"),
        };
        Error::invalid_field(field, code, err.to_string())
    }
}

/// Registered guest.
///
/// `id_image_url` doubles as the verification flag: a guest without one may
/// hold a reservation but cannot be checked in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Guest {
    pub id: GuestId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub id_type: IdType,
    pub id_number: String,
    pub address: String,
    pub city: String,
    pub country: String,
    pub preferences: Option<String>,
    pub id_image_url: Option<String>,
    pub outstanding_balance: Money,
}

impl Guest {
    /// Build a guest record from a validated draft.
    pub fn from_draft(id: GuestId, draft: GuestDraft) -> Result<Self, GuestValidationError> {
        let draft = draft.validated()?;
        Ok(Self {
            id,
            name: draft.name,
            email: draft.email,
            phone: draft.phone,
            id_type: draft.id_type,
            id_number: draft.id_number,
            address: draft.address,
            city: draft.city,
            country: draft.country,
            preferences: draft.preferences,
            id_image_url: draft.id_image_url,
            outstanding_balance: draft.outstanding_balance,
        })
    }

    /// Overwrite editable fields from a validated draft, keeping the id.
    pub fn apply_draft(&mut self, draft: GuestDraft) -> Result<(), GuestValidationError> {
        *self = Self::from_draft(self.id, draft)?;
        Ok(())
    }

    /// Whether an ID document image is on file.
    #[must_use]
    pub fn is_verified(&self) -> bool {
        self.id_image_url
            .as_deref()
            .is_some_and(|url| !url.trim().is_empty())
    }

    /// Store a scanned ID document.
    pub fn attach_id_image(&mut self, url: &str) -> Result<(), GuestValidationError> {
        let trimmed = url.trim();
        if trimmed.is_empty() {
            return Err(GuestValidationError::EmptyIdImage);
        }
        self.id_image_url = Some(trimmed.to_owned());
        Ok(())
    }

    /// Case-insensitive match against name, phone or id number.
    #[must_use]
    pub fn matches(&self, needle: &str) -> bool {
        let needle = needle.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        [&self.name, &self.phone, &self.id_number]
            .into_iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}

/// Guest input as submitted by the desk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuestDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub id_type: IdType,
    pub id_number: String,
    pub address: String,
    pub city: String,
    pub country: String,
    pub preferences: Option<String>,
    pub id_image_url: Option<String>,
    pub outstanding_balance: Money,
}

impl GuestDraft {
    /// Trim fields, apply location defaults and check required values.
    ///
    /// # Examples
    /// ```
    /// use frontdesk::domain::GuestDraft;
    ///
    /// let draft = GuestDraft {
    ///     name: " Ayesha Rahman ".into(),
    ///     phone: "01711000000".into(),
    ///     ..GuestDraft::default()
    /// };
    /// let valid = draft.validated().unwrap();
    /// assert_eq!(valid.city, "Dhaka");
    /// assert_eq!(valid.country, "Bangladesh");
    /// ```
    pub fn validated(self) -> Result<Self, GuestValidationError> {
        let name = self.name.trim().to_owned();
        if name.is_empty() {
            return Err(GuestValidationError::EmptyName);
        }
        let phone = self.phone.trim().to_owned();
        if phone.is_empty() {
            return Err(GuestValidationError::EmptyPhone);
        }
        let email = self.email.trim().to_owned();
        if !email.is_empty() && !email.contains('@') {
            return Err(GuestValidationError::InvalidEmail);
        }
        if self.outstanding_balance.is_negative() {
            return Err(GuestValidationError::NegativeBalance);
        }
        Ok(Self {
            name,
            email,
            phone,
            id_type: self.id_type,
            id_number: self.id_number.trim().to_owned(),
            address: self.address.trim().to_owned(),
            city: or_default(&self.city, DEFAULT_CITY),
            country: or_default(&self.country, DEFAULT_COUNTRY),
            preferences: non_blank(self.preferences),
            id_image_url: non_blank(self.id_image_url),
            outstanding_balance: self.outstanding_balance,
        })
    }
}

/// Guest list filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuestFilter {
    pub search: Option<String>,
    pub outstanding_only: bool,
}

impl GuestFilter {
    /// Whether `guest` passes the filter.
    #[must_use]
    pub fn accepts(&self, guest: &Guest) -> bool {
        if self.outstanding_only && !guest.outstanding_balance.is_positive() {
            return false;
        }
        self.search
            .as_deref()
            .is_none_or(|needle| guest.matches(needle))
    }
}

fn or_default(value: &str, fallback: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        fallback.to_owned()
    } else {
        trimmed.to_owned()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}
