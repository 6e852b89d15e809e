//! Rooms and their physical state.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::labels::labelled_enum;
use super::{Error, Money, RoomId};

/// Longest accepted room number.
pub const ROOM_NUMBER_MAX: usize = 8;

labelled_enum! {
    /// Marketing category with its own rack rate.
    pub enum RoomCategory ("room category") {
        FountainDeluxe => "Fountain Deluxe",
        PremiumDeluxe => "Premium Deluxe",
        SuperiorDeluxe => "Superior Deluxe",
        TwinDeluxe => "Twin Deluxe",
        RoyalSuite => "Royal Suite",
    }
}

labelled_enum! {
    /// Room state as shown on the status board.
    ///
    /// Stored rooms carry a physical status; the board overlays reservations
    /// on top of it (see [`crate::domain::effective_status`]).
    pub enum RoomStatus ("room status") {
        Available => "AVAILABLE",
        Occupied => "OCCUPIED",
        Dirty => "DIRTY",
        Reserved => "RESERVED",
        OutOfOrder => "OUT_OF_ORDER",
    }
}

/// Validation failures for room fields.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RoomValidationError {
    #[error("room number must not be empty")]
    EmptyNumber,
    #[error("room number must be at most {max} characters")]
    NumberTooLong { max: usize },
    #[error("room rate must not be negative")]
    NegativeRate,
}

impl From<RoomValidationError> for Error {
    fn from(err: RoomValidationError) -> Self {
        let (field, code) = match &err {
            RoomValidationError::EmptyNumber => ("number", "empty"),
            RoomValidationError::NumberTooLong { .. } => ("number", "too_long"),
            RoomValidationError::NegativeRate => ("rate", "negative"),
        };
        Error::invalid_field(field, code, err.to_string())
    }
}

/// Human-facing room number such as `101` or `PH-2`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RoomNumber(String);

impl RoomNumber {
    /// Validate and trim a room number.
    ///
    /// # Examples
    /// ```
    /// use frontdesk::domain::RoomNumber;
    ///
    /// assert_eq!(RoomNumber::new(" 204 ").unwrap().as_ref(), "204");
    /// assert!(RoomNumber::new("   ").is_err());
    /// ```
    pub fn new(raw: impl AsRef<str>) -> Result<Self, RoomValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(RoomValidationError::EmptyNumber);
        }
        if trimmed.chars().count() > ROOM_NUMBER_MAX {
            return Err(RoomValidationError::NumberTooLong {
                max: ROOM_NUMBER_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for RoomNumber {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for RoomNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for RoomNumber {
    type Error = RoomValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RoomNumber> for String {
    fn from(value: RoomNumber) -> Self {
        value.0
    }
}

/// A bookable room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: RoomId,
    pub number: RoomNumber,
    pub category: RoomCategory,
    pub rate: Money,
    pub status: RoomStatus,
}

impl Room {
    /// Create a room, rejecting negative rates.
    pub fn new(
        id: RoomId,
        number: RoomNumber,
        category: RoomCategory,
        rate: Money,
        status: RoomStatus,
    ) -> Result<Self, RoomValidationError> {
        ensure_rate(rate)?;
        Ok(Self {
            id,
            number,
            category,
            rate,
            status,
        })
    }
}

/// Partial update for the room catalogue.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoomChanges {
    pub category: Option<RoomCategory>,
    pub rate: Option<Money>,
}

impl RoomChanges {
    /// Apply the changes to `room`, validating the new rate.
    pub fn apply(&self, room: &mut Room) -> Result<(), RoomValidationError> {
        if let Some(rate) = self.rate {
            ensure_rate(rate)?;
            room.rate = rate;
        }
        if let Some(category) = self.category {
            room.category = category;
        }
        Ok(())
    }
}

fn ensure_rate(rate: Money) -> Result<(), RoomValidationError> {
    if rate.is_negative() {
        Err(RoomValidationError::NegativeRate)
    } else {
        Ok(())
    }
}
