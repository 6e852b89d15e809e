//! Stays: reservations, check-ins and their lifecycle.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::labels::labelled_enum;
use super::{Error, GuestId, Money, ReservationId, RoomNumber};

labelled_enum! {
    /// Lifecycle state of a stay.
    pub enum ReservationStatus ("reservation status") {
        Pending => "PENDING",
        CheckedIn => "CHECKED_IN",
        CheckedOut => "CHECKED_OUT",
        Cancelled => "CANCELLED",
    }
}

impl ReservationStatus {
    /// Whether the stay still holds its rooms.
    #[must_use]
    pub fn holds_rooms(self) -> bool {
        matches!(self, Self::Pending | Self::CheckedIn)
    }

    /// Whether the stay can no longer be edited or paid into.
    #[must_use]
    pub fn is_final(self) -> bool {
        matches!(self, Self::CheckedOut | Self::Cancelled)
    }
}

labelled_enum! {
    /// How the stay was opened at the desk.
    pub enum StayType ("stay type") {
        Reservation => "RESERVATION",
        CheckIn => "CHECK_IN",
    }
}

impl StayType {
    /// Status a new or edited stay of this type starts in.
    #[must_use]
    pub fn initial_status(self) -> ReservationStatus {
        match self {
            Self::Reservation => ReservationStatus::Pending,
            Self::CheckIn => ReservationStatus::CheckedIn,
        }
    }
}

labelled_enum! {
    /// Settlement channel.
    pub enum PaymentMethod ("payment method") {
        Cash => "Cash",
        Bkash => "Bkash",
        Nagad => "Nagad",
        Card => "Card",
        BankTransfer => "Bank Transfer",
    }
}

/// Validation failures for a stay draft.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReservationValidationError {
    #[error("at least one room is required")]
    NoRooms,
    #[error("at least one guest is required")]
    NoGuests,
    #[error("room {room} is listed more than once")]
    DuplicateRoom { room: String },
    #[error("check-out must not be before check-in")]
    CheckOutBeforeCheckIn,
    #[error("{field} must not be negative")]
    NegativeCharge { field: &'static str },
}

impl From<ReservationValidationError> for Error {
    fn from(err: ReservationValidationError) -> Self {
        let (field, code) = match &err {
            ReservationValidationError::NoRooms => ("roomNumbers", "empty"),
            ReservationValidationError::NoGuests => ("guestIds", "empty"),
            ReservationValidationError::DuplicateRoom { .. } => ("roomNumbers", "duplicate"),
            ReservationValidationError::CheckOutBeforeCheckIn => ("checkOut", "before_check_in"),
            ReservationValidationError::NegativeCharge { field } => (*field, "negative"),
        };
        Error::invalid_field(field, code, err.to_string())
    }
}

/// Ancillary charges and adjustments on a stay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StayCharges {
    pub laundry: Money,
    pub mini_bar: Money,
    pub extra_charges: Money,
    pub discount: Money,
}

impl StayCharges {
    fn validate(&self) -> Result<(), ReservationValidationError> {
        let fields = [
            ("laundry", self.laundry),
            ("miniBar", self.mini_bar),
            ("extraCharges", self.extra_charges),
            ("discount", self.discount),
        ];
        match fields.into_iter().find(|(_, amount)| amount.is_negative()) {
            Some((field, _)) => Err(ReservationValidationError::NegativeCharge { field }),
            None => Ok(()),
        }
    }
}

/// Desk input for creating or editing a stay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationDraft {
    pub room_numbers: Vec<RoomNumber>,
    pub guest_ids: Vec<GuestId>,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub stay_type: StayType,
    pub charges: StayCharges,
    /// Amount already collected; `None` keeps the stored figure on edit.
    pub paid_amount: Option<Money>,
    pub payment_method: Option<PaymentMethod>,
    pub on_duty_officer: Option<String>,
    pub special_requests: Option<String>,
    pub notes: Option<String>,
}

impl ReservationDraft {
    /// Check structural rules that need no repository access.
    pub fn validate(&self) -> Result<(), ReservationValidationError> {
        if self.room_numbers.is_empty() {
            return Err(ReservationValidationError::NoRooms);
        }
        if self.guest_ids.is_empty() {
            return Err(ReservationValidationError::NoGuests);
        }
        for (index, room) in self.room_numbers.iter().enumerate() {
            if self.room_numbers.iter().take(index).any(|earlier| earlier == room) {
                return Err(ReservationValidationError::DuplicateRoom {
                    room: room.to_string(),
                });
            }
        }
        if self.check_out < self.check_in {
            return Err(ReservationValidationError::CheckOutBeforeCheckIn);
        }
        self.charges.validate()?;
        if self.paid_amount.is_some_and(Money::is_negative) {
            return Err(ReservationValidationError::NegativeCharge {
                field: "paidAmount",
            });
        }
        Ok(())
    }
}

/// A stay spanning one or more rooms and guests.
///
/// Rooms and guests are referenced by value; either may have been removed
/// since the stay was booked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: ReservationId,
    pub room_numbers: Vec<RoomNumber>,
    pub guest_ids: Vec<GuestId>,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub status: ReservationStatus,
    pub stay_type: StayType,
    #[serde(flatten)]
    pub charges: StayCharges,
    pub paid_amount: Money,
    pub payment_method: Option<PaymentMethod>,
    pub on_duty_officer: Option<String>,
    pub special_requests: Option<String>,
    pub notes: Option<String>,
    pub total_amount: Money,
    pub created_at: DateTime<Utc>,
}

impl Reservation {
    /// Whether this stay holds `room` on `date` (check-out day excluded).
    #[must_use]
    pub fn holds_room_on(&self, room: &RoomNumber, date: NaiveDate) -> bool {
        self.status.holds_rooms()
            && self.check_in <= date
            && date < self.check_out
            && self.room_numbers.contains(room)
    }

    /// First of `rooms` this stay also holds during `[check_in, check_out)`.
    ///
    /// A same-day stay is treated as occupying its check-in night.
    #[must_use]
    pub fn clashes_with(
        &self,
        rooms: &[RoomNumber],
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> Option<RoomNumber> {
        if !self.status.holds_rooms() {
            return None;
        }
        let own_end = self.check_out.max(self.check_in.succ_opt().unwrap_or(self.check_in));
        let other_end = check_out.max(check_in.succ_opt().unwrap_or(check_in));
        if !(self.check_in < other_end && check_in < own_end) {
            return None;
        }
        rooms
            .iter()
            .find(|room| self.room_numbers.contains(room))
            .cloned()
    }

    /// Whether the stay is in house on `date` for the daily ledger
    /// (inclusive of the check-out day).
    #[must_use]
    pub fn in_ledger_on(&self, date: NaiveDate) -> bool {
        self.status != ReservationStatus::Cancelled
            && self.check_in <= date
            && date <= self.check_out
    }

    /// First eight characters of the id, uppercased.
    #[must_use]
    pub fn invoice_number(&self) -> String {
        self.id.to_string().chars().take(8).collect::<String>().to_uppercase()
    }

    /// Rooms joined for ledger labels.
    #[must_use]
    pub fn room_label(&self) -> String {
        self.room_numbers
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<&str>>()
            .join(", ")
    }
}

/// Status filter offered by the reservations list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusFilter {
    #[default]
    All,
    #[serde(rename = "Reserved")]
    Reserved,
    #[serde(rename = "Check-In")]
    CheckedIn,
    #[serde(rename = "Checked-Out")]
    CheckedOut,
}

impl StatusFilter {
    fn accepts(self, status: ReservationStatus) -> bool {
        match self {
            Self::All => true,
            Self::Reserved => status == ReservationStatus::Pending,
            Self::CheckedIn => status == ReservationStatus::CheckedIn,
            Self::CheckedOut => status == ReservationStatus::CheckedOut,
        }
    }
}

/// Reservation list query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReservationFilter {
    pub search: Option<String>,
    pub date: Option<NaiveDate>,
    pub status: StatusFilter,
    pub include_cancelled: bool,
}

impl ReservationFilter {
    /// Apply the filter. `primary_guest_name` is resolved by the caller.
    #[must_use]
    pub fn accepts(&self, reservation: &Reservation, primary_guest_name: Option<&str>) -> bool {
        if reservation.status == ReservationStatus::Cancelled && !self.include_cancelled {
            return false;
        }
        if !self.status.accepts(reservation.status) {
            return false;
        }
        if self
            .date
            .is_some_and(|date| reservation.check_in != date && reservation.check_out != date)
        {
            return false;
        }
        let Some(needle) = self
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
        else {
            return true;
        };
        let needle = needle.to_lowercase();
        reservation
            .room_numbers
            .iter()
            .any(|room| room.as_ref().to_lowercase().contains(&needle))
            || primary_guest_name.is_some_and(|name| name.to_lowercase().contains(&needle))
            || reservation.id.to_string().starts_with(&needle)
    }
}

#[cfg(test)]
#[path = "reservation_tests.rs"]
mod tests;
