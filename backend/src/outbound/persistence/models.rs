//! Diesel row structs and their conversions to domain types.
//!
//! Rows never leave the persistence module. Labels are stored as the text the
//! desk sees and parsed back with `FromStr`; a row that no longer parses is
//! reported through [`map_row_error`].

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::ports::RepositoryError;
use crate::domain::{
    EmailAddress, FiscalDay, Guest, GuestId, IdType, Money, Month, PaymentMethod, PaymentStatus,
    Reservation, ReservationId, ReservationStatus, Role, Room, RoomCategory, RoomId, RoomNumber,
    RoomStatus, SalaryPayment, SalaryPaymentId, Staff, StaffId, StayCharges, StayType,
    Transaction, TransactionId, TransactionType, User, UserId,
};

use super::diesel_helpers::map_row_error;
use super::schema::{
    fiscal_days, guests, reservations, rooms, salary_payments, staff, transactions, users,
};

fn parse<T>(table: &'static str, raw: &str) -> Result<T, RepositoryError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse().map_err(|err| map_row_error(table, err))
}

fn parse_optional<T>(table: &'static str, raw: Option<&str>) -> Result<Option<T>, RepositoryError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.map(|value| parse(table, value)).transpose()
}

fn room_number(table: &'static str, raw: &str) -> Result<RoomNumber, RepositoryError> {
    RoomNumber::new(raw).map_err(|err| map_row_error(table, err))
}

// ---------------------------------------------------------------------------
// Rooms
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = rooms)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct RoomRow {
    pub id: Uuid,
    pub number: String,
    pub category: String,
    pub rate: i64,
    pub status: String,
}

impl From<&Room> for RoomRow {
    fn from(room: &Room) -> Self {
        Self {
            id: *room.id.as_uuid(),
            number: room.number.to_string(),
            category: room.category.as_str().to_owned(),
            rate: room.rate.minor(),
            status: room.status.as_str().to_owned(),
        }
    }
}

impl TryFrom<RoomRow> for Room {
    type Error = RepositoryError;

    fn try_from(row: RoomRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: RoomId::from_uuid(row.id),
            number: room_number("rooms", &row.number)?,
            category: parse::<RoomCategory>("rooms", &row.category)?,
            rate: Money::from_minor(row.rate),
            status: parse::<RoomStatus>("rooms", &row.status)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Guests
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = guests)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub(crate) struct GuestRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub id_type: String,
    pub id_number: String,
    pub address: String,
    pub city: String,
    pub country: String,
    pub preferences: Option<String>,
    pub id_image_url: Option<String>,
    pub outstanding_balance: i64,
}

impl From<&Guest> for GuestRow {
    fn from(guest: &Guest) -> Self {
        Self {
            id: *guest.id.as_uuid(),
            name: guest.name.clone(),
            email: guest.email.clone(),
            phone: guest.phone.clone(),
            id_type: guest.id_type.as_str().to_owned(),
            id_number: guest.id_number.clone(),
            address: guest.address.clone(),
            city: guest.city.clone(),
            country: guest.country.clone(),
            preferences: guest.preferences.clone(),
            id_image_url: guest.id_image_url.clone(),
            outstanding_balance: guest.outstanding_balance.minor(),
        }
    }
}

impl TryFrom<GuestRow> for Guest {
    type Error = RepositoryError;

    fn try_from(row: GuestRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: GuestId::from_uuid(row.id),
            id_type: parse::<IdType>("guests", &row.id_type)?,
            name: row.name,
            email: row.email,
            phone: row.phone,
            id_number: row.id_number,
            address: row.address,
            city: row.city,
            country: row.country,
            preferences: row.preferences,
            id_image_url: row.id_image_url,
            outstanding_balance: Money::from_minor(row.outstanding_balance),
        })
    }
}

// ---------------------------------------------------------------------------
// Reservations
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = reservations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub(crate) struct ReservationRow {
    pub id: Uuid,
    pub room_numbers: Vec<String>,
    pub guest_ids: Vec<Uuid>,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub status: String,
    pub stay_type: String,
    pub laundry: i64,
    pub mini_bar: i64,
    pub extra_charges: i64,
    pub discount: i64,
    pub paid_amount: i64,
    pub payment_method: Option<String>,
    pub on_duty_officer: Option<String>,
    pub special_requests: Option<String>,
    pub notes: Option<String>,
    pub total_amount: i64,
    pub created_at: DateTime<Utc>,
}

impl From<&Reservation> for ReservationRow {
    fn from(stay: &Reservation) -> Self {
        Self {
            id: *stay.id.as_uuid(),
            room_numbers: stay.room_numbers.iter().map(ToString::to_string).collect(),
            guest_ids: stay.guest_ids.iter().map(|id| *id.as_uuid()).collect(),
            check_in: stay.check_in,
            check_out: stay.check_out,
            status: stay.status.as_str().to_owned(),
            stay_type: stay.stay_type.as_str().to_owned(),
            laundry: stay.charges.laundry.minor(),
            mini_bar: stay.charges.mini_bar.minor(),
            extra_charges: stay.charges.extra_charges.minor(),
            discount: stay.charges.discount.minor(),
            paid_amount: stay.paid_amount.minor(),
            payment_method: stay.payment_method.map(|m| m.as_str().to_owned()),
            on_duty_officer: stay.on_duty_officer.clone(),
            special_requests: stay.special_requests.clone(),
            notes: stay.notes.clone(),
            total_amount: stay.total_amount.minor(),
            created_at: stay.created_at,
        }
    }
}

impl TryFrom<ReservationRow> for Reservation {
    type Error = RepositoryError;

    fn try_from(row: ReservationRow) -> Result<Self, Self::Error> {
        let room_numbers = row
            .room_numbers
            .iter()
            .map(|raw| room_number("reservations", raw))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            id: ReservationId::from_uuid(row.id),
            room_numbers,
            guest_ids: row.guest_ids.into_iter().map(GuestId::from_uuid).collect(),
            check_in: row.check_in,
            check_out: row.check_out,
            status: parse::<ReservationStatus>("reservations", &row.status)?,
            stay_type: parse::<StayType>("reservations", &row.stay_type)?,
            charges: StayCharges {
                laundry: Money::from_minor(row.laundry),
                mini_bar: Money::from_minor(row.mini_bar),
                extra_charges: Money::from_minor(row.extra_charges),
                discount: Money::from_minor(row.discount),
            },
            paid_amount: Money::from_minor(row.paid_amount),
            payment_method: parse_optional::<PaymentMethod>(
                "reservations",
                row.payment_method.as_deref(),
            )?,
            on_duty_officer: row.on_duty_officer,
            special_requests: row.special_requests,
            notes: row.notes,
            total_amount: Money::from_minor(row.total_amount),
            created_at: row.created_at,
        })
    }
}

// ---------------------------------------------------------------------------
// Transactions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = transactions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TransactionRow {
    pub id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub room_label: String,
    pub guest_name: String,
    pub kind: String,
    pub amount: i64,
}

impl From<&Transaction> for TransactionRow {
    fn from(entry: &Transaction) -> Self {
        Self {
            id: *entry.id.as_uuid(),
            occurred_at: entry.timestamp,
            room_label: entry.room_label.clone(),
            guest_name: entry.guest_name.clone(),
            kind: entry.kind.as_str().to_owned(),
            amount: entry.amount.minor(),
        }
    }
}

impl TryFrom<TransactionRow> for Transaction {
    type Error = RepositoryError;

    fn try_from(row: TransactionRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: TransactionId::from_uuid(row.id),
            timestamp: row.occurred_at,
            kind: parse::<TransactionType>("transactions", &row.kind)?,
            room_label: row.room_label,
            guest_name: row.guest_name,
            amount: Money::from_minor(row.amount),
        })
    }
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// Account row including the password hash.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: String,
    pub password_hash: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub email: &'a str,
    pub name: &'a str,
    pub role: &'a str,
    pub password_hash: &'a str,
}

/// Profile changes; the hash is only written when rotated.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserUpdate<'a> {
    pub name: &'a str,
    pub role: &'a str,
    pub password_hash: Option<&'a str>,
}

impl UserRow {
    /// Split into the domain account and its stored hash.
    pub(crate) fn into_parts(self) -> Result<(User, String), RepositoryError> {
        let user = User {
            id: UserId::from_uuid(self.id),
            email: EmailAddress::new(&self.email).map_err(|err| map_row_error("users", err))?,
            name: self.name,
            role: parse::<Role>("users", &self.role)?,
        };
        Ok((user, self.password_hash))
    }
}

// ---------------------------------------------------------------------------
// Payroll
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = staff)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct StaffRow {
    pub id: Uuid,
    pub name: String,
    pub designation: String,
    pub joining_date: NaiveDate,
    pub base_salary: i64,
    pub bonus: i64,
    pub deductions: i64,
}

impl From<&Staff> for StaffRow {
    fn from(member: &Staff) -> Self {
        Self {
            id: *member.id.as_uuid(),
            name: member.name.clone(),
            designation: member.designation.clone(),
            joining_date: member.joining_date,
            base_salary: member.base_salary.minor(),
            bonus: member.bonus.minor(),
            deductions: member.deductions.minor(),
        }
    }
}

impl From<StaffRow> for Staff {
    fn from(row: StaffRow) -> Self {
        Self {
            id: StaffId::from_uuid(row.id),
            name: row.name,
            designation: row.designation,
            joining_date: row.joining_date,
            base_salary: Money::from_minor(row.base_salary),
            bonus: Money::from_minor(row.bonus),
            deductions: Money::from_minor(row.deductions),
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = salary_payments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct SalaryPaymentRow {
    pub id: Uuid,
    pub staff_id: Uuid,
    pub month: String,
    pub year: i32,
    pub amount: i64,
    pub status: String,
    pub paid_at: DateTime<Utc>,
}

impl From<&SalaryPayment> for SalaryPaymentRow {
    fn from(payment: &SalaryPayment) -> Self {
        Self {
            id: *payment.id.as_uuid(),
            staff_id: *payment.staff_id.as_uuid(),
            month: payment.month.as_str().to_owned(),
            year: payment.year,
            amount: payment.amount.minor(),
            status: payment.status.as_str().to_owned(),
            paid_at: payment.timestamp,
        }
    }
}

impl TryFrom<SalaryPaymentRow> for SalaryPayment {
    type Error = RepositoryError;

    fn try_from(row: SalaryPaymentRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: SalaryPaymentId::from_uuid(row.id),
            staff_id: StaffId::from_uuid(row.staff_id),
            month: parse::<Month>("salary_payments", &row.month)?,
            year: row.year,
            amount: Money::from_minor(row.amount),
            status: parse::<PaymentStatus>("salary_payments", &row.status)?,
            timestamp: row.paid_at,
        })
    }
}

// ---------------------------------------------------------------------------
// Fiscal days
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = fiscal_days)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct FiscalDayRow {
    pub date: NaiveDate,
    pub token_adjustment: i64,
    pub closed_at: Option<DateTime<Utc>>,
}

impl From<&FiscalDay> for FiscalDayRow {
    fn from(day: &FiscalDay) -> Self {
        Self {
            date: day.date,
            token_adjustment: day.token_adjustment.minor(),
            closed_at: day.closed_at,
        }
    }
}

impl From<FiscalDayRow> for FiscalDay {
    fn from(row: FiscalDayRow) -> Self {
        Self {
            date: row.date,
            token_adjustment: Money::from_minor(row.token_adjustment),
            closed_at: row.closed_at,
        }
    }
}
