//! Stay pricing and invoices.

use chrono::NaiveDate;
use serde::Serialize;

use super::{Money, PaymentMethod, Reservation, Room, RoomNumber, StayCharges};

/// Name printed when no guest on the stay can be resolved.
pub const WALK_IN_GUEST: &str = "Walk-in Guest";

/// Billable nights between two dates, never less than one.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use frontdesk::domain::nights;
///
/// let day = |d| NaiveDate::from_ymd_opt(2025, 1, d).unwrap();
/// assert_eq!(nights(day(1), day(4)), 3);
/// assert_eq!(nights(day(1), day(1)), 1);
/// ```
#[must_use]
pub fn nights(check_in: NaiveDate, check_out: NaiveDate) -> u32 {
    let days = (check_out - check_in).num_days();
    u32::try_from(days).unwrap_or(0).max(1)
}

/// One priced room on a stay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomLine {
    pub room_number: RoomNumber,
    pub rate: Money,
    pub amount: Money,
}

/// Price breakdown for a stay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StayTotals {
    pub nights: u32,
    pub room_lines: Vec<RoomLine>,
    pub room_subtotal: Money,
    pub fb_charges: Money,
    pub extra_charges: Money,
    pub discount: Money,
    pub grand_total: Money,
}

/// Price `room_numbers` over the stay dates using the rates in `catalogue`.
///
/// Rooms missing from the catalogue are priced at zero.
#[must_use]
pub fn price_stay(
    room_numbers: &[RoomNumber],
    check_in: NaiveDate,
    check_out: NaiveDate,
    charges: &StayCharges,
    catalogue: &[Room],
) -> StayTotals {
    let nights = nights(check_in, check_out);
    let room_lines: Vec<RoomLine> = room_numbers
        .iter()
        .map(|number| {
            let rate = catalogue
                .iter()
                .find(|room| &room.number == number)
                .map_or(Money::ZERO, |room| room.rate);
            RoomLine {
                room_number: number.clone(),
                rate,
                amount: rate.times(nights),
            }
        })
        .collect();
    let room_subtotal: Money = room_lines.iter().map(|line| line.amount).sum();
    let fb_charges = charges.laundry + charges.mini_bar;
    let grand_total = room_subtotal + charges.extra_charges + fb_charges - charges.discount;
    StayTotals {
        nights,
        room_lines,
        room_subtotal,
        fb_charges,
        extra_charges: charges.extra_charges,
        discount: charges.discount,
        grand_total,
    }
}

/// Printable invoice for a stay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub invoice_number: String,
    pub reservation_id: super::ReservationId,
    pub guest_name: String,
    pub check_in: String,
    pub check_out: String,
    #[serde(flatten)]
    pub totals: StayTotals,
    pub paid_amount: Money,
    pub balance_due: Money,
    pub payment_method: Option<PaymentMethod>,
}

impl Invoice {
    /// Build the invoice for `reservation`. A negative balance is credit.
    #[must_use]
    pub fn for_stay(
        reservation: &Reservation,
        primary_guest_name: Option<&str>,
        catalogue: &[Room],
    ) -> Self {
        let totals = price_stay(
            &reservation.room_numbers,
            reservation.check_in,
            reservation.check_out,
            &reservation.charges,
            catalogue,
        );
        let balance_due = totals.grand_total - reservation.paid_amount;
        Self {
            invoice_number: reservation.invoice_number(),
            reservation_id: reservation.id,
            guest_name: primary_guest_name.unwrap_or(WALK_IN_GUEST).to_owned(),
            check_in: display_date(reservation.check_in),
            check_out: display_date(reservation.check_out),
            totals,
            paid_amount: reservation.paid_amount,
            balance_due,
            payment_method: reservation.payment_method,
        }
    }

    /// Case-insensitive match on guest name, room number or invoice number.
    #[must_use]
    pub fn matches(&self, needle: &str) -> bool {
        let needle = needle.trim().to_lowercase();
        needle.is_empty()
            || self.guest_name.to_lowercase().contains(&needle)
            || self.invoice_number.to_lowercase().contains(&needle)
            || self
                .totals
                .room_lines
                .iter()
                .any(|line| line.room_number.as_ref().to_lowercase().contains(&needle))
    }
}

/// Render a date as `DD/MM/YYYY`.
#[must_use]
pub fn display_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

#[cfg(test)]
#[path = "billing_tests.rs"]
mod tests;
