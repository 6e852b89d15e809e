//! Pricing and invoice rendering.

use chrono::{NaiveDate, Utc};
use rstest::{fixture, rstest};

use super::*;
use crate::domain::{
    GuestId, ReservationId, ReservationStatus, RoomCategory, RoomId, RoomStatus, StayType,
};

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, d).expect("date")
}

fn number(raw: &str) -> RoomNumber {
    RoomNumber::new(raw).expect("room number")
}

#[fixture]
fn catalogue() -> Vec<Room> {
    vec![
        Room::new(
            RoomId::random(),
            number("101"),
            RoomCategory::FountainDeluxe,
            Money::from_major(5_000),
            RoomStatus::Available,
        )
        .expect("room"),
        Room::new(
            RoomId::random(),
            number("301"),
            RoomCategory::RoyalSuite,
            Money::from_major(12_000),
            RoomStatus::Available,
        )
        .expect("room"),
    ]
}

#[fixture]
fn stay() -> Reservation {
    Reservation {
        id: ReservationId::from_uuid(
            uuid::Uuid::parse_str("0a1b2c3d-5e6f-4a00-8b00-000000000001").expect("uuid"),
        ),
        room_numbers: vec![number("101"), number("301")],
        guest_ids: vec![GuestId::random()],
        check_in: day(1),
        check_out: day(3),
        status: ReservationStatus::CheckedIn,
        stay_type: StayType::CheckIn,
        charges: StayCharges {
            laundry: Money::from_major(300),
            mini_bar: Money::from_major(200),
            extra_charges: Money::from_major(1_000),
            discount: Money::from_major(500),
        },
        paid_amount: Money::from_major(10_000),
        payment_method: Some(PaymentMethod::Bkash),
        on_duty_officer: None,
        special_requests: None,
        notes: None,
        total_amount: Money::ZERO,
        created_at: Utc::now(),
    }
}

#[rstest]
#[case(day(1), day(1), 1)]
#[case(day(1), day(2), 1)]
#[case(day(1), day(8), 7)]
#[case(day(5), day(1), 1)]
fn nights_is_at_least_one(#[case] from: NaiveDate, #[case] to: NaiveDate, #[case] expected: u32) {
    assert_eq!(nights(from, to), expected);
}

#[rstest]
fn grand_total_is_rooms_plus_extras_minus_discount(catalogue: Vec<Room>, stay: Reservation) {
    let totals = price_stay(
        &stay.room_numbers,
        stay.check_in,
        stay.check_out,
        &stay.charges,
        &catalogue,
    );
    assert_eq!(totals.nights, 2);
    assert_eq!(totals.room_subtotal, Money::from_major(34_000));
    assert_eq!(totals.fb_charges, Money::from_major(500));
    assert_eq!(totals.grand_total, Money::from_major(35_000));
}

#[rstest]
fn missing_rooms_price_at_zero(stay: Reservation) {
    let totals = price_stay(
        &stay.room_numbers,
        stay.check_in,
        stay.check_out,
        &StayCharges::default(),
        &[],
    );
    assert_eq!(totals.grand_total, Money::ZERO);
    assert_eq!(totals.room_lines.len(), 2);
}

#[rstest]
fn invoice_balance_may_be_credit(catalogue: Vec<Room>, mut stay: Reservation) {
    stay.paid_amount = Money::from_major(40_000);
    let invoice = Invoice::for_stay(&stay, Some("Tanvir Ahmed"), &catalogue);
    assert_eq!(invoice.balance_due, Money::from_major(-5_000));
    assert_eq!(invoice.guest_name, "Tanvir Ahmed");
}

#[rstest]
fn invoice_defaults_to_walk_in_and_formats_dates(catalogue: Vec<Room>, stay: Reservation) {
    let invoice = Invoice::for_stay(&stay, None, &catalogue);
    assert_eq!(invoice.guest_name, WALK_IN_GUEST);
    assert_eq!(invoice.check_in, "01/06/2025");
    assert_eq!(invoice.check_out, "03/06/2025");
    assert_eq!(invoice.invoice_number, "0A1B2C3D");
}

#[rstest]
#[case("tanvir", true)]
#[case("301", true)]
#[case("999", false)]
fn invoice_search(catalogue: Vec<Room>, stay: Reservation, #[case] needle: &str, #[case] hit: bool) {
    let invoice = Invoice::for_stay(&stay, Some("Tanvir Ahmed"), &catalogue);
    assert_eq!(invoice.matches(needle), hit);
}
