//! Shared builders for domain service tests.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use mockable::Clock;

use crate::domain::ports::ChangeNotifier;
use crate::domain::{
    ChangeEvent, EmailAddress, Guest, GuestId, IdType, Money, Reservation, ReservationId,
    ReservationStatus, Role, Room, RoomCategory, RoomId, RoomNumber, RoomStatus, StayCharges,
    StayType, User, UserId,
};

pub(crate) fn fixture_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 10, 9, 30, 0)
        .single()
        .expect("valid fixture timestamp")
}

pub(crate) fn today() -> NaiveDate {
    fixture_now().date_naive()
}

pub(crate) fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, d).expect("valid fixture date")
}

struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

pub(crate) fn fixture_clock() -> Arc<dyn Clock> {
    Arc::new(FixtureClock {
        utc_now: fixture_now(),
    })
}

/// Notifier that keeps every event for assertions.
#[derive(Default)]
pub(crate) struct RecordingNotifier {
    events: Mutex<Vec<ChangeEvent>>,
}

impl RecordingNotifier {
    pub(crate) fn events(&self) -> Vec<ChangeEvent> {
        self.events.lock().expect("events lock").clone()
    }
}

impl ChangeNotifier for RecordingNotifier {
    fn publish(&self, event: ChangeEvent) {
        self.events.lock().expect("events lock").push(event);
    }
}

pub(crate) fn user(role: Role) -> User {
    User::new(
        UserId::random(),
        EmailAddress::new(format!("{}@hotelfountain.com", role.as_str().to_lowercase()))
            .expect("fixture email"),
        "Fixture User",
        role,
    )
    .expect("fixture user")
}

pub(crate) fn number(raw: &str) -> RoomNumber {
    RoomNumber::new(raw).expect("fixture room number")
}

pub(crate) fn room(raw: &str, rate_major: i64, status: RoomStatus) -> Room {
    Room::new(
        RoomId::random(),
        number(raw),
        RoomCategory::FountainDeluxe,
        Money::from_major(rate_major),
        status,
    )
    .expect("fixture room")
}

pub(crate) fn guest(name: &str, verified: bool) -> Guest {
    Guest {
        id: GuestId::random(),
        name: name.to_owned(),
        email: String::new(),
        phone: "01700000000".to_owned(),
        id_type: IdType::Nid,
        id_number: format!("ID-{name}"),
        address: "Gulshan".to_owned(),
        city: "Dhaka".to_owned(),
        country: "Bangladesh".to_owned(),
        preferences: None,
        id_image_url: verified.then(|| "data:image/png;base64,AAAA".to_owned()),
        outstanding_balance: Money::ZERO,
    }
}

pub(crate) fn reservation(
    rooms: &[&str],
    guests: &[GuestId],
    from: NaiveDate,
    to: NaiveDate,
    status: ReservationStatus,
) -> Reservation {
    Reservation {
        id: ReservationId::random(),
        room_numbers: rooms.iter().map(|raw| number(raw)).collect(),
        guest_ids: guests.to_vec(),
        check_in: from,
        check_out: to,
        status,
        stay_type: match status {
            ReservationStatus::Pending => StayType::Reservation,
            _ => StayType::CheckIn,
        },
        charges: StayCharges::default(),
        paid_amount: Money::ZERO,
        payment_method: None,
        on_duty_officer: None,
        special_requests: None,
        notes: None,
        total_amount: Money::ZERO,
        created_at: fixture_now(),
    }
}
