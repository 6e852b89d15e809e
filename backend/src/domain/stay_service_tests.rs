//! Tests for the stay workflow: booking rules, payments and room status
//! side effects.

use std::sync::Arc;

use chrono::NaiveDate;
use rstest::rstest;

use super::*;
use crate::domain::ports::{
    MockGuestRepository, MockReservationRepository, MockRoomRepository,
    MockTransactionRepository,
};
use crate::domain::test_fixtures::{
    RecordingNotifier, day, fixture_clock, guest, number, reservation, room, user,
};
use crate::domain::{ErrorCode, PaymentMethod, Role, StayCharges};

struct Mocks {
    rooms: MockRoomRepository,
    guests: MockGuestRepository,
    reservations: MockReservationRepository,
    transactions: MockTransactionRepository,
}

impl Mocks {
    fn new() -> Self {
        Self {
            rooms: MockRoomRepository::new(),
            guests: MockGuestRepository::new(),
            reservations: MockReservationRepository::new(),
            transactions: MockTransactionRepository::new(),
        }
    }

    fn build(
        self,
    ) -> StayService<
        MockRoomRepository,
        MockGuestRepository,
        MockReservationRepository,
        MockTransactionRepository,
    > {
        StayService::new(
            Arc::new(self.rooms),
            Arc::new(self.guests),
            Arc::new(self.reservations),
            Arc::new(self.transactions),
            Arc::new(RecordingNotifier::default()),
            fixture_clock(),
        )
    }
}

fn draft(
    rooms: &[&str],
    guests: &[GuestId],
    from: NaiveDate,
    to: NaiveDate,
    stay_type: StayType,
) -> ReservationDraft {
    ReservationDraft {
        room_numbers: rooms.iter().map(|raw| number(raw)).collect(),
        guest_ids: guests.to_vec(),
        check_in: from,
        check_out: to,
        stay_type,
        charges: StayCharges::default(),
        paid_amount: None,
        payment_method: None,
        on_duty_officer: None,
        special_requests: None,
        notes: None,
    }
}

#[rstest]
#[tokio::test]
async fn reservation_computes_total_and_reserves_rooms() {
    let resident = guest("Rafi", false);
    let resident_id = resident.id;
    let mut mocks = Mocks::new();
    mocks
        .rooms
        .expect_list()
        .return_once(|| Ok(vec![room("101", 5_000, RoomStatus::Available)]));
    mocks
        .guests
        .expect_find()
        .return_once(move |_| Ok(Some(resident)));
    mocks.reservations.expect_list().return_once(|| Ok(vec![]));
    mocks
        .reservations
        .expect_insert()
        .withf(|stay| {
            stay.status == ReservationStatus::Pending
                && stay.total_amount == Money::from_major(10_300)
        })
        .times(1)
        .return_once(|_| Ok(()));
    mocks
        .rooms
        .expect_find_by_number()
        .return_once(|_| Ok(Some(room("101", 5_000, RoomStatus::Available))));
    mocks
        .rooms
        .expect_update()
        .withf(|room| room.status == RoomStatus::Reserved)
        .times(1)
        .return_once(|_| Ok(()));
    let subject = mocks.build();

    let mut request = draft(&["101"], &[resident_id], day(10), day(12), StayType::Reservation);
    request.charges.laundry = Money::from_major(500);
    request.charges.discount = Money::from_major(200);
    let stay = subject
        .create_stay(&user(Role::FrontDesk), request)
        .await
        .expect("stay created");

    assert_eq!(stay.total_amount, Money::from_major(10_300));
    assert_eq!(stay.created_at, crate::domain::test_fixtures::fixture_now());
}

#[rstest]
#[tokio::test]
async fn check_in_requires_verified_guests() {
    let resident = guest("Rafi", false);
    let resident_id = resident.id;
    let mut mocks = Mocks::new();
    mocks
        .rooms
        .expect_list()
        .return_once(|| Ok(vec![room("101", 5_000, RoomStatus::Available)]));
    mocks
        .guests
        .expect_find()
        .return_once(move |_| Ok(Some(resident)));
    mocks.reservations.expect_insert().never();
    let subject = mocks.build();

    let err = subject
        .create_stay(
            &user(Role::FrontDesk),
            draft(&["101"], &[resident_id], day(10), day(12), StayType::CheckIn),
        )
        .await
        .expect_err("unverified guest");

    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    let details = err.details().expect("details");
    assert_eq!(details["code"], "unverified_guest");
    assert_eq!(details["guests"][0], "Rafi");
}

#[rstest]
#[tokio::test]
async fn overlapping_booking_is_a_conflict() {
    let resident = guest("Rafi", true);
    let resident_id = resident.id;
    let existing = reservation(
        &["101"],
        &[GuestId::random()],
        day(11),
        day(13),
        ReservationStatus::Pending,
    );
    let mut mocks = Mocks::new();
    mocks
        .rooms
        .expect_list()
        .return_once(|| Ok(vec![room("101", 5_000, RoomStatus::Reserved)]));
    mocks
        .guests
        .expect_find()
        .return_once(move |_| Ok(Some(resident)));
    mocks
        .reservations
        .expect_list()
        .return_once(move || Ok(vec![existing]));
    mocks.reservations.expect_insert().never();
    let subject = mocks.build();

    let err = subject
        .create_stay(
            &user(Role::Admin),
            draft(&["101"], &[resident_id], day(10), day(12), StayType::Reservation),
        )
        .await
        .expect_err("double booking");
    assert_eq!(err.code(), ErrorCode::Conflict);
}

#[rstest]
#[tokio::test]
async fn unknown_room_is_not_found() {
    let mut mocks = Mocks::new();
    mocks.rooms.expect_list().return_once(|| Ok(vec![]));
    let subject = mocks.build();

    let err = subject
        .create_stay(
            &user(Role::FrontDesk),
            draft(&["404"], &[GuestId::random()], day(10), day(12), StayType::Reservation),
        )
        .await
        .expect_err("missing room");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[case(ReservationStatus::CheckedIn)]
#[case(ReservationStatus::CheckedOut)]
#[case(ReservationStatus::Cancelled)]
#[tokio::test]
async fn only_pending_stays_can_check_in(#[case] status: ReservationStatus) {
    let stay = reservation(&["101"], &[GuestId::random()], day(10), day(12), status);
    let id = stay.id;
    let mut mocks = Mocks::new();
    mocks
        .reservations
        .expect_find()
        .return_once(move |_| Ok(Some(stay)));
    let subject = mocks.build();

    let err = subject
        .check_in(&user(Role::FrontDesk), &id)
        .await
        .expect_err("not pending");
    assert_eq!(err.code(), ErrorCode::Conflict);
}

#[rstest]
#[tokio::test]
async fn collect_payment_records_room_payment() {
    let resident = guest("Rafi", true);
    let stay = reservation(
        &["101", "102"],
        &[resident.id],
        day(9),
        day(12),
        ReservationStatus::CheckedIn,
    );
    let id = stay.id;
    let mut mocks = Mocks::new();
    mocks
        .reservations
        .expect_find()
        .return_once(move |_| Ok(Some(stay)));
    mocks
        .guests
        .expect_find()
        .return_once(move |_| Ok(Some(resident)));
    mocks
        .transactions
        .expect_insert()
        .withf(|tx| {
            tx.room_label == "101, 102"
                && tx.guest_name == "Rafi"
                && tx.kind == TransactionType::RoomPayment
        })
        .times(1)
        .return_once(|_| Ok(()));
    mocks
        .reservations
        .expect_update()
        .withf(|stay| {
            stay.paid_amount == Money::from_major(3_000)
                && stay.payment_method == Some(PaymentMethod::Bkash)
        })
        .times(1)
        .return_once(|_| Ok(()));
    let subject = mocks.build();

    let updated = subject
        .collect_payment(
            &user(Role::FrontDesk),
            &id,
            StayPayment {
                amount: Money::from_major(3_000),
                method: PaymentMethod::Bkash,
            },
        )
        .await
        .expect("payment collected");
    assert_eq!(updated.paid_amount, Money::from_major(3_000));
}

#[rstest]
#[tokio::test]
async fn payment_on_closed_stay_is_rejected() {
    let stay = reservation(
        &["101"],
        &[GuestId::random()],
        day(1),
        day(3),
        ReservationStatus::CheckedOut,
    );
    let id = stay.id;
    let mut mocks = Mocks::new();
    mocks
        .reservations
        .expect_find()
        .return_once(move |_| Ok(Some(stay)));
    mocks.transactions.expect_insert().never();
    let subject = mocks.build();

    let err = subject
        .collect_payment(
            &user(Role::FrontDesk),
            &id,
            StayPayment {
                amount: Money::from_major(100),
                method: PaymentMethod::Cash,
            },
        )
        .await
        .expect_err("closed stay");
    assert_eq!(err.code(), ErrorCode::Conflict);
}

#[rstest]
#[tokio::test]
async fn check_out_carries_due_to_guest_and_dirties_rooms() {
    let resident = guest("Rafi", true);
    let mut stay = reservation(
        &["101"],
        &[resident.id],
        day(9),
        day(11),
        ReservationStatus::CheckedIn,
    );
    stay.total_amount = Money::from_major(10_000);
    stay.paid_amount = Money::from_major(2_000);
    let id = stay.id;

    let mut mocks = Mocks::new();
    mocks
        .reservations
        .expect_find()
        .return_once(move |_| Ok(Some(stay)));
    mocks
        .guests
        .expect_find()
        .return_once(move |_| Ok(Some(resident)));
    mocks
        .transactions
        .expect_insert()
        .times(1)
        .return_once(|_| Ok(()));
    mocks
        .guests
        .expect_update()
        .withf(|guest| guest.outstanding_balance == Money::from_major(5_000))
        .times(1)
        .return_once(|_| Ok(()));
    mocks
        .reservations
        .expect_update()
        .withf(|stay| {
            stay.status == ReservationStatus::CheckedOut
                && stay.paid_amount == Money::from_major(5_000)
        })
        .times(1)
        .return_once(|_| Ok(()));
    mocks
        .rooms
        .expect_find_by_number()
        .return_once(|_| Ok(Some(room("101", 5_000, RoomStatus::Occupied))));
    mocks
        .rooms
        .expect_update()
        .withf(|room| room.status == RoomStatus::Dirty)
        .times(1)
        .return_once(|_| Ok(()));
    mocks
        .rooms
        .expect_list()
        .return_once(|| Ok(vec![room("101", 5_000, RoomStatus::Dirty)]));
    let subject = mocks.build();

    let outcome = subject
        .check_out(
            &user(Role::FrontDesk),
            &id,
            CheckOutRequest {
                final_payment: Money::from_major(3_000),
                method: Some(PaymentMethod::Cash),
            },
        )
        .await
        .expect("checked out");

    assert_eq!(outcome.carried_to_ledger, Money::from_major(5_000));
    assert_eq!(outcome.invoice.guest_name, "Rafi");
    assert_eq!(outcome.invoice.totals.nights, 2);
    assert_eq!(outcome.invoice.balance_due, Money::from_major(5_000));
}

#[rstest]
#[tokio::test]
async fn check_out_rejects_negative_final_payment() {
    let subject = Mocks::new().build();
    let err = subject
        .check_out(
            &user(Role::FrontDesk),
            &ReservationId::random(),
            CheckOutRequest {
                final_payment: Money::from_major(-1),
                method: None,
            },
        )
        .await
        .expect_err("negative");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
}

#[rstest]
#[tokio::test]
async fn cancel_frees_rooms_not_held_by_other_stays() {
    let stay = reservation(
        &["101", "102"],
        &[GuestId::random()],
        day(10),
        day(12),
        ReservationStatus::Pending,
    );
    let other = reservation(
        &["102"],
        &[GuestId::random()],
        day(8),
        day(11),
        ReservationStatus::CheckedIn,
    );
    let id = stay.id;
    let listed = vec![stay.clone(), other];
    let mut mocks = Mocks::new();
    mocks
        .reservations
        .expect_find()
        .return_once(move |_| Ok(Some(stay)));
    mocks
        .reservations
        .expect_update()
        .withf(|stay| stay.status == ReservationStatus::Cancelled)
        .times(1)
        .return_once(|_| Ok(()));
    mocks
        .reservations
        .expect_list()
        .return_once(move || Ok(listed));
    mocks
        .rooms
        .expect_find_by_number()
        .withf(|number| number.as_ref() == "101")
        .times(1)
        .return_once(|_| Ok(Some(room("101", 5_000, RoomStatus::Reserved))));
    mocks
        .rooms
        .expect_update()
        .withf(|room| room.number.as_ref() == "101" && room.status == RoomStatus::Available)
        .times(1)
        .return_once(|_| Ok(()));
    let subject = mocks.build();

    let cancelled = subject
        .cancel_stay(&user(Role::FrontDesk), &id)
        .await
        .expect("cancelled");
    assert_eq!(cancelled.status, ReservationStatus::Cancelled);
}

#[rstest]
#[tokio::test]
async fn delete_is_admin_only() {
    let subject = Mocks::new().build();
    let err = subject
        .delete_stay(&user(Role::FrontDesk), &ReservationId::random())
        .await
        .expect_err("forbidden");
    assert_eq!(err.code(), ErrorCode::Forbidden);
}

#[rstest]
#[tokio::test]
async fn deleting_a_checked_out_stay_frees_its_rooms() {
    let stay = reservation(
        &["101"],
        &[GuestId::random()],
        day(8),
        day(10),
        ReservationStatus::CheckedOut,
    );
    let id = stay.id;
    let mut mocks = Mocks::new();
    mocks
        .reservations
        .expect_find()
        .return_once(move |_| Ok(Some(stay)));
    mocks
        .rooms
        .expect_find_by_number()
        .return_once(|_| Ok(Some(room("101", 5_000, RoomStatus::Dirty))));
    mocks
        .rooms
        .expect_update()
        .withf(|room| room.number.as_ref() == "101" && room.status == RoomStatus::Available)
        .times(1)
        .return_once(|_| Ok(()));
    mocks
        .reservations
        .expect_delete()
        .times(1)
        .return_once(|_| Ok(true));
    let notifier = Arc::new(RecordingNotifier::default());
    let subject = StayService::new(
        Arc::new(mocks.rooms),
        Arc::new(mocks.guests),
        Arc::new(mocks.reservations),
        Arc::new(mocks.transactions),
        notifier.clone(),
        fixture_clock(),
    );

    subject
        .delete_stay(&user(Role::Admin), &id)
        .await
        .expect("deleted");

    let tables: Vec<_> = notifier
        .events()
        .into_iter()
        .map(|event| (event.table, event.kind))
        .collect();
    assert_eq!(
        tables,
        vec![
            (ChangeTable::Rooms, ChangeKind::Update),
            (ChangeTable::Reservations, ChangeKind::Delete),
        ]
    );
}

#[rstest]
#[tokio::test]
async fn update_without_paid_amount_keeps_collected_payments() {
    let resident = guest("Rafi", false);
    let resident_id = resident.id;
    let mut stored = reservation(
        &["101"],
        &[resident_id],
        day(10),
        day(12),
        ReservationStatus::Pending,
    );
    stored.paid_amount = Money::from_major(2_000);
    let id = stored.id;
    let listed = vec![stored.clone()];
    let mut mocks = Mocks::new();
    mocks
        .reservations
        .expect_find()
        .return_once(move |_| Ok(Some(stored)));
    mocks
        .rooms
        .expect_list()
        .return_once(|| Ok(vec![room("101", 5_000, RoomStatus::Reserved)]));
    mocks
        .guests
        .expect_find()
        .return_once(move |_| Ok(Some(resident)));
    mocks
        .reservations
        .expect_list()
        .returning(move || Ok(listed.clone()));
    mocks
        .reservations
        .expect_update()
        .withf(|stay| {
            stay.paid_amount == Money::from_major(2_000)
                && stay.notes.as_deref() == Some("late arrival")
        })
        .times(1)
        .return_once(|_| Ok(()));
    mocks
        .rooms
        .expect_find_by_number()
        .return_once(|_| Ok(Some(room("101", 5_000, RoomStatus::Reserved))));
    let subject = mocks.build();

    let mut edit = draft(&["101"], &[resident_id], day(10), day(12), StayType::Reservation);
    edit.notes = Some("late arrival".to_owned());
    let updated = subject
        .update_stay(&user(Role::FrontDesk), &id, edit)
        .await
        .expect("updated");

    assert_eq!(updated.paid_amount, Money::from_major(2_000));
}

#[rstest]
#[tokio::test]
async fn list_hides_cancelled_and_resolves_primary_guest() {
    let resident = guest("Rafi", true);
    let open = reservation(
        &["101"],
        &[GuestId::random(), resident.id],
        day(10),
        day(12),
        ReservationStatus::Pending,
    );
    let cancelled = reservation(
        &["102"],
        &[resident.id],
        day(10),
        day(12),
        ReservationStatus::Cancelled,
    );
    let mut mocks = Mocks::new();
    mocks
        .reservations
        .expect_list()
        .return_once(move || Ok(vec![open, cancelled]));
    mocks
        .guests
        .expect_list()
        .return_once(move || Ok(vec![resident]));
    let subject = mocks.build();

    let listed = subject
        .list_stays(ReservationFilter::default())
        .await
        .expect("listed");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].primary_guest_name.as_deref(), Some("Rafi"));
}
