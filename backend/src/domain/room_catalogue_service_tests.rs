//! Tests for the room catalogue service.

use std::sync::Arc;

use rstest::rstest;

use super::*;
use crate::domain::ports::{MockReservationRepository, MockRoomRepository, RepositoryError};
use crate::domain::test_fixtures::{
    RecordingNotifier, day, fixture_clock, guest, number, reservation, room, today, user,
};
use crate::domain::{ErrorCode, Money, ReservationStatus, Role, RoomCategory};

fn service(
    rooms: MockRoomRepository,
    reservations: MockReservationRepository,
    notifier: Arc<RecordingNotifier>,
) -> RoomCatalogueService<MockRoomRepository, MockReservationRepository> {
    RoomCatalogueService::new(
        Arc::new(rooms),
        Arc::new(reservations),
        notifier,
        fixture_clock(),
    )
}

fn new_room(raw: &str) -> NewRoom {
    NewRoom {
        number: number(raw),
        category: RoomCategory::PremiumDeluxe,
        rate: Money::from_major(6_500),
        status: RoomStatus::Available,
    }
}

#[rstest]
#[tokio::test]
async fn create_room_requires_admin() {
    let subject = service(
        MockRoomRepository::new(),
        MockReservationRepository::new(),
        Arc::new(RecordingNotifier::default()),
    );
    let err = subject
        .create_room(&user(Role::FrontDesk), new_room("201"))
        .await
        .expect_err("front desk cannot add rooms");
    assert_eq!(err.code(), ErrorCode::Forbidden);
}

#[rstest]
#[tokio::test]
async fn create_room_rejects_duplicate_number() {
    let mut rooms = MockRoomRepository::new();
    rooms
        .expect_find_by_number()
        .times(1)
        .return_once(|_| Ok(Some(room("201", 6_500, RoomStatus::Available))));
    rooms.expect_insert().never();
    let subject = service(
        rooms,
        MockReservationRepository::new(),
        Arc::new(RecordingNotifier::default()),
    );

    let err = subject
        .create_room(&user(Role::Admin), new_room("201"))
        .await
        .expect_err("duplicate");
    assert_eq!(err.code(), ErrorCode::Conflict);
}

#[rstest]
#[tokio::test]
async fn create_room_publishes_insert() {
    let mut rooms = MockRoomRepository::new();
    rooms.expect_find_by_number().return_once(|_| Ok(None));
    rooms.expect_insert().times(1).return_once(|_| Ok(()));
    let notifier = Arc::new(RecordingNotifier::default());
    let subject = service(rooms, MockReservationRepository::new(), notifier.clone());

    let created = subject
        .create_room(&user(Role::Admin), new_room("201"))
        .await
        .expect("room created");

    assert_eq!(created.number.as_ref(), "201");
    let events = notifier.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].kind, ChangeKind::Insert);
    assert_eq!(events[0].table, ChangeTable::Rooms);
}

#[rstest]
#[tokio::test]
async fn set_status_updates_physical_state() {
    let mut rooms = MockRoomRepository::new();
    rooms
        .expect_find_by_number()
        .return_once(|_| Ok(Some(room("101", 5_000, RoomStatus::Dirty))));
    rooms
        .expect_update()
        .withf(|room| room.status == RoomStatus::Available)
        .times(1)
        .return_once(|_| Ok(()));
    let subject = service(
        rooms,
        MockReservationRepository::new(),
        Arc::new(RecordingNotifier::default()),
    );

    let updated = subject
        .set_room_status(&user(Role::FrontDesk), &number("101"), RoomStatus::Available)
        .await
        .expect("status updated");
    assert_eq!(updated.status, RoomStatus::Available);
}

#[rstest]
#[tokio::test]
async fn set_status_on_missing_room_is_not_found() {
    let mut rooms = MockRoomRepository::new();
    rooms.expect_find_by_number().return_once(|_| Ok(None));
    let subject = service(
        rooms,
        MockReservationRepository::new(),
        Arc::new(RecordingNotifier::default()),
    );
    let err = subject
        .set_room_status(&user(Role::Admin), &number("999"), RoomStatus::Dirty)
        .await
        .expect_err("missing room");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn board_defaults_to_today_and_overlays_stays() {
    let mut rooms = MockRoomRepository::new();
    rooms.expect_list().return_once(|| {
        Ok(vec![
            room("101", 5_000, RoomStatus::Available),
            room("102", 5_000, RoomStatus::Dirty),
        ])
    });
    let resident = guest("Rafi", true);
    let stay = reservation(
        &["101"],
        &[resident.id],
        day(9),
        day(12),
        ReservationStatus::CheckedIn,
    );
    let mut reservations = MockReservationRepository::new();
    reservations.expect_list().return_once(move || Ok(vec![stay]));
    let subject = service(rooms, reservations, Arc::new(RecordingNotifier::default()));

    let board = subject
        .board(None, BoardFilter::default())
        .await
        .expect("board");

    assert_eq!(board.date, today());
    assert_eq!(board.counts.occupied, 1);
    assert_eq!(board.counts.dirty, 1);
}

#[rstest]
#[tokio::test]
async fn board_maps_connection_failures() {
    let mut rooms = MockRoomRepository::new();
    rooms
        .expect_list()
        .return_once(|| Err(RepositoryError::connection("pool exhausted")));
    let subject = service(
        rooms,
        MockReservationRepository::new(),
        Arc::new(RecordingNotifier::default()),
    );
    let err = subject
        .board(Some(day(1)), BoardFilter::default())
        .await
        .expect_err("unavailable");
    assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
}

#[rstest]
#[tokio::test]
async fn get_room_reports_missing_numbers() {
    let mut rooms = MockRoomRepository::new();
    rooms.expect_find_by_number().return_once(|_| Ok(None));
    let subject = service(
        rooms,
        MockReservationRepository::new(),
        Arc::new(RecordingNotifier::default()),
    );
    let err = subject
        .get_room(&number("404"))
        .await
        .expect_err("no such room");
    assert_eq!(err.code(), ErrorCode::NotFound);
}
