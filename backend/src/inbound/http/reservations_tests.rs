//! Tests for reservation handlers.

use super::*;
use crate::domain::ports::{CheckOutOutcome, StayListing};
use crate::domain::test_fixtures::{day, number, reservation};
use crate::domain::{GuestId, Invoice, PaymentMethod, Reservation, ReservationStatus, Role};
use crate::inbound::http::test_utils::{TestPorts, sign_in, test_app};
use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use rstest::rstest;
use serde_json::{Value, json};

fn booking_body(guest: GuestId) -> Value {
    json!({
        "roomNumbers": ["101", "102"],
        "guestIds": [guest.to_string()],
        "checkIn": "2025-03-10",
        "checkOut": "2025-03-12",
        "stayType": "CHECK_IN",
        "laundry": 20_000,
        "paidAmount": 100_000,
        "paymentMethod": "Bank Transfer",
        "notes": "  "
    })
}

#[rstest]
#[actix_web::test]
async fn create_parses_the_booking_form() {
    let (mut ports, desk) = TestPorts::signed_in(Role::FrontDesk);
    let guest = GuestId::random();
    ports
        .stays
        .expect_create_stay()
        .withf(move |_, draft| {
            draft.room_numbers == vec![number("101"), number("102")]
                && draft.guest_ids == vec![guest]
                && draft.check_in == day(10)
                && draft.check_out == day(12)
                && draft.stay_type == StayType::CheckIn
                && draft.charges.laundry == Money::from_minor(20_000)
                && draft.charges.discount == Money::ZERO
                && draft.paid_amount == Some(Money::from_minor(100_000))
                && draft.payment_method == Some(PaymentMethod::BankTransfer)
                && draft.notes.is_none()
        })
        .return_once(move |_, _| {
            Ok(reservation(
                &["101", "102"],
                &[guest],
                day(10),
                day(12),
                ReservationStatus::CheckedIn,
            ))
        });
    let app = actix_test::init_service(test_app(ports)).await;
    let cookie = sign_in(&app, &desk).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/reservations")
            .cookie(cookie)
            .set_json(booking_body(guest))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["status"], "CHECKED_IN");
    assert_eq!(body["roomNumbers"], json!(["101", "102"]));
    assert_eq!(body["miniBar"], 0);
}

#[rstest]
#[case("checkIn", json!(null), "missing_field")]
#[case("checkOut", json!("12/03/2025"), "invalid_date")]
#[case("stayType", json!("WALK_IN"), "invalid_value")]
#[actix_web::test]
async fn create_rejects_malformed_fields(
    #[case] field: &str,
    #[case] value: Value,
    #[case] code: &str,
) {
    let (mut ports, desk) = TestPorts::signed_in(Role::FrontDesk);
    ports.stays.expect_create_stay().never();
    let app = actix_test::init_service(test_app(ports)).await;
    let cookie = sign_in(&app, &desk).await;
    let mut body = booking_body(GuestId::random());
    body[field] = value;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/reservations")
            .cookie(cookie)
            .set_json(body)
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: Value = actix_test::read_body_json(response).await;
    assert_eq!(error["details"]["field"], field);
    assert_eq!(error["details"]["code"], code);
}

#[rstest]
#[actix_web::test]
async fn double_booking_surfaces_as_conflict() {
    let (mut ports, desk) = TestPorts::signed_in(Role::FrontDesk);
    ports
        .stays
        .expect_create_stay()
        .return_once(|_, _| Err(Error::conflict("room 101 is already booked for these dates")));
    let app = actix_test::init_service(test_app(ports)).await;
    let cookie = sign_in(&app, &desk).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/reservations")
            .cookie(cookie)
            .set_json(booking_body(GuestId::random()))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[rstest]
#[actix_web::test]
async fn list_builds_filter_from_query() {
    let (mut ports, desk) = TestPorts::signed_in(Role::Accountant);
    let guest = GuestId::random();
    ports
        .stays
        .expect_list_stays()
        .withf(|filter| {
            filter.status == StatusFilter::CheckedIn
                && filter.date == Some(day(11))
                && filter.include_cancelled
                && filter.search.as_deref() == Some("Rahman")
        })
        .return_once(move |_| {
            Ok(vec![StayListing {
                reservation: reservation(
                    &["101"],
                    &[guest],
                    day(10),
                    day(11),
                    ReservationStatus::CheckedIn,
                ),
                primary_guest_name: Some("Ayesha Rahman".to_owned()),
            }])
        });
    let app = actix_test::init_service(test_app(ports)).await;
    let cookie = sign_in(&app, &desk).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(
                "/api/v1/reservations?search=Rahman&date=2025-03-11\
                 &status=Check-In&includeCancelled=true",
            )
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body[0]["primaryGuestName"], "Ayesha Rahman");
    assert_eq!(body[0]["status"], "CHECKED_IN");
}

#[rstest]
#[actix_web::test]
async fn unknown_status_filter_is_a_bad_query() {
    let (ports, desk) = TestPorts::signed_in(Role::Accountant);
    let app = actix_test::init_service(test_app(ports)).await;
    let cookie = sign_in(&app, &desk).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/reservations?status=Sleeping")
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["details"]["source"], "query");
}

#[rstest]
#[actix_web::test]
async fn payment_requires_a_known_method() {
    let (mut ports, desk) = TestPorts::signed_in(Role::FrontDesk);
    ports.stays.expect_collect_payment().never();
    let app = actix_test::init_service(test_app(ports)).await;
    let cookie = sign_in(&app, &desk).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri(&format!("/api/v1/reservations/{}/payments", ReservationId::random()))
            .cookie(cookie)
            .set_json(json!({"amount": 1_000, "method": "Cheque"}))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["details"]["field"], "method");
}

#[rstest]
#[actix_web::test]
async fn check_out_accepts_empty_body() {
    let (mut ports, desk) = TestPorts::signed_in(Role::FrontDesk);
    let guest = GuestId::random();
    let stay = reservation(&["101"], &[guest], day(8), day(10), ReservationStatus::CheckedIn);
    let id = stay.id;
    ports
        .stays
        .expect_check_out()
        .withf(move |_, candidate, request| {
            *candidate == id && request.final_payment == Money::ZERO && request.method.is_none()
        })
        .return_once(move |_, _, _| {
            let invoice = Invoice::for_stay(&stay, None, &[]);
            Ok(CheckOutOutcome {
                reservation: Reservation {
                    status: ReservationStatus::CheckedOut,
                    ..stay
                },
                invoice,
                carried_to_ledger: Money::ZERO,
            })
        });
    let app = actix_test::init_service(test_app(ports)).await;
    let cookie = sign_in(&app, &desk).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri(&format!("/api/v1/reservations/{id}/check-out"))
            .cookie(cookie)
            .set_json(json!({}))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["reservation"]["status"], "CHECKED_OUT");
    assert_eq!(body["carriedToLedger"], 0);
    assert!(body["invoice"]["invoiceNumber"].is_string());
}

#[rstest]
#[case("check-in")]
#[case("cancel")]
#[actix_web::test]
async fn lifecycle_actions_require_a_session(#[case] action: &str) {
    let app = actix_test::init_service(test_app(TestPorts::default())).await;
    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri(&format!("/api/v1/reservations/{}/{action}", ReservationId::random()))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[rstest]
#[actix_web::test]
async fn cancel_returns_the_cancelled_stay() {
    let (mut ports, desk) = TestPorts::signed_in(Role::FrontDesk);
    let stay = reservation(
        &["201"],
        &[GuestId::random()],
        day(12),
        day(14),
        ReservationStatus::Cancelled,
    );
    let id = stay.id;
    ports
        .stays
        .expect_cancel_stay()
        .withf(move |_, candidate| *candidate == id)
        .return_once(move |_, _| Ok(stay));
    let app = actix_test::init_service(test_app(ports)).await;
    let cookie = sign_in(&app, &desk).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri(&format!("/api/v1/reservations/{id}/cancel"))
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["status"], "CANCELLED");
}
