//! Tests for guest ledger handlers.

use super::*;
use crate::domain::test_fixtures::guest;
use crate::domain::{ImportSummary, PaymentMethod, Role};
use crate::inbound::http::test_utils::{TestPorts, sign_in, test_app};
use actix_web::http::StatusCode;
use actix_web::dev::ServiceResponse;
use actix_web::http::header::{CACHE_CONTROL, CONTENT_DISPOSITION, HeaderName};
use actix_web::test as actix_test;
use rstest::rstest;
use serde_json::{Value, json};

fn header(response: &ServiceResponse, name: HeaderName) -> Option<String> {
    response
        .headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
}

#[rstest]
#[actix_web::test]
async fn list_passes_search_and_outstanding_filter() {
    let (mut ports, desk) = TestPorts::signed_in(Role::FrontDesk);
    ports
        .guests
        .expect_list_guests()
        .withf(|filter| filter.search.as_deref() == Some("rahman") && filter.outstanding_only)
        .return_once(|_| Ok(vec![guest("Ayesha Rahman", true)]));
    let app = actix_test::init_service(test_app(ports)).await;
    let cookie = sign_in(&app, &desk).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/guests?search=rahman&outstanding=true")
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body[0]["name"], "Ayesha Rahman");
    assert_eq!(body[0]["idType"], "NID");
}

#[rstest]
#[actix_web::test]
async fn blank_search_is_dropped() {
    let (mut ports, desk) = TestPorts::signed_in(Role::Accountant);
    ports
        .guests
        .expect_list_guests()
        .withf(|filter| filter.search.is_none() && !filter.outstanding_only)
        .return_once(|_| Ok(Vec::new()));
    let app = actix_test::init_service(test_app(ports)).await;
    let cookie = sign_in(&app, &desk).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/guests?search=%20")
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[rstest]
#[actix_web::test]
async fn create_guest_maps_labels_and_defaults() {
    let (mut ports, desk) = TestPorts::signed_in(Role::FrontDesk);
    ports
        .guests
        .expect_create_guest()
        .withf(|_, draft| {
            draft.id_type == IdType::Passport
                && draft.preferences.is_none()
                && draft.outstanding_balance == Money::ZERO
        })
        .return_once(|_, draft| {
            crate::domain::Guest::from_draft(GuestId::random(), draft).map_err(Error::from)
        });
    let app = actix_test::init_service(test_app(ports)).await;
    let cookie = sign_in(&app, &desk).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/guests")
            .cookie(cookie)
            .set_json(json!({
                "name": "John Smith",
                "phone": "+44 7700 900000",
                "idType": "Passport",
                "idNumber": "P1234567",
                "preferences": "  "
            }))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["city"], "Dhaka");
    assert_eq!(body["country"], "Bangladesh");
}

#[rstest]
#[actix_web::test]
async fn unknown_id_type_is_rejected() {
    let (mut ports, desk) = TestPorts::signed_in(Role::FrontDesk);
    ports.guests.expect_create_guest().never();
    let app = actix_test::init_service(test_app(ports)).await;
    let cookie = sign_in(&app, &desk).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/guests")
            .cookie(cookie)
            .set_json(json!({"name": "A", "phone": "1", "idType": "Library Card"}))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["details"]["field"], "idType");
}

#[rstest]
#[actix_web::test]
async fn export_is_an_uncached_attachment() {
    let (mut ports, desk) = TestPorts::signed_in(Role::Admin);
    ports
        .guests
        .expect_export_guests()
        .return_once(|| Ok(vec![guest("Karim", false), guest("Lina", true)]));
    let app = actix_test::init_service(test_app(ports)).await;
    let cookie = sign_in(&app, &desk).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/guests/export")
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(header(&response, CACHE_CONTROL).as_deref(), Some("no-store"));
    let disposition = header(&response, CONTENT_DISPOSITION).expect("disposition");
    assert!(disposition.starts_with("attachment"));
    assert!(disposition.contains("guests.json"));
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body.as_array().map(Vec::len), Some(2));
}

#[rstest]
#[actix_web::test]
async fn import_returns_summary() {
    let (mut ports, desk) = TestPorts::signed_in(Role::FrontDesk);
    ports
        .guests
        .expect_import_guests()
        .withf(|_, text| text.lines().count() == 2)
        .return_once(|_, _| {
            Ok(ImportSummary {
                imported: 1,
                skipped: 1,
            })
        });
    let app = actix_test::init_service(test_app(ports)).await;
    let cookie = sign_in(&app, &desk).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/guests/import")
            .cookie(cookie)
            .set_json(json!({"text": "Karim,0171,k@x.com,NID,1,Banani\nshort,row"}))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body, json!({"imported": 1, "skipped": 1}));
}

#[rstest]
#[actix_web::test]
async fn settlement_forwards_amount_and_method() {
    let (mut ports, desk) = TestPorts::signed_in(Role::FrontDesk);
    let settled = guest("Karim", true);
    let id = settled.id;
    ports
        .guests
        .expect_settle()
        .withf(move |_, candidate, settlement| {
            *candidate == id
                && settlement.amount == Money::from_minor(50_000)
                && settlement.method == Some(PaymentMethod::Bkash)
                && !settlement.allow_overpayment
        })
        .return_once(move |_, _, _| Ok(settled));
    let app = actix_test::init_service(test_app(ports)).await;
    let cookie = sign_in(&app, &desk).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri(&format!("/api/v1/guests/{id}/settlements"))
            .cookie(cookie)
            .set_json(json!({"amount": 50_000, "method": "Bkash"}))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[rstest]
#[actix_web::test]
async fn attach_id_image_returns_verified_guest() {
    let (mut ports, desk) = TestPorts::signed_in(Role::FrontDesk);
    let verified = guest("Lina", true);
    let id = verified.id;
    ports
        .guests
        .expect_attach_id_image()
        .withf(move |_, candidate, url| *candidate == id && url.starts_with("data:image/"))
        .return_once(move |_, _, _| Ok(verified));
    let app = actix_test::init_service(test_app(ports)).await;
    let cookie = sign_in(&app, &desk).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::put()
            .uri(&format!("/api/v1/guests/{id}/id-image"))
            .cookie(cookie)
            .set_json(json!({"url": "data:image/png;base64,AAAA"}))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert!(body["idImageUrl"].is_string());
}

#[rstest]
#[actix_web::test]
async fn delete_guest_forbidden_for_front_desk() {
    let (mut ports, desk) = TestPorts::signed_in(Role::FrontDesk);
    ports
        .guests
        .expect_delete_guest()
        .return_once(|_, _| Err(Error::forbidden("role FRONT_DESK may not delete records")));
    let app = actix_test::init_service(test_app(ports)).await;
    let cookie = sign_in(&app, &desk).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri(&format!("/api/v1/guests/{}", GuestId::random()))
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
