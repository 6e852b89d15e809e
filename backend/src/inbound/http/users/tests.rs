//! Tests for account administration handlers.

use super::*;
use crate::domain::{Error, Role, User};
use crate::domain::test_fixtures::user;
use crate::inbound::http::test_utils::{TestPorts, sign_in, test_app};
use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use rstest::rstest;
use serde_json::{Value, json};

#[rstest]
#[actix_web::test]
async fn list_users_returns_accounts_for_admins() {
    let (mut ports, admin) = TestPorts::signed_in(Role::Admin);
    let listed = vec![admin.clone(), user(Role::Accountant)];
    ports
        .users
        .expect_list_users()
        .withf(|actor| actor.role == Role::Admin)
        .return_once(move |_| Ok(listed));
    let app = actix_test::init_service(test_app(ports)).await;
    let cookie = sign_in(&app, &admin).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/users")
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    let accounts = body.as_array().expect("array");
    assert_eq!(accounts.len(), 2);
    assert_eq!(accounts[1]["role"], "ACCOUNTANT");
    assert!(accounts[0].get("passwordHash").is_none());
}

#[rstest]
#[actix_web::test]
async fn forbidden_from_service_maps_to_403() {
    let (mut ports, desk) = TestPorts::signed_in(Role::FrontDesk);
    ports
        .users
        .expect_list_users()
        .return_once(|_| Err(Error::forbidden("role FRONT_DESK may not manage users")));
    let app = actix_test::init_service(test_app(ports)).await;
    let cookie = sign_in(&app, &desk).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/users")
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[rstest]
#[actix_web::test]
async fn create_user_parses_role_and_normalises_email() {
    let (mut ports, admin) = TestPorts::signed_in(Role::Admin);
    ports
        .users
        .expect_create_user()
        .withf(|_, request| {
            request.email.as_ref() == "rahim@hotelfountain.com"
                && request.role == Role::FrontDesk
                && request.password.as_str() == "secret1"
        })
        .return_once(|_, request| {
            User::new(UserId::random(), request.email, request.name, request.role)
                .map_err(Error::from)
        });
    let app = actix_test::init_service(test_app(ports)).await;
    let cookie = sign_in(&app, &admin).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/users")
            .cookie(cookie)
            .set_json(json!({
                "email": " Rahim@HotelFountain.com ",
                "name": "Rahim",
                "role": "FRONT_DESK",
                "password": "secret1"
            }))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["email"], "rahim@hotelfountain.com");
}

#[rstest]
#[case(json!({"email": "nope", "name": "A", "role": "ADMIN", "password": "secret1"}), "email")]
#[case(json!({"email": "a@b.c", "name": "A", "role": "MANAGER", "password": "secret1"}), "role")]
#[actix_web::test]
async fn create_user_rejects_bad_fields(#[case] body: Value, #[case] field: &str) {
    let (mut ports, admin) = TestPorts::signed_in(Role::Admin);
    ports.users.expect_create_user().never();
    let app = actix_test::init_service(test_app(ports)).await;
    let cookie = sign_in(&app, &admin).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/users")
            .cookie(cookie)
            .set_json(body)
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let value: Value = actix_test::read_body_json(response).await;
    assert_eq!(value["details"]["field"], field);
}

#[rstest]
#[actix_web::test]
async fn blank_password_on_update_is_ignored() {
    let (mut ports, admin) = TestPorts::signed_in(Role::Admin);
    let target = user(Role::FrontDesk);
    let target_id = target.id;
    ports
        .users
        .expect_update_user()
        .withf(move |_, id, changes| {
            *id == target_id
                && changes.password.is_none()
                && changes.role == Some(Role::Accountant)
        })
        .return_once(move |_, _, _| {
            Ok(User {
                role: Role::Accountant,
                ..target
            })
        });
    let app = actix_test::init_service(test_app(ports)).await;
    let cookie = sign_in(&app, &admin).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::put()
            .uri(&format!("/api/v1/users/{target_id}"))
            .cookie(cookie)
            .set_json(json!({"role": "ACCOUNTANT", "password": "  "}))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[rstest]
#[actix_web::test]
async fn delete_user_returns_no_content() {
    let (mut ports, admin) = TestPorts::signed_in(Role::Admin);
    let target = UserId::random();
    ports
        .users
        .expect_delete_user()
        .withf(move |_, id| *id == target)
        .return_once(|_, _| Ok(()));
    let app = actix_test::init_service(test_app(ports)).await;
    let cookie = sign_in(&app, &admin).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri(&format!("/api/v1/users/{target}"))
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[rstest]
#[actix_web::test]
async fn malformed_user_id_is_rejected() {
    let (ports, admin) = TestPorts::signed_in(Role::Admin);
    let app = actix_test::init_service(test_app(ports)).await;
    let cookie = sign_in(&app, &admin).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri("/api/v1/users/not-a-uuid")
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let value: Value = actix_test::read_body_json(response).await;
    assert_eq!(value["details"]["code"], "invalid_uuid");
}
