//! Tests for login and account administration.

use std::sync::Arc;

use rstest::rstest;
use zeroize::Zeroizing;

use super::*;
use crate::domain::ports::{MockPasswordHasher, MockUserRepository, UserCredentials};
use crate::domain::test_fixtures::{RecordingNotifier, fixture_clock, user};
use crate::domain::ErrorCode;

fn service(
    users: MockUserRepository,
    hasher: MockPasswordHasher,
) -> UserAdminService<MockUserRepository> {
    UserAdminService::new(
        Arc::new(users),
        Arc::new(hasher),
        Arc::new(RecordingNotifier::default()),
        fixture_clock(),
    )
}

fn echo_hasher() -> MockPasswordHasher {
    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_hash()
        .returning(|password| Ok(format!("hashed:{password}")));
    hasher
        .expect_verify()
        .returning(|password, hash| hash == format!("hashed:{password}"));
    hasher
}

fn credentials(email: &str, password: &str) -> LoginCredentials {
    LoginCredentials::try_from_parts(email, password).expect("credentials")
}

#[rstest]
#[case("admin123", true)]
#[case("wrong-password", false)]
#[tokio::test]
async fn authenticate_checks_stored_hash(#[case] password: &str, #[case] accepted: bool) {
    let account = user(Role::FrontDesk);
    let expected = account.clone();
    let mut users = MockUserRepository::new();
    users.expect_find_credentials().return_once(move |_| {
        Ok(Some(UserCredentials {
            user: account,
            password_hash: "hashed:admin123".to_owned(),
        }))
    });
    let subject = service(users, echo_hasher());

    let result = subject
        .authenticate(&credentials("frontdesk@hotelfountain.com", password))
        .await;
    match (accepted, result) {
        (true, Ok(found)) => assert_eq!(found, expected),
        (false, Err(err)) => assert_eq!(err.code(), ErrorCode::Unauthorized),
        (flag, other) => panic!("accepted={flag}, got {other:?}"),
    }
}

#[rstest]
#[tokio::test]
async fn unknown_email_is_unauthorized() {
    let mut users = MockUserRepository::new();
    users.expect_find_credentials().return_once(|_| Ok(None));
    let subject = service(users, echo_hasher());
    let err = subject
        .authenticate(&credentials("ghost@hotelfountain.com", "whatever"))
        .await
        .expect_err("unknown");
    assert_eq!(err.code(), ErrorCode::Unauthorized);
}

#[rstest]
#[tokio::test]
async fn bootstrap_creates_admin_only_when_empty() {
    let mut users = MockUserRepository::new();
    users.expect_count().return_once(|| Ok(0));
    users
        .expect_insert()
        .withf(|account, hash| {
            account.email.as_ref() == BOOTSTRAP_ADMIN_EMAIL
                && account.role == Role::Admin
                && hash == "hashed:admin123"
        })
        .times(1)
        .return_once(|_, _| Ok(()));
    let subject = service(users, echo_hasher());

    let created = subject
        .bootstrap_admin("admin123")
        .await
        .expect("bootstrap")
        .expect("admin created");
    assert_eq!(created.name, BOOTSTRAP_ADMIN_NAME);
}

#[rstest]
#[tokio::test]
async fn bootstrap_is_skipped_when_accounts_exist() {
    let mut users = MockUserRepository::new();
    users.expect_count().return_once(|| Ok(2));
    users.expect_insert().never();
    let subject = service(users, echo_hasher());
    assert!(subject.bootstrap_admin("admin123").await.expect("ok").is_none());
}

#[rstest]
#[tokio::test]
async fn create_user_rejects_short_password() {
    let subject = service(MockUserRepository::new(), echo_hasher());
    let err = subject
        .create_user(
            &user(Role::Admin),
            NewUser {
                email: EmailAddress::new("new@hotelfountain.com").expect("email"),
                name: "New Hire".into(),
                role: Role::FrontDesk,
                password: Zeroizing::new("123".into()),
            },
        )
        .await
        .expect_err("short password");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(err.details().expect("details")["field"], "password");
}

#[rstest]
#[tokio::test]
async fn create_user_rejects_taken_email() {
    let existing = user(Role::Accountant);
    let mut users = MockUserRepository::new();
    users.expect_find_credentials().return_once(move |_| {
        Ok(Some(UserCredentials {
            user: existing,
            password_hash: "x".into(),
        }))
    });
    users.expect_insert().never();
    let subject = service(users, echo_hasher());

    let err = subject
        .create_user(
            &user(Role::Admin),
            NewUser {
                email: EmailAddress::new("accountant@hotelfountain.com").expect("email"),
                name: "Copy".into(),
                role: Role::Accountant,
                password: Zeroizing::new("secret1".into()),
            },
        )
        .await
        .expect_err("taken");
    assert_eq!(err.code(), ErrorCode::Conflict);
}

#[rstest]
#[tokio::test]
async fn update_user_rehashes_new_password() {
    let target = user(Role::FrontDesk);
    let id = target.id;
    let mut users = MockUserRepository::new();
    users.expect_find().return_once(move |_| Ok(Some(target)));
    users
        .expect_update()
        .withf(|account, hash| {
            account.role == Role::Accountant && hash.as_deref() == Some("hashed:rotated1")
        })
        .times(1)
        .return_once(|_, _| Ok(()));
    let subject = service(users, echo_hasher());

    let updated = subject
        .update_user(
            &user(Role::Admin),
            &id,
            UserChanges {
                name: None,
                role: Some(Role::Accountant),
                password: Some(Zeroizing::new("rotated1".into())),
            },
        )
        .await
        .expect("updated");
    assert_eq!(updated.role, Role::Accountant);
}

#[rstest]
#[tokio::test]
async fn admins_cannot_delete_themselves() {
    let admin = user(Role::Admin);
    let subject = service(MockUserRepository::new(), echo_hasher());
    let err = subject
        .delete_user(&admin, &admin.id)
        .await
        .expect_err("self delete");
    assert_eq!(err.code(), ErrorCode::Forbidden);
}

#[rstest]
#[case(Role::FrontDesk)]
#[case(Role::Accountant)]
#[tokio::test]
async fn non_admins_cannot_list_users(#[case] role: Role) {
    let subject = service(MockUserRepository::new(), echo_hasher());
    let err = subject.list_users(&user(role)).await.expect_err("forbidden");
    assert_eq!(err.code(), ErrorCode::Forbidden);
}

#[rstest]
#[tokio::test]
async fn vanished_session_account_is_unauthorized() {
    let mut users = MockUserRepository::new();
    users.expect_find().return_once(|_| Ok(None));
    let subject = service(users, echo_hasher());
    let err = subject
        .current_user(&UserId::random())
        .await
        .expect_err("gone");
    assert_eq!(err.code(), ErrorCode::Unauthorized);
}
