//! Tests for payroll administration.

use std::sync::Arc;

use chrono::NaiveDate;
use rstest::rstest;

use super::*;
use crate::domain::ports::{MockSalaryPaymentRepository, MockStaffRepository};
use crate::domain::test_fixtures::{RecordingNotifier, fixture_clock, fixture_now, user};
use crate::domain::{ErrorCode, Money, Role};

fn service(
    staff: MockStaffRepository,
    payments: MockSalaryPaymentRepository,
) -> PayrollService<MockStaffRepository, MockSalaryPaymentRepository> {
    PayrollService::new(
        Arc::new(staff),
        Arc::new(payments),
        Arc::new(RecordingNotifier::default()),
        fixture_clock(),
    )
}

fn member(name: &str, base: i64, bonus: i64, deductions: i64) -> Staff {
    Staff {
        id: StaffId::random(),
        name: name.to_owned(),
        designation: "Front Desk".to_owned(),
        joining_date: NaiveDate::from_ymd_opt(2024, 6, 1).expect("date"),
        base_salary: Money::from_major(base),
        bonus: Money::from_major(bonus),
        deductions: Money::from_major(deductions),
    }
}

fn payment(staff_id: StaffId, status: PaymentStatus) -> SalaryPayment {
    SalaryPayment {
        id: SalaryPaymentId::random(),
        staff_id,
        month: Month::June,
        year: 2025,
        amount: Money::from_major(20_000),
        status,
        timestamp: fixture_now(),
    }
}

#[rstest]
#[case(Role::FrontDesk)]
#[case(Role::Accountant)]
#[tokio::test]
async fn payroll_is_admin_only(#[case] role: Role) {
    let subject = service(MockStaffRepository::new(), MockSalaryPaymentRepository::new());
    let err = subject.list_staff(&user(role)).await.expect_err("forbidden");
    assert_eq!(err.code(), ErrorCode::Forbidden);
}

#[rstest]
#[tokio::test]
async fn cycle_defaults_to_current_month_with_net_amounts() {
    let roster = vec![member("Sumi", 20_000, 2_000, 500), member("Arif", 1_000, 0, 3_000)];
    let mut staff = MockStaffRepository::new();
    staff.expect_list().return_once(move || Ok(roster));
    let mut payments = MockSalaryPaymentRepository::new();
    payments
        .expect_exists_for()
        .withf(|month, year| *month == Month::March && *year == 2025)
        .return_once(|_, _| Ok(false));
    payments
        .expect_insert_many()
        .withf(|batch| batch.len() == 2)
        .times(1)
        .return_once(|_| Ok(()));
    let subject = service(staff, payments);

    let batch = subject
        .generate_cycle(&user(Role::Admin), CycleRequest::default())
        .await
        .expect("cycle");

    assert!(batch.iter().all(|p| p.status == PaymentStatus::Pending));
    assert!(batch.iter().all(|p| p.timestamp == fixture_now()));
    let arif = batch.iter().find(|p| p.amount == Money::ZERO);
    let sumi = batch.iter().find(|p| p.amount == Money::from_major(21_500));
    assert!(arif.is_some() && sumi.is_some());
}

#[rstest]
#[case(false, true)]
#[case(true, false)]
#[tokio::test]
async fn repeated_cycle_needs_confirmation(#[case] allow: bool, #[case] rejected: bool) {
    let mut staff = MockStaffRepository::new();
    staff.expect_list().returning(|| Ok(vec![]));
    let mut payments = MockSalaryPaymentRepository::new();
    payments.expect_exists_for().return_once(|_, _| Ok(true));
    payments.expect_insert_many().returning(|_| Ok(()));
    let subject = service(staff, payments);

    let result = subject
        .generate_cycle(
            &user(Role::Admin),
            CycleRequest {
                month: Some(Month::January),
                year: Some(2025),
                allow_duplicates: allow,
            },
        )
        .await;

    match (rejected, result) {
        (true, Err(err)) => assert_eq!(err.code(), ErrorCode::Conflict),
        (false, Ok(batch)) => assert!(batch.is_empty()),
        (expected, other) => panic!("rejected={expected}, got {other:?}"),
    }
}

#[rstest]
#[tokio::test]
async fn deleting_staff_removes_payments_first() {
    let id = StaffId::random();
    let owned = payment(id, PaymentStatus::Paid);
    let owned_id = owned.id;
    let unrelated = payment(StaffId::random(), PaymentStatus::Pending);
    let mut staff = MockStaffRepository::new();
    staff
        .expect_find()
        .return_once(|_| Ok(Some(member("Sumi", 20_000, 0, 0))));
    staff.expect_delete().times(1).return_once(|_| Ok(true));
    let mut payments = MockSalaryPaymentRepository::new();
    payments
        .expect_list()
        .return_once(move || Ok(vec![owned, unrelated]));
    payments
        .expect_delete_for_staff()
        .withf(move |staff_id| *staff_id == id)
        .times(1)
        .return_once(|_| Ok(1));
    let notifier = Arc::new(RecordingNotifier::default());
    let subject = PayrollService::new(
        Arc::new(staff),
        Arc::new(payments),
        notifier.clone(),
        fixture_clock(),
    );

    subject
        .delete_staff(&user(Role::Admin), &id)
        .await
        .expect("deleted");

    let events: Vec<_> = notifier
        .events()
        .into_iter()
        .map(|event| (event.table, event.kind, event.id))
        .collect();
    assert_eq!(
        events,
        vec![
            (ChangeTable::SalaryPayments, ChangeKind::Delete, owned_id.to_string()),
            (ChangeTable::Staff, ChangeKind::Delete, id.to_string()),
        ]
    );
}

#[rstest]
#[tokio::test]
async fn deleting_missing_staff_keeps_payments() {
    let mut staff = MockStaffRepository::new();
    staff.expect_find().return_once(|_| Ok(None));
    staff.expect_delete().never();
    let mut payments = MockSalaryPaymentRepository::new();
    payments.expect_delete_for_staff().never();
    let subject = service(staff, payments);

    let err = subject
        .delete_staff(&user(Role::Admin), &StaffId::random())
        .await
        .expect_err("missing");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn set_status_on_missing_payment_is_not_found() {
    let mut payments = MockSalaryPaymentRepository::new();
    payments.expect_find().return_once(|_| Ok(None));
    let subject = service(MockStaffRepository::new(), payments);
    let err = subject
        .set_payment_status(&user(Role::Admin), &SalaryPaymentId::random(), PaymentStatus::Paid)
        .await
        .expect_err("missing");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn list_staff_orders_by_name() {
    let roster = vec![member("zara", 1, 0, 0), member("Arif", 1, 0, 0)];
    let mut staff = MockStaffRepository::new();
    staff.expect_list().return_once(move || Ok(roster));
    let subject = service(staff, MockSalaryPaymentRepository::new());
    let listed = subject.list_staff(&user(Role::Admin)).await.expect("listed");
    let names: Vec<&str> = listed.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["Arif", "zara"]);
}
