//! Ports for staff records and salary payments.
use async_trait::async_trait;

use crate::domain::{Month, SalaryPayment, SalaryPaymentId, Staff, StaffId};

use super::RepositoryError;

/// Staff storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StaffRepository: Send + Sync {
    /// Every staff member ordered by name.
    async fn list(&self) -> Result<Vec<Staff>, RepositoryError>;

    /// Fetch a staff member by id.
    async fn find(&self, id: &StaffId) -> Result<Option<Staff>, RepositoryError>;

    /// Insert a staff member.
    async fn insert(&self, staff: &Staff) -> Result<(), RepositoryError>;

    /// Replace a stored staff member.
    async fn update(&self, staff: &Staff) -> Result<(), RepositoryError>;

    /// Remove a staff member, returning whether a row was deleted.
    async fn delete(&self, id: &StaffId) -> Result<bool, RepositoryError>;
}

/// Salary payment storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SalaryPaymentRepository: Send + Sync {
    /// Every payment, newest first.
    async fn list(&self) -> Result<Vec<SalaryPayment>, RepositoryError>;

    /// Fetch a payment by id.
    async fn find(&self, id: &SalaryPaymentId) -> Result<Option<SalaryPayment>, RepositoryError>;

    /// Whether any payment exists for the month.
    async fn exists_for(&self, month: Month, year: i32) -> Result<bool, RepositoryError>;

    /// Insert a batch of payments.
    async fn insert_many(&self, payments: &[SalaryPayment]) -> Result<(), RepositoryError>;

    /// Replace a stored payment.
    async fn update(&self, payment: &SalaryPayment) -> Result<(), RepositoryError>;

    /// Remove a payment, returning whether a row was deleted.
    async fn delete(&self, id: &SalaryPaymentId) -> Result<bool, RepositoryError>;

    /// Remove every payment for a staff member, returning the count.
    async fn delete_for_staff(&self, staff_id: &StaffId) -> Result<u64, RepositoryError>;
}
