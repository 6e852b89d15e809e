//! Driving port for payroll administration.

use async_trait::async_trait;

use crate::domain::{
    Error, Month, PaymentGridRow, PaymentStatus, PayrollSummary, SalaryPayment, SalaryPaymentId,
    Staff, StaffDraft, StaffId, User,
};

/// Request to open a salary cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleRequest {
    /// Defaults to the current month.
    pub month: Option<Month>,
    /// Defaults to the current year.
    pub year: Option<i32>,
    /// Permit a second batch for a month that already has payments.
    pub allow_duplicates: bool,
}

/// Payroll use cases. Every operation is admin only.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PayrollAdmin: Send + Sync {
    /// Staff ordered by name.
    async fn list_staff(&self, actor: &User) -> Result<Vec<Staff>, Error>;

    /// Add a staff member.
    async fn create_staff(&self, actor: &User, draft: StaffDraft) -> Result<Staff, Error>;

    /// Replace a staff member's details.
    async fn update_staff(&self, actor: &User, id: &StaffId, draft: StaffDraft)
    -> Result<Staff, Error>;

    /// Remove a staff member and their payment history.
    async fn delete_staff(&self, actor: &User, id: &StaffId) -> Result<(), Error>;

    /// Headcount, monthly payroll and pending backlog.
    async fn summary(&self, actor: &User) -> Result<PayrollSummary, Error>;

    /// Create one pending payment per staff member.
    async fn generate_cycle(
        &self,
        actor: &User,
        request: CycleRequest,
    ) -> Result<Vec<SalaryPayment>, Error>;

    /// Staff × month grid for `year`, defaulting to the current year.
    async fn payment_grid(&self, actor: &User, year: Option<i32>)
    -> Result<Vec<PaymentGridRow>, Error>;

    /// Mark a payment paid or pending.
    async fn set_payment_status(
        &self,
        actor: &User,
        id: &SalaryPaymentId,
        status: PaymentStatus,
    ) -> Result<SalaryPayment, Error>;

    /// Remove a payment.
    async fn delete_payment(&self, actor: &User, id: &SalaryPaymentId) -> Result<(), Error>;
}
