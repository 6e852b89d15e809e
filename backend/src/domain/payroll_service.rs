//! Staff roster and salary cycles.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Datelike;
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{
    ChangeNotifier, CycleRequest, PayrollAdmin, SalaryPaymentRepository, StaffRepository,
    map_repository_error,
};
use crate::domain::{
    Capability, ChangeEvent, ChangeKind, ChangeTable, Error, Month, PaymentGridRow, PaymentStatus,
    PayrollSummary, SalaryPayment, SalaryPaymentId, Staff, StaffDraft, StaffId, User,
    payment_grid,
};

/// Domain service implementing [`PayrollAdmin`].
#[derive(Clone)]
pub struct PayrollService<T, P> {
    staff: Arc<T>,
    payments: Arc<P>,
    notifier: Arc<dyn ChangeNotifier>,
    clock: Arc<dyn Clock>,
}

impl<T, P> PayrollService<T, P> {
    /// Create the service.
    pub fn new(
        staff: Arc<T>,
        payments: Arc<P>,
        notifier: Arc<dyn ChangeNotifier>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            staff,
            payments,
            notifier,
            clock,
        }
    }
}

fn require_payroll(actor: &User) -> Result<(), Error> {
    actor.role.require(Capability::ManagePayroll)
}

impl<T, P> PayrollService<T, P>
where
    T: StaffRepository,
    P: SalaryPaymentRepository,
{
    async fn roster(&self) -> Result<Vec<Staff>, Error> {
        let mut staff = self
            .staff
            .list()
            .await
            .map_err(|err| map_repository_error("staff", err))?;
        staff.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        Ok(staff)
    }

    async fn all_payments(&self) -> Result<Vec<SalaryPayment>, Error> {
        self.payments
            .list()
            .await
            .map_err(|err| map_repository_error("salary payment", err))
    }

    fn publish_staff(&self, kind: ChangeKind, member: &Staff) {
        self.notifier.publish(ChangeEvent::upserted(
            ChangeTable::Staff,
            kind,
            member.id,
            member,
            self.clock.utc(),
        ));
    }

    fn publish_payment(&self, kind: ChangeKind, payment: &SalaryPayment) {
        self.notifier.publish(ChangeEvent::upserted(
            ChangeTable::SalaryPayments,
            kind,
            payment.id,
            payment,
            self.clock.utc(),
        ));
    }
}

#[async_trait]
impl<T, P> PayrollAdmin for PayrollService<T, P>
where
    T: StaffRepository,
    P: SalaryPaymentRepository,
{
    async fn list_staff(&self, actor: &User) -> Result<Vec<Staff>, Error> {
        require_payroll(actor)?;
        self.roster().await
    }

    async fn create_staff(&self, actor: &User, draft: StaffDraft) -> Result<Staff, Error> {
        require_payroll(actor)?;
        let member = Staff::from_draft(StaffId::random(), draft)?;
        self.staff
            .insert(&member)
            .await
            .map_err(|err| map_repository_error("staff", err))?;
        self.publish_staff(ChangeKind::Insert, &member);
        info!(staff_id = %member.id, "staff member added");
        Ok(member)
    }

    async fn update_staff(
        &self,
        actor: &User,
        id: &StaffId,
        draft: StaffDraft,
    ) -> Result<Staff, Error> {
        require_payroll(actor)?;
        if self
            .staff
            .find(id)
            .await
            .map_err(|err| map_repository_error("staff", err))?
            .is_none()
        {
            return Err(Error::not_found(format!("staff member {id} not found")));
        }
        let member = Staff::from_draft(*id, draft)?;
        self.staff
            .update(&member)
            .await
            .map_err(|err| map_repository_error("staff", err))?;
        self.publish_staff(ChangeKind::Update, &member);
        Ok(member)
    }

    async fn delete_staff(&self, actor: &User, id: &StaffId) -> Result<(), Error> {
        require_payroll(actor)?;
        if self
            .staff
            .find(id)
            .await
            .map_err(|err| map_repository_error("staff", err))?
            .is_none()
        {
            return Err(Error::not_found(format!("staff member {id} not found")));
        }
        let owned: Vec<SalaryPaymentId> = self
            .all_payments()
            .await?
            .into_iter()
            .filter(|payment| payment.staff_id == *id)
            .map(|payment| payment.id)
            .collect();
        let removed_payments = self
            .payments
            .delete_for_staff(id)
            .await
            .map_err(|err| map_repository_error("salary payment", err))?;
        let deleted = self
            .staff
            .delete(id)
            .await
            .map_err(|err| map_repository_error("staff", err))?;
        if !deleted {
            return Err(Error::not_found(format!("staff member {id} not found")));
        }
        let now = self.clock.utc();
        for payment_id in &owned {
            self.notifier.publish(ChangeEvent::deleted(
                ChangeTable::SalaryPayments,
                payment_id,
                now,
            ));
        }
        self.notifier
            .publish(ChangeEvent::deleted(ChangeTable::Staff, id, now));
        info!(staff_id = %id, removed_payments, "staff member removed");
        Ok(())
    }

    async fn summary(&self, actor: &User) -> Result<PayrollSummary, Error> {
        require_payroll(actor)?;
        let staff = self.roster().await?;
        let payments = self.all_payments().await?;
        Ok(PayrollSummary::compute(&staff, &payments))
    }

    async fn generate_cycle(
        &self,
        actor: &User,
        request: CycleRequest,
    ) -> Result<Vec<SalaryPayment>, Error> {
        require_payroll(actor)?;
        let now = self.clock.utc();
        let month = request.month.unwrap_or_else(|| Month::of(now.date_naive()));
        let year = request.year.unwrap_or_else(|| now.year());

        let exists = self
            .payments
            .exists_for(month, year)
            .await
            .map_err(|err| map_repository_error("salary payment", err))?;
        if exists && !request.allow_duplicates {
            return Err(Error::conflict(format!(
                "payments already exist for {month} {year}"
            ))
            .with_details(serde_json::json!({
                "code": "cycle_exists",
                "month": month,
                "year": year,
            })));
        }

        let batch: Vec<SalaryPayment> = self
            .roster()
            .await?
            .iter()
            .map(|member| SalaryPayment {
                id: SalaryPaymentId::random(),
                staff_id: member.id,
                month,
                year,
                amount: member.net_salary(),
                status: PaymentStatus::Pending,
                timestamp: now,
            })
            .collect();
        self.payments
            .insert_many(&batch)
            .await
            .map_err(|err| map_repository_error("salary payment", err))?;
        for payment in &batch {
            self.publish_payment(ChangeKind::Insert, payment);
        }
        info!(%month, year, count = batch.len(), "salary cycle generated");
        Ok(batch)
    }

    async fn payment_grid(
        &self,
        actor: &User,
        year: Option<i32>,
    ) -> Result<Vec<PaymentGridRow>, Error> {
        require_payroll(actor)?;
        let year = year.unwrap_or_else(|| self.clock.utc().year());
        let staff = self.roster().await?;
        let payments = self.all_payments().await?;
        Ok(payment_grid(year, &staff, &payments))
    }

    async fn set_payment_status(
        &self,
        actor: &User,
        id: &SalaryPaymentId,
        status: PaymentStatus,
    ) -> Result<SalaryPayment, Error> {
        require_payroll(actor)?;
        let mut payment = self
            .payments
            .find(id)
            .await
            .map_err(|err| map_repository_error("salary payment", err))?
            .ok_or_else(|| Error::not_found(format!("salary payment {id} not found")))?;
        payment.status = status;
        self.payments
            .update(&payment)
            .await
            .map_err(|err| map_repository_error("salary payment", err))?;
        self.publish_payment(ChangeKind::Update, &payment);
        info!(payment_id = %payment.id, %status, "salary payment updated");
        Ok(payment)
    }

    async fn delete_payment(&self, actor: &User, id: &SalaryPaymentId) -> Result<(), Error> {
        require_payroll(actor)?;
        let deleted = self
            .payments
            .delete(id)
            .await
            .map_err(|err| map_repository_error("salary payment", err))?;
        if !deleted {
            return Err(Error::not_found(format!("salary payment {id} not found")));
        }
        self.notifier.publish(ChangeEvent::deleted(
            ChangeTable::SalaryPayments,
            id,
            self.clock.utc(),
        ));
        Ok(())
    }
}

#[cfg(test)]
#[path = "payroll_service_tests.rs"]
mod tests;
