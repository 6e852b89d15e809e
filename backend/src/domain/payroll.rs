//! Staff payroll: salaries, monthly cycles and the payout grid.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::labels::labelled_enum;
use super::{Error, Money, SalaryPaymentId, StaffId};

labelled_enum! {
    /// Calendar month used to key salary cycles.
    pub enum Month ("month") {
        January => "January",
        February => "February",
        March => "March",
        April => "April",
        May => "May",
        June => "June",
        July => "July",
        August => "August",
        September => "September",
        October => "October",
        November => "November",
        December => "December",
    }
}

impl Month {
    /// Month containing `date`.
    #[must_use]
    pub fn of(date: NaiveDate) -> Self {
        let index = usize::try_from(date.month0()).unwrap_or_default();
        Self::ALL.get(index).copied().unwrap_or(Self::January)
    }
}

labelled_enum! {
    /// Settlement state of a salary payment.
    pub enum PaymentStatus ("payment status") {
        Paid => "PAID",
        Pending => "PENDING",
    }
}

/// Validation failures for staff records.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StaffValidationError {
    #[error("staff name must not be empty")]
    EmptyName,
    #[error("designation must not be empty")]
    EmptyDesignation,
    #[error("{field} must not be negative")]
    NegativeAmount { field: &'static str },
}

impl From<StaffValidationError> for Error {
    fn from(err: StaffValidationError) -> Self {
        let (field, code) = match &err {
            StaffValidationError::EmptyName => ("name", "empty"),
            StaffValidationError::EmptyDesignation => ("designation", "empty"),
            StaffValidationError::NegativeAmount { field } => (*field, "negative"),
        };
        Error::invalid_field(field, code, err.to_string())
    }
}

/// Salaried staff member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Staff {
    pub id: StaffId,
    pub name: String,
    pub designation: String,
    pub joining_date: NaiveDate,
    pub base_salary: Money,
    pub bonus: Money,
    pub deductions: Money,
}

impl Staff {
    /// Monthly take-home pay, never below zero.
    ///
    /// # Examples
    /// ```
    /// use chrono::NaiveDate;
    /// use frontdesk::domain::{Money, Staff, StaffDraft, StaffId};
    ///
    /// let staff = Staff::from_draft(StaffId::random(), StaffDraft {
    ///     name: "Sumi".into(),
    ///     designation: "Housekeeping".into(),
    ///     joining_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
    ///     base_salary: Money::from_major(20_000),
    ///     bonus: Money::from_major(2_000),
    ///     deductions: Money::from_major(500),
    /// }).unwrap();
    /// assert_eq!(staff.net_salary(), Money::from_major(21_500));
    /// ```
    #[must_use]
    pub fn net_salary(&self) -> Money {
        (self.base_salary + self.bonus - self.deductions).floor_zero()
    }

    /// Build a staff record from validated input.
    pub fn from_draft(id: StaffId, draft: StaffDraft) -> Result<Self, StaffValidationError> {
        let name = draft.name.trim().to_owned();
        if name.is_empty() {
            return Err(StaffValidationError::EmptyName);
        }
        let designation = draft.designation.trim().to_owned();
        if designation.is_empty() {
            return Err(StaffValidationError::EmptyDesignation);
        }
        for (field, amount) in [
            ("baseSalary", draft.base_salary),
            ("bonus", draft.bonus),
            ("deductions", draft.deductions),
        ] {
            if amount.is_negative() {
                return Err(StaffValidationError::NegativeAmount { field });
            }
        }
        Ok(Self {
            id,
            name,
            designation,
            joining_date: draft.joining_date,
            base_salary: draft.base_salary,
            bonus: draft.bonus,
            deductions: draft.deductions,
        })
    }
}

/// Staff input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaffDraft {
    pub name: String,
    pub designation: String,
    pub joining_date: NaiveDate,
    pub base_salary: Money,
    pub bonus: Money,
    pub deductions: Money,
}

/// A salary payout for one staff member and month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryPayment {
    pub id: SalaryPaymentId,
    pub staff_id: StaffId,
    pub month: Month,
    pub year: i32,
    pub amount: Money,
    pub status: PaymentStatus,
    pub timestamp: DateTime<Utc>,
}

/// Headline payroll figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollSummary {
    pub headcount: usize,
    pub monthly_payroll: Money,
    pub pending_payments: usize,
}

impl PayrollSummary {
    /// Summarise the current roster and payment backlog.
    #[must_use]
    pub fn compute(staff: &[Staff], payments: &[SalaryPayment]) -> Self {
        Self {
            headcount: staff.len(),
            monthly_payroll: staff.iter().map(Staff::net_salary).sum(),
            pending_payments: payments
                .iter()
                .filter(|p| p.status == PaymentStatus::Pending)
                .count(),
        }
    }
}

/// Grid cell: the latest payment for a staff member in a month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentCell {
    pub month: Month,
    pub payment_id: Option<SalaryPaymentId>,
    pub status: Option<PaymentStatus>,
    pub amount: Option<Money>,
}

/// Grid row for one staff member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentGridRow {
    pub staff_id: StaffId,
    pub name: String,
    pub base_salary: Money,
    pub months: Vec<PaymentCell>,
}

/// Build the year grid, keeping the most recent payment per cell.
#[must_use]
pub fn payment_grid(year: i32, staff: &[Staff], payments: &[SalaryPayment]) -> Vec<PaymentGridRow> {
    staff
        .iter()
        .map(|member| PaymentGridRow {
            staff_id: member.id,
            name: member.name.clone(),
            base_salary: member.base_salary,
            months: Month::ALL
                .iter()
                .map(|&month| {
                    let latest = payments
                        .iter()
                        .filter(|p| p.staff_id == member.id && p.year == year && p.month == month)
                        .max_by_key(|p| p.timestamp);
                    PaymentCell {
                        month,
                        payment_id: latest.map(|p| p.id),
                        status: latest.map(|p| p.status),
                        amount: latest.map(|p| p.amount),
                    }
                })
                .collect(),
        })
        .collect()
}
