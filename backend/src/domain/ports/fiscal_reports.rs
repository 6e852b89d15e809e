//! Driving port for daily fiscal reports.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::{DailyReport, Error, Money, User};

/// Result of closing a fiscal day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayClosing {
    pub report: DailyReport,
    pub next_date: NaiveDate,
}

/// Daily ledger use cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FiscalReports: Send + Sync {
    /// Ledger and totals for `date`, defaulting to today, narrowed to rows
    /// matching `search` when one is given.
    async fn daily_report(
        &self,
        date: Option<NaiveDate>,
        search: Option<String>,
    ) -> Result<DailyReport, Error>;

    /// Record the token adjustment for an open day.
    async fn save_token(
        &self,
        actor: &User,
        date: NaiveDate,
        amount: Money,
    ) -> Result<DailyReport, Error>;

    /// Close the day and move on to the next one.
    async fn close_day(&self, actor: &User, date: NaiveDate) -> Result<DayClosing, Error>;
}
