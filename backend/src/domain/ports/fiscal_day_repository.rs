//! Port abstraction for fiscal day state.
use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::FiscalDay;

use super::RepositoryError;

/// Token adjustments and closing marks keyed by date.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FiscalDayRepository: Send + Sync {
    /// Stored state for `date`, if any.
    async fn find(&self, date: NaiveDate) -> Result<Option<FiscalDay>, RepositoryError>;

    /// Insert or replace the state for `day.date`.
    async fn upsert(&self, day: &FiscalDay) -> Result<(), RepositoryError>;
}
