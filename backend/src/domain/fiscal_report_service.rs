//! Daily ledger, token adjustments and day closing.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{
    ChangeNotifier, DayClosing, FiscalDayRepository, FiscalReports, GuestRepository,
    ReservationRepository, map_repository_error,
};
use crate::domain::service_support::GuestDirectory;
use crate::domain::{
    Capability, ChangeEvent, ChangeKind, ChangeTable, DailyReport, Error, FiscalDay, Money, User,
};

/// Domain service implementing [`FiscalReports`].
#[derive(Clone)]
pub struct FiscalReportService<S, G, F> {
    reservations: Arc<S>,
    guests: Arc<G>,
    days: Arc<F>,
    notifier: Arc<dyn ChangeNotifier>,
    clock: Arc<dyn Clock>,
}

impl<S, G, F> FiscalReportService<S, G, F> {
    /// Create the service.
    pub fn new(
        reservations: Arc<S>,
        guests: Arc<G>,
        days: Arc<F>,
        notifier: Arc<dyn ChangeNotifier>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            reservations,
            guests,
            days,
            notifier,
            clock,
        }
    }
}

impl<S, G, F> FiscalReportService<S, G, F>
where
    S: ReservationRepository,
    G: GuestRepository,
    F: FiscalDayRepository,
{
    async fn fiscal_day(&self, date: NaiveDate) -> Result<FiscalDay, Error> {
        Ok(self
            .days
            .find(date)
            .await
            .map_err(|err| map_repository_error("fiscal day", err))?
            .unwrap_or_else(|| FiscalDay::open(date)))
    }

    async fn open_day(&self, date: NaiveDate) -> Result<FiscalDay, Error> {
        let day = self.fiscal_day(date).await?;
        if day.is_closed() {
            return Err(Error::conflict(format!("fiscal day {date} is already closed")));
        }
        Ok(day)
    }

    async fn store(&self, day: &FiscalDay) -> Result<(), Error> {
        self.days
            .upsert(day)
            .await
            .map_err(|err| map_repository_error("fiscal day", err))?;
        self.notifier.publish(ChangeEvent::upserted(
            ChangeTable::FiscalDays,
            ChangeKind::Update,
            day.date,
            day,
            self.clock.utc(),
        ));
        Ok(())
    }

    async fn report_for(&self, day: &FiscalDay) -> Result<DailyReport, Error> {
        let stays = self
            .reservations
            .list()
            .await
            .map_err(|err| map_repository_error("reservation", err))?;
        let directory = GuestDirectory::new(
            self.guests
                .list()
                .await
                .map_err(|err| map_repository_error("guest", err))?,
        );
        Ok(DailyReport::build(day, &stays, |stay| {
            directory.primary_name(stay)
        }))
    }
}

#[async_trait]
impl<S, G, F> FiscalReports for FiscalReportService<S, G, F>
where
    S: ReservationRepository,
    G: GuestRepository,
    F: FiscalDayRepository,
{
    async fn daily_report(
        &self,
        date: Option<NaiveDate>,
        search: Option<String>,
    ) -> Result<DailyReport, Error> {
        let date = date.unwrap_or_else(|| self.clock.utc().date_naive());
        let day = self.fiscal_day(date).await?;
        let report = self.report_for(&day).await?;
        Ok(match search {
            Some(term) => report.search(&term),
            None => report,
        })
    }

    async fn save_token(
        &self,
        actor: &User,
        date: NaiveDate,
        amount: Money,
    ) -> Result<DailyReport, Error> {
        actor.role.require(Capability::ManageFrontDesk)?;
        if amount.is_negative() {
            return Err(Error::invalid_field(
                "amount",
                "negative",
                "token adjustment cannot be negative",
            ));
        }
        let mut day = self.open_day(date).await?;
        day.token_adjustment = amount;
        self.store(&day).await?;
        info!(%date, token = %amount, "token adjustment saved");
        self.report_for(&day).await
    }

    async fn close_day(&self, actor: &User, date: NaiveDate) -> Result<DayClosing, Error> {
        actor.role.require(Capability::ManageFrontDesk)?;
        let next_date = date
            .succ_opt()
            .ok_or_else(|| Error::invalid_request(format!("no fiscal date follows {date}")))?;
        let mut day = self.open_day(date).await?;
        day.closed_at = Some(self.clock.utc());
        self.store(&day).await?;
        let report = self.report_for(&day).await?;
        info!(
            %date,
            closing_balance = %report.summary.closing_balance,
            "fiscal day closed"
        );
        Ok(DayClosing { report, next_date })
    }
}
