//! PostgreSQL-backed [`FiscalDayRepository`].

use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::RunQueryDsl;

use crate::domain::FiscalDay;
use crate::domain::ports::{FiscalDayRepository, RepositoryError};

use super::diesel_helpers::{map_diesel_error, map_pool_error};
use super::models::FiscalDayRow;
use super::pool::DbPool;
use super::schema::fiscal_days;

/// Diesel implementation of per-date fiscal state.
#[derive(Clone)]
pub struct DieselFiscalDayRepository {
    pool: DbPool,
}

impl DieselFiscalDayRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FiscalDayRepository for DieselFiscalDayRepository {
    async fn find(&self, date: NaiveDate) -> Result<Option<FiscalDay>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<FiscalDayRow> = fiscal_days::table
            .find(date)
            .select(FiscalDayRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(FiscalDay::from))
    }

    async fn upsert(&self, day: &FiscalDay) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(fiscal_days::table)
            .values(FiscalDayRow::from(day))
            .on_conflict(fiscal_days::date)
            .do_update()
            .set((
                fiscal_days::token_adjustment.eq(excluded(fiscal_days::token_adjustment)),
                fiscal_days::closed_at.eq(excluded(fiscal_days::closed_at)),
            ))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }
}
