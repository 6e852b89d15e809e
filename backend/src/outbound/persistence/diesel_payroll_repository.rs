//! PostgreSQL-backed staff and salary payment stores.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{RepositoryError, SalaryPaymentRepository, StaffRepository};
use crate::domain::{Month, SalaryPayment, SalaryPaymentId, Staff, StaffId};

use super::diesel_helpers::{deleted, map_diesel_error, map_pool_error};
use super::models::{SalaryPaymentRow, StaffRow};
use super::pool::DbPool;
use super::schema::{salary_payments, staff};

/// Diesel implementation of [`StaffRepository`].
#[derive(Clone)]
pub struct DieselStaffRepository {
    pool: DbPool,
}

impl DieselStaffRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StaffRepository for DieselStaffRepository {
    async fn list(&self) -> Result<Vec<Staff>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<StaffRow> = staff::table
            .order(staff::name.asc())
            .select(StaffRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(Staff::from).collect())
    }

    async fn find(&self, id: &StaffId) -> Result<Option<Staff>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<StaffRow> = staff::table
            .find(id.as_uuid())
            .select(StaffRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(Staff::from))
    }

    async fn insert(&self, member: &Staff) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(staff::table)
            .values(StaffRow::from(member))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn update(&self, member: &Staff) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::update(staff::table.find(member.id.as_uuid()))
            .set(StaffRow::from(member))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn delete(&self, id: &StaffId) -> Result<bool, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::delete(staff::table.find(id.as_uuid()))
            .execute(&mut conn)
            .await
            .map(deleted)
            .map_err(map_diesel_error)
    }
}

/// Diesel implementation of [`SalaryPaymentRepository`].
#[derive(Clone)]
pub struct DieselSalaryPaymentRepository {
    pool: DbPool,
}

impl DieselSalaryPaymentRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SalaryPaymentRepository for DieselSalaryPaymentRepository {
    async fn list(&self) -> Result<Vec<SalaryPayment>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<SalaryPaymentRow> = salary_payments::table
            .order(salary_payments::paid_at.desc())
            .select(SalaryPaymentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(SalaryPayment::try_from).collect()
    }

    async fn find(&self, id: &SalaryPaymentId) -> Result<Option<SalaryPayment>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<SalaryPaymentRow> = salary_payments::table
            .find(id.as_uuid())
            .select(SalaryPaymentRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(SalaryPayment::try_from).transpose()
    }

    async fn exists_for(&self, month: Month, year: i32) -> Result<bool, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::select(diesel::dsl::exists(
            salary_payments::table
                .filter(salary_payments::month.eq(month.as_str()))
                .filter(salary_payments::year.eq(year)),
        ))
        .get_result(&mut conn)
        .await
        .map_err(map_diesel_error)
    }

    async fn insert_many(&self, payments: &[SalaryPayment]) -> Result<(), RepositoryError> {
        if payments.is_empty() {
            return Ok(());
        }
        let rows: Vec<SalaryPaymentRow> = payments.iter().map(SalaryPaymentRow::from).collect();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(salary_payments::table)
            .values(rows)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn update(&self, payment: &SalaryPayment) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::update(salary_payments::table.find(payment.id.as_uuid()))
            .set(SalaryPaymentRow::from(payment))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn delete(&self, id: &SalaryPaymentId) -> Result<bool, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::delete(salary_payments::table.find(id.as_uuid()))
            .execute(&mut conn)
            .await
            .map(deleted)
            .map_err(map_diesel_error)
    }

    async fn delete_for_staff(&self, staff_id: &StaffId) -> Result<u64, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = diesel::delete(
            salary_payments::table.filter(salary_payments::staff_id.eq(staff_id.as_uuid())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;
        Ok(u64::try_from(rows).unwrap_or(u64::MAX))
    }
}
