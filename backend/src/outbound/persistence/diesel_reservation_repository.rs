//! PostgreSQL-backed [`ReservationRepository`].

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{RepositoryError, ReservationRepository};
use crate::domain::{Reservation, ReservationId};

use super::diesel_helpers::{deleted, map_diesel_error, map_pool_error};
use super::models::ReservationRow;
use super::pool::DbPool;
use super::schema::reservations;

/// Diesel implementation of the stay store.
///
/// Overlap checks run in the domain over [`list`](ReservationRepository::list);
/// the table carries no exclusion constraint.
#[derive(Clone)]
pub struct DieselReservationRepository {
    pool: DbPool,
}

impl DieselReservationRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReservationRepository for DieselReservationRepository {
    async fn list(&self) -> Result<Vec<Reservation>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<ReservationRow> = reservations::table
            .order(reservations::created_at.desc())
            .select(ReservationRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(Reservation::try_from).collect()
    }

    async fn find(&self, id: &ReservationId) -> Result<Option<Reservation>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<ReservationRow> = reservations::table
            .find(id.as_uuid())
            .select(ReservationRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(Reservation::try_from).transpose()
    }

    async fn insert(&self, reservation: &Reservation) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(reservations::table)
            .values(ReservationRow::from(reservation))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn update(&self, reservation: &Reservation) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::update(reservations::table.find(reservation.id.as_uuid()))
            .set(ReservationRow::from(reservation))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn delete(&self, id: &ReservationId) -> Result<bool, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::delete(reservations::table.find(id.as_uuid()))
            .execute(&mut conn)
            .await
            .map(deleted)
            .map_err(map_diesel_error)
    }
}
