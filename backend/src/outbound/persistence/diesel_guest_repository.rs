//! PostgreSQL-backed [`GuestRepository`].

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sql_types::Text;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{GuestRepository, RepositoryError};
use crate::domain::{Guest, GuestId};

use super::diesel_helpers::{deleted, map_diesel_error, map_pool_error};
use super::models::GuestRow;
use super::pool::DbPool;
use super::schema::guests;

diesel::define_sql_function!(fn lower(value: Text) -> Text);

/// Diesel implementation of the guest ledger store.
#[derive(Clone)]
pub struct DieselGuestRepository {
    pool: DbPool,
}

impl DieselGuestRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GuestRepository for DieselGuestRepository {
    async fn list(&self) -> Result<Vec<Guest>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<GuestRow> = guests::table
            .order(lower(guests::name).asc())
            .select(GuestRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(Guest::try_from).collect()
    }

    async fn find(&self, id: &GuestId) -> Result<Option<Guest>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<GuestRow> = guests::table
            .find(id.as_uuid())
            .select(GuestRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(Guest::try_from).transpose()
    }

    async fn insert(&self, guest: &Guest) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(guests::table)
            .values(GuestRow::from(guest))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn update(&self, guest: &Guest) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::update(guests::table.find(guest.id.as_uuid()))
            .set(GuestRow::from(guest))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn delete(&self, id: &GuestId) -> Result<bool, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::delete(guests::table.find(id.as_uuid()))
            .execute(&mut conn)
            .await
            .map(deleted)
            .map_err(map_diesel_error)
    }
}
