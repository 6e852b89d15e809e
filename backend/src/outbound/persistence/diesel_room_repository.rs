//! PostgreSQL-backed [`RoomRepository`].

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{RepositoryError, RoomRepository};
use crate::domain::{Room, RoomNumber};

use super::diesel_helpers::{map_diesel_error, map_pool_error};
use super::models::RoomRow;
use super::pool::DbPool;
use super::schema::rooms;

/// Diesel implementation of the room catalogue store.
#[derive(Clone)]
pub struct DieselRoomRepository {
    pool: DbPool,
}

impl DieselRoomRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoomRepository for DieselRoomRepository {
    async fn list(&self) -> Result<Vec<Room>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<RoomRow> = rooms::table
            .order(rooms::number.asc())
            .select(RoomRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(Room::try_from).collect()
    }

    async fn find_by_number(&self, number: &RoomNumber) -> Result<Option<Room>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<RoomRow> = rooms::table
            .filter(rooms::number.eq(number.as_ref()))
            .select(RoomRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(Room::try_from).transpose()
    }

    async fn insert(&self, room: &Room) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(rooms::table)
            .values(RoomRow::from(room))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn update(&self, room: &Room) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::update(rooms::table.find(room.id.as_uuid()))
            .set(RoomRow::from(room))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }
}
