//! Driving port for the room catalogue and status board.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::{
    BoardFilter, Error, Money, Room, RoomBoard, RoomCategory, RoomChanges, RoomNumber, RoomStatus,
    User,
};

/// New room request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRoom {
    pub number: RoomNumber,
    pub category: RoomCategory,
    pub rate: Money,
    pub status: RoomStatus,
}

/// Room catalogue and housekeeping use cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoomCatalogue: Send + Sync {
    /// Every room ordered by number.
    async fn list_rooms(&self) -> Result<Vec<Room>, Error>;

    /// One room by number; `not_found` when absent.
    async fn get_room(&self, number: &RoomNumber) -> Result<Room, Error>;

    /// Add a room. Admin only.
    async fn create_room(&self, actor: &User, room: NewRoom) -> Result<Room, Error>;

    /// Change a room's rate or category. Admin only.
    async fn update_room(
        &self,
        actor: &User,
        number: &RoomNumber,
        changes: RoomChanges,
    ) -> Result<Room, Error>;

    /// Housekeeping and maintenance status change.
    async fn set_room_status(
        &self,
        actor: &User,
        number: &RoomNumber,
        status: RoomStatus,
    ) -> Result<Room, Error>;

    /// Status board for `date`, defaulting to today.
    async fn board(&self, date: Option<NaiveDate>, filter: BoardFilter) -> Result<RoomBoard, Error>;
}
