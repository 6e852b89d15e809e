//! Port abstraction for room persistence.
use async_trait::async_trait;

use crate::domain::{Room, RoomNumber};

use super::RepositoryError;

/// Room catalogue storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// Every room ordered by room number.
    async fn list(&self) -> Result<Vec<Room>, RepositoryError>;

    /// Fetch a room by its number.
    async fn find_by_number(&self, number: &RoomNumber) -> Result<Option<Room>, RepositoryError>;

    /// Insert a new room; duplicate numbers surface as [`RepositoryError::Duplicate`].
    async fn insert(&self, room: &Room) -> Result<(), RepositoryError>;

    /// Replace a stored room.
    async fn update(&self, room: &Room) -> Result<(), RepositoryError>;
}
