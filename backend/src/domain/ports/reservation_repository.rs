//! Port abstraction for stay persistence.
use async_trait::async_trait;

use crate::domain::{Reservation, ReservationId};

use super::RepositoryError;

/// Reservation storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Every reservation, newest first.
    async fn list(&self) -> Result<Vec<Reservation>, RepositoryError>;

    /// Fetch a reservation by id.
    async fn find(&self, id: &ReservationId) -> Result<Option<Reservation>, RepositoryError>;

    /// Insert a new reservation.
    async fn insert(&self, reservation: &Reservation) -> Result<(), RepositoryError>;

    /// Replace a stored reservation.
    async fn update(&self, reservation: &Reservation) -> Result<(), RepositoryError>;

    /// Remove a reservation, returning whether a row was deleted.
    async fn delete(&self, id: &ReservationId) -> Result<bool, RepositoryError>;
}
